use nalgebra::Vector3;

use crate::{angle::Angle, tolerance::is_equal};

/// Dot product of `u` and `v`, both normalized beforehand.
pub fn dot_n(u: &Vector3<f64>, v: &Vector3<f64>) -> f64 {
    u.normalize().dot(&v.normalize())
}

pub fn angle_between_vectors(u: &Vector3<f64>, v: &Vector3<f64>) -> Angle {
    let cos = u.dot(v) / (u.magnitude() * v.magnitude());
    Angle::from_rad(cos.clamp(-1.0, 1.0).acos())
}

/// Area of the triangle `abc` from its squared side lengths.
pub fn triangle_area(a: &Vector3<f64>, b: &Vector3<f64>, c: &Vector3<f64>) -> f64 {
    let ab = (b - a).magnitude_squared();
    let bc = (c - b).magnitude_squared();
    let ca = (a - c).magnitude_squared();
    0.25 * (2.0 * bc * ca + 2.0 * ca * ab + 2.0 * ab * bc - ab * ab - bc * bc - ca * ca)
        .max(0.0)
        .sqrt()
}

pub fn is_equal_vec(u: &Vector3<f64>, v: &Vector3<f64>, tolerance: f64) -> bool {
    (u - v).magnitude() < tolerance
}

/// `true` when the lengths of `u` and `v` differ by less than `tolerance`.
/// Directions are ignored.
pub fn same_length(u: &Vector3<f64>, v: &Vector3<f64>, tolerance: f64) -> bool {
    is_equal(u.magnitude(), v.magnitude(), tolerance)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use nalgebra::Vector3;

    use super::{angle_between_vectors, dot_n, is_equal_vec, same_length, triangle_area};

    #[test]
    fn vector_angle() {
        let a = angle_between_vectors(&Vector3::y(), &(Vector3::x() * 3.0));
        assert_abs_diff_eq!(a.deg(), 90.0, epsilon = 1e-9);
        assert_abs_diff_eq!(dot_n(&(Vector3::x() * 4.0), &Vector3::new(1.0, 1.0, 0.0)), 0.5f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn parallel_vectors_stay_finite() {
        for i in 0..2000 {
            let n = Vector3::new(0.1 * i as f64, 0.37 * i as f64 + 0.3, 0.71);
            let along = angle_between_vectors(&(n * 3.0), &n);
            let against = angle_between_vectors(&(n * -3.0), &n);
            assert!(!along.is_nan() && !against.is_nan(), "{n:?}");
            assert_abs_diff_eq!(along.deg(), 0.0, epsilon = 1e-5);
            assert_abs_diff_eq!(against.deg(), 180.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn right_triangle_area() {
        let area = triangle_area(
            &Vector3::zeros(),
            &Vector3::new(4.0, 0.0, 0.0),
            &Vector3::new(0.0, 3.0, 0.0),
        );
        assert_abs_diff_eq!(area, 6.0, epsilon = 1e-9);

        let flat = triangle_area(&Vector3::zeros(), &Vector3::x(), &(Vector3::x() * 2.0));
        assert_abs_diff_eq!(flat, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn tolerant_vector_equality() {
        let u = Vector3::new(1.001, 1.0, 1.0);
        let v = Vector3::new(1.0, 1.0, 1.0);
        assert!(!is_equal_vec(&u, &v, 0.0));
        assert!(!is_equal_vec(&u, &v, 0.0001));
        assert!(is_equal_vec(&u, &v, 0.0011));

        assert!(same_length(&Vector3::x(), &Vector3::y(), 1e-9));
        assert!(!is_equal_vec(&Vector3::x(), &Vector3::y(), 1e-9));
    }
}
