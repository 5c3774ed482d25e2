use nalgebra::Vector3;

use crate::{
    linear::line::{Line, LineKind},
    planar::plane::Plane,
    tolerance::{is_zero, tolerances},
};

use super::relation::Relation;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LinePlaneIntersection {
    /// Never meets the plane.
    Parallel,
    /// Crosses the plane within the part its kind covers.
    Point(Vector3<f64>),
    /// Lies in the plane.
    Embedded,
    /// The infinite extension crosses the plane at this point, the line
    /// itself does not.
    OutsideExtent(Vector3<f64>),
}

impl LinePlaneIntersection {
    pub fn status(&self) -> u8 {
        match self {
            Self::Parallel => 0,
            Self::Point(_) => 1,
            Self::Embedded => 2,
            Self::OutsideExtent(_) => 3,
        }
    }

    pub fn point(&self) -> Option<Vector3<f64>> {
        match self {
            Self::Point(p) | Self::OutsideExtent(p) => Some(*p),
            Self::Parallel | Self::Embedded => None,
        }
    }
}

impl Relation<Plane> for Line {
    type Relate = LinePlaneIntersection;

    fn relate(&self, to: &Plane) -> Self::Relate {
        let tol = tolerances();
        let n = to.normal();
        let dir = self.direction();
        let len = dir.magnitude();

        let along = n.dot(&dir);
        let offset = -n.dot(&(self.pos_a() - to.point_on_plane()));

        if len == 0.0 || is_zero(along / len, tol.line_plane_parallel) {
            return if is_zero(offset, tol.on_plane) {
                LinePlaneIntersection::Embedded
            } else {
                LinePlaneIntersection::Parallel
            };
        }

        let s = offset / along;
        let point = self.pos_a() + dir * s;
        let inside = match self.kind() {
            LineKind::Segment => (0.0..=1.0).contains(&s),
            LineKind::RayFromATowardB => s >= 0.0,
            LineKind::RayFromBTowardA => s <= 1.0,
            LineKind::InfiniteLine => true,
        };

        if inside {
            LinePlaneIntersection::Point(point)
        } else {
            LinePlaneIntersection::OutsideExtent(point)
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;
    use nalgebra::Vector3;

    use crate::{
        linear::line::{Line, LineKind},
        planar::plane::Plane,
        primitives_relation::relation::Relation,
    };

    use super::LinePlaneIntersection;

    fn v(x: f64, y: f64, z: f64) -> Vector3<f64> {
        Vector3::new(x, y, z)
    }

    fn floor() -> Plane {
        Plane::new(v(0.0, 0.0, 4.0), v(1.0, 1.0, 0.0))
    }

    #[test]
    fn segment_crossing() {
        let segment = Line::segment(v(1.0, 2.0, -1.0), v(1.0, 2.0, 3.0));
        let hit = floor().intersect_line(&segment);
        assert_eq!(hit.status(), 1);
        let p = assert_matches!(hit, LinePlaneIntersection::Point(p) => p);
        assert_abs_diff_eq!(p, v(1.0, 2.0, 0.0), epsilon = 1e-12);

        let short = Line::segment(v(1.0, 2.0, 1.0), v(1.0, 2.0, 3.0));
        let miss = short.relate(&floor());
        assert_eq!(miss.status(), 3);
        assert_abs_diff_eq!(miss.point().unwrap(), v(1.0, 2.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn ray_extents() {
        let (a, b) = (v(0.0, 0.0, 1.0), v(0.0, 0.0, 2.0));
        let from_a = Line::new(a, b, LineKind::RayFromATowardB);
        let from_b = Line::new(a, b, LineKind::RayFromBTowardA);
        assert_matches!(from_a.relate(&floor()), LinePlaneIntersection::OutsideExtent(_));
        assert_matches!(from_b.relate(&floor()), LinePlaneIntersection::Point(_));
        assert_matches!(
            Line::infinite(a, b).relate(&floor()),
            LinePlaneIntersection::Point(_)
        );

        let up = Plane::new(v(0.0, 0.0, 1.0), v(0.0, 0.0, 5.0));
        assert_matches!(from_a.relate(&up), LinePlaneIntersection::Point(_));
        assert_matches!(from_b.relate(&up), LinePlaneIntersection::OutsideExtent(_));
    }

    #[test]
    fn parallel_and_embedded() {
        let above = Line::segment(v(0.0, 0.0, 1.0), v(5.0, 3.0, 1.0));
        let inside = Line::segment(v(0.0, 0.0, 0.0), v(5.0, 3.0, 0.0));

        assert_eq!(above.relate(&floor()), LinePlaneIntersection::Parallel);
        assert_eq!(above.relate(&floor()).status(), 0);
        assert_eq!(inside.relate(&floor()), LinePlaneIntersection::Embedded);
        assert_eq!(inside.relate(&floor()).status(), 2);
        assert!(floor().contains_line(&inside));

        let point = v(2.0, 2.0, 0.0);
        assert_eq!(
            Line::segment(point, point).relate(&floor()),
            LinePlaneIntersection::Embedded
        );
    }
}
