use std::fmt;

use nalgebra::Vector3;
use tap::TapFallible;

use crate::{
    angle::Angle,
    errors::{KernelError, KernelResult},
    geo::{self, GeoHandle, GeoQuery, PrimId, PtId},
    linear::line::Line,
    primitives_relation::{linear_planar::LinePlaneIntersection, relation::Relation},
    reversable::Reversable,
    tolerance::tolerances,
    vecmath::angle_between_vectors,
};

/// Plane through `pos`. The stored normal may have any length, readers get
/// it normalized.
#[derive(Clone, Copy, PartialEq)]
pub struct Plane {
    normal: Vector3<f64>,
    pos: Vector3<f64>,
}

/// Where [`Plane::from_primitive`] took the normal from, in probing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalSource {
    Primitive,
    Point,
    Vertex,
    /// Cross product of the first three boundary points.
    Generated,
    /// Nothing usable, `+Y` was taken.
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedPlane {
    pub plane: Plane,
    pub source: NormalSource,
}

impl fmt::Debug for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.normal();
        write!(
            f,
            "{:.4}x {:.4}y {:.4}z through {:.4} {:.4} {:.4}",
            n.x, n.y, n.z, self.pos.x, self.pos.y, self.pos.z
        )
    }
}

impl Reversable for Plane {
    fn flip(mut self) -> Self {
        self.normal = -self.normal;
        self
    }
}

impl Plane {
    pub fn new(normal: Vector3<f64>, pos: Vector3<f64>) -> Self {
        Self { normal, pos }
    }

    pub fn normal(&self) -> Vector3<f64> {
        self.normal.normalize()
    }

    pub fn raw_normal(&self) -> Vector3<f64> {
        self.normal
    }

    pub fn point_on_plane(&self) -> Vector3<f64> {
        self.pos
    }

    /// Plane of a primitive, positioned at its first boundary point.
    ///
    /// The normal comes from the first available of: primitive attribute,
    /// point attribute of the first point, vertex attribute of vertex 0,
    /// cross product of the first three points, `+Y`.
    pub fn from_primitive(
        src: &impl GeoQuery,
        geo: GeoHandle,
        prim: PrimId,
    ) -> KernelResult<ResolvedPlane> {
        let points = geo::primitive_points(src, geo, prim)?;
        let first = *points
            .first()
            .ok_or(KernelError::EmptyPrimitive { geo, prim })?;
        let pos = geo::position(src, geo, first)?;

        let (normal, source) = if let Some(n) = src.primitive_normal(geo, prim) {
            (n, NormalSource::Primitive)
        } else if let Some(n) = src.point_normal(geo, first) {
            (n, NormalSource::Point)
        } else if let Some(n) = src.vertex_normal(geo, prim, 0) {
            (n, NormalSource::Vertex)
        } else {
            Self::generated_normal(src, geo, prim, &points)?
        };

        Ok(ResolvedPlane {
            plane: Self::new(normal, pos),
            source,
        })
    }

    fn generated_normal(
        src: &impl GeoQuery,
        geo: GeoHandle,
        prim: PrimId,
        points: &[PtId],
    ) -> KernelResult<(Vector3<f64>, NormalSource)> {
        if let [p0, p1, p2, ..] = points {
            let p0 = geo::position(src, geo, *p0)?;
            let p1 = geo::position(src, geo, *p1)?;
            let p2 = geo::position(src, geo, *p2)?;
            let (u, w) = (p1 - p0, p0 - p2);
            let scale = u.magnitude() * w.magnitude();
            if let Some(n) = u.cross(&w).try_normalize(scale * f64::EPSILON) {
                log::warn!("primitive {prim} of geometry {geo} has no normal attribute, generated one from its points");
                return Ok((n, NormalSource::Generated));
            }
        }
        log::warn!("cannot derive a normal for primitive {prim} of geometry {geo}, using +Y");
        Ok((Vector3::y(), NormalSource::Fallback))
    }

    pub fn signed_distance(&self, point: &Vector3<f64>) -> f64 {
        (point - self.pos).dot(&self.normal())
    }

    pub fn signed_distance_to_point(
        &self,
        src: &impl GeoQuery,
        geo: GeoHandle,
        pt: PtId,
    ) -> KernelResult<f64> {
        Ok(self.signed_distance(&geo::position(src, geo, pt)?))
    }

    pub fn contains_line(&self, line: &Line) -> bool {
        let tol = tolerances().on_plane;
        self.signed_distance(&line.pos_a()).abs() < tol
            && self.signed_distance(&line.pos_b()).abs() < tol
    }

    pub fn intersect_line(&self, line: &Line) -> LinePlaneIntersection {
        line.relate(self)
    }

    /// Orientation only: parallel planes may be far apart.
    pub fn is_parallel(&self, other: &Plane) -> bool {
        let n1 = self.normal();
        let n2 = other.normal();
        n1.dot(&n2.cross(&n1.cross(&n2))).abs() < tolerances().plane_parallel
    }

    pub fn intersect(&self, other: &Plane) -> KernelResult<Line> {
        (!self.is_parallel(other))
            .then(|| self.intersection_line(other))
            .ok_or(KernelError::ParallelPlanes)
            .tap_err(|_| log::warn!("planes {self:?} and {other:?} are parallel"))
    }

    /// Infinite line shared by two non parallel planes.
    pub(crate) fn intersection_line(&self, other: &Plane) -> Line {
        let n1 = self.normal();
        let n2 = other.normal();
        let d1 = n1.dot(&self.pos);
        let d2 = n2.dot(&other.pos);

        let dir = n1.cross(&n2);
        let origin = (n2.cross(&dir) * d1 + dir.cross(&n1) * d2) / dir.magnitude_squared();
        Line::infinite(origin, origin + dir)
    }

    /// Angle between the line direction and the plane normal.
    pub fn angle_to_line(&self, line: &Line) -> Angle {
        angle_between_vectors(&line.direction(), &self.normal())
    }
}

#[cfg(test)]
mod tests {
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use assert_matches::assert_matches;
    use nalgebra::Vector3;
    use rand::Rng;

    use crate::{
        errors::KernelError,
        geo::{
            store::{Detail, GeoStore},
            GeoHandle, PrimId, PtId,
        },
        linear::line::{Line, LineKind},
        reversable::Reversable,
    };

    use super::{NormalSource, Plane};

    fn v(x: f64, y: f64, z: f64) -> Vector3<f64> {
        Vector3::new(x, y, z)
    }

    #[test]
    fn signed_distances() -> anyhow::Result<()> {
        let plane = Plane::new(v(0.0, 0.0, 2.0), Vector3::zeros());
        assert_relative_eq!(plane.signed_distance(&v(1.0, 1.0, 5.0)), 5.0);
        assert_relative_eq!(plane.signed_distance(&v(0.0, 0.0, -3.0)), -3.0);
        assert_relative_eq!(plane.flip().signed_distance(&v(0.0, 0.0, -3.0)), 3.0);
        assert_relative_eq!(plane.raw_normal().z, 2.0);

        let mut d = Detail::default();
        let p = d.add_point(v(4.0, -2.0, 5.0));
        let mut store = GeoStore::default();
        let geo = store.add_detail(d);
        assert_relative_eq!(plane.signed_distance_to_point(&store, geo, p)?, 5.0);
        assert_matches!(
            plane.signed_distance_to_point(&store, geo, PtId(1)),
            Err(KernelError::MissingPoint { .. })
        );
        Ok(())
    }

    fn triangle_store() -> (Detail, PrimId, Vec<PtId>) {
        let mut d = Detail::default();
        let p = d.add_points([v(0.0, 1.0, 0.0), v(1.0, 1.0, 0.0), v(0.0, 1.0, 1.0)]);
        let prim = d.add_polygon(&p);
        (d, prim, p)
    }

    fn resolve(d: Detail, prim: PrimId) -> anyhow::Result<(Plane, NormalSource)> {
        let mut store = GeoStore::default();
        let geo = store.add_detail(d);
        let resolved = Plane::from_primitive(&store, geo, prim)?;
        Ok((resolved.plane, resolved.source))
    }

    #[test]
    fn normal_chain_prefers_attributes() -> anyhow::Result<()> {
        crate::init_test_logger();

        let (mut d, prim, p) = triangle_store();
        d.set_vertex_normal(prim, 0, v(0.0, 0.0, 3.0));
        d.set_point_normal(p[0], v(0.0, 2.0, 0.0));
        d.set_prim_normal(prim, v(1.0, 0.0, 0.0));
        let (plane, source) = resolve(d.clone(), prim)?;
        assert_eq!(source, NormalSource::Primitive);
        assert_abs_diff_eq!(plane.normal(), v(1.0, 0.0, 0.0));
        assert_abs_diff_eq!(plane.point_on_plane(), v(0.0, 1.0, 0.0));

        let (mut d, prim, p) = triangle_store();
        d.set_vertex_normal(prim, 0, v(0.0, 0.0, 3.0));
        d.set_point_normal(p[0], v(0.0, 2.0, 0.0));
        assert_eq!(resolve(d, prim)?.1, NormalSource::Point);

        let (mut d, prim, _) = triangle_store();
        d.set_vertex_normal(prim, 0, v(0.0, 0.0, 3.0));
        let (plane, source) = resolve(d, prim)?;
        assert_eq!(source, NormalSource::Vertex);
        assert_abs_diff_eq!(plane.normal(), v(0.0, 0.0, 1.0));
        Ok(())
    }

    #[test]
    fn generated_and_fallback_normals() -> anyhow::Result<()> {
        crate::init_test_logger();

        let (d, prim, _) = triangle_store();
        let (plane, source) = resolve(d, prim)?;
        assert_eq!(source, NormalSource::Generated);
        assert_abs_diff_eq!(plane.normal(), v(0.0, 1.0, 0.0), epsilon = 1e-12);

        let mut d = Detail::default();
        let p = d.add_points([v(0.0, 0.0, 0.0), v(1e-8, 0.0, 0.0), v(0.0, 0.0, 1e-8)]);
        let prim = d.add_polygon(&p);
        let (plane, source) = resolve(d, prim)?;
        assert_eq!(source, NormalSource::Generated);
        assert_abs_diff_eq!(plane.normal(), v(0.0, 1.0, 0.0), epsilon = 1e-12);

        let mut d = Detail::default();
        let p = d.add_points([v(3.0, 0.0, 0.0), v(0.0, 0.0, 7.0)]);
        let prim = d.add_polyline(&p);
        let (plane, source) = resolve(d, prim)?;
        assert_eq!(source, NormalSource::Fallback);
        assert_eq!(plane.normal(), v(0.0, 1.0, 0.0));

        let mut d = Detail::default();
        let p = d.add_points([v(0.0, 0.0, 0.0), v(1.0, 0.0, 0.0), v(2.0, 0.0, 0.0)]);
        let prim = d.add_polyline(&p);
        assert_eq!(resolve(d, prim)?.1, NormalSource::Fallback);
        Ok(())
    }

    #[test]
    fn broken_primitives() {
        let mut d = Detail::default();
        let empty = d.add_polygon(&[]);
        let mut store = GeoStore::default();
        let geo = store.add_detail(d);

        assert_matches!(
            Plane::from_primitive(&store, geo, empty),
            Err(KernelError::EmptyPrimitive { .. })
        );
        assert_matches!(
            Plane::from_primitive(&store, geo, PrimId(3)),
            Err(KernelError::MissingPrimitive { .. })
        );
        assert_matches!(
            Plane::from_primitive(&store, GeoHandle(5), PrimId(0)),
            Err(KernelError::MissingPrimitive { .. })
        );
    }

    #[test]
    fn plane_intersection_lies_on_both_planes() -> anyhow::Result<()> {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let mut r = || {
                v(
                    rng.gen_range(-3.0..3.0),
                    rng.gen_range(-3.0..3.0),
                    rng.gen_range(-3.0..3.0),
                )
            };
            let first = Plane::new(r(), r());
            let second = Plane::new(r(), r());
            if first.normal().cross(&second.normal()).magnitude() < 0.1 {
                continue;
            }
            let line = first.intersect(&second)?;
            assert_eq!(line.kind(), LineKind::InfiniteLine);
            for p in [line.pos_a(), line.pos_b()] {
                assert_abs_diff_eq!(first.signed_distance(&p), 0.0, epsilon = 1e-4);
                assert_abs_diff_eq!(second.signed_distance(&p), 0.0, epsilon = 1e-4);
            }
            assert!(first.contains_line(&line));
            assert!(second.contains_line(&line));
        }
        Ok(())
    }

    #[test]
    fn parallel_planes() {
        crate::init_test_logger();

        let up = Plane::new(v(0.0, 0.0, 1.0), Vector3::zeros());
        let down = Plane::new(v(0.0, 0.0, -1.0), v(0.0, 0.0, 4.0));
        assert!(up.is_parallel(&down));
        assert!(up.is_parallel(&up.flip()));
        assert_matches!(up.intersect(&down), Err(KernelError::ParallelPlanes));

        let side = Plane::new(v(1.0, 0.0, 0.0), v(2.0, 0.0, 0.0));
        assert!(!up.is_parallel(&side));
        let line = up.intersect(&side).unwrap();
        assert_abs_diff_eq!(line.direction_n().dot(&Vector3::y()).abs(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn line_membership_and_angle() {
        let plane = Plane::new(v(0.0, 0.0, 1.0), v(0.0, 0.0, 1.0));
        let flat = Line::segment(v(0.0, 0.0, 1.0), v(5.0, 3.0, 1.0));
        let tilted = Line::new(v(0.0, 0.0, 0.0), v(1.0, 0.0, 1.0), LineKind::InfiniteLine);

        assert!(plane.contains_line(&flat));
        assert!(!plane.contains_line(&tilted));
        assert_relative_eq!(plane.angle_to_line(&flat).deg(), 90.0);
        assert_relative_eq!(plane.angle_to_line(&tilted).deg(), 45.0, epsilon = 1e-9);
    }

    #[test]
    fn lines_along_the_normal() {
        for i in 0..2000 {
            let n = v(0.1 * i as f64, 0.37 * i as f64 + 0.3, 0.71);
            let plane = Plane::new(n, Vector3::zeros());
            let along = Line::segment(Vector3::zeros(), n * 3.0);

            let angle = plane.angle_to_line(&along);
            assert!(!angle.is_nan(), "normal {n:?}");
            assert_abs_diff_eq!(angle.deg(), 0.0, epsilon = 1e-5);
            assert_abs_diff_eq!(plane.angle_to_line(&along.flip()).deg(), 180.0, epsilon = 1e-5);
        }
    }
}
