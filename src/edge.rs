use std::{
    f64::consts::{PI, TAU},
    fmt,
};

use nalgebra::{UnitQuaternion, Vector3};
use tap::TapFallible;

use crate::{
    angle::Angle,
    errors::{KernelError, KernelResult},
    geo::{self, GeoHandle, GeoQuery, HalfEdgeId, PtId},
    reversable::Reversable,
};

pub mod collection;

/// Directed connection between two points of one host geometry.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    geo: GeoHandle,
    a: PtId,
    b: PtId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    A,
    B,
}

impl fmt::Debug for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "edge between points {} and {}, at input {}",
            self.a, self.b, self.geo
        )
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}_{}", self.a, self.b)
    }
}

impl Reversable for Edge {
    fn flip(mut self) -> Self {
        self.swap();
        self
    }
}

impl Edge {
    pub fn new(geo: GeoHandle, a: PtId, b: PtId) -> Self {
        Self { geo, a, b }
    }

    /// Resolves a host half-edge into its source and destination points.
    pub fn from_half_edge(
        src: &impl GeoQuery,
        geo: GeoHandle,
        half_edge: HalfEdgeId,
    ) -> KernelResult<Self> {
        let a = src.half_edge_source(geo, half_edge);
        let b = src.half_edge_destination(geo, half_edge);
        a.zip(b)
            .map(|(a, b)| Self::new(geo, a, b))
            .ok_or(KernelError::InvalidHalfEdge { geo, half_edge })
            .tap_err(|err| log::warn!("edge from half-edge: {err}"))
    }

    pub fn geo(&self) -> GeoHandle {
        self.geo
    }

    pub fn a(&self) -> PtId {
        self.a
    }

    pub fn b(&self) -> PtId {
        self.b
    }

    pub fn endpoint(&self, which: Endpoint) -> PtId {
        match which {
            Endpoint::A => self.a,
            Endpoint::B => self.b,
        }
    }

    pub fn set_a(&mut self, a: PtId) {
        self.a = a;
    }

    pub fn set_b(&mut self, b: PtId) {
        self.b = b;
    }

    /// Same points, looked up in another geometry.
    pub fn with_geo(mut self, geo: GeoHandle) -> Self {
        self.geo = geo;
        self
    }

    pub fn swap(&mut self) {
        std::mem::swap(&mut self.a, &mut self.b);
    }

    /// `true` if `a > b`.
    pub fn compare(&self) -> bool {
        self.a > self.b
    }

    /// The edge with `a <= b`.
    pub fn sorted(self) -> Self {
        if self.compare() {
            self.flip()
        } else {
            self
        }
    }

    /// Same geometry and same points, in either order.
    pub fn is_equal(&self, other: &Edge) -> bool {
        self.geo == other.geo && self.has_points(other.a, other.b)
    }

    pub(crate) fn has_points(&self, a: PtId, b: PtId) -> bool {
        (self.a == a && self.b == b) || (self.a == b && self.b == a)
    }

    pub fn has(&self, pt: PtId) -> bool {
        self.a == pt || self.b == pt
    }

    pub fn pos_a(&self, src: &impl GeoQuery) -> KernelResult<Vector3<f64>> {
        self.pos_a_in(src, self.geo)
    }

    pub fn pos_b(&self, src: &impl GeoQuery) -> KernelResult<Vector3<f64>> {
        self.pos_b_in(src, self.geo)
    }

    /// Position of point a in `geo` instead of the edge's own geometry.
    pub fn pos_a_in(&self, src: &impl GeoQuery, geo: GeoHandle) -> KernelResult<Vector3<f64>> {
        geo::position(src, geo, self.a)
    }

    pub fn pos_b_in(&self, src: &impl GeoQuery, geo: GeoHandle) -> KernelResult<Vector3<f64>> {
        geo::position(src, geo, self.b)
    }

    pub fn vector_ab(&self, src: &impl GeoQuery) -> KernelResult<Vector3<f64>> {
        Ok(self.pos_b(src)? - self.pos_a(src)?)
    }

    pub fn vector_ba(&self, src: &impl GeoQuery) -> KernelResult<Vector3<f64>> {
        Ok(self.pos_a(src)? - self.pos_b(src)?)
    }

    pub fn vector_ab_n(&self, src: &impl GeoQuery) -> KernelResult<Vector3<f64>> {
        self.vector_ab(src)?
            .try_normalize(0.0)
            .ok_or(KernelError::DegenerateEdge(*self))
    }

    pub fn vector_ba_n(&self, src: &impl GeoQuery) -> KernelResult<Vector3<f64>> {
        Ok(-self.vector_ab_n(src)?)
    }

    pub fn length(&self, src: &impl GeoQuery) -> KernelResult<f64> {
        Ok(self.vector_ab(src)?.magnitude())
    }

    pub fn midpoint(&self, src: &impl GeoQuery) -> KernelResult<Vector3<f64>> {
        Ok((self.pos_a(src)? + self.pos_b(src)?) * 0.5)
    }

    pub fn dot(&self, other: &Edge, src: &impl GeoQuery) -> KernelResult<f64> {
        Ok(self.vector_ab(src)?.dot(&other.vector_ab(src)?))
    }

    /// Dot product of both directions, each normalized first.
    pub fn dot_n(&self, other: &Edge, src: &impl GeoQuery) -> KernelResult<f64> {
        Ok(self.vector_ab_n(src)?.dot(&other.vector_ab_n(src)?))
    }

    /// Unsigned angle between both edges as direction vectors.
    pub fn angle(&self, other: &Edge, src: &impl GeoQuery) -> KernelResult<Angle> {
        let cos = self.dot_n(other, src)?.clamp(-1.0, 1.0);
        Ok(Angle::from_rad(cos.acos()))
    }

    /// Signed turn from `self` to `other` measured around `axis`, right-hand
    /// rule, in (-π, π].
    ///
    /// Both directions are rotated into the frame where `axis` is world up
    /// (+Y) and compared by their heading in the XZ plane. Components along
    /// the axis are ignored.
    pub fn angle_around(
        &self,
        other: &Edge,
        axis: &Vector3<f64>,
        src: &impl GeoQuery,
    ) -> KernelResult<Angle> {
        let axis = axis.try_normalize(0.0).ok_or(KernelError::ZeroAxis)?;
        let to_up = UnitQuaternion::rotation_between(&axis, &Vector3::y())
            .unwrap_or_else(|| UnitQuaternion::from_axis_angle(&Vector3::x_axis(), PI));

        let a = to_up * self.vector_ab_n(src)?;
        let b = to_up * other.vector_ab_n(src)?;

        let turn = (b.x.atan2(b.z) - a.x.atan2(a.z)).rem_euclid(TAU);
        let turn = if turn > PI { turn - TAU } else { turn };
        Ok(Angle::from_rad(turn))
    }

    /// Host half-edge running from a to b.
    pub fn half_edge(&self, src: &impl GeoQuery) -> Option<HalfEdgeId> {
        src.half_edge_between(self.geo, self.a, self.b)
    }

    /// Host half-edge between a and b in either direction.
    pub fn any_half_edge(&self, src: &impl GeoQuery) -> Option<HalfEdgeId> {
        self.half_edge(src)
            .or_else(|| src.half_edge_between(self.geo, self.b, self.a))
    }
}
