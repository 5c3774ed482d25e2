//! Host geometry boundary.
//!
//! The kernel never owns points or primitives. It asks a [`GeoQuery`]
//! implementation for positions, boundaries, adjacency and attributes, always
//! naming the geometry by an explicit [`GeoHandle`].

use std::fmt;

use nalgebra::Vector3;

use crate::errors::{KernelError, KernelResult};

pub mod store;

/// Opaque index of a host geometry ("input").
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Default)]
pub struct GeoHandle(pub usize);

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub struct PtId(pub usize);

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub struct PrimId(pub usize);

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub struct HalfEdgeId(pub usize);

macro_rules! display_index {
    ($($t:ty),*) => {
        $(
            impl fmt::Display for $t {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", self.0)
                }
            }
        )*
    };
}

display_index!(GeoHandle, PtId, PrimId, HalfEdgeId);

/// Read-only queries the kernel needs from the host.
///
/// Every method answers `None` when the host has no answer: an unknown
/// geometry, an out of range element, or (for the normal lookups) a missing
/// attribute.
pub trait GeoQuery {
    fn point_position(&self, geo: GeoHandle, pt: PtId) -> Option<Vector3<f64>>;

    /// Ordered boundary points of a primitive.
    fn primitive_points(&self, geo: GeoHandle, prim: PrimId) -> Option<Vec<PtId>>;

    fn primitive_is_closed(&self, geo: GeoHandle, prim: PrimId) -> Option<bool>;

    /// Points sharing an edge with `pt`.
    fn adjacent_points(&self, geo: GeoHandle, pt: PtId) -> Option<Vec<PtId>>;

    fn primitive_normal(&self, geo: GeoHandle, prim: PrimId) -> Option<Vector3<f64>>;

    fn point_normal(&self, geo: GeoHandle, pt: PtId) -> Option<Vector3<f64>>;

    /// Normal of the `vertex`-th vertex of `prim`.
    fn vertex_normal(&self, geo: GeoHandle, prim: PrimId, vertex: usize)
        -> Option<Vector3<f64>>;

    /// Flat `[a0, b0, a1, b1, ..]` point pairs of a named edge group.
    fn expand_edge_group(&self, geo: GeoHandle, name: &str) -> Option<Vec<PtId>>;

    fn half_edge_source(&self, geo: GeoHandle, hedge: HalfEdgeId) -> Option<PtId>;

    fn half_edge_destination(&self, geo: GeoHandle, hedge: HalfEdgeId) -> Option<PtId>;

    /// Half-edge running from `from` to `to`, direction sensitive.
    fn half_edge_between(&self, geo: GeoHandle, from: PtId, to: PtId) -> Option<HalfEdgeId>;
}

pub(crate) fn position(
    src: &impl GeoQuery,
    geo: GeoHandle,
    point: PtId,
) -> KernelResult<Vector3<f64>> {
    src.point_position(geo, point)
        .ok_or(KernelError::MissingPoint { geo, point })
}

pub(crate) fn primitive_points(
    src: &impl GeoQuery,
    geo: GeoHandle,
    prim: PrimId,
) -> KernelResult<Vec<PtId>> {
    src.primitive_points(geo, prim)
        .ok_or(KernelError::MissingPrimitive { geo, prim })
}

pub(crate) fn adjacent_points(
    src: &impl GeoQuery,
    geo: GeoHandle,
    point: PtId,
) -> KernelResult<Vec<PtId>> {
    src.adjacent_points(geo, point)
        .ok_or(KernelError::MissingPoint { geo, point })
}
