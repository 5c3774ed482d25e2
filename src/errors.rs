//! Named failure reasons.
//!
//! Every degenerate input the kernel can meet is reported as one of these
//! instead of a silent placeholder value.

use crate::{
    edge::Edge,
    geo::{GeoHandle, HalfEdgeId, PrimId, PtId},
};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum KernelError {
    #[error("point {point} does not exist in geometry {geo}")]
    MissingPoint { geo: GeoHandle, point: PtId },
    #[error("primitive {prim} does not exist in geometry {geo}")]
    MissingPrimitive { geo: GeoHandle, prim: PrimId },
    #[error("primitive {prim} in geometry {geo} has no points")]
    EmptyPrimitive { geo: GeoHandle, prim: PrimId },
    #[error("half-edge {half_edge} in geometry {geo} is not valid")]
    InvalidHalfEdge { geo: GeoHandle, half_edge: HalfEdgeId },
    #[error("edge group {name:?} does not exist in geometry {geo}")]
    UnknownEdgeGroup { geo: GeoHandle, name: String },
    #[error("point id list has odd length {0}, expected pairs")]
    OddPointIdCount(usize),
    #[error("edge {0} has zero length")]
    DegenerateEdge(Edge),
    #[error("{0} is not a line kind code")]
    UnknownLineKind(u8),
    #[error("rotation axis has zero length")]
    ZeroAxis,
    #[error("planes are parallel, no intersection line exists")]
    ParallelPlanes,
}

pub type KernelResult<T> = Result<T, KernelError>;
