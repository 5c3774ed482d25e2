//! Edge, line and plane primitives over a host geometry model.
//!
//! The host owns points, primitives and attributes and is reached through
//! [`geo::GeoQuery`]. Everything here is a value type computed from what the
//! host exposes; nothing is written back.

pub mod angle;
pub mod edge;
pub mod errors;
pub mod geo;
pub mod linear;
pub mod planar;
pub mod primitives_relation;
pub mod reversable;
pub mod tolerance;
pub mod vecmath;

pub use angle::Angle;
pub use edge::{Edge, Endpoint};
pub use errors::KernelError;
pub use geo::{GeoHandle, GeoQuery, HalfEdgeId, PrimId, PtId};
pub use linear::line::{Line, LineKind};
pub use planar::plane::{NormalSource, Plane, ResolvedPlane};
pub use primitives_relation::relation::Relation;
pub use reversable::Reversable;

#[cfg(test)]
pub(crate) fn init_test_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
