//! Operations over edge arrays and flat point-id pair lists.
//!
//! Removal everywhere uses the direction independent equality of
//! [`Edge::is_equal`]: an edge and its reverse are interchangeable.

use itertools::Itertools;

use crate::{
    errors::{KernelError, KernelResult},
    geo::{self, GeoHandle, GeoQuery, PrimId, PtId},
};

use super::{Edge, Endpoint};

pub fn full_name(edges: &[Edge]) -> String {
    edges.iter().join(" ")
}

pub fn to_point_ids(edges: &[Edge]) -> Vec<PtId> {
    edges.iter().flat_map(|e| [e.a(), e.b()]).collect_vec()
}

pub fn first_point_ids(edges: &[Edge]) -> Vec<PtId> {
    edges.iter().map(Edge::a).collect_vec()
}

pub fn second_point_ids(edges: &[Edge]) -> Vec<PtId> {
    edges.iter().map(Edge::b).collect_vec()
}

fn check_pairs(ids: &[PtId]) -> KernelResult<()> {
    if ids.len() % 2 == 0 {
        Ok(())
    } else {
        Err(KernelError::OddPointIdCount(ids.len()))
    }
}

pub fn remove_from_point_ids(ids: &[PtId], edge: &Edge) -> KernelResult<Vec<PtId>> {
    check_pairs(ids)?;
    Ok(ids
        .iter()
        .tuples()
        .filter(|(&a, &b)| !edge.has_points(a, b))
        .flat_map(|(&a, &b)| [a, b])
        .collect_vec())
}

pub fn remove_edge(edges: &[Edge], edge: &Edge) -> Vec<Edge> {
    edges
        .iter()
        .filter(|e| !e.is_equal(edge))
        .copied()
        .collect_vec()
}

pub fn edges_from_point_ids(geo: GeoHandle, ids: &[PtId]) -> KernelResult<Vec<Edge>> {
    check_pairs(ids)?;
    Ok(ids
        .iter()
        .tuples()
        .map(|(&a, &b)| Edge::new(geo, a, b))
        .collect_vec())
}

pub fn edges_from_point(
    src: &impl GeoQuery,
    geo: GeoHandle,
    pt: PtId,
) -> KernelResult<Vec<Edge>> {
    Ok(geo::adjacent_points(src, geo, pt)?
        .into_iter()
        .map(|n| Edge::new(geo, pt, n))
        .collect_vec())
}

/// Boundary edges of a primitive in vertex order. Open primitives have no
/// edge between their last and first point, single point primitives have no
/// edges at all.
pub fn edges_from_primitive(
    src: &impl GeoQuery,
    geo: GeoHandle,
    prim: PrimId,
) -> KernelResult<Vec<Edge>> {
    let points = geo::primitive_points(src, geo, prim)?;
    let closed = src
        .primitive_is_closed(geo, prim)
        .ok_or(KernelError::MissingPrimitive { geo, prim })?;

    let len = points.len();
    let count = match len {
        0 | 1 => 0,
        _ if closed => len,
        _ => len - 1,
    };
    Ok((0..count)
        .map(|i| Edge::new(geo, points[i], points[(i + 1) % len]))
        .collect_vec())
}

pub fn edges_from_edge(src: &impl GeoQuery, edge: &Edge) -> KernelResult<Vec<Edge>> {
    let mut around = edges_from_point(src, edge.geo(), edge.a())?;
    around.extend(edges_from_point(src, edge.geo(), edge.b())?);
    Ok(remove_edge(&around, edge))
}

pub fn edges_from_group(
    src: &impl GeoQuery,
    geo: GeoHandle,
    name: &str,
) -> KernelResult<Vec<Edge>> {
    let ids = src
        .expand_edge_group(geo, name)
        .ok_or_else(|| KernelError::UnknownEdgeGroup {
            geo,
            name: name.to_owned(),
        })?;
    edges_from_point_ids(geo, &ids)
}

// two stable passes, by b then by a
pub fn sort_edges(edges: &[Edge]) -> Vec<Edge> {
    edges
        .iter()
        .map(|e| e.sorted())
        .sorted_by_key(Edge::b)
        .sorted_by_key(Edge::a)
        .collect_vec()
}

/// Edges fanning out from one endpoint of `edge` to all its neighbours
/// except the other endpoint.
pub fn neighbours_excluding(
    src: &impl GeoQuery,
    edge: &Edge,
    from: Endpoint,
) -> KernelResult<Vec<Edge>> {
    let (start, other) = match from {
        Endpoint::A => (edge.a(), edge.b()),
        Endpoint::B => (edge.b(), edge.a()),
    };
    Ok(geo::adjacent_points(src, edge.geo(), start)?
        .into_iter()
        .filter(|&n| n != other)
        .map(|n| Edge::new(edge.geo(), start, n))
        .collect_vec())
}
