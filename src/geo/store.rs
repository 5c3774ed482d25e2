//! In-memory host geometry.
//!
//! [`GeoStore`] keeps one [`Detail`] per handle and answers [`GeoQuery`]
//! from it. Adjacency is derived from primitive boundaries; half-edge ids are
//! global vertex numbers in primitive order.

use std::collections::{BTreeSet, HashMap};

use itertools::Itertools;
use nalgebra::Vector3;

use super::{GeoHandle, GeoQuery, HalfEdgeId, PrimId, PtId};

#[derive(Debug, Clone)]
struct Prim {
    points: Vec<PtId>,
    closed: bool,
}

impl Prim {
    /// Boundary point pairs, wrapping around for closed primitives.
    fn sides(&self) -> impl Iterator<Item = (PtId, PtId)> + '_ {
        let len = self.points.len();
        let count = match len {
            0 | 1 => 0,
            _ if self.closed => len,
            _ => len - 1,
        };
        (0..count).map(move |i| (self.points[i], self.points[(i + 1) % len]))
    }
}

#[derive(Default, Debug, Clone)]
pub struct Detail {
    points: Vec<Vector3<f64>>,
    prims: Vec<Prim>,
    prim_normals: HashMap<PrimId, Vector3<f64>>,
    point_normals: HashMap<PtId, Vector3<f64>>,
    vertex_normals: HashMap<(PrimId, usize), Vector3<f64>>,
    edge_groups: HashMap<String, Vec<PtId>>,
}

impl Detail {
    pub fn add_point(&mut self, position: Vector3<f64>) -> PtId {
        self.points.push(position);
        PtId(self.points.len() - 1)
    }

    pub fn add_points(&mut self, positions: impl IntoIterator<Item = Vector3<f64>>) -> Vec<PtId> {
        positions.into_iter().map(|p| self.add_point(p)).collect()
    }

    pub fn add_prim(&mut self, points: &[PtId], closed: bool) -> PrimId {
        self.prims.push(Prim {
            points: points.to_vec(),
            closed,
        });
        PrimId(self.prims.len() - 1)
    }

    pub fn add_polygon(&mut self, points: &[PtId]) -> PrimId {
        self.add_prim(points, true)
    }

    pub fn add_polyline(&mut self, points: &[PtId]) -> PrimId {
        self.add_prim(points, false)
    }

    pub fn set_prim_normal(&mut self, prim: PrimId, normal: Vector3<f64>) {
        self.prim_normals.insert(prim, normal);
    }

    pub fn set_point_normal(&mut self, pt: PtId, normal: Vector3<f64>) {
        self.point_normals.insert(pt, normal);
    }

    pub fn set_vertex_normal(&mut self, prim: PrimId, vertex: usize, normal: Vector3<f64>) {
        self.vertex_normals.insert((prim, vertex), normal);
    }

    /// Stores a named edge group as flat point pairs.
    pub fn add_edge_group(&mut self, name: impl Into<String>, pairs: &[(PtId, PtId)]) {
        let flat = pairs.iter().flat_map(|&(a, b)| [a, b]).collect_vec();
        self.edge_groups.insert(name.into(), flat);
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn prim_count(&self) -> usize {
        self.prims.len()
    }

    fn prim(&self, prim: PrimId) -> Option<&Prim> {
        self.prims.get(prim.0)
    }

    /// Maps a global vertex number to its primitive and position inside it.
    fn locate_vertex(&self, hedge: HalfEdgeId) -> Option<(&Prim, usize)> {
        let mut offset = 0;
        for prim in &self.prims {
            let len = prim.points.len();
            if hedge.0 < offset + len {
                return Some((prim, hedge.0 - offset));
            }
            offset += len;
        }
        None
    }

    fn neighbours(&self, pt: PtId) -> Option<Vec<PtId>> {
        if pt.0 >= self.points.len() {
            return None;
        }
        let set: BTreeSet<PtId> = self
            .prims
            .iter()
            .flat_map(|p| p.sides())
            .filter_map(|(a, b)| {
                if a == pt && b != pt {
                    Some(b)
                } else if b == pt && a != pt {
                    Some(a)
                } else {
                    None
                }
            })
            .collect();
        Some(set.into_iter().collect())
    }
}

#[derive(Default, Debug, Clone)]
pub struct GeoStore {
    details: Vec<Detail>,
}

impl GeoStore {
    pub fn add_detail(&mut self, detail: Detail) -> GeoHandle {
        self.details.push(detail);
        GeoHandle(self.details.len() - 1)
    }

    pub fn detail(&self, geo: GeoHandle) -> Option<&Detail> {
        self.details.get(geo.0)
    }

    pub fn detail_mut(&mut self, geo: GeoHandle) -> Option<&mut Detail> {
        self.details.get_mut(geo.0)
    }
}

impl GeoQuery for GeoStore {
    fn point_position(&self, geo: GeoHandle, pt: PtId) -> Option<Vector3<f64>> {
        self.detail(geo)?.points.get(pt.0).copied()
    }

    fn primitive_points(&self, geo: GeoHandle, prim: PrimId) -> Option<Vec<PtId>> {
        Some(self.detail(geo)?.prim(prim)?.points.clone())
    }

    fn primitive_is_closed(&self, geo: GeoHandle, prim: PrimId) -> Option<bool> {
        Some(self.detail(geo)?.prim(prim)?.closed)
    }

    fn adjacent_points(&self, geo: GeoHandle, pt: PtId) -> Option<Vec<PtId>> {
        self.detail(geo)?.neighbours(pt)
    }

    fn primitive_normal(&self, geo: GeoHandle, prim: PrimId) -> Option<Vector3<f64>> {
        self.detail(geo)?.prim_normals.get(&prim).copied()
    }

    fn point_normal(&self, geo: GeoHandle, pt: PtId) -> Option<Vector3<f64>> {
        self.detail(geo)?.point_normals.get(&pt).copied()
    }

    fn vertex_normal(
        &self,
        geo: GeoHandle,
        prim: PrimId,
        vertex: usize,
    ) -> Option<Vector3<f64>> {
        self.detail(geo)?.vertex_normals.get(&(prim, vertex)).copied()
    }

    fn expand_edge_group(&self, geo: GeoHandle, name: &str) -> Option<Vec<PtId>> {
        self.detail(geo)?.edge_groups.get(name).cloned()
    }

    fn half_edge_source(&self, geo: GeoHandle, hedge: HalfEdgeId) -> Option<PtId> {
        let (prim, ix) = self.detail(geo)?.locate_vertex(hedge)?;
        if !prim.closed && ix + 1 == prim.points.len() {
            return None;
        }
        Some(prim.points[ix])
    }

    fn half_edge_destination(&self, geo: GeoHandle, hedge: HalfEdgeId) -> Option<PtId> {
        let (prim, ix) = self.detail(geo)?.locate_vertex(hedge)?;
        let len = prim.points.len();
        if !prim.closed && ix + 1 == len {
            return None;
        }
        Some(prim.points[(ix + 1) % len])
    }

    fn half_edge_between(&self, geo: GeoHandle, from: PtId, to: PtId) -> Option<HalfEdgeId> {
        let detail = self.detail(geo)?;
        let mut offset = 0;
        for prim in &detail.prims {
            if let Some(ix) = prim
                .sides()
                .position(|(a, b)| a == from && b == to)
            {
                return Some(HalfEdgeId(offset + ix));
            }
            offset += prim.points.len();
        }
        None
    }
}
