use crate::{linear::line::Line, planar::plane::Plane};

use super::relation::Relation;

#[derive(Debug, PartialEq)]
pub enum PlanarRelation {
    Parallel,
    /// Infinite line shared by both planes.
    Intersect(Line),
}

impl Relation<Plane> for Plane {
    type Relate = PlanarRelation;

    fn relate(&self, to: &Plane) -> Self::Relate {
        if self.is_parallel(to) {
            PlanarRelation::Parallel
        } else {
            PlanarRelation::Intersect(self.intersection_line(to))
        }
    }
}
