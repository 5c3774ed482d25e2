use nalgebra::Vector3;

use crate::{
    planar::plane::Plane,
    tolerance::{is_zero, tolerances},
};

use super::relation::Relation;

#[derive(PartialEq, Debug)]
pub enum PointPlanarRelation {
    In,
    WithNormal,
    OpposeToNormal,
}

impl Relation<Vector3<f64>> for Plane {
    type Relate = PointPlanarRelation;

    fn relate(&self, to: &Vector3<f64>) -> Self::Relate {
        let distance = self.signed_distance(to);

        if is_zero(distance, tolerances().on_plane) {
            PointPlanarRelation::In
        } else if distance > 0.0 {
            PointPlanarRelation::WithNormal
        } else {
            PointPlanarRelation::OpposeToNormal
        }
    }
}
