use nalgebra::Vector3;

use crate::{
    linear::line::{Line, LineKind},
    tolerance::tolerances,
    vecmath::is_equal_vec,
};

use super::relation::Relation;

#[derive(PartialEq, Debug)]
pub enum PointOnLine {
    /// Matches a point the line is closed at.
    Endpoint,
    On,
    Outside,
}

impl Relation<Vector3<f64>> for Line {
    type Relate = PointOnLine;

    fn relate(&self, to: &Vector3<f64>) -> Self::Relate {
        let tol = tolerances().line;
        let (closed_at_a, closed_at_b) = match self.kind() {
            LineKind::Segment => (true, true),
            LineKind::InfiniteLine => (false, false),
            LineKind::RayFromATowardB => (true, false),
            LineKind::RayFromBTowardA => (false, true),
        };

        if (closed_at_a && is_equal_vec(to, &self.pos_a(), tol))
            || (closed_at_b && is_equal_vec(to, &self.pos_b(), tol))
        {
            PointOnLine::Endpoint
        } else if self.distance_to_point(to) < tol {
            PointOnLine::On
        } else {
            PointOnLine::Outside
        }
    }
}
