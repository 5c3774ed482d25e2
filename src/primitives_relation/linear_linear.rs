use nalgebra::Vector3;

use crate::{
    linear::line::Line,
    tolerance::tolerances,
};

use super::relation::Relation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PointMatch {
    Different = 0,
    Reversed = 1,
    Same = 2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DirectionMatch {
    Different = 0,
    Reversed = 1,
    Same = 2,
}

/// Which endpoints of one line lie on another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum EndpointsOn {
    Neither = 0,
    A = 1,
    B = 2,
    Both = 3,
}

impl EndpointsOn {
    fn from_flags(a: bool, b: bool) -> Self {
        match (a, b) {
            (false, false) => Self::Neither,
            (true, false) => Self::A,
            (false, true) => Self::B,
            (true, true) => Self::Both,
        }
    }

    fn of(line: &Line, on: &Line) -> Self {
        let tol = tolerances().line;
        let is_on = |p: Vector3<f64>| on.distance_to_point(&p) < tol;
        Self::from_flags(is_on(line.pos_a()), is_on(line.pos_b()))
    }
}

/// Full comparison of two lines, `self` being the first and `to` the
/// second one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRelation {
    pub points: PointMatch,
    pub direction: DirectionMatch,
    /// Second line's endpoints on the infinite extension of the first.
    pub second_on_first_line: EndpointsOn,
    pub first_on_second_line: EndpointsOn,
    /// Second line's endpoints on the closed segment of the first.
    pub second_on_first_segment: EndpointsOn,
    pub first_on_second_segment: EndpointsOn,
}

impl LineRelation {
    pub fn codes(&self) -> [u8; 6] {
        [
            self.points as u8,
            self.direction as u8,
            self.second_on_first_line as u8,
            self.first_on_second_line as u8,
            self.second_on_first_segment as u8,
            self.first_on_second_segment as u8,
        ]
    }
}

impl Relation<Line> for Line {
    type Relate = LineRelation;

    fn relate(&self, to: &Line) -> Self::Relate {
        let first_line = Line::infinite(self.pos_a(), self.pos_b());
        let second_line = Line::infinite(to.pos_a(), to.pos_b());
        let first_segment = Line::segment(self.pos_a(), self.pos_b());
        let second_segment = Line::segment(to.pos_a(), to.pos_b());

        LineRelation {
            points: self.same_points(to),
            direction: self.same_direction(to),
            second_on_first_line: EndpointsOn::of(to, &first_line),
            first_on_second_line: EndpointsOn::of(self, &second_line),
            second_on_first_segment: EndpointsOn::of(to, &first_segment),
            first_on_second_segment: EndpointsOn::of(self, &second_segment),
        }
    }
}
