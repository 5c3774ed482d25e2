use std::fmt;

use approx::AbsDiffEq;
use nalgebra::Vector3;

use crate::{
    angle::Angle,
    edge::Edge,
    errors::{KernelError, KernelResult},
    geo::{GeoHandle, GeoQuery},
    primitives_relation::linear_linear::{DirectionMatch, PointMatch},
    reversable::Reversable,
    tolerance::tolerances,
    vecmath::is_equal_vec,
};

/// Which part of the infinite line through `a` and `b` a [`Line`] covers.
///
/// Rays are closed at the point they start from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum LineKind {
    /// Closed segment `[a, b]`.
    #[default]
    Segment = 0,
    InfiniteLine = 1,
    /// Starts at `b`, runs through `a` and on.
    RayFromBTowardA = 2,
    /// Starts at `a`, runs through `b` and on.
    RayFromATowardB = 3,
}

impl LineKind {
    pub fn code(self) -> u8 {
        self as u8
    }

    fn mirrored(self) -> Self {
        match self {
            Self::RayFromBTowardA => Self::RayFromATowardB,
            Self::RayFromATowardB => Self::RayFromBTowardA,
            other => other,
        }
    }
}

impl TryFrom<u8> for LineKind {
    type Error = KernelError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Segment),
            1 => Ok(Self::InfiniteLine),
            2 => Ok(Self::RayFromBTowardA),
            3 => Ok(Self::RayFromATowardB),
            other => Err(KernelError::UnknownLineKind(other)),
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
pub struct Line {
    a: Vector3<f64>,
    b: Vector3<f64>,
    kind: LineKind,
}

impl fmt::Debug for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.4} {:.4} {:.4} -> {:.4} {:.4} {:.4} ({:?})",
            self.a.x, self.a.y, self.a.z, self.b.x, self.b.y, self.b.z, self.kind
        )
    }
}

impl AbsDiffEq for Line {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.kind == other.kind
            && self.a.abs_diff_eq(&other.a, epsilon)
            && self.b.abs_diff_eq(&other.b, epsilon)
    }
}

impl Reversable for Line {
    /// Swaps the points, keeping the covered set of points unchanged.
    fn flip(self) -> Self {
        Self {
            a: self.b,
            b: self.a,
            kind: self.kind.mirrored(),
        }
    }
}

impl Line {
    pub fn new(a: Vector3<f64>, b: Vector3<f64>, kind: LineKind) -> Self {
        Self { a, b, kind }
    }

    pub fn segment(a: Vector3<f64>, b: Vector3<f64>) -> Self {
        Self::new(a, b, LineKind::Segment)
    }

    pub fn infinite(a: Vector3<f64>, b: Vector3<f64>) -> Self {
        Self::new(a, b, LineKind::InfiniteLine)
    }

    pub fn from_edge(src: &impl GeoQuery, edge: &Edge, kind: LineKind) -> KernelResult<Self> {
        Ok(Self::new(edge.pos_a(src)?, edge.pos_b(src)?, kind))
    }

    /// Same as [`Line::from_edge`], resolving the point ids in `geo`.
    pub fn from_edge_in(
        src: &impl GeoQuery,
        geo: GeoHandle,
        edge: &Edge,
        kind: LineKind,
    ) -> KernelResult<Self> {
        Ok(Self::new(
            edge.pos_a_in(src, geo)?,
            edge.pos_b_in(src, geo)?,
            kind,
        ))
    }

    pub fn pos_a(&self) -> Vector3<f64> {
        self.a
    }

    pub fn pos_b(&self) -> Vector3<f64> {
        self.b
    }

    pub fn kind(&self) -> LineKind {
        self.kind
    }

    pub fn direction(&self) -> Vector3<f64> {
        self.b - self.a
    }

    /// Unit direction. NaN components for an invalid line.
    pub fn direction_n(&self) -> Vector3<f64> {
        self.direction().normalize()
    }

    pub fn is_valid(&self) -> bool {
        self.a != self.b
    }

    /// Shortest distance from `x` to the part of the line its kind covers.
    /// An invalid line degrades to the single point `a`.
    pub fn distance_to_point(&self, x: &Vector3<f64>) -> f64 {
        let to_a = x - self.a;
        let to_b = x - self.b;
        if !self.is_valid() {
            return to_a.magnitude();
        }

        let ab = self.direction();
        let behind_a = to_a.dot(&ab) < 0.0;
        let behind_b = to_b.dot(&-ab) < 0.0;

        match self.kind {
            LineKind::RayFromATowardB | LineKind::Segment if behind_a => to_a.magnitude(),
            LineKind::RayFromBTowardA | LineKind::Segment if behind_b => to_b.magnitude(),
            _ => to_a.cross(&to_b).magnitude() / ab.magnitude(),
        }
    }

    /// `true` when both lines extend to the same infinite line, whatever
    /// their kinds and directions.
    pub fn same_infinite_line(&self, other: &Line) -> bool {
        let tol = tolerances().line;
        let d1 = self.direction_n();
        let d2 = other.direction_n();
        let parallel = is_equal_vec(&d1, &d2, tol) || is_equal_vec(&d1, &-d2, tol);

        parallel && Line::infinite(self.a, self.b).distance_to_point(&other.a) < tol
    }

    /// Exact endpoint comparison.
    pub fn same_points(&self, other: &Line) -> PointMatch {
        if self.a == other.a && self.b == other.b {
            PointMatch::Same
        } else if self.a == other.b && self.b == other.a {
            PointMatch::Reversed
        } else {
            PointMatch::Different
        }
    }

    pub fn same_direction(&self, other: &Line) -> DirectionMatch {
        let tol = tolerances().line;
        let d1 = self.direction_n();
        let d2 = other.direction_n();
        if is_equal_vec(&d1, &d2, tol) {
            DirectionMatch::Same
        } else if is_equal_vec(&d1, &-d2, tol) {
            DirectionMatch::Reversed
        } else {
            DirectionMatch::Different
        }
    }

    pub fn angle_between(&self, other: &Line) -> Angle {
        let cos = self.direction_n().dot(&other.direction_n());
        Angle::from_rad(cos.clamp(-1.0, 1.0).acos())
    }
}
