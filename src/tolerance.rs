use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub line: f64,
    /// `|n1 · (n2 × (n1 × n2))|` below this means two planes are parallel.
    pub plane_parallel: f64,
    /// `|n · dir|` below this means a line runs parallel to a plane.
    pub line_plane_parallel: f64,
    pub on_plane: f64,
}

pub const LINE_TOLERANCE: f64 = 1e-4;
pub const PLANE_PARALLEL_TOLERANCE: f64 = 1e-6;
pub const LINE_PLANE_PARALLEL_TOLERANCE: f64 = 1e-7;
pub const ON_PLANE_TOLERANCE: f64 = 1e-6;

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            line: LINE_TOLERANCE,
            plane_parallel: PLANE_PARALLEL_TOLERANCE,
            line_plane_parallel: LINE_PLANE_PARALLEL_TOLERANCE,
            on_plane: ON_PLANE_TOLERANCE,
        }
    }
}

static TOLERANCES: OnceLock<Tolerances> = OnceLock::new();

pub fn tolerances() -> &'static Tolerances {
    TOLERANCES.get_or_init(Tolerances::default)
}

/// Overrides the tolerances. Only the first call made before any
/// [`tolerances`] lookup takes effect; returns `false` when ignored.
pub fn set_tolerances(value: Tolerances) -> bool {
    let accepted = TOLERANCES.set(value).is_ok();
    if !accepted {
        log::debug!("tolerances already initialized, ignoring {value:?}");
    }
    accepted
}

pub fn is_equal(x: f64, y: f64, tolerance: f64) -> bool {
    (x - y).abs() < tolerance
}

pub fn is_zero(x: f64, tolerance: f64) -> bool {
    x.abs() < tolerance
}
