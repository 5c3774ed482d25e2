use std::{f64::consts::PI, fmt, ops::Add};

use approx::AbsDiffEq;
use num_traits::Zero;

#[derive(Default, Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Angle(f64);

impl Add for Angle {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Zero for Angle {
    fn zero() -> Self {
        Self(0.0)
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}°", self.deg())
    }
}

impl AbsDiffEq for Angle {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.0.abs_diff_eq(&other.0, epsilon)
    }
}

impl Angle {
    pub fn from_rad(rad: f64) -> Self {
        Self(rad)
    }

    pub fn from_deg(deg: f64) -> Self {
        Self(deg * PI / 180.0)
    }

    pub fn deg(&self) -> f64 {
        self.0 / PI * 180.0
    }

    pub fn rad(&self) -> f64 {
        self.0
    }

    pub fn is_nan(&self) -> bool {
        self.0.is_nan()
    }
}
