//! pz-core: Shared types, errors, and utilities for the pole/zero designer
//!
//! This crate provides the foundational types used across all designer crates.

mod complex;
mod error;
mod sample;

pub use complex::*;
pub use error::*;
pub use sample::*;

/// Default number of points on the frequency grid
pub const DEFAULT_RESPONSE_POINTS: usize = 8000;

/// Default Manhattan tolerance for removing a root at a clicked position
pub const DEFAULT_REMOVAL_TOLERANCE: f64 = 0.1;

/// Floor applied when a response magnitude is converted to dB
pub const DEFAULT_MAGNITUDE_FLOOR_DB: f64 = -300.0;

/// Ceiling for a response magnitude in dB; a pole on the grid reads as this
pub const MAGNITUDE_CEILING_DB: f64 = 300.0;

/// Which polynomial a root belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum RootKind {
    Zero,
    Pole,
}

impl RootKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Zero => "zero",
            Self::Pole => "pole",
        }
    }
}

impl std::fmt::Display for RootKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Decibel value wrapper
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Decibels(pub f64);

impl Decibels {
    pub const ZERO: Self = Self(0.0);

    /// Convert a linear magnitude, clamping to `[floor_db, MAGNITUDE_CEILING_DB]`.
    ///
    /// Zero maps to the floor. Infinite and NaN magnitudes come from a pole
    /// on the evaluation point and map to the ceiling.
    #[inline]
    pub fn from_magnitude(magnitude: f64, floor_db: f64) -> Self {
        if !magnitude.is_finite() {
            Self(MAGNITUDE_CEILING_DB)
        } else if magnitude <= 0.0 {
            Self(floor_db)
        } else {
            Self((20.0 * magnitude.log10()).max(floor_db).min(MAGNITUDE_CEILING_DB))
        }
    }

    #[inline]
    pub fn to_magnitude(self) -> f64 {
        10.0_f64.powf(self.0 / 20.0)
    }
}

impl Default for Decibels {
    fn default() -> Self {
        Self::ZERO
    }
}
