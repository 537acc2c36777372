//! Frequency response evaluation
//!
//! `H(e^{iω})` is evaluated directly from the polynomial coefficients on the
//! grid `ω_k = π·k/n`, `k = 0..n` (0 included, π excluded).
//!
//! A pole lying exactly on a grid frequency evaluates to `+inf` and reads as
//! [`pz_core::MAGNITUDE_CEILING_DB`]; only `|H| = 0` reads as the floor.

use pz_core::{Complex64, DEFAULT_MAGNITUDE_FLOOR_DB, Decibels};
use std::f64::consts::PI;

use crate::transfer::TransferFunction;

/// Complex response sampled on a uniform frequency grid
#[derive(Debug, Clone, Default)]
pub struct FrequencyResponse {
    /// Normalized angular frequencies (radians/sample)
    pub frequencies: Vec<f64>,

    /// `H(e^{iω})` at each frequency
    pub response: Vec<Complex64>,
}

impl FrequencyResponse {
    pub fn len(&self) -> usize {
        self.response.len()
    }

    pub fn is_empty(&self) -> bool {
        self.response.is_empty()
    }

    /// Magnitude in dB with the default floor
    pub fn magnitude_db(&self) -> Vec<f64> {
        magnitude_db(&self.response, DEFAULT_MAGNITUDE_FLOOR_DB)
    }

    /// Magnitude in dB with a caller-chosen floor
    pub fn magnitude_db_floored(&self, floor_db: f64) -> Vec<f64> {
        magnitude_db(&self.response, floor_db)
    }

    /// Wrapped phase, `(-π, π]`
    pub fn phase(&self) -> Vec<f64> {
        phase_radians(&self.response)
    }

    /// Continuous phase
    pub fn phase_unwrapped(&self) -> Vec<f64> {
        phase_unwrapped(&self.response)
    }

    /// Linear magnitude
    pub fn magnitude(&self) -> Vec<f64> {
        self.response.iter().map(|h| h.norm()).collect()
    }
}

/// Evaluate `tf` on `n_points` frequencies in `[0, π)`
pub fn evaluate(tf: &TransferFunction, n_points: usize) -> FrequencyResponse {
    let step = if n_points == 0 { 0.0 } else { PI / n_points as f64 };

    let frequencies: Vec<f64> = (0..n_points).map(|k| k as f64 * step).collect();
    let response = frequencies
        .iter()
        .map(|&w| tf.eval(Complex64::from_polar(1.0, w)))
        .collect();

    FrequencyResponse {
        frequencies,
        response,
    }
}

/// `20·log10|H|`, clamped to `[floor_db, MAGNITUDE_CEILING_DB]`
pub fn magnitude_db(response: &[Complex64], floor_db: f64) -> Vec<f64> {
    response
        .iter()
        .map(|h| Decibels::from_magnitude(h.norm(), floor_db).0)
        .collect()
}

/// `arg(H)`
pub fn phase_radians(response: &[Complex64]) -> Vec<f64> {
    response.iter().map(|h| h.arg()).collect()
}

/// Unwrapped `arg(H)`
pub fn phase_unwrapped(response: &[Complex64]) -> Vec<f64> {
    let mut phase = phase_radians(response);
    unwrap_phase(&mut phase);
    phase
}

/// Remove jumps larger than π between consecutive samples by adding
/// multiples of 2π
pub fn unwrap_phase(phase: &mut [f64]) {
    let mut correction = 0.0;
    let mut prev_raw = match phase.first() {
        Some(&p) => p,
        None => return,
    };

    for p in phase.iter_mut().skip(1) {
        let raw = *p;
        let dd = raw - prev_raw;

        if dd.abs() >= PI {
            let mut ddmod = (dd + PI).rem_euclid(2.0 * PI) - PI;
            if ddmod == -PI && dd > 0.0 {
                ddmod = PI;
            }
            correction += ddmod - dd;
        }

        prev_raw = raw;
        *p = raw + correction;
    }
}
