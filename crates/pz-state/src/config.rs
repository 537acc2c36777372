//! Designer configuration

use pz_core::{
    DEFAULT_MAGNITUDE_FLOOR_DB, DEFAULT_REMOVAL_TOLERANCE, DEFAULT_RESPONSE_POINTS,
    MAGNITUDE_CEILING_DB, PzError, PzResult,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Tunables of a designer session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignerConfig {
    /// Points on the frequency grid `[0, π)`
    pub n_points: usize,

    /// Manhattan distance under which a click removes a root
    pub removal_tolerance: f64,

    /// Lowest magnitude reported, in dB
    pub magnitude_floor_db: f64,

    /// Numerator gain of the designed filter
    pub gain: f64,

    /// Feed conjugate mirrors into the transfer function
    pub conjugates_in_response: bool,

    /// Samples filtered per playback tick ("filtration rate")
    pub points_per_tick: usize,

    /// Host timer period for playback, in milliseconds
    pub update_interval_ms: u64,
}

impl Default for DesignerConfig {
    fn default() -> Self {
        Self {
            n_points: DEFAULT_RESPONSE_POINTS,
            removal_tolerance: DEFAULT_REMOVAL_TOLERANCE,
            magnitude_floor_db: DEFAULT_MAGNITUDE_FLOOR_DB,
            gain: 1.0,
            conjugates_in_response: false,
            points_per_tick: 10,
            update_interval_ms: 50,
        }
    }
}

impl DesignerConfig {
    /// Coarse grid and fast playback for interactive dragging
    pub fn interactive() -> Self {
        Self {
            n_points: 1024,
            points_per_tick: 25,
            update_interval_ms: 30,
            ..Default::default()
        }
    }

    /// Mirrors included in the response: real-coefficient filters only
    pub fn real_filter() -> Self {
        Self {
            conjugates_in_response: true,
            ..Default::default()
        }
    }

    /// Builder pattern: set grid size
    pub fn with_n_points(mut self, n_points: usize) -> Self {
        self.n_points = n_points;
        self
    }

    /// Builder pattern: set removal tolerance
    pub fn with_removal_tolerance(mut self, tolerance: f64) -> Self {
        self.removal_tolerance = tolerance;
        self
    }

    /// Builder pattern: set magnitude floor
    pub fn with_magnitude_floor_db(mut self, floor_db: f64) -> Self {
        self.magnitude_floor_db = floor_db;
        self
    }

    /// Builder pattern: set gain
    pub fn with_gain(mut self, gain: f64) -> Self {
        self.gain = gain;
        self
    }

    /// Builder pattern: include conjugate mirrors in the response
    pub fn with_conjugates_in_response(mut self) -> Self {
        self.conjugates_in_response = true;
        self
    }

    /// Builder pattern: set filtration rate
    pub fn with_points_per_tick(mut self, points: usize) -> Self {
        self.points_per_tick = points;
        self
    }

    pub fn validate(&self) -> PzResult<()> {
        if self.n_points == 0 {
            return Err(PzError::InvalidParameter(
                "n_points must be at least 1".to_string(),
            ));
        }
        if !(self.removal_tolerance.is_finite() && self.removal_tolerance > 0.0) {
            return Err(PzError::InvalidParameter(format!(
                "removal_tolerance must be positive, got {}",
                self.removal_tolerance
            )));
        }
        let floor = self.magnitude_floor_db;
        if !(floor.is_finite() && floor < MAGNITUDE_CEILING_DB) {
            return Err(PzError::InvalidParameter(format!(
                "magnitude_floor_db must be finite and below {MAGNITUDE_CEILING_DB}, got {floor}"
            )));
        }
        if !(self.gain.is_finite() && self.gain != 0.0) {
            return Err(PzError::InvalidParameter(format!(
                "gain must be finite and non-zero, got {}",
                self.gain
            )));
        }
        if self.points_per_tick == 0 {
            return Err(PzError::InvalidParameter(
                "points_per_tick must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn to_json(&self) -> PzResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| PzError::Serialization(e.to_string()))
    }

    /// Parse and validate
    pub fn from_json(json: &str) -> PzResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| PzError::Serialization(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> PzResult<Self> {
        let json = fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&json)?;
        log::debug!("Loaded designer config from {:?}", path.as_ref());
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> PzResult<()> {
        let json = self.to_json()?;

        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(path.as_ref(), json)?;
        log::debug!("Saved designer config to {:?}", path.as_ref());
        Ok(())
    }
}
