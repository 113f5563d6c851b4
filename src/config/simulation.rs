use super::traits::{ConfigManifest, ConfigSection, FieldManifest};
use crate::engines::simulation::{
    DEFAULT_ABSOLUTE_TOLERANCE, DEFAULT_RELATIVE_TOLERANCE, DEFAULT_SAMPLES, DEFAULT_SUBSTEPS,
};
use crate::error::PathwayError;
use crate::types::{RateParams, FEEDBACK_DOMAIN, RATE_DOMAIN};
use serde::{Deserialize, Serialize};

pub const S0_RANGE: (f64, f64) = (0.1, 10.0);
pub const T_MAX_RANGE: (f64, f64) = (10.0, 200.0);

/// Initial condition, horizon and the rates used for a plain simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub s0: f64,
    pub t_max: f64,
    pub n_samples: usize,
    pub substeps: usize,
    /// Step-doubling tolerance; a run exceeding it counts as not converged
    pub relative_tolerance: f64,
    pub absolute_tolerance: f64,
    pub k1: f64,
    pub k2: f64,
    pub k3: f64,
    pub k_feedback: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        let rates = RateParams::default();
        Self {
            s0: 5.0,
            t_max: 100.0,
            n_samples: DEFAULT_SAMPLES,
            substeps: DEFAULT_SUBSTEPS,
            relative_tolerance: DEFAULT_RELATIVE_TOLERANCE,
            absolute_tolerance: DEFAULT_ABSOLUTE_TOLERANCE,
            k1: rates.k1(),
            k2: rates.k2(),
            k3: rates.k3(),
            k_feedback: rates.k_feedback(),
        }
    }
}

impl SimulationConfig {
    pub fn rate_params(&self) -> Result<RateParams, PathwayError> {
        RateParams::new(self.k1, self.k2, self.k3, self.k_feedback)
    }
}

impl ConfigSection for SimulationConfig {
    fn section_name() -> &'static str {
        "simulation"
    }

    fn validate(&self) -> Result<(), PathwayError> {
        if !(self.s0.is_finite() && self.s0 >= 0.0) {
            return Err(PathwayError::Configuration(format!(
                "Initial substrate must be non-negative, got {}",
                self.s0
            )));
        }
        if !(self.t_max.is_finite() && self.t_max > 0.0) {
            return Err(PathwayError::Configuration(format!(
                "Simulation time must be positive, got {}",
                self.t_max
            )));
        }
        if self.n_samples < 2 {
            return Err(PathwayError::Configuration(
                "At least 2 samples are required".to_string(),
            ));
        }
        if self.substeps == 0 {
            return Err(PathwayError::Configuration(
                "At least 1 integration substep is required".to_string(),
            ));
        }
        if !(self.relative_tolerance.is_finite() && self.relative_tolerance > 0.0) {
            return Err(PathwayError::Configuration(format!(
                "Relative tolerance must be positive, got {}",
                self.relative_tolerance
            )));
        }
        if !(self.absolute_tolerance.is_finite() && self.absolute_tolerance >= 0.0) {
            return Err(PathwayError::Configuration(format!(
                "Absolute tolerance must be non-negative, got {}",
                self.absolute_tolerance
            )));
        }
        self.rate_params()?;
        Ok(())
    }

    fn to_manifest(&self) -> ConfigManifest {
        ConfigManifest {
            section: "Simulation".to_string(),
            fields: vec![
                FieldManifest::float("k1", self.k1, RATE_DOMAIN.min, RATE_DOMAIN.max, "Enzyme 1 reaction rate"),
                FieldManifest::float("k2", self.k2, RATE_DOMAIN.min, RATE_DOMAIN.max, "Enzyme 2 reaction rate"),
                FieldManifest::float("k3", self.k3, RATE_DOMAIN.min, RATE_DOMAIN.max, "Enzyme 3 reaction rate"),
                FieldManifest::float(
                    "k_feedback",
                    self.k_feedback,
                    FEEDBACK_DOMAIN.min,
                    FEEDBACK_DOMAIN.max,
                    "Feedback inhibition rate",
                ),
                FieldManifest::float("s0", self.s0, S0_RANGE.0, S0_RANGE.1, "Initial substrate concentration"),
                FieldManifest::float("t_max", self.t_max, T_MAX_RANGE.0, T_MAX_RANGE.1, "Simulation time"),
            ],
        }
    }
}
