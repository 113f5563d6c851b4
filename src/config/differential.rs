use super::traits::{check_probability, ConfigManifest, ConfigSection, FieldManifest};
use crate::error::PathwayError;
use serde::{Deserialize, Serialize};

/// Population members per search dimension when no explicit size is given
pub const POPULATION_PER_DIMENSION: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifferentialConfig {
    /// Explicit population size; `None` or `Some(0)` means `10 * dim`
    pub population_size: Option<usize>,
    pub max_iterations: usize,
    pub differential_weight: f64,
    pub crossover_probability: f64,
    /// Relative spread tolerance: stop when `std <= atol + tol * |mean|`
    pub tolerance: f64,
    pub absolute_tolerance: f64,
    pub seed: Option<u64>,
    pub parallel: bool,
}

impl Default for DifferentialConfig {
    fn default() -> Self {
        Self {
            population_size: None,
            max_iterations: 20,
            differential_weight: 0.8,
            crossover_probability: 0.7,
            tolerance: 0.01,
            absolute_tolerance: 0.0,
            seed: None,
            parallel: true,
        }
    }
}

impl DifferentialConfig {
    pub fn population_for(&self, dim: usize) -> usize {
        match self.population_size {
            Some(size) if size > 0 => size,
            _ => POPULATION_PER_DIMENSION * dim,
        }
    }
}

impl ConfigSection for DifferentialConfig {
    fn section_name() -> &'static str {
        "differential"
    }

    fn validate(&self) -> Result<(), PathwayError> {
        if let Some(size) = self.population_size {
            // target plus two distinct difference vectors; 0 selects the default
            if size != 0 && size < 3 {
                return Err(PathwayError::Configuration(
                    "Population size must be 0 (automatic) or at least 3".to_string(),
                ));
            }
        }
        if self.max_iterations == 0 {
            return Err(PathwayError::Configuration(
                "At least one iteration is required".to_string(),
            ));
        }
        if !(self.differential_weight > 0.0 && self.differential_weight <= 2.0) {
            return Err(PathwayError::Configuration(
                "Differential weight must be in (0, 2]".to_string(),
            ));
        }
        check_probability("Crossover probability", self.crossover_probability)?;
        if !(self.tolerance >= 0.0 && self.absolute_tolerance >= 0.0) {
            return Err(PathwayError::Configuration(
                "Convergence tolerances must be non-negative".to_string(),
            ));
        }
        Ok(())
    }

    fn to_manifest(&self) -> ConfigManifest {
        ConfigManifest {
            section: "Differential Evolution".to_string(),
            fields: vec![
                FieldManifest::integer(
                    "population_size",
                    self.population_size.unwrap_or(0),
                    0,
                    1000,
                    "Population size (0 = 10 per dimension)",
                ),
                FieldManifest::integer("max_iterations", self.max_iterations, 1, 1000, "Iteration budget"),
                FieldManifest::float("differential_weight", self.differential_weight, 0.1, 2.0, "Differential weight F"),
                FieldManifest::float("crossover_probability", self.crossover_probability, 0.0, 1.0, "Binomial crossover probability"),
                FieldManifest::float("tolerance", self.tolerance, 0.0, 1.0, "Relative convergence tolerance"),
                FieldManifest::float("absolute_tolerance", self.absolute_tolerance, 0.0, 1.0, "Absolute convergence tolerance"),
                FieldManifest::boolean("parallel", self.parallel, "Evaluate trials in parallel"),
            ],
        }
    }
}
