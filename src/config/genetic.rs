use super::traits::{check_probability, ConfigManifest, ConfigSection, FieldManifest};
use crate::error::PathwayError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneticConfig {
    pub population_size: usize,
    pub generations: usize,
    pub tournament_size: usize,
    pub crossover_rate: f64,
    /// BLX-alpha extension: blend weights are drawn from `[-alpha, 1 + alpha]`.
    /// `0.0` keeps every child a convex combination of its parents; larger
    /// values let children extrapolate past them.
    pub blend_alpha: f64,
    /// Per-coordinate mutation probability
    pub mutation_rate: f64,
    pub mutation_sigma: f64,
    pub elitism_count: usize,
    pub seed: Option<u64>,
    pub parallel: bool,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        Self {
            population_size: 20,
            generations: 10,
            tournament_size: 3,
            crossover_rate: 0.5,
            blend_alpha: 0.0,
            mutation_rate: 0.2,
            mutation_sigma: 0.5,
            elitism_count: 0,
            seed: None,
            parallel: true,
        }
    }
}

impl ConfigSection for GeneticConfig {
    fn section_name() -> &'static str {
        "genetic"
    }

    fn validate(&self) -> Result<(), PathwayError> {
        if self.population_size < 2 {
            return Err(PathwayError::Configuration(
                "Population size must be at least 2".to_string(),
            ));
        }
        if self.generations == 0 {
            return Err(PathwayError::Configuration(
                "At least one generation is required".to_string(),
            ));
        }
        if self.tournament_size == 0 {
            return Err(PathwayError::Configuration(
                "Tournament size must be at least 1".to_string(),
            ));
        }
        if self.elitism_count >= self.population_size {
            return Err(PathwayError::Configuration(
                "Elitism count must be smaller than the population".to_string(),
            ));
        }
        check_probability("Crossover rate", self.crossover_rate)?;
        check_probability("Mutation rate", self.mutation_rate)?;
        if !(self.blend_alpha.is_finite() && self.blend_alpha >= 0.0) {
            return Err(PathwayError::Configuration(
                "Blend alpha must be non-negative".to_string(),
            ));
        }
        if !(self.mutation_sigma.is_finite() && self.mutation_sigma > 0.0) {
            return Err(PathwayError::Configuration(
                "Mutation sigma must be positive".to_string(),
            ));
        }
        Ok(())
    }

    fn to_manifest(&self) -> ConfigManifest {
        ConfigManifest {
            section: "Genetic Algorithm".to_string(),
            fields: vec![
                FieldManifest::integer("population_size", self.population_size, 2, 1000, "Candidates per generation"),
                FieldManifest::integer("generations", self.generations, 1, 1000, "Number of generations"),
                FieldManifest::integer("tournament_size", self.tournament_size, 1, 20, "Candidates per selection tournament"),
                FieldManifest::float("crossover_rate", self.crossover_rate, 0.0, 1.0, "Probability of blending a parent pair"),
                FieldManifest::float("blend_alpha", self.blend_alpha, 0.0, 1.0, "Blend crossover extension (0 = convex blend)"),
                FieldManifest::float("mutation_rate", self.mutation_rate, 0.0, 1.0, "Per-coordinate mutation probability"),
                FieldManifest::float("mutation_sigma", self.mutation_sigma, 0.01, 2.0, "Standard deviation of Gaussian mutation"),
                FieldManifest::integer("elitism_count", self.elitism_count, 0, 100, "Best candidates copied unchanged"),
                FieldManifest::boolean("parallel", self.parallel, "Evaluate fitness in parallel"),
            ],
        }
    }
}
