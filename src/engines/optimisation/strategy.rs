use super::base::{OptimizationResult, Optimizer};
use super::differential::DifferentialEvolution;
use super::genetic::GeneticOptimizer;
use super::progress::ProgressCallback;
use crate::config::AppConfig;
use crate::engines::evaluation::Objective;
use crate::error::{PathwayError, Result};
use crate::types::ParameterSpace;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    Genetic,
    Differential,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyKind::Genetic => write!(f, "genetic"),
            StrategyKind::Differential => write!(f, "differential"),
        }
    }
}

impl FromStr for StrategyKind {
    type Err = PathwayError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "genetic" | "ga" => Ok(StrategyKind::Genetic),
            "differential" | "de" => Ok(StrategyKind::Differential),
            other => Err(PathwayError::Configuration(format!(
                "Unknown optimization strategy: {}",
                other
            ))),
        }
    }
}

/// Either search strategy behind the one [`Optimizer`] contract
pub enum OptimizerStrategy {
    Genetic(GeneticOptimizer),
    Differential(DifferentialEvolution),
}

impl OptimizerStrategy {
    pub fn from_config(kind: StrategyKind, config: &AppConfig) -> Result<Self> {
        Ok(match kind {
            StrategyKind::Genetic => OptimizerStrategy::Genetic(GeneticOptimizer::new(config.genetic.clone())?),
            StrategyKind::Differential => {
                OptimizerStrategy::Differential(DifferentialEvolution::new(config.differential.clone())?)
            }
        })
    }

    pub fn kind(&self) -> StrategyKind {
        match self {
            OptimizerStrategy::Genetic(_) => StrategyKind::Genetic,
            OptimizerStrategy::Differential(_) => StrategyKind::Differential,
        }
    }
}

impl Optimizer for OptimizerStrategy {
    fn name(&self) -> &str {
        match self {
            OptimizerStrategy::Genetic(ga) => ga.name(),
            OptimizerStrategy::Differential(de) => de.name(),
        }
    }

    fn optimize<O, C>(
        &mut self,
        objective: &O,
        space: &ParameterSpace,
        callback: C,
    ) -> Result<OptimizationResult>
    where
        O: Objective + ?Sized,
        C: ProgressCallback,
    {
        match self {
            OptimizerStrategy::Genetic(ga) => ga.optimize(objective, space, callback),
            OptimizerStrategy::Differential(de) => de.optimize(objective, space, callback),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_strategy_kind() {
        assert_eq!("genetic".parse::<StrategyKind>().unwrap(), StrategyKind::Genetic);
        assert_eq!("DE".parse::<StrategyKind>().unwrap(), StrategyKind::Differential);
        assert!("simulated-annealing".parse::<StrategyKind>().is_err());
        assert_eq!(StrategyKind::Differential.to_string(), "differential");
    }

    #[test]
    fn test_from_config_selects_variant() {
        let config = AppConfig::default();
        let ga = OptimizerStrategy::from_config(StrategyKind::Genetic, &config).unwrap();
        let de = OptimizerStrategy::from_config(StrategyKind::Differential, &config).unwrap();

        assert_eq!(ga.kind(), StrategyKind::Genetic);
        assert_eq!(ga.name(), "Genetic Algorithm");
        assert_eq!(de.kind(), StrategyKind::Differential);
        assert_eq!(de.name(), "Differential Evolution");
    }
}
