use crate::config::AppConfig;
use crate::engines::evaluation::YieldObjective;
use crate::engines::optimisation::{OptimizationResult, Optimizer, OptimizerStrategy, ProgressCallback, StrategyKind};
use crate::engines::simulation::Integrator;
use crate::error::Result;
use crate::types::{RateParams, Trajectory};
use serde::Serialize;

/// What the host asks for: a single simulation, or a search with one
/// explicitly chosen strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunRequest {
    Simulate,
    Optimize(StrategyKind),
}

#[derive(Debug, Clone, Serialize)]
pub enum RunOutcome {
    Simulated {
        params: RateParams,
        trajectory: Trajectory,
    },
    Optimized {
        result: OptimizationResult,
        params: RateParams,
        /// Best parameters re-simulated for display; `None` if that run diverges
        trajectory: Option<Trajectory>,
    },
}

pub struct PathwayRunner {
    config: AppConfig,
}

impl PathwayRunner {
    pub fn new(config: AppConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn objective(&self) -> Result<YieldObjective> {
        let sim = &self.config.simulation;
        Ok(YieldObjective::new(sim.s0, sim.t_max)?
            .with_samples(sim.n_samples)?
            .with_integrator(
                Integrator::new(sim.substeps)?.with_tolerances(sim.relative_tolerance, sim.absolute_tolerance)?,
            ))
    }

    /// Ad-hoc run; a divergent simulation is returned as an error
    pub fn simulate(&self, params: &RateParams) -> Result<Trajectory> {
        self.objective()?.simulate(params)
    }

    pub fn run<C: ProgressCallback>(&self, request: RunRequest, callback: C) -> Result<RunOutcome> {
        match request {
            RunRequest::Simulate => {
                let params = self.config.simulation.rate_params()?;
                let trajectory = self.simulate(&params)?;
                Ok(RunOutcome::Simulated { params, trajectory })
            }
            RunRequest::Optimize(kind) => {
                let objective = self.objective()?;
                let space = self.config.bounds.to_space()?;
                let mut optimizer = OptimizerStrategy::from_config(kind, &self.config)?;

                log::info!(
                    "Running {} over {} parameters",
                    optimizer.name(),
                    space.dim()
                );
                let result = optimizer.optimize(&objective, &space, callback)?;
                let params = RateParams::try_from(result.best_params.as_slice())?;

                let trajectory = match objective.simulate(&params) {
                    Ok(trajectory) => Some(trajectory),
                    Err(e) => {
                        log::warn!("Best parameters {:?} cannot be simulated: {}", params, e);
                        None
                    }
                };

                Ok(RunOutcome::Optimized { result, params, trajectory })
            }
        }
    }
}
