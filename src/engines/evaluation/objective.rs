use crate::engines::simulation::{Dynamics, Integrator, PathwayModel, DEFAULT_SAMPLES};
use crate::error::{PathwayError, Result};
use crate::types::{PathwayState, RateParams, Trajectory};

/// Fitness assigned to candidates that cannot be simulated
pub const WORST_FITNESS: f64 = f64::NEG_INFINITY;

/// Scalar fitness to maximize over a bounded parameter vector.
///
/// Implementations must be free of shared mutable state: optimizers may call
/// `evaluate` from several threads at once.
pub trait Objective: Sync {
    fn evaluate(&self, candidate: &[f64]) -> f64;
}

impl<F> Objective for F
where
    F: Fn(&[f64]) -> f64 + Sync,
{
    fn evaluate(&self, candidate: &[f64]) -> f64 {
        self(candidate)
    }
}

/// Final product concentration of a fixed-horizon pathway run
pub struct YieldObjective<M: Dynamics = PathwayModel> {
    model: M,
    integrator: Integrator,
    s0: f64,
    t_max: f64,
    n_samples: usize,
}

impl YieldObjective<PathwayModel> {
    pub fn new(s0: f64, t_max: f64) -> Result<Self> {
        Self::with_model(PathwayModel, s0, t_max)
    }
}

impl<M: Dynamics> YieldObjective<M> {
    pub fn with_model(model: M, s0: f64, t_max: f64) -> Result<Self> {
        if !s0.is_finite() || s0 < 0.0 {
            return Err(PathwayError::InvalidParameter(format!(
                "initial substrate must be non-negative, got {}",
                s0
            )));
        }
        if !t_max.is_finite() || t_max <= 0.0 {
            return Err(PathwayError::InvalidParameter(format!(
                "simulation horizon must be positive, got {}",
                t_max
            )));
        }
        Ok(Self {
            model,
            integrator: Integrator::default(),
            s0,
            t_max,
            n_samples: DEFAULT_SAMPLES,
        })
    }

    pub fn with_samples(mut self, n_samples: usize) -> Result<Self> {
        if n_samples < 2 {
            return Err(PathwayError::InvalidParameter(format!(
                "at least 2 samples are needed, got {}",
                n_samples
            )));
        }
        self.n_samples = n_samples;
        Ok(self)
    }

    pub fn with_integrator(mut self, integrator: Integrator) -> Self {
        self.integrator = integrator;
        self
    }

    pub fn s0(&self) -> f64 {
        self.s0
    }

    pub fn t_max(&self) -> f64 {
        self.t_max
    }

    /// Full run from `(S0, 0, 0, 0)`; failures are returned, not absorbed.
    pub fn simulate(&self, params: &RateParams) -> Result<Trajectory> {
        self.integrator.integrate(
            &self.model,
            params,
            PathwayState::initial(self.s0),
            self.t_max,
            self.n_samples,
        )
    }

    pub fn evaluate_params(&self, params: &RateParams) -> f64 {
        match self.simulate(params) {
            Ok(trajectory) => trajectory
                .final_state()
                .map(|state| state.product)
                .unwrap_or(WORST_FITNESS),
            Err(e) => {
                log::debug!("{:?} scored as worst fitness: {}", params, e);
                WORST_FITNESS
            }
        }
    }
}

impl<M: Dynamics> Objective for YieldObjective<M> {
    fn evaluate(&self, candidate: &[f64]) -> f64 {
        match RateParams::try_from(candidate) {
            Ok(params) => self.evaluate_params(&params),
            Err(e) => {
                log::debug!("Rejected candidate {:?}: {}", candidate, e);
                WORST_FITNESS
            }
        }
    }
}
