//! Fixed-grid fourth-order Runge-Kutta integration of a [`Dynamics`] system.
//!
//! The output grid is `n_samples` evenly spaced points over `[0, t_max]`.
//! Between two consecutive output points the solver takes `substeps` equal
//! RK4 steps, so the effective step is `t_max / ((n_samples - 1) * substeps)`.
//!
//! Every output interval is also solved with twice as many half-size steps.
//! The refined result is kept, and the difference between the two serves as
//! the error estimate: when it exceeds `atol + rtol * |x|` for any species
//! the solve is reported as not converged.

use super::model::Dynamics;
use crate::error::{PathwayError, Result};
use crate::types::{PathwayState, RateParams, Species, Trajectory};

/// Number of output samples used when the caller has no preference
pub const DEFAULT_SAMPLES: usize = 500;

/// RK4 steps between two output samples
pub const DEFAULT_SUBSTEPS: usize = 10;

/// Relative step-doubling tolerance per output interval
pub const DEFAULT_RELATIVE_TOLERANCE: f64 = 1e-3;

/// Absolute floor for concentrations close to zero
pub const DEFAULT_ABSOLUTE_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Copy)]
pub struct Integrator {
    substeps: usize,
    rtol: f64,
    atol: f64,
}

impl Default for Integrator {
    fn default() -> Self {
        Self {
            substeps: DEFAULT_SUBSTEPS,
            rtol: DEFAULT_RELATIVE_TOLERANCE,
            atol: DEFAULT_ABSOLUTE_TOLERANCE,
        }
    }
}

impl Integrator {
    pub fn new(substeps: usize) -> Result<Self> {
        if substeps == 0 {
            return Err(PathwayError::InvalidParameter(
                "integrator needs at least one substep per sample".to_string(),
            ));
        }
        Ok(Self {
            substeps,
            ..Self::default()
        })
    }

    pub fn with_tolerances(mut self, rtol: f64, atol: f64) -> Result<Self> {
        if !(rtol.is_finite() && rtol > 0.0 && atol.is_finite() && atol >= 0.0) {
            return Err(PathwayError::InvalidParameter(format!(
                "tolerances must be finite with rtol > 0 and atol >= 0, got rtol = {}, atol = {}",
                rtol, atol
            )));
        }
        self.rtol = rtol;
        self.atol = atol;
        Ok(self)
    }

    pub fn substeps(&self) -> usize {
        self.substeps
    }

    /// Solve the initial-value problem and sample it on the output grid.
    ///
    /// Returns `SimulationFailure` as soon as any concentration stops being
    /// finite or an interval fails the step-doubling check; the partial
    /// trajectory is discarded.
    pub fn integrate<M: Dynamics + ?Sized>(
        &self,
        model: &M,
        params: &RateParams,
        initial: PathwayState,
        t_max: f64,
        n_samples: usize,
    ) -> Result<Trajectory> {
        if !t_max.is_finite() || t_max <= 0.0 {
            return Err(PathwayError::InvalidParameter(format!(
                "simulation horizon must be positive and finite, got {}",
                t_max
            )));
        }
        if n_samples < 2 {
            return Err(PathwayError::InvalidParameter(format!(
                "at least 2 samples are needed to span [0, t_max], got {}",
                n_samples
            )));
        }
        if !initial.is_finite() {
            return Err(PathwayError::InvalidParameter(format!(
                "initial state is not finite: {:?}",
                initial
            )));
        }

        let intervals = (n_samples - 1) as f64;
        let mut trajectory = Trajectory::with_capacity(n_samples);
        let mut state = initial;
        let mut t_prev = 0.0;
        trajectory.push(0.0, state);

        for i in 1..n_samples {
            // Last point lands exactly on t_max
            let t_next = if i == n_samples - 1 {
                t_max
            } else {
                t_max * i as f64 / intervals
            };
            let h = (t_next - t_prev) / self.substeps as f64;

            let fine = advance(model, params, state, t_prev, h / 2.0, 2 * self.substeps)?;
            let coarse = advance(model, params, state, t_prev, h, self.substeps)
                .unwrap_or_else(|_| PathwayState::new(f64::NAN, f64::NAN, f64::NAN, f64::NAN));

            let ratio = self.error_ratio(&fine, &coarse);
            // NaN ratio (coarse pass blew up) fails as well
            if !(ratio <= 1.0) {
                return Err(PathwayError::SimulationFailure {
                    time: t_next,
                    reason: format!(
                        "solution failed to converge: halving the step changed it by {:.3e} times the tolerance",
                        ratio
                    ),
                });
            }
            state = fine;

            trajectory.push(t_next, state);
            t_prev = t_next;
        }

        Ok(trajectory)
    }

    /// Largest per-species deviation, scaled so that 1.0 is the tolerance
    fn error_ratio(&self, fine: &PathwayState, coarse: &PathwayState) -> f64 {
        Species::ALL
            .iter()
            .map(|&species| {
                let (f, c) = (fine.get(species), coarse.get(species));
                (f - c).abs() / (self.atol + self.rtol * f.abs())
            })
            .fold(0.0, |worst, r| if r.is_nan() || r > worst { r } else { worst })
    }
}

/// `steps` RK4 steps of size `h` starting at `t_start`
fn advance<M: Dynamics + ?Sized>(
    model: &M,
    params: &RateParams,
    mut state: PathwayState,
    t_start: f64,
    h: f64,
    steps: usize,
) -> Result<PathwayState> {
    for step in 0..steps {
        state = rk4_step(model, params, &state, h);
        if !state.is_finite() {
            return Err(PathwayError::SimulationFailure {
                time: t_start + h * (step + 1) as f64,
                reason: "state diverged to a non-finite value".to_string(),
            });
        }
    }
    Ok(state)
}

fn rk4_step<M: Dynamics + ?Sized>(
    model: &M,
    params: &RateParams,
    state: &PathwayState,
    h: f64,
) -> PathwayState {
    let k1 = model.derivative(state, params);
    let k2 = model.derivative(&state.add_scaled(&k1, h / 2.0), params);
    let k3 = model.derivative(&state.add_scaled(&k2, h / 2.0), params);
    let k4 = model.derivative(&state.add_scaled(&k3, h), params);

    state
        .add_scaled(&k1, h / 6.0)
        .add_scaled(&k2, h / 3.0)
        .add_scaled(&k3, h / 3.0)
        .add_scaled(&k4, h / 6.0)
}
