use crate::types::{PathwayState, RateParams};

/// First-order degradation rate of the feedback inhibitor
pub const FEEDBACK_DEGRADATION: f64 = 0.1;

/// Right-hand side of an autonomous ODE system over the pathway state
pub trait Dynamics: Send + Sync {
    fn derivative(&self, state: &PathwayState, params: &RateParams) -> PathwayState;
}

/// Linear pathway S -> I -> P -> F where F inhibits the first reaction.
///
/// The inhibition bracket `(1 - k_feedback * F)` is not bounded below: once
/// `k_feedback * F > 1` the substrate term changes sign and S grows again.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathwayModel;

impl PathwayModel {
    pub fn new() -> Self {
        Self
    }
}

impl Dynamics for PathwayModel {
    fn derivative(&self, state: &PathwayState, params: &RateParams) -> PathwayState {
        let PathwayState { substrate: s, intermediate: i, product: p, feedback: f } = *state;
        let (k1, k2, k3, kf) = (params.k1(), params.k2(), params.k3(), params.k_feedback());

        PathwayState {
            substrate: -k1 * s * (1.0 - kf * f),
            intermediate: k1 * s - k2 * i,
            product: k2 * i - k3 * p,
            feedback: k3 * p - FEEDBACK_DEGRADATION * f,
        }
    }
}
