pub mod model;
pub mod integrator;

pub use model::{Dynamics, PathwayModel, FEEDBACK_DEGRADATION};
pub use integrator::{
    Integrator, DEFAULT_ABSOLUTE_TOLERANCE, DEFAULT_RELATIVE_TOLERANCE, DEFAULT_SAMPLES, DEFAULT_SUBSTEPS,
};
