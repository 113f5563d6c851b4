pub mod config;
pub mod engines;
pub mod error;
pub mod types;

pub use error::{PathwayError, Result};
pub use types::{ParamRange, ParameterSpace, PathwayState, RateParams, Species, Trajectory};
