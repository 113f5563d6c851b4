use thiserror::Error;

#[derive(Error, Debug)]
pub enum PathwayError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Simulation failed at t = {time}: {reason}")]
    SimulationFailure { time: f64, reason: String },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl PathwayError {
    pub fn is_simulation_failure(&self) -> bool {
        matches!(self, PathwayError::SimulationFailure { .. })
    }
}

pub type Result<T> = std::result::Result<T, PathwayError>;
