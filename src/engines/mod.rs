pub mod simulation;
pub mod evaluation;
pub mod optimisation;
pub mod runner;

pub use runner::{PathwayRunner, RunOutcome, RunRequest};
