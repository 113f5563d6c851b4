pub mod base;
pub mod candidate;
pub mod operators;
pub mod progress;
pub mod genetic;
pub mod differential;
pub mod strategy;

pub use base::{OptimizationResult, Optimizer, Termination};
pub use candidate::Candidate;
pub use genetic::GeneticOptimizer;
pub use differential::DifferentialEvolution;
pub use progress::{ChannelProgressCallback, LogProgressCallback, ProgressCallback, ProgressMessage};
pub use strategy::{OptimizerStrategy, StrategyKind};
