use super::progress::ProgressCallback;
use crate::engines::evaluation::Objective;
use crate::error::Result;
use crate::types::ParameterSpace;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// Generation or iteration budget used up
    BudgetExhausted,
    /// Population spread fell below the convergence tolerance
    Converged,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub method: String,
    pub best_params: Vec<f64>,
    pub best_fitness: f64,
    pub generations: usize,
    pub evaluations: usize,
    /// Running best fitness after each generation
    pub history: Vec<f64>,
    pub termination: Termination,
}

/// Maximizes an [`Objective`] over a box-bounded parameter space.
pub trait Optimizer {
    fn name(&self) -> &str;

    fn optimize<O, C>(
        &mut self,
        objective: &O,
        space: &ParameterSpace,
        callback: C,
    ) -> Result<OptimizationResult>
    where
        O: Objective + ?Sized,
        C: ProgressCallback;
}
