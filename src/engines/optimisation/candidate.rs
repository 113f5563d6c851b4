use crate::engines::evaluation::{Objective, WORST_FITNESS};
use rayon::prelude::*;

/// A parameter vector and its fitness, computed at most once.
///
/// Any change to `params` has to go through [`Candidate::params_mut`], which
/// drops the cached fitness.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    params: Vec<f64>,
    fitness: Option<f64>,
}

impl Candidate {
    pub fn new(params: Vec<f64>) -> Self {
        Self { params, fitness: None }
    }

    pub fn params(&self) -> &[f64] {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut [f64] {
        self.fitness = None;
        &mut self.params
    }

    pub fn into_params(self) -> Vec<f64> {
        self.params
    }

    pub fn fitness(&self) -> Option<f64> {
        self.fitness
    }

    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_some()
    }

    /// Returns `true` if the objective was called
    pub fn evaluate<O: Objective + ?Sized>(&mut self, objective: &O) -> bool {
        if self.fitness.is_some() {
            return false;
        }
        self.fitness = Some(objective.evaluate(&self.params));
        true
    }

    /// Fitness for ranking; unevaluated candidates and NaN rank last
    pub fn score(&self) -> f64 {
        match self.fitness {
            Some(f) if !f.is_nan() => f,
            _ => WORST_FITNESS,
        }
    }
}

/// Evaluate every unscored candidate and return how many objective calls
/// were made.
pub fn evaluate_all<O: Objective + ?Sized>(
    population: &mut [Candidate],
    objective: &O,
    parallel: bool,
) -> usize {
    if parallel {
        population
            .par_iter_mut()
            .map(|candidate| candidate.evaluate(objective) as usize)
            .sum()
    } else {
        population
            .iter_mut()
            .map(|candidate| candidate.evaluate(objective) as usize)
            .sum()
    }
}

/// Index of the highest-scoring candidate; ties go to the lowest index
pub fn best_index(population: &[Candidate]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, candidate) in population.iter().enumerate() {
        let score = candidate.score();
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((i, score)),
        }
    }
    best.map(|(i, _)| i)
}
