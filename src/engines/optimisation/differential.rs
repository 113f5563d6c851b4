//! Differential Evolution, `best1bin` variant.
//!
//! Every generation each slot `i` gets a trial vector built from the current
//! best member `b` and two other distinct members `r1`, `r2`:
//!
//! ```text
//! mutant = b + F * (r1 - r2)
//! trial[j] = mutant[j]  if u_j < CR or j == j_rand
//!          = target[j]  otherwise
//! ```
//!
//! The trial replaces the target only if its fitness is at least as good.
//! Trials are built from the population as it stood at the start of the
//! generation, which lets their evaluation run in parallel while keeping the
//! random stream identical to a sequential run.

use super::base::{OptimizationResult, Optimizer, Termination};
use super::candidate::{best_index, evaluate_all, Candidate};
use super::operators::{clamp_to_space, latin_hypercube};
use super::progress::ProgressCallback;
use crate::config::{ConfigSection, DifferentialConfig};
use crate::engines::evaluation::Objective;
use crate::error::{PathwayError, Result};
use crate::types::ParameterSpace;
use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};

pub struct DifferentialEvolution {
    config: DifferentialConfig,
    rng: StdRng,
}

impl DifferentialEvolution {
    pub fn new(config: DifferentialConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self { config, rng })
    }

    pub fn config(&self) -> &DifferentialConfig {
        &self.config
    }

    fn build_trial(
        &mut self,
        target: usize,
        best: usize,
        population: &[Candidate],
        space: &ParameterSpace,
    ) -> Candidate {
        let (r1, r2) = pick_two_others(target, population.len(), &mut self.rng);
        let base = population[best].params();
        let (a, b) = (population[r1].params(), population[r2].params());
        let current = population[target].params();

        let dim = base.len();
        let forced = self.rng.gen_range(0..dim);
        let weight = self.config.differential_weight;

        let params: Vec<f64> = (0..dim)
            .map(|j| {
                if j == forced || self.rng.gen::<f64>() < self.config.crossover_probability {
                    base[j] + weight * (a[j] - b[j])
                } else {
                    current[j]
                }
            })
            .collect();

        let mut trial = Candidate::new(params);
        clamp_to_space(&mut trial, space);
        trial
    }

    fn has_converged(&self, population: &[Candidate]) -> bool {
        let scores: Vec<f64> = population.iter().map(Candidate::score).collect();
        if scores.iter().any(|s| !s.is_finite()) {
            return false;
        }
        let (mean, std) = mean_std(&scores);
        std <= self.config.absolute_tolerance + self.config.tolerance * mean.abs()
    }
}

/// Two distinct indices in `0..n`, both different from `exclude`
fn pick_two_others<R: Rng>(exclude: usize, n: usize, rng: &mut R) -> (usize, usize) {
    let picked = index::sample(rng, n - 1, 2);
    let shift = |k: usize| if k >= exclude { k + 1 } else { k };
    (shift(picked.index(0)), shift(picked.index(1)))
}

fn mean_std(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}

impl Optimizer for DifferentialEvolution {
    fn name(&self) -> &str {
        "Differential Evolution"
    }

    fn optimize<O, C>(
        &mut self,
        objective: &O,
        space: &ParameterSpace,
        mut callback: C,
    ) -> Result<OptimizationResult>
    where
        O: Objective + ?Sized,
        C: ProgressCallback,
    {
        let size = self.config.population_for(space.dim());
        if size < 3 {
            return Err(PathwayError::Configuration(format!(
                "Differential evolution needs at least 3 members, got {}",
                size
            )));
        }

        let mut population = latin_hypercube(space, size, &mut self.rng);
        let mut evaluations = evaluate_all(&mut population, objective, self.config.parallel);
        let mut best = best_index(&population).unwrap_or(0);

        let mut history = Vec::with_capacity(self.config.max_iterations);
        let mut termination = Termination::BudgetExhausted;

        for iteration in 0..self.config.max_iterations {
            callback.on_generation_start(iteration);

            let mut trials: Vec<Candidate> = (0..size)
                .map(|i| self.build_trial(i, best, &population, space))
                .collect();
            evaluations += evaluate_all(&mut trials, objective, self.config.parallel);

            // Greedy one-to-one replacement
            for (slot, trial) in population.iter_mut().zip(trials) {
                if trial.score() >= slot.score() {
                    *slot = trial;
                }
            }

            best = best_index(&population).unwrap_or(best);
            let best_fitness = population[best].score();
            history.push(best_fitness);
            callback.on_generation_complete(iteration, best_fitness, evaluations);

            if self.has_converged(&population) {
                log::debug!("Differential evolution converged after {} iterations", iteration + 1);
                termination = Termination::Converged;
                break;
            }
        }

        let champion = population.swap_remove(best);
        Ok(OptimizationResult {
            method: self.name().to_string(),
            best_fitness: champion.score(),
            best_params: champion.into_params(),
            generations: history.len(),
            evaluations,
            history,
            termination,
        })
    }
}
