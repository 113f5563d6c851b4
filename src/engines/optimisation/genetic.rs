use super::base::{OptimizationResult, Optimizer, Termination};
use super::candidate::{best_index, evaluate_all, Candidate};
use super::operators::{blend_crossover, clamp_to_space, gaussian_mutate, random_candidate, tournament_selection};
use super::progress::ProgressCallback;
use crate::config::{ConfigSection, GeneticConfig};
use crate::engines::evaluation::Objective;
use crate::error::{PathwayError, Result};
use crate::types::ParameterSpace;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::Normal;
use std::cmp::Ordering;

/// Generational GA with tournament selection, blend crossover and Gaussian
/// mutation. Returns the best candidate seen in any generation.
pub struct GeneticOptimizer {
    config: GeneticConfig,
    rng: StdRng,
}

impl GeneticOptimizer {
    pub fn new(config: GeneticConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self { config, rng })
    }

    pub fn config(&self) -> &GeneticConfig {
        &self.config
    }

    fn initialize_population(&mut self, space: &ParameterSpace) -> Vec<Candidate> {
        (0..self.config.population_size)
            .map(|_| random_candidate(space, &mut self.rng))
            .collect()
    }

    fn create_next_generation(
        &mut self,
        population: &[Candidate],
        space: &ParameterSpace,
        noise: &Normal<f64>,
    ) -> Vec<Candidate> {
        let size = self.config.population_size;
        let mut next_generation = Vec::with_capacity(size);

        // Elitism: copy top performers with their cached fitness
        if self.config.elitism_count > 0 {
            let mut sorted: Vec<&Candidate> = population.iter().collect();
            sorted.sort_by(|a, b| b.score().partial_cmp(&a.score()).unwrap_or(Ordering::Equal));
            next_generation.extend(sorted.into_iter().take(self.config.elitism_count).cloned());
        }

        while next_generation.len() < size {
            let mut child1 = tournament_selection(population, self.config.tournament_size, &mut self.rng);
            let mut child2 = tournament_selection(population, self.config.tournament_size, &mut self.rng);

            if self.rng.gen::<f64>() < self.config.crossover_rate {
                blend_crossover(&mut child1, &mut child2, self.config.blend_alpha, &mut self.rng);
            }

            for child in [&mut child1, &mut child2] {
                gaussian_mutate(child, noise, self.config.mutation_rate, &mut self.rng);
                clamp_to_space(child, space);
            }

            next_generation.push(child1);
            if next_generation.len() < size {
                next_generation.push(child2);
            }
        }

        next_generation
    }
}

impl Optimizer for GeneticOptimizer {
    fn name(&self) -> &str {
        "Genetic Algorithm"
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
        let noise = Normal::new(0.0, self.config.mutation_sigma)
            .map_err(|e| PathwayError::Configuration(format!("Invalid mutation sigma: {}", e)))?;

        let mut population = self.initialize_population(space);
        let mut best: Option<Candidate> = None;
        let mut history = Vec::with_capacity(self.config.generations);
        let mut evaluations = 0;

        for generation in 0..self.config.generations {
            callback.on_generation_start(generation);

            evaluations += evaluate_all(&mut population, objective, self.config.parallel);

            // Single-writer reduction of the running best
            if let Some(idx) = best_index(&population) {
                let improved = match &best {
                    Some(current) => population[idx].score() > current.score(),
                    None => true,
                };
                if improved {
                    best = Some(population[idx].clone());
                }
            }

            let best_fitness = best.as_ref().map(Candidate::score).unwrap_or(f64::NEG_INFINITY);
            history.push(best_fitness);
            callback.on_generation_complete(generation, best_fitness, evaluations);

            if generation + 1 < self.config.generations {
                population = self.create_next_generation(&population, space, &noise);
            }
        }

        let best = best.ok_or_else(|| {
            PathwayError::Configuration("Genetic algorithm ran without a population".to_string())
        })?;

        Ok(OptimizationResult {
            method: self.name().to_string(),
            best_fitness: best.score(),
            best_params: best.into_params(),
            generations: history.len(),
            evaluations,
            history,
            termination: Termination::BudgetExhausted,
        })
    }
}
