use pathway_designer::config::{DifferentialConfig, GeneticConfig};
use pathway_designer::engines::evaluation::{Objective, YieldObjective};
use pathway_designer::engines::optimisation::{
    ChannelProgressCallback, DifferentialEvolution, GeneticOptimizer, OptimizationResult, Optimizer,
    ProgressCallback, ProgressMessage,
};
use pathway_designer::types::{ParameterSpace, RateParams};
use std::sync::mpsc::channel;

/// Counts callbacks and checks the running best never drops
struct TestProgressCallback {
    completed: usize,
    last_best: f64,
}

impl ProgressCallback for TestProgressCallback {
    fn on_generation_start(&mut self, _generation: usize) {}

    fn on_generation_complete(&mut self, generation: usize, best_fitness: f64, _evaluations: usize) {
        assert_eq!(generation, self.completed);
        assert!(best_fitness >= self.last_best);
        self.completed += 1;
        self.last_best = best_fitness;
    }
}

fn scenario_objective() -> YieldObjective {
    YieldObjective::new(5.0, 100.0).unwrap()
}

fn baseline_fitness(objective: &YieldObjective) -> f64 {
    objective.evaluate(&RateParams::default().to_vec())
}

#[test]
fn test_yield_objective_is_idempotent() {
    let objective = scenario_objective();
    for candidate in [[1.0, 1.0, 1.0, 0.5], [2.0, 0.5, 3.0, 0.0], [0.1, 5.0, 5.0, 0.1]] {
        let first = objective.evaluate(&candidate);
        let second = objective.evaluate(&candidate);
        assert_eq!(first.to_bits(), second.to_bits());
    }
}

fn run_genetic(objective: &YieldObjective, space: &ParameterSpace) -> OptimizationResult {
    let config = GeneticConfig { seed: Some(42), ..GeneticConfig::default() };
    let mut callback = TestProgressCallback { completed: 0, last_best: f64::NEG_INFINITY };
    let result = GeneticOptimizer::new(config)
        .unwrap()
        .optimize(objective, space, &mut callback)
        .unwrap();

    assert_eq!(callback.completed, 10);
    for pair in result.history.windows(2) {
        assert!(pair[1] >= pair[0]);
    }
    result
}

fn run_differential(objective: &YieldObjective, space: &ParameterSpace) -> OptimizationResult {
    let config = DifferentialConfig { seed: Some(42), ..DifferentialConfig::default() };
    let result = DifferentialEvolution::new(config)
        .unwrap()
        .optimize(objective, space, ())
        .unwrap();

    assert!(result.generations >= 1 && result.generations <= 20);
    result
}

#[test]
fn test_genetic_beats_default_parameters() {
    let objective = scenario_objective();
    let space = ParameterSpace::default();
    let result = run_genetic(&objective, &space);

    assert!(result.best_fitness >= baseline_fitness(&objective));
    assert!(space.contains(&result.best_params));
    assert_eq!(objective.evaluate(&result.best_params), result.best_fitness);
}

#[test]
fn test_differential_beats_default_parameters() {
    let objective = scenario_objective();
    let space = ParameterSpace::default();
    let result = run_differential(&objective, &space);

    assert!(result.best_fitness >= baseline_fitness(&objective));
    assert!(space.contains(&result.best_params));
    assert_eq!(objective.evaluate(&result.best_params), result.best_fitness);
}

#[test]
fn test_both_strategies_beat_finite_default_yield() {
    // Default rates still integrate cleanly up to t = 4
    let objective = YieldObjective::new(5.0, 4.0).unwrap();
    let space = ParameterSpace::default();
    let baseline = baseline_fitness(&objective);
    assert!(baseline.is_finite() && baseline > 1.0 && baseline < 2.0, "baseline {}", baseline);

    for result in [run_genetic(&objective, &space), run_differential(&objective, &space)] {
        assert!(result.best_fitness.is_finite());
        assert!(
            result.best_fitness >= baseline,
            "{} reached {} below default {}",
            result.method,
            result.best_fitness,
            baseline
        );
        assert!(space.contains(&result.best_params));
        assert_eq!(objective.evaluate(&result.best_params), result.best_fitness);
    }
}

#[test]
fn test_fixed_seed_reproduces_results() {
    let objective = YieldObjective::new(5.0, 20.0).unwrap();
    let space = ParameterSpace::default();

    let ga = |parallel: bool| {
        let config = GeneticConfig { seed: Some(7), parallel, ..GeneticConfig::default() };
        GeneticOptimizer::new(config).unwrap().optimize(&objective, &space, ()).unwrap()
    };
    let (a, b, c) = (ga(true), ga(true), ga(false));
    assert_eq!(a.best_params, b.best_params);
    assert_eq!(a.history, b.history);
    assert_eq!(a.best_params, c.best_params);
    assert_eq!(a.evaluations, c.evaluations);

    let de = |parallel: bool| {
        let config = DifferentialConfig { seed: Some(7), parallel, ..DifferentialConfig::default() };
        DifferentialEvolution::new(config).unwrap().optimize(&objective, &space, ()).unwrap()
    };
    let (a, b, c) = (de(true), de(true), de(false));
    assert_eq!(a.best_params, b.best_params);
    assert_eq!(a.history, b.history);
    assert_eq!(a.best_params, c.best_params);
    assert_eq!(a.termination, c.termination);
}

#[test]
fn test_narrow_bounds_are_respected() {
    let objective = YieldObjective::new(5.0, 10.0).unwrap();
    let space = ParameterSpace::rate_bounds(
        pathway_designer::ParamRange::new(1.0, 2.0).unwrap(),
        pathway_designer::ParamRange::new(1.0, 2.0).unwrap(),
        pathway_designer::ParamRange::new(0.5, 0.5).unwrap(),
        pathway_designer::ParamRange::new(0.0, 0.1).unwrap(),
    )
    .unwrap();

    let config = GeneticConfig { seed: Some(5), mutation_sigma: 2.0, ..GeneticConfig::default() };
    let ga = GeneticOptimizer::new(config).unwrap().optimize(&objective, &space, ()).unwrap();
    assert!(space.contains(&ga.best_params));
    assert_eq!(ga.best_params[2], 0.5);

    let config = DifferentialConfig { seed: Some(5), ..DifferentialConfig::default() };
    let de = DifferentialEvolution::new(config).unwrap().optimize(&objective, &space, ()).unwrap();
    assert!(space.contains(&de.best_params));
    assert!(de.best_fitness.is_finite());
}

#[test]
fn test_channel_progress_reports_each_generation() {
    let (tx, rx) = channel();
    let objective = YieldObjective::new(5.0, 10.0).unwrap();
    let config = GeneticConfig { seed: Some(11), generations: 4, ..GeneticConfig::default() };

    GeneticOptimizer::new(config)
        .unwrap()
        .optimize(&objective, &ParameterSpace::default(), ChannelProgressCallback::new(tx))
        .unwrap();

    let messages: Vec<ProgressMessage> = rx.try_iter().collect();
    assert_eq!(messages.len(), 8);
    assert_eq!(messages[0], ProgressMessage::GenerationStart(0));
    match messages.last() {
        Some(ProgressMessage::GenerationComplete { generation, evaluations, .. }) => {
            assert_eq!(*generation, 3);
            assert!(*evaluations >= 20);
        }
        other => panic!("unexpected last message {:?}", other),
    }
}
