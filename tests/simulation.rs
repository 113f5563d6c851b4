use pathway_designer::engines::simulation::{Integrator, PathwayModel, DEFAULT_SAMPLES};
use pathway_designer::types::{PathwayState, RateParams, Species};
use pathway_designer::PathwayError;

fn run(params: &RateParams, s0: f64, t_max: f64) -> Result<pathway_designer::Trajectory, PathwayError> {
    Integrator::default().integrate(&PathwayModel, params, PathwayState::initial(s0), t_max, DEFAULT_SAMPLES)
}

#[test]
fn test_substrate_non_increasing_without_feedback() {
    for &k1 in &[0.1, 1.0, 5.0] {
        for &k2 in &[0.1, 2.5, 5.0] {
            for &k3 in &[0.1, 5.0] {
                let params = RateParams::new(k1, k2, k3, 0.0).unwrap();
                let trajectory = run(&params, 5.0, 100.0).unwrap();
                let substrate = trajectory.series(Species::Substrate);

                for pair in substrate.windows(2) {
                    assert!(pair[1] <= pair[0], "S increased for {:?}", params);
                }
            }
        }
    }
}

#[test]
fn test_mass_settles_into_product_and_inhibitor_without_feedback() {
    for &k in &[0.5, 1.0, 5.0] {
        let params = RateParams::new(k, k, k, 0.0).unwrap();
        let trajectory = run(&params, 5.0, 100.0).unwrap();
        let last = trajectory.final_state().unwrap();

        assert!(last.substrate.abs() < 1e-9);
        assert!((last.total() - (last.product + last.feedback)).abs() < 1e-9);
    }
}

#[test]
fn test_integration_is_deterministic() {
    let params = RateParams::new(2.0, 0.7, 1.3, 0.2).unwrap();
    let first = run(&params, 5.0, 50.0).unwrap();
    let second = run(&params, 5.0, 50.0).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_zero_substrate_stays_zero() {
    for params in [
        RateParams::default(),
        RateParams::new(5.0, 5.0, 5.0, 2.0).unwrap(),
        RateParams::new(0.1, 0.1, 0.1, 0.0).unwrap(),
    ] {
        let trajectory = run(&params, 0.0, 100.0).unwrap();
        assert!(trajectory.states().iter().all(|s| *s == PathwayState::default()));
    }
}

#[test]
fn test_uniform_time_grid() {
    let trajectory = run(&RateParams::new(1.0, 1.0, 1.0, 0.0).unwrap(), 5.0, 100.0).unwrap();
    let times = trajectory.times();
    let dt = 100.0 / (DEFAULT_SAMPLES - 1) as f64;

    assert_eq!(times.len(), DEFAULT_SAMPLES);
    assert_eq!(times[0], 0.0);
    assert_eq!(times[DEFAULT_SAMPLES - 1], 100.0);
    for pair in times.windows(2) {
        assert!((pair[1] - pair[0] - dt).abs() < 1e-9);
    }
}

#[test]
fn test_default_rates_diverge_over_long_horizon() {
    // k_feedback = 0.5 lets F exceed 2, reversing substrate consumption
    let err = run(&RateParams::default(), 5.0, 100.0).unwrap_err();
    match err {
        PathwayError::SimulationFailure { time, .. } => assert!(time > 0.0 && time < 100.0),
        other => panic!("expected SimulationFailure, got {:?}", other),
    }
}

#[test]
fn test_default_rates_bounded_over_short_horizon() {
    let trajectory = run(&RateParams::default(), 5.0, 4.0).unwrap();
    let product = trajectory.final_state().unwrap().product;
    assert!(product > 0.0 && product < 5.0);
}

#[test]
fn test_weak_feedback_product_bounded() {
    let params = RateParams::new(1.0, 1.0, 1.0, 0.1).unwrap();
    let trajectory = run(&params, 5.0, 100.0).unwrap();
    let product = trajectory.final_state().unwrap().product;
    assert!(product > 0.0 && product < 5.0);
    assert!(trajectory.series(Species::Product).iter().all(|p| *p >= 0.0 && *p < 5.0));
}
