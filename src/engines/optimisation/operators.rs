use super::candidate::Candidate;
use crate::types::ParameterSpace;
use rand::seq::SliceRandom;
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Tournament selection: pick best of K random candidates
pub fn tournament_selection<R: Rng>(
    population: &[Candidate],
    tournament_size: usize,
    rng: &mut R,
) -> Candidate {
    let mut best_idx = rng.gen_range(0..population.len());
    let mut best_score = population[best_idx].score();

    for _ in 1..tournament_size {
        let idx = rng.gen_range(0..population.len());
        if population[idx].score() > best_score {
            best_idx = idx;
            best_score = population[idx].score();
        }
    }

    population[best_idx].clone()
}

/// Blend crossover (BLX-alpha), applied to both children in place.
///
/// For every coordinate a weight `gamma` is drawn from `[-alpha, 1 + alpha]`
/// and the children become `(1 - gamma) * a + gamma * b` and
/// `gamma * a + (1 - gamma) * b`. With `alpha = 0` both are convex
/// combinations of the parents.
pub fn blend_crossover<R: Rng>(
    child1: &mut Candidate,
    child2: &mut Candidate,
    alpha: f64,
    rng: &mut R,
) {
    let a = child1.params_mut();
    let b = child2.params_mut();

    for (x1, x2) in a.iter_mut().zip(b.iter_mut()) {
        let gamma = (1.0 + 2.0 * alpha) * rng.gen::<f64>() - alpha;
        let (p1, p2) = (*x1, *x2);
        *x1 = (1.0 - gamma) * p1 + gamma * p2;
        *x2 = gamma * p1 + (1.0 - gamma) * p2;
    }
}

/// Gaussian mutation: add zero-mean noise to each coordinate with
/// probability `mutation_rate`. Returns whether anything changed.
pub fn gaussian_mutate<R: Rng>(
    candidate: &mut Candidate,
    noise: &Normal<f64>,
    mutation_rate: f64,
    rng: &mut R,
) -> bool {
    let dim = candidate.params().len();
    let hits: Vec<usize> = (0..dim).filter(|_| rng.gen::<f64>() < mutation_rate).collect();
    if hits.is_empty() {
        return false;
    }

    let params = candidate.params_mut();
    for i in hits {
        params[i] += noise.sample(rng);
    }
    true
}

/// Pull every coordinate back inside the box, leaving in-bounds
/// candidates (and their cached fitness) untouched.
pub fn clamp_to_space(candidate: &mut Candidate, space: &ParameterSpace) {
    if !space.contains(candidate.params()) {
        space.clamp(candidate.params_mut());
    }
}

/// Generate random candidate
pub fn random_candidate<R: Rng>(space: &ParameterSpace, rng: &mut R) -> Candidate {
    Candidate::new(space.sample_uniform(rng))
}

/// Latin hypercube sample of `n` points: each coordinate's range is split
/// into `n` equal strata and every stratum is hit exactly once.
pub fn latin_hypercube<R: Rng>(space: &ParameterSpace, n: usize, rng: &mut R) -> Vec<Candidate> {
    let mut points = vec![vec![0.0; space.dim()]; n];

    for (d, range) in space.ranges().iter().enumerate() {
        let mut strata: Vec<usize> = (0..n).collect();
        strata.shuffle(rng);
        for (point, stratum) in points.iter_mut().zip(strata) {
            let u = (stratum as f64 + rng.gen::<f64>()) / n as f64;
            point[d] = range.min + u * range.width();
        }
    }

    points.into_iter().map(Candidate::new).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ParamRange;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn unit_space(dim: usize) -> ParameterSpace {
        ParameterSpace::new(vec![ParamRange { min: 0.0, max: 1.0 }; dim]).unwrap()
    }

    #[test]
    fn test_tournament_picks_best_when_exhaustive() {
        let mut rng = StdRng::seed_from_u64(7);
        let objective = |x: &[f64]| x[0];
        let mut population: Vec<Candidate> = (0..3).map(|i| Candidate::new(vec![i as f64])).collect();
        for c in population.iter_mut() {
            c.evaluate(&objective);
        }

        // With a large tournament the best member is almost surely sampled
        let winner = tournament_selection(&population, 50, &mut rng);
        assert_eq!(winner.params(), &[2.0]);
        assert!(winner.is_evaluated());
    }

    #[test]
    fn test_blend_without_alpha_stays_between_parents() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            let mut a = Candidate::new(vec![1.0, 4.0]);
            let mut b = Candidate::new(vec![3.0, 2.0]);
            blend_crossover(&mut a, &mut b, 0.0, &mut rng);

            for child in [&a, &b] {
                assert!(child.params()[0] >= 1.0 - 1e-12 && child.params()[0] <= 3.0 + 1e-12);
                assert!(child.params()[1] >= 2.0 - 1e-12 && child.params()[1] <= 4.0 + 1e-12);
            }
            // Sum of coordinates is preserved by the symmetric blend
            assert!((a.params()[0] + b.params()[0] - 4.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_default_blend_is_convex() {
        let alpha = crate::config::GeneticConfig::default().blend_alpha;
        let mut rng = StdRng::seed_from_u64(29);
        for _ in 0..200 {
            let mut a = Candidate::new(vec![0.1, 5.0]);
            let mut b = Candidate::new(vec![5.0, 0.1]);
            blend_crossover(&mut a, &mut b, alpha, &mut rng);

            for child in [&a, &b] {
                assert!(child.params().iter().all(|x| (0.1 - 1e-12..=5.0 + 1e-12).contains(x)));
            }
        }
    }

    #[test]
    fn test_mutation_rate_zero_keeps_fitness() {
        let mut rng = StdRng::seed_from_u64(3);
        let noise = Normal::new(0.0, 1.0).unwrap();
        let mut candidate = Candidate::new(vec![0.5, 0.5]);
        candidate.evaluate(&|x: &[f64]| x[0]);

        assert!(!gaussian_mutate(&mut candidate, &noise, 0.0, &mut rng));
        assert!(candidate.is_evaluated());

        assert!(gaussian_mutate(&mut candidate, &noise, 1.0, &mut rng));
        assert!(!candidate.is_evaluated());
    }

    #[test]
    fn test_clamp_to_space() {
        let space = unit_space(2);
        let mut candidate = Candidate::new(vec![-0.5, 1.5]);
        clamp_to_space(&mut candidate, &space);
        assert_eq!(candidate.params(), &[0.0, 1.0]);
    }

    #[test]
    fn test_latin_hypercube_strata() {
        let mut rng = StdRng::seed_from_u64(5);
        let n = 8;
        let population = latin_hypercube(&unit_space(3), n, &mut rng);
        assert_eq!(population.len(), n);

        for d in 0..3 {
            let mut strata: Vec<usize> = population
                .iter()
                .map(|c| (c.params()[d] * n as f64).floor() as usize)
                .collect();
            strata.sort_unstable();
            assert_eq!(strata, (0..n).collect::<Vec<_>>());
        }
    }
}
