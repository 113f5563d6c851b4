use crate::error::{PathwayError, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Admissible range for the enzymatic rates k1, k2 and k3
pub const RATE_DOMAIN: ParamRange = ParamRange { min: 0.1, max: 5.0 };

/// Admissible range for the feedback inhibition strength
pub const FEEDBACK_DOMAIN: ParamRange = ParamRange { min: 0.0, max: 2.0 };

/// Concentrations of the four pathway species
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PathwayState {
    pub substrate: f64,
    pub intermediate: f64,
    pub product: f64,
    pub feedback: f64,
}

impl PathwayState {
    pub fn new(substrate: f64, intermediate: f64, product: f64, feedback: f64) -> Self {
        Self { substrate, intermediate, product, feedback }
    }

    /// Every run starts with substrate only
    pub fn initial(s0: f64) -> Self {
        Self::new(s0, 0.0, 0.0, 0.0)
    }

    pub fn get(&self, species: Species) -> f64 {
        match species {
            Species::Substrate => self.substrate,
            Species::Intermediate => self.intermediate,
            Species::Product => self.product,
            Species::FeedbackInhibitor => self.feedback,
        }
    }

    pub fn total(&self) -> f64 {
        self.substrate + self.intermediate + self.product + self.feedback
    }

    pub fn is_finite(&self) -> bool {
        self.substrate.is_finite()
            && self.intermediate.is_finite()
            && self.product.is_finite()
            && self.feedback.is_finite()
    }

    /// `self + scale * delta`, used by the Runge-Kutta stages
    pub fn add_scaled(&self, delta: &PathwayState, scale: f64) -> Self {
        Self {
            substrate: self.substrate + scale * delta.substrate,
            intermediate: self.intermediate + scale * delta.intermediate,
            product: self.product + scale * delta.product,
            feedback: self.feedback + scale * delta.feedback,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    Substrate,
    Intermediate,
    Product,
    FeedbackInhibitor,
}

impl Species {
    pub const ALL: [Species; 4] = [
        Species::Substrate,
        Species::Intermediate,
        Species::Product,
        Species::FeedbackInhibitor,
    ];

    /// Series label used by chart hosts
    pub fn label(&self) -> &'static str {
        match self {
            Species::Substrate => "Substrate (S)",
            Species::Intermediate => "Intermediate (I)",
            Species::Product => "Product (P)",
            Species::FeedbackInhibitor => "Feedback Inhibitor (F)",
        }
    }
}

/// Reaction rates of the pathway.
///
/// Only constructible through [`RateParams::new`] (or `TryFrom<&[f64]>`), so a
/// value of this type always lies inside the admissible domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RateParams {
    k1: f64,
    k2: f64,
    k3: f64,
    k_feedback: f64,
}

impl RateParams {
    pub const DIM: usize = 4;

    pub fn new(k1: f64, k2: f64, k3: f64, k_feedback: f64) -> Result<Self> {
        check_in_domain("k1", k1, RATE_DOMAIN)?;
        check_in_domain("k2", k2, RATE_DOMAIN)?;
        check_in_domain("k3", k3, RATE_DOMAIN)?;
        check_in_domain("k_feedback", k_feedback, FEEDBACK_DOMAIN)?;
        Ok(Self { k1, k2, k3, k_feedback })
    }

    pub fn k1(&self) -> f64 {
        self.k1
    }

    pub fn k2(&self) -> f64 {
        self.k2
    }

    pub fn k3(&self) -> f64 {
        self.k3
    }

    pub fn k_feedback(&self) -> f64 {
        self.k_feedback
    }

    pub fn to_vec(&self) -> Vec<f64> {
        vec![self.k1, self.k2, self.k3, self.k_feedback]
    }
}

impl Default for RateParams {
    fn default() -> Self {
        Self { k1: 1.0, k2: 1.0, k3: 1.0, k_feedback: 0.5 }
    }
}

impl TryFrom<&[f64]> for RateParams {
    type Error = PathwayError;

    fn try_from(values: &[f64]) -> Result<Self> {
        match values {
            [k1, k2, k3, k_feedback] => RateParams::new(*k1, *k2, *k3, *k_feedback),
            _ => Err(PathwayError::InvalidParameter(format!(
                "expected {} rate parameters, got {}",
                RateParams::DIM,
                values.len()
            ))),
        }
    }
}

fn check_in_domain(name: &str, value: f64, domain: ParamRange) -> Result<()> {
    if !domain.contains(value) {
        return Err(PathwayError::InvalidParameter(format!(
            "{} = {} outside admissible range [{}, {}]",
            name, value, domain.min, domain.max
        )));
    }
    Ok(())
}

/// Closed interval `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParamRange {
    pub min: f64,
    pub max: f64,
}

impl ParamRange {
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(PathwayError::InvalidParameter(format!(
                "invalid range [{}, {}]",
                min, max
            )));
        }
        Ok(Self { min, max })
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    pub fn is_within(&self, domain: &ParamRange) -> bool {
        self.min >= domain.min && self.max <= domain.max
    }
}

/// Box-bounded search space, one range per coordinate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSpace {
    ranges: Vec<ParamRange>,
}

impl ParameterSpace {
    pub fn new(ranges: Vec<ParamRange>) -> Result<Self> {
        if ranges.is_empty() {
            return Err(PathwayError::InvalidParameter(
                "parameter space needs at least one dimension".to_string(),
            ));
        }
        for range in &ranges {
            ParamRange::new(range.min, range.max)?;
        }
        Ok(Self { ranges })
    }

    /// Search space over (k1, k2, k3, k_feedback); every range must sit
    /// inside the admissible domain of its rate.
    pub fn rate_bounds(
        k1: ParamRange,
        k2: ParamRange,
        k3: ParamRange,
        k_feedback: ParamRange,
    ) -> Result<Self> {
        let named = [
            ("k1", k1, RATE_DOMAIN),
            ("k2", k2, RATE_DOMAIN),
            ("k3", k3, RATE_DOMAIN),
            ("k_feedback", k_feedback, FEEDBACK_DOMAIN),
        ];
        for (name, range, domain) in &named {
            ParamRange::new(range.min, range.max)?;
            if !range.is_within(domain) {
                return Err(PathwayError::InvalidParameter(format!(
                    "bounds for {} [{}, {}] exceed admissible range [{}, {}]",
                    name, range.min, range.max, domain.min, domain.max
                )));
            }
        }
        Self::new(vec![k1, k2, k3, k_feedback])
    }

    pub fn dim(&self) -> usize {
        self.ranges.len()
    }

    pub fn ranges(&self) -> &[ParamRange] {
        &self.ranges
    }

    pub fn contains(&self, point: &[f64]) -> bool {
        point.len() == self.dim()
            && point.iter().zip(&self.ranges).all(|(x, r)| r.contains(*x))
    }

    pub fn clamp(&self, point: &mut [f64]) {
        for (x, range) in point.iter_mut().zip(&self.ranges) {
            *x = range.clamp(*x);
        }
    }

    pub fn sample_uniform<R: Rng>(&self, rng: &mut R) -> Vec<f64> {
        self.ranges
            .iter()
            .map(|r| {
                if r.width() > 0.0 {
                    rng.gen_range(r.min..=r.max)
                } else {
                    r.min
                }
            })
            .collect()
    }
}

impl Default for ParameterSpace {
    fn default() -> Self {
        Self {
            ranges: vec![RATE_DOMAIN, RATE_DOMAIN, RATE_DOMAIN, FEEDBACK_DOMAIN],
        }
    }
}

/// Time-ordered samples of one simulation run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trajectory {
    times: Vec<f64>,
    states: Vec<PathwayState>,
}

impl Trajectory {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            times: Vec::with_capacity(capacity),
            states: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, time: f64, state: PathwayState) {
        self.times.push(time);
        self.states.push(state);
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn states(&self) -> &[PathwayState] {
        &self.states
    }

    pub fn final_state(&self) -> Option<&PathwayState> {
        self.states.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, &PathwayState)> {
        self.times.iter().copied().zip(self.states.iter())
    }

    /// One concentration column, aligned with [`Trajectory::times`]
    pub fn series(&self, species: Species) -> Vec<f64> {
        self.states.iter().map(|s| s.get(species)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_params_domain() {
        assert!(RateParams::new(0.1, 5.0, 1.0, 0.0).is_ok());
        assert!(RateParams::new(1.0, 1.0, 1.0, 2.0).is_ok());

        assert!(RateParams::new(0.05, 1.0, 1.0, 0.5).is_err());
        assert!(RateParams::new(1.0, 5.1, 1.0, 0.5).is_err());
        assert!(RateParams::new(1.0, 1.0, 1.0, -0.1).is_err());
        assert!(RateParams::new(1.0, 1.0, f64::NAN, 0.5).is_err());
    }

    #[test]
    fn test_rate_params_from_slice() {
        let params = RateParams::try_from(&[2.0, 3.0, 4.0, 1.5][..]).unwrap();
        assert_eq!(params.to_vec(), vec![2.0, 3.0, 4.0, 1.5]);

        let err = RateParams::try_from(&[1.0, 1.0][..]).unwrap_err();
        assert!(matches!(err, PathwayError::InvalidParameter(_)));
    }

    #[test]
    fn test_rate_bounds_rejects_out_of_domain() {
        let ok = ParameterSpace::rate_bounds(RATE_DOMAIN, RATE_DOMAIN, RATE_DOMAIN, FEEDBACK_DOMAIN);
        assert_eq!(ok.unwrap().dim(), 4);

        let too_wide = ParameterSpace::rate_bounds(
            ParamRange { min: 0.0, max: 5.0 },
            RATE_DOMAIN,
            RATE_DOMAIN,
            FEEDBACK_DOMAIN,
        );
        assert!(too_wide.is_err());

        let inverted = ParameterSpace::rate_bounds(
            RATE_DOMAIN,
            RATE_DOMAIN,
            RATE_DOMAIN,
            ParamRange { min: 1.5, max: 0.5 },
        );
        assert!(inverted.is_err());
    }

    #[test]
    fn test_space_clamp() {
        let space = ParameterSpace::default();
        let mut point = vec![-3.0, 7.0, 2.5, 2.2];
        space.clamp(&mut point);
        assert_eq!(point, vec![0.1, 5.0, 2.5, 2.0]);
        assert!(space.contains(&point));
    }

    #[test]
    fn test_trajectory_series() {
        let mut trajectory = Trajectory::with_capacity(2);
        trajectory.push(0.0, PathwayState::initial(5.0));
        trajectory.push(1.0, PathwayState::new(3.0, 1.0, 0.5, 0.25));

        assert_eq!(trajectory.series(Species::Substrate), vec![5.0, 3.0]);
        assert_eq!(trajectory.series(Species::FeedbackInhibitor), vec![0.0, 0.25]);
        assert_eq!(trajectory.final_state().map(|s| s.product), Some(0.5));
    }
}
