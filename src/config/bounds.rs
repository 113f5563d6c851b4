use super::traits::{ConfigManifest, ConfigSection, FieldManifest};
use crate::error::PathwayError;
use crate::types::{ParamRange, ParameterSpace, FEEDBACK_DOMAIN, RATE_DOMAIN};
use serde::{Deserialize, Serialize};

/// Search box for the optimizers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundsConfig {
    pub k1: ParamRange,
    pub k2: ParamRange,
    pub k3: ParamRange,
    pub k_feedback: ParamRange,
}

impl Default for BoundsConfig {
    fn default() -> Self {
        Self {
            k1: RATE_DOMAIN,
            k2: RATE_DOMAIN,
            k3: RATE_DOMAIN,
            k_feedback: FEEDBACK_DOMAIN,
        }
    }
}

impl BoundsConfig {
    pub fn to_space(&self) -> Result<ParameterSpace, PathwayError> {
        ParameterSpace::rate_bounds(self.k1, self.k2, self.k3, self.k_feedback)
    }
}

impl ConfigSection for BoundsConfig {
    fn section_name() -> &'static str {
        "bounds"
    }

    fn validate(&self) -> Result<(), PathwayError> {
        self.to_space().map(|_| ())
    }

    fn to_manifest(&self) -> ConfigManifest {
        let mut fields = Vec::new();
        for (name, range, domain) in [
            ("k1", self.k1, RATE_DOMAIN),
            ("k2", self.k2, RATE_DOMAIN),
            ("k3", self.k3, RATE_DOMAIN),
            ("k_feedback", self.k_feedback, FEEDBACK_DOMAIN),
        ] {
            fields.push(FieldManifest::float(
                &format!("{}.min", name),
                range.min,
                domain.min,
                domain.max,
                &format!("Lower search bound for {}", name),
            ));
            fields.push(FieldManifest::float(
                &format!("{}.max", name),
                range.max,
                domain.min,
                domain.max,
                &format!("Upper search bound for {}", name),
            ));
        }
        ConfigManifest { section: "Bounds".to_string(), fields }
    }
}
