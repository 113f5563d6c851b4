use crate::error::PathwayError;
use serde::{Deserialize, Serialize};

/// Trait for configuration sections
pub trait ConfigSection: Serialize + for<'de> Deserialize<'de> + Default + Clone {
    fn section_name() -> &'static str;
    fn validate(&self) -> Result<(), PathwayError>;
    fn to_manifest(&self) -> ConfigManifest;
}

/// Configuration manifest for building input controls (sliders, fields)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigManifest {
    pub section: String,
    pub fields: Vec<FieldManifest>,
}

impl ConfigManifest {
    pub fn field(&self, name: &str) -> Option<&FieldManifest> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldManifest {
    pub name: String,
    pub field_type: String,
    pub default: serde_json::Value,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub description: String,
}

impl FieldManifest {
    pub fn float(name: &str, default: f64, min: f64, max: f64, description: &str) -> Self {
        Self {
            name: name.to_string(),
            field_type: "float".to_string(),
            default: serde_json::json!(default),
            min: Some(min),
            max: Some(max),
            description: description.to_string(),
        }
    }

    pub fn integer(name: &str, default: usize, min: usize, max: usize, description: &str) -> Self {
        Self {
            name: name.to_string(),
            field_type: "integer".to_string(),
            default: serde_json::json!(default),
            min: Some(min as f64),
            max: Some(max as f64),
            description: description.to_string(),
        }
    }

    pub fn boolean(name: &str, default: bool, description: &str) -> Self {
        Self {
            name: name.to_string(),
            field_type: "boolean".to_string(),
            default: serde_json::json!(default),
            min: None,
            max: None,
            description: description.to_string(),
        }
    }
}

pub(crate) fn check_probability(name: &str, value: f64) -> Result<(), PathwayError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(PathwayError::Configuration(format!(
            "{} must be between 0 and 1, got {}",
            name, value
        )));
    }
    Ok(())
}
