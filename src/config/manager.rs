use super::{
    bounds::BoundsConfig,
    differential::DifferentialConfig,
    genetic::GeneticConfig,
    simulation::SimulationConfig,
    traits::{ConfigManifest, ConfigSection},
};
use crate::error::PathwayError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, RwLock};

/// Prefix for environment overrides, e.g. `PATHWAY__GENETIC__SEED=7`
pub const ENV_PREFIX: &str = "PATHWAY";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub simulation: SimulationConfig,
    pub bounds: BoundsConfig,
    pub genetic: GeneticConfig,
    pub differential: DifferentialConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), PathwayError> {
        self.simulation.validate()?;
        self.bounds.validate()?;
        self.genetic.validate()?;
        self.differential.validate()?;
        Ok(())
    }

    pub fn manifests(&self) -> Vec<ConfigManifest> {
        vec![
            self.simulation.to_manifest(),
            self.bounds.to_manifest(),
            self.genetic.to_manifest(),
            self.differential.to_manifest(),
        ]
    }
}

pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(AppConfig::default())),
        }
    }

    /// Layer an optional TOML/JSON file and `PATHWAY__*` environment
    /// variables over the defaults.
    pub fn load(&self, path: Option<&Path>) -> Result<(), PathwayError> {
        let mut builder = ::config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(::config::File::from(path));
        }
        let settings = builder
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| PathwayError::Configuration(format!("Failed to read config: {}", e)))?;

        let config: AppConfig = settings
            .try_deserialize()
            .map_err(|e| PathwayError::Configuration(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        self.replace(config)
    }

    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<(), PathwayError> {
        self.load(Some(path.as_ref()))
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), PathwayError> {
        let config = self.get();
        let toml_str = toml::to_string_pretty(&config)
            .map_err(|e| PathwayError::Configuration(format!("Failed to serialize: {}", e)))?;

        std::fs::write(path, toml_str)?;
        Ok(())
    }

    pub fn get(&self) -> AppConfig {
        self.config
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Apply `f` to a copy and keep it only if it still validates
    pub fn update<F>(&self, f: F) -> Result<(), PathwayError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut candidate = self.get();
        f(&mut candidate);
        candidate.validate()?;
        self.replace(candidate)
    }

    fn replace(&self, config: AppConfig) -> Result<(), PathwayError> {
        let mut guard = self
            .config
            .write()
            .map_err(|_| PathwayError::Configuration("Config lock poisoned".to_string()))?;
        *guard = config;
        Ok(())
    }
}
