use super::{
    clustering::ClusteringConfig, data::DataConfig, evolution::EvolutionConfig,
    metrics::MetricsConfig, network::NetworkConfig, traits::ConfigSection,
};
use crate::error::ProvidenceError;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Prefix of environment overrides, e.g. `PROVIDENCE__EVOLUTION__POPULATION_SIZE=50`.
pub const ENV_PREFIX: &str = "PROVIDENCE";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub evolution: EvolutionConfig,
    pub network: NetworkConfig,
    pub clustering: ClusteringConfig,
    pub data: DataConfig,
    pub metrics: MetricsConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ProvidenceError> {
        self.evolution.validate()?;
        self.network.validate()?;
        self.clustering.validate()?;
        self.data.validate()?;
        self.metrics.validate()?;

        if let Some(point) = &self.evolution.aspiration_point {
            if point.len() != self.metrics.metrics.len() {
                return Err(ProvidenceError::Configuration(format!(
                    "The aspiration point has {} values but {} metrics are configured",
                    point.len(),
                    self.metrics.metrics.len()
                )));
            }
        }
        Ok(())
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

    /// Loads a TOML or JSON file, chosen by extension, with environment overrides on top.
    /// Missing keys keep their defaults.
    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ProvidenceError> {
        let config: AppConfig = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(Self::environment())
            .build()?
            .try_deserialize()?;

        self.replace(config)
    }

    /// Defaults with environment overrides only.
    pub fn load_from_env(&self) -> Result<(), ProvidenceError> {
        let config: AppConfig = Config::builder()
            .add_source(Self::environment())
            .build()?
            .try_deserialize()?;

        self.replace(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ProvidenceError> {
        let toml_str = toml::to_string_pretty(&*self.read())
            .map_err(|e| ProvidenceError::Configuration(format!("Failed to serialize: {}", e)))?;

        std::fs::write(path, toml_str)?;
        Ok(())
    }

    pub fn get(&self) -> AppConfig {
        self.read().clone()
    }

    /// Applies `f` and keeps the result only if it still validates.
    pub fn update<F>(&self, f: F) -> Result<(), ProvidenceError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut candidate = self.get();
        f(&mut candidate);
        self.replace(candidate)
    }

    fn replace(&self, config: AppConfig) -> Result<(), ProvidenceError> {
        config.validate()?;
        *self.write() = config;
        Ok(())
    }

    fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
    }

    fn read(&self) -> RwLockReadGuard<'_, AppConfig> {
        self.config.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, AppConfig> {
        self.config.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::metrics::ErrorMetricKind;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("providence-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_save_then_load_preserves_changes() {
        let manager = ConfigManager::new();
        manager
            .update(|c| {
                c.evolution.population_size = 40;
                c.metrics.metrics = vec![ErrorMetricKind::Mmre, ErrorMetricKind::Mbre];
            })
            .unwrap();

        let path = temp_path("roundtrip.toml");
        manager.save_to_file(&path).unwrap();

        let loaded = ConfigManager::new();
        loaded.load_from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded.get(), manager.get());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let path = temp_path("partial.toml");
        std::fs::write(&path, "[evolution]\ngenerations = 7\n").unwrap();

        let manager = ConfigManager::new();
        manager.load_from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        let config = manager.get();
        assert_eq!(config.evolution.generations, 7);
        assert_eq!(config.evolution.population_size, 100);
        assert_eq!(config.network, NetworkConfig::default());
    }

    #[test]
    fn test_invalid_update_is_discarded() {
        let manager = ConfigManager::new();

        let result = manager.update(|c| c.evolution.mutation_probability = 2.0);

        assert!(result.is_err());
        assert_eq!(manager.get().evolution.mutation_probability, 0.2);
    }

    #[test]
    fn test_aspiration_point_must_match_metric_count() {
        let mut config = AppConfig::default();
        config.evolution.aspiration_point = Some(vec![0.2, 0.2]);
        assert!(config.validate().is_err());

        config.evolution.aspiration_point = Some(vec![0.2, 0.2, 0.2]);
        assert!(config.validate().is_ok());
    }
}
