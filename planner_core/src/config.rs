//! Configuration file support for the workout planner.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/workout-planner/config.toml`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub plan: PlanConfig,
}

/// HTTP listener configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,

    #[serde(default = "default_cors_permissive")]
    pub cors_permissive: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            cors_permissive: default_cors_permissive(),
        }
    }
}

/// Locations of the exercise catalog and classifier model
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,

    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            catalog_path: default_catalog_path(),
            model_path: default_model_path(),
        }
    }
}

/// Plan generation parameters
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlanConfig {
    #[serde(default = "default_duration_days")]
    pub default_duration_days: u32,

    #[serde(default = "default_workout_frequency")]
    pub default_workout_frequency: u32,

    #[serde(default = "default_exercises_per_day")]
    pub exercises_per_day: usize,

    #[serde(default = "default_max_duration_days")]
    pub max_duration_days: u32,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            default_duration_days: default_duration_days(),
            default_workout_frequency: default_workout_frequency(),
            exercises_per_day: default_exercises_per_day(),
            max_duration_days: default_max_duration_days(),
        }
    }
}

// Default value functions
fn default_bind() -> String {
    "0.0.0.0:5000".into()
}

fn default_cors_permissive() -> bool {
    true
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("Data.csv")
}

fn default_model_path() -> PathBuf {
    PathBuf::from("workout_model.json")
}

fn default_duration_days() -> u32 {
    7
}

fn default_workout_frequency() -> u32 {
    4
}

fn default_exercises_per_day() -> usize {
    6
}

fn default_max_duration_days() -> u32 {
    366
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from(".config"));
        base.join("workout-planner").join("config.toml")
    }

    /// Reject settings the plan builder cannot honor
    pub fn validate(&self) -> Result<()> {
        if self.plan.exercises_per_day == 0 {
            return Err(Error::Config("plan.exercises_per_day must be at least 1".into()));
        }
        if self.plan.default_duration_days > self.plan.max_duration_days {
            return Err(Error::Config(format!(
                "plan.default_duration_days ({}) exceeds plan.max_duration_days ({})",
                self.plan.default_duration_days, self.plan.max_duration_days
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.bind, "0.0.0.0:5000");
        assert_eq!(config.plan.default_duration_days, 7);
        assert_eq!(config.plan.default_workout_frequency, 4);
        assert_eq!(config.plan.exercises_per_day, 6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[plan]
default_workout_frequency = 3

[data]
catalog_path = "/srv/planner/exercises.csv"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.plan.default_workout_frequency, 3);
        assert_eq!(config.plan.exercises_per_day, 6); // default
        assert_eq!(
            config.data.catalog_path,
            PathBuf::from("/srv/planner/exercises.csv")
        );
        assert_eq!(config.data.model_path, PathBuf::from("workout_model.json"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nbind = \"127.0.0.1:8080\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.server.bind, "127.0.0.1:8080");
        assert!(config.server.cors_permissive);
    }

    #[test]
    fn test_zero_exercises_per_day_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[plan]\nexercises_per_day = 0\n").unwrap();

        assert!(matches!(Config::load_from(&path), Err(Error::Config(_))));
    }
}
