//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! configurations from YAML files.

use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{EngineConfig, EngineSettings, PenaltyConfig};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── engine.yaml     # Name, version, obligation threshold
/// └── penalties.yaml  # AMD penalty per missed duty
/// ```
///
/// # Example
///
/// ```no_run
/// use lesson_salary_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Threshold: {}", loader.obligation_threshold());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if either file is missing, contains invalid YAML,
    /// or holds values that fail validation.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<EngineSettings>(&path.join("engine.yaml"))?;
        settings.validate()?;

        let penalties_path = path.join("penalties.yaml");
        let penalties = Self::load_yaml::<PenaltyConfig>(&penalties_path)?;
        penalties
            .validate()
            .map_err(|e| EngineError::ConfigParseError {
                path: penalties_path.display().to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            config: EngineConfig::new(settings, penalties),
        })
    }

    /// Builds a loader from already-parsed parts.
    pub fn from_parts(settings: EngineSettings, penalties: PenaltyConfig) -> EngineResult<Self> {
        settings.validate()?;
        penalties.validate()?;
        Ok(Self {
            config: EngineConfig::new(settings, penalties),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the general engine settings.
    pub fn settings(&self) -> &EngineSettings {
        self.config.settings()
    }

    /// Returns the penalties configured at startup.
    pub fn penalties(&self) -> &PenaltyConfig {
        self.config.penalties()
    }

    /// Returns the compliance threshold for obligations.
    pub fn obligation_threshold(&self) -> Decimal {
        self.config.settings().obligation_threshold
    }
}
