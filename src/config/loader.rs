//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading leave settings
//! from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{LeaveSettings, LeaveSettingsFile, OverrideDetection};

/// The file name read from a configuration directory.
pub const SETTINGS_FILE_NAME: &str = "leave_settings.yaml";

/// Loads and provides access to the leave settings.
///
/// # Directory Structure
///
/// ```text
/// config/
/// └── leave_settings.yaml
/// ```
///
/// with contents of the form:
///
/// ```yaml
/// leave:
///   monthly_credit: 1
///   max_carry_forward: 1
///   max_leaves_per_month: 2
///   override_detection: heuristic
/// ```
///
/// # Example
///
/// ```no_run
/// use leave_ledger::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config").unwrap();
/// println!("Monthly credit: {}", loader.settings().monthly_credit);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    settings: LeaveSettings,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - `leave_settings.yaml` is missing
    /// - The file contains invalid YAML or is missing a required field
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let settings_path = path.as_ref().join(SETTINGS_FILE_NAME);
        let path_str = settings_path.display().to_string();

        let content =
            fs::read_to_string(&settings_path).map_err(|_| EngineError::ConfigNotFound {
                path: path_str.clone(),
            })?;

        Self::from_yaml_str(&content, &path_str)
    }

    /// Parses settings from YAML text. `origin` is only used in error messages.
    pub fn from_yaml_str(content: &str, origin: &str) -> EngineResult<Self> {
        let file: LeaveSettingsFile =
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: origin.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self::from_settings(file.leave))
    }

    /// Wraps already-constructed settings.
    pub fn from_settings(settings: LeaveSettings) -> Self {
        Self { settings }
    }

    /// Returns the loaded leave settings.
    pub fn settings(&self) -> &LeaveSettings {
        &self.settings
    }

    /// Returns the configured override detection rule.
    pub fn override_detection(&self) -> OverrideDetection {
        self.settings.override_detection
    }
}
