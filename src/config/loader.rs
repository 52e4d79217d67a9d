//! Schedule loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading a support
//! schedule from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::ScheduleTable;

use super::types::{ScheduleConfig, ScheduleMetadata};

/// Loads and provides access to a support schedule.
///
/// # File Format
///
/// ```text
/// metadata:
///   name: "Demonstration Schedule"
///   effective_date: 2025-07-01
///   source_url: "https://example.org/schedule"
/// table:
///   incomes: [1000, 2000, 3000]
///   obligations:
///     1: [150, 220, 290]
///     2: [200, 300, 410]
/// ```
///
/// # Example
///
/// ```no_run
/// use support_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/schedule.yaml").unwrap();
/// println!("Loaded schedule: {}", loader.metadata().name);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: ScheduleConfig,
}

impl ConfigLoader {
    /// Loads a schedule from the specified YAML file.
    ///
    /// The table is validated once here so a malformed schedule fails at
    /// startup; every lookup validates it again.
    ///
    /// # Errors
    ///
    /// - `ConfigNotFound` if the file cannot be read
    /// - `ConfigParseError` if the file is not a valid schedule document
    /// - `InvalidSchedule` if the table violates its structural invariants
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::from_yaml_str(&content, &path_str)
    }

    /// Parses a schedule from YAML text. `origin` names the source in errors.
    pub fn from_yaml_str(content: &str, origin: &str) -> EngineResult<Self> {
        let config: ScheduleConfig =
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: origin.to_string(),
                message: e.to_string(),
            })?;

        config.table.validate()?;

        Ok(Self { config })
    }

    /// Returns the schedule metadata.
    pub fn metadata(&self) -> &ScheduleMetadata {
        &self.config.metadata
    }

    /// Returns the obligation table.
    pub fn table(&self) -> &ScheduleTable {
        &self.config.table
    }
}
