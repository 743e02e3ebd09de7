//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading a deduction
//! schedule from a YAML file.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{DeductionSchedule, ScheduleMetadata};

/// Name of the schedule file inside a configuration directory.
pub const SCHEDULE_FILE: &str = "schedule.yaml";

/// Loads and provides access to a deduction schedule.
///
/// # Directory Structure
///
/// ```text
/// config/kenya/
/// └── schedule.yaml   # Thresholds, bands, brackets and relief
/// ```
///
/// # Example
///
/// ```no_run
/// use paye_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/kenya").unwrap();
/// println!("Loaded schedule: {}", loader.metadata().name);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    schedule: DeductionSchedule,
}

impl ConfigLoader {
    /// Loads the schedule from `schedule.yaml` in the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - The schedule file is missing (`ConfigNotFound`)
    /// - The file contains invalid YAML or is missing fields (`ConfigParseError`)
    /// - The parsed schedule fails validation (`InvalidSchedule`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let schedule_path = path.as_ref().join(SCHEDULE_FILE);
        let schedule = Self::load_yaml::<DeductionSchedule>(&schedule_path)?;
        schedule.validate()?;

        debug!(
            path = %schedule_path.display(),
            name = %schedule.metadata.name,
            effective_date = %schedule.metadata.effective_date,
            "Deduction schedule loaded"
        );

        Ok(Self { schedule })
    }

    /// Returns a loader holding the built-in default schedule.
    pub fn builtin() -> Self {
        Self {
            schedule: DeductionSchedule::default(),
        }
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

    /// Returns the loaded schedule.
    pub fn schedule(&self) -> &DeductionSchedule {
        &self.schedule
    }

    /// Returns the schedule metadata.
    pub fn metadata(&self) -> &ScheduleMetadata {
        &self.schedule.metadata
    }

    /// Consumes the loader, returning the schedule.
    pub fn into_schedule(self) -> DeductionSchedule {
        self.schedule
    }
}
