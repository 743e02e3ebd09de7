//! Configuration loading and management for the net pay engine.
//!
//! This module provides the statutory deduction schedule (thresholds, bands,
//! brackets and relief) and a loader for overriding it from YAML.
//!
//! # Example
//!
//! ```no_run
//! use paye_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/kenya").unwrap();
//! println!("Loaded schedule: {}", config.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::{ConfigLoader, SCHEDULE_FILE};
pub use types::{
    ContributionSchedule, DeductionSchedule, HealthLevyBand, ScheduleMetadata, TaxBracket,
};
