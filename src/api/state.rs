//! Application state for the net pay API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::{ConfigLoader, DeductionSchedule};
use crate::history::HistoryLedger;

/// Shared application state.
///
/// Holds the deduction schedule and the session's history ledger. The ledger
/// is injected here rather than held globally, so each router (and each test)
/// gets its own.
#[derive(Clone)]
pub struct AppState {
    /// The loaded deduction schedule.
    schedule: Arc<DeductionSchedule>,
    /// The history of saved calculations.
    ledger: Arc<HistoryLedger>,
}

impl AppState {
    /// Creates a new application state with an empty ledger.
    pub fn new(config: ConfigLoader) -> Self {
        Self::with_ledger(config, Arc::new(HistoryLedger::new()))
    }

    /// Creates a new application state around an existing ledger.
    pub fn with_ledger(config: ConfigLoader, ledger: Arc<HistoryLedger>) -> Self {
        Self {
            schedule: Arc::new(config.into_schedule()),
            ledger,
        }
    }

    /// Returns the deduction schedule.
    pub fn schedule(&self) -> &DeductionSchedule {
        &self.schedule
    }

    /// Returns the history ledger.
    pub fn ledger(&self) -> &HistoryLedger {
        &self.ledger
    }
}
