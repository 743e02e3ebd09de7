//! Core data models for the net pay engine.
//!
//! This module contains all the domain models used throughout the engine.

mod calculation_input;
mod calculation_result;
mod history_entry;

pub use calculation_input::{CalculationInput, MAX_AMOUNT, check_amount};
pub use calculation_result::{AuditStep, AuditTrace, CalculationResult};
pub use history_entry::HistoryEntry;
