//! Net Pay Engine for Kenyan Statutory Deductions
//!
//! This crate computes monthly PAYE income tax, NSSF pension contributions,
//! the SHIF/NHIF health levy and the Affordable Housing Levy from a salary
//! input, producing net pay with a step-by-step audit trace. Results can be
//! recorded in an in-memory history ledger and exported as plain text.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod export;
pub mod history;
pub mod models;
pub mod validation;
