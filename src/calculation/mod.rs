//! Calculation logic for the net pay engine.
//!
//! This module contains one function per deduction stage (taxable benefits,
//! retirement-fund contribution, health levy, housing levy, taxable income,
//! income tax, and net pay) plus the [`compute`] orchestrator that runs them in
//! order. Each stage returns its amount together with an audit step.

mod contribution_tier;
mod engine;
mod health_levy;
mod housing_levy;
mod income_tax;
mod net_pay;
mod rounding;
mod taxable_benefits;
mod taxable_income;

pub use contribution_tier::{ContributionResult, calculate_contribution};
pub use engine::{compute, compute_with_schedule};
pub use health_levy::{HealthLevyResult, calculate_health_levy, find_health_levy_band};
pub use housing_levy::{HousingLevyResult, calculate_housing_levy};
pub use income_tax::{BracketCharge, IncomeTaxResult, calculate_income_tax, charge_brackets};
pub use net_pay::{NetPayResult, calculate_net_pay};
pub use rounding::{CURRENCY_DECIMAL_PLACES, round_currency};
pub use taxable_benefits::{TaxableBenefitsResult, calculate_taxable_benefits};
pub use taxable_income::{StatutoryAmounts, TaxableIncomeResult, calculate_taxable_income};
