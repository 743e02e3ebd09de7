//! Taxable benefits calculation.
//!
//! This module determines how much of an employee's non-cash compensation,
//! including employer-provided housing, is subject to income tax.

use rust_decimal::Decimal;

use crate::config::DeductionSchedule;
use crate::models::{AuditStep, CalculationInput};

use super::round_currency;

/// The result of the taxable benefits calculation.
#[derive(Debug, Clone)]
pub struct TaxableBenefitsResult {
    /// Non-cash benefits subject to tax, rounded to 2 places.
    pub taxable_benefits: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the taxable value of non-cash benefits.
///
/// When `ignore_benefits_under_threshold` is set only the amount above the
/// schedule's benefits threshold counts, otherwise all of it does. For an
/// employee housed by the employer, the housing value less rent paid back to
/// the employer is added (never below zero).
///
/// # Examples
///
/// ```
/// use paye_engine::calculation::calculate_taxable_benefits;
/// use paye_engine::config::DeductionSchedule;
/// use paye_engine::models::CalculationInput;
/// use rust_decimal::Decimal;
///
/// let input = CalculationInput {
///     non_cash_benefits: Decimal::new(8000, 0),
///     ignore_benefits_under_threshold: true,
///     ..CalculationInput::new(Decimal::new(50000, 0))
/// };
/// let result = calculate_taxable_benefits(&input, &DeductionSchedule::default(), 1);
/// assert_eq!(result.taxable_benefits, Decimal::new(3000, 0));
/// ```
pub fn calculate_taxable_benefits(
    input: &CalculationInput,
    schedule: &DeductionSchedule,
    step_number: u32,
) -> TaxableBenefitsResult {
    let benefits_portion = if input.ignore_benefits_under_threshold {
        (input.non_cash_benefits - schedule.benefits_threshold).max(Decimal::ZERO)
    } else {
        input.non_cash_benefits
    };

    let housing_portion = if input.is_housed_by_employer && input.housing_value > Decimal::ZERO {
        (input.housing_value - input.rent_paid_to_employer).max(Decimal::ZERO)
    } else {
        Decimal::ZERO
    };

    let taxable_benefits = round_currency(benefits_portion + housing_portion);

    let threshold_note = if input.ignore_benefits_under_threshold {
        format!(
            "benefits above the KES {} threshold: KES {}",
            schedule.benefits_threshold, benefits_portion
        )
    } else {
        format!("all benefits taxable: KES {}", benefits_portion)
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "taxable_benefits".to_string(),
        rule_name: "Taxable Benefits".to_string(),
        reference: "Income Tax Act Cap 470, s.5(2)".to_string(),
        input: serde_json::json!({
            "non_cash_benefits": input.non_cash_benefits.to_string(),
            "ignore_benefits_under_threshold": input.ignore_benefits_under_threshold,
            "is_housed_by_employer": input.is_housed_by_employer,
            "housing_value": input.housing_value.to_string(),
            "rent_paid_to_employer": input.rent_paid_to_employer.to_string()
        }),
        output: serde_json::json!({
            "benefits_portion": benefits_portion.to_string(),
            "housing_portion": housing_portion.to_string(),
            "taxable_benefits": taxable_benefits.to_string()
        }),
        reasoning: format!(
            "{}; net housing benefit: KES {}; total KES {}",
            threshold_note, housing_portion, taxable_benefits
        ),
    };

    TaxableBenefitsResult {
        taxable_benefits,
        audit_step,
    }
}
