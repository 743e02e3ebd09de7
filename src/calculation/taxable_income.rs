//! Taxable income calculation.
//!
//! Taxable income is gross pay plus taxable benefits, reduced by the capped
//! pension contribution, the statutory contributions and levies, and any other
//! allowable deductions. It is never negative.

use rust_decimal::Decimal;

use crate::config::DeductionSchedule;
use crate::models::{AuditStep, CalculationInput};

use super::round_currency;

/// Statutory amounts already computed for the month, each rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatutoryAmounts {
    /// Retirement-fund contribution.
    pub contribution: Decimal,
    /// Health levy.
    pub health_levy: Decimal,
    /// Housing levy.
    pub housing_levy: Decimal,
}

/// The result of the taxable income calculation.
#[derive(Debug, Clone)]
pub struct TaxableIncomeResult {
    /// Pension contribution allowed as a reduction, after the cap.
    pub pension_relief: Decimal,
    /// Taxable income, floored at zero and rounded to 2 places.
    pub taxable_income: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates taxable income for the month.
///
/// # Examples
///
/// ```
/// use paye_engine::calculation::{StatutoryAmounts, calculate_taxable_income};
/// use paye_engine::config::DeductionSchedule;
/// use paye_engine::models::CalculationInput;
/// use rust_decimal::Decimal;
///
/// let input = CalculationInput::new(Decimal::new(50000, 0));
/// let amounts = StatutoryAmounts {
///     contribution: Decimal::new(1080, 0),
///     health_levy: Decimal::new(1200, 0),
///     housing_levy: Decimal::new(750, 0),
/// };
/// let result = calculate_taxable_income(
///     &input,
///     Decimal::ZERO,
///     amounts,
///     &DeductionSchedule::default(),
///     5,
/// );
/// assert_eq!(result.taxable_income, Decimal::new(46970, 0));
/// ```
pub fn calculate_taxable_income(
    input: &CalculationInput,
    taxable_benefits: Decimal,
    amounts: StatutoryAmounts,
    schedule: &DeductionSchedule,
    step_number: u32,
) -> TaxableIncomeResult {
    let pension_relief = input.pension_contribution.min(schedule.pension_relief_cap);

    let income = input.gross_pay + taxable_benefits;
    let reductions = pension_relief
        + amounts.contribution
        + amounts.health_levy
        + amounts.housing_levy
        + input.other_allowable_deductions;
    let taxable_income = round_currency((income - reductions).max(Decimal::ZERO));

    let pension_note = if pension_relief < input.pension_contribution {
        format!(
            " (pension KES {} capped at KES {})",
            input.pension_contribution, schedule.pension_relief_cap
        )
    } else {
        String::new()
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "taxable_income".to_string(),
        rule_name: "Taxable Income".to_string(),
        reference: "Income Tax Act Cap 470, s.15 and s.22A".to_string(),
        input: serde_json::json!({
            "gross_pay": input.gross_pay.to_string(),
            "taxable_benefits": taxable_benefits.to_string(),
            "pension_contribution": input.pension_contribution.to_string(),
            "contribution": amounts.contribution.to_string(),
            "health_levy": amounts.health_levy.to_string(),
            "housing_levy": amounts.housing_levy.to_string(),
            "other_allowable_deductions": input.other_allowable_deductions.to_string()
        }),
        output: serde_json::json!({
            "pension_relief": pension_relief.to_string(),
            "total_reductions": reductions.to_string(),
            "taxable_income": taxable_income.to_string()
        }),
        reasoning: format!(
            "KES {} income less KES {} allowable reductions{} = KES {}",
            income, reductions, pension_note, taxable_income
        ),
    };

    TaxableIncomeResult {
        pension_relief,
        taxable_income,
        audit_step,
    }
}
