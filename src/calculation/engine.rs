//! The deduction engine.
//!
//! [`compute`] runs every stage in a fixed order, feeding each stage's rounded
//! output into the next, and assembles the itemised [`CalculationResult`].

use std::sync::LazyLock;

use tracing::debug;

use crate::config::DeductionSchedule;
use crate::models::{AuditTrace, CalculationInput, CalculationResult};

use super::{
    StatutoryAmounts, calculate_contribution, calculate_health_levy, calculate_housing_levy,
    calculate_income_tax, calculate_net_pay, calculate_taxable_benefits,
    calculate_taxable_income, round_currency,
};

static DEFAULT_SCHEDULE: LazyLock<DeductionSchedule> = LazyLock::new(DeductionSchedule::default);

/// Computes net pay and every deduction using the built-in schedule.
///
/// Pure and total for non-negative input: the same input always yields an
/// equal result. Negative input is not re-validated; see
/// [`CalculationInput::validate`].
///
/// # Examples
///
/// ```
/// use paye_engine::calculation::compute;
/// use paye_engine::models::CalculationInput;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let input = CalculationInput {
///     ignore_benefits_under_threshold: true,
///     use_tiered_contribution_schedule: true,
///     include_second_contribution_tier: true,
///     apply_housing_levy: true,
///     ..CalculationInput::new(Decimal::new(50000, 0))
/// };
/// let result = compute(&input);
/// assert_eq!(result.income_tax_amount, Decimal::from_str("6474.35").unwrap());
/// assert_eq!(result.net_pay, Decimal::from_str("40495.65").unwrap());
/// ```
pub fn compute(input: &CalculationInput) -> CalculationResult {
    compute_with_schedule(input, &DEFAULT_SCHEDULE)
}

/// Computes net pay and every deduction using the given schedule.
pub fn compute_with_schedule(
    input: &CalculationInput,
    schedule: &DeductionSchedule,
) -> CalculationResult {
    let mut steps = Vec::with_capacity(8);

    let benefits = calculate_taxable_benefits(input, schedule, 1);
    steps.push(benefits.audit_step);

    let contribution = calculate_contribution(
        input.gross_pay,
        input.use_tiered_contribution_schedule,
        input.include_second_contribution_tier,
        schedule,
        2,
    );
    steps.push(contribution.audit_step);

    let health_levy = calculate_health_levy(input.gross_pay, schedule, 3);
    steps.push(health_levy.audit_step);

    let housing_levy =
        calculate_housing_levy(input.gross_pay, input.apply_housing_levy, schedule, 4);
    steps.push(housing_levy.audit_step);

    let amounts = StatutoryAmounts {
        contribution: contribution.amount,
        health_levy: health_levy.amount,
        housing_levy: housing_levy.amount,
    };

    let taxable_income =
        calculate_taxable_income(input, benefits.taxable_benefits, amounts, schedule, 5);
    steps.push(taxable_income.audit_step);

    let income_tax = calculate_income_tax(taxable_income.taxable_income, schedule, 6);
    steps.push(income_tax.audit_step);

    let net_pay = calculate_net_pay(input, income_tax.amount, amounts, 7);
    steps.extend(net_pay.audit_steps);

    debug!(
        gross_pay = %input.gross_pay,
        taxable_income = %taxable_income.taxable_income,
        income_tax = %income_tax.amount,
        net_pay = %net_pay.net_pay,
        "Net pay computed"
    );

    CalculationResult {
        gross_pay: round_currency(input.gross_pay),
        non_cash_benefits: round_currency(input.non_cash_benefits),
        pension_contribution: round_currency(input.pension_contribution),
        other_allowable_deductions: round_currency(input.other_allowable_deductions),
        housing_value: round_currency(input.housing_value),
        rent_paid_to_employer: round_currency(input.rent_paid_to_employer),
        is_housed_by_employer: input.is_housed_by_employer,
        taxable_benefits: benefits.taxable_benefits,
        taxable_income: taxable_income.taxable_income,
        contribution_tier_amount: contribution.amount,
        health_levy_amount: health_levy.amount,
        housing_levy_amount: housing_levy.amount,
        income_tax_amount: income_tax.amount,
        total_deductions: net_pay.total_deductions,
        net_pay: net_pay.net_pay,
        relief_applied: round_currency(income_tax.relief),
        audit_trace: AuditTrace { steps },
    }
}
