//! Affordable housing levy calculation.

use rust_decimal::Decimal;

use crate::config::DeductionSchedule;
use crate::models::AuditStep;

use super::round_currency;

/// The result of the housing levy calculation.
#[derive(Debug, Clone)]
pub struct HousingLevyResult {
    /// The levy, rounded to 2 places. Zero when not applied.
    pub amount: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the housing levy as a flat percentage of gross pay.
///
/// # Examples
///
/// ```
/// use paye_engine::calculation::calculate_housing_levy;
/// use paye_engine::config::DeductionSchedule;
/// use rust_decimal::Decimal;
///
/// let result = calculate_housing_levy(Decimal::new(50000, 0), true, &DeductionSchedule::default(), 4);
/// assert_eq!(result.amount, Decimal::new(750, 0));
/// ```
pub fn calculate_housing_levy(
    gross_pay: Decimal,
    apply_levy: bool,
    schedule: &DeductionSchedule,
    step_number: u32,
) -> HousingLevyResult {
    let rate = schedule.housing_levy_rate;
    let amount = if apply_levy {
        round_currency(gross_pay * rate)
    } else {
        round_currency(Decimal::ZERO)
    };

    let reasoning = if apply_levy {
        format!(
            "KES {} x {} = KES {}",
            gross_pay,
            rate.normalize(),
            amount
        )
    } else {
        "Housing levy not applied".to_string()
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "housing_levy".to_string(),
        rule_name: "Affordable Housing Levy".to_string(),
        reference: "Affordable Housing Act 2024, s.4".to_string(),
        input: serde_json::json!({
            "gross_pay": gross_pay.to_string(),
            "apply_housing_levy": apply_levy
        }),
        output: serde_json::json!({
            "rate": rate.normalize().to_string(),
            "amount": amount.to_string(),
            "levy_applied": apply_levy
        }),
        reasoning,
    };

    HousingLevyResult { amount, audit_step }
}
