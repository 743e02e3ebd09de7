//! Total deductions and net pay.
//!
//! Total deductions count the full pension contribution and full other
//! deductions, the cash actually leaving the pay packet, even though only the
//! capped pension reduced taxable income.

use rust_decimal::Decimal;

use crate::models::{AuditStep, CalculationInput};

use super::{StatutoryAmounts, round_currency};

/// The result of the net pay calculation.
#[derive(Debug, Clone)]
pub struct NetPayResult {
    /// Sum of all deductions, rounded to 2 places.
    pub total_deductions: Decimal,
    /// Gross pay less total deductions, rounded to 2 places. Not clamped.
    pub net_pay: Decimal,
    /// Audit steps for the total and the net figure, in that order.
    pub audit_steps: Vec<AuditStep>,
}

/// Calculates total deductions and net pay.
///
/// # Examples
///
/// ```
/// use paye_engine::calculation::{StatutoryAmounts, calculate_net_pay};
/// use paye_engine::models::CalculationInput;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let input = CalculationInput::new(Decimal::new(50000, 0));
/// let amounts = StatutoryAmounts {
///     contribution: Decimal::new(1080, 0),
///     health_levy: Decimal::new(1200, 0),
///     housing_levy: Decimal::new(750, 0),
/// };
/// let income_tax = Decimal::from_str("6474.35").unwrap();
/// let result = calculate_net_pay(&input, income_tax, amounts, 7);
/// assert_eq!(result.net_pay, Decimal::from_str("40495.65").unwrap());
/// ```
pub fn calculate_net_pay(
    input: &CalculationInput,
    income_tax: Decimal,
    amounts: StatutoryAmounts,
    step_number: u32,
) -> NetPayResult {
    let total_deductions = round_currency(
        income_tax
            + amounts.contribution
            + amounts.health_levy
            + amounts.housing_levy
            + input.pension_contribution
            + input.other_allowable_deductions,
    );
    let net_pay = round_currency(input.gross_pay - total_deductions);

    let total_step = AuditStep {
        step_number,
        rule_id: "total_deductions".to_string(),
        rule_name: "Total Deductions".to_string(),
        reference: "Employment Act Cap 226, s.19".to_string(),
        input: serde_json::json!({
            "income_tax": income_tax.to_string(),
            "contribution": amounts.contribution.to_string(),
            "health_levy": amounts.health_levy.to_string(),
            "housing_levy": amounts.housing_levy.to_string(),
            "pension_contribution": input.pension_contribution.to_string(),
            "other_allowable_deductions": input.other_allowable_deductions.to_string()
        }),
        output: serde_json::json!({
            "total_deductions": total_deductions.to_string()
        }),
        reasoning: format!(
            "Statutory deductions plus full pension (KES {}) and other deductions (KES {}) = KES {}",
            input.pension_contribution, input.other_allowable_deductions, total_deductions
        ),
    };

    let net_step = AuditStep {
        step_number: step_number + 1,
        rule_id: "net_pay".to_string(),
        rule_name: "Net Pay".to_string(),
        reference: "Employment Act Cap 226, s.19".to_string(),
        input: serde_json::json!({
            "gross_pay": input.gross_pay.to_string(),
            "total_deductions": total_deductions.to_string()
        }),
        output: serde_json::json!({
            "net_pay": net_pay.to_string(),
            "negative": net_pay < Decimal::ZERO
        }),
        reasoning: format!(
            "KES {} - KES {} = KES {}",
            input.gross_pay, total_deductions, net_pay
        ),
    };

    NetPayResult {
        total_deductions,
        net_pay,
        audit_steps: vec![total_step, net_step],
    }
}
