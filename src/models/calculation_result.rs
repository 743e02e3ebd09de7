//! Calculation result models for the net pay engine.
//!
//! This module contains the [`CalculationResult`] type and the audit
//! structures that record how each deduction was derived.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The statute or rate notice the rule comes from.
    pub reference: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
}

/// The itemised result of one net pay computation.
///
/// Every monetary field is rounded to 2 decimal places, half away from zero.
/// Results are plain values: two results computed from the same input are
/// equal in every field, including the audit trace.
///
/// # Example
///
/// ```
/// use paye_engine::calculation::compute;
/// use paye_engine::models::CalculationInput;
/// use rust_decimal::Decimal;
///
/// let result = compute(&CalculationInput::new(Decimal::new(20000, 0)));
/// assert_eq!(result.net_pay, result.gross_pay - result.total_deductions);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Monthly gross pay.
    pub gross_pay: Decimal,
    /// Value of non-cash benefits as entered.
    pub non_cash_benefits: Decimal,
    /// Pension contribution as entered.
    pub pension_contribution: Decimal,
    /// Other allowable deductions as entered.
    pub other_allowable_deductions: Decimal,
    /// Value of employer-provided housing as entered.
    pub housing_value: Decimal,
    /// Rent paid to the employer as entered.
    pub rent_paid_to_employer: Decimal,
    /// Whether the employer provides housing.
    pub is_housed_by_employer: bool,
    /// Non-cash benefits, including net housing value, subject to tax.
    pub taxable_benefits: Decimal,
    /// Income base for PAYE after allowable reductions, never negative.
    pub taxable_income: Decimal,
    /// Retirement-fund contribution (NSSF).
    pub contribution_tier_amount: Decimal,
    /// Health levy (NHIF/SHIF).
    pub health_levy_amount: Decimal,
    /// Affordable housing levy.
    pub housing_levy_amount: Decimal,
    /// Income tax (PAYE) after personal relief.
    pub income_tax_amount: Decimal,
    /// Sum of every amount deducted from gross pay.
    pub total_deductions: Decimal,
    /// Gross pay less total deductions. May be negative.
    pub net_pay: Decimal,
    /// Personal relief subtracted from the computed tax.
    pub relief_applied: Decimal,
    /// Audit trace of the stages that produced this result.
    pub audit_trace: AuditTrace,
}

impl CalculationResult {
    /// Sum of the four statutory deductions, excluding pension and other deductions.
    pub fn statutory_deductions(&self) -> Decimal {
        self.income_tax_amount
            + self.contribution_tier_amount
            + self.health_levy_amount
            + self.housing_levy_amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_sample_result() -> CalculationResult {
        CalculationResult {
            gross_pay: dec("50000.00"),
            non_cash_benefits: dec("0.00"),
            pension_contribution: dec("0.00"),
            other_allowable_deductions: dec("0.00"),
            housing_value: dec("0.00"),
            rent_paid_to_employer: dec("0.00"),
            is_housed_by_employer: false,
            taxable_benefits: dec("0.00"),
            taxable_income: dec("46970.00"),
            contribution_tier_amount: dec("1080.00"),
            health_levy_amount: dec("1200.00"),
            housing_levy_amount: dec("750.00"),
            income_tax_amount: dec("6474.35"),
            total_deductions: dec("9504.35"),
            net_pay: dec("40495.65"),
            relief_applied: dec("2400.00"),
            audit_trace: AuditTrace::default(),
        }
    }

    #[test]
    fn test_statutory_deductions_sums_four_levies() {
        let result = create_sample_result();
        assert_eq!(result.statutory_deductions(), dec("9504.35"));
    }

    #[test]
    fn test_calculation_result_serializes_amounts_as_strings() {
        let json = serde_json::to_string(&create_sample_result()).unwrap();
        assert!(json.contains("\"gross_pay\":\"50000.00\""));
        assert!(json.contains("\"net_pay\":\"40495.65\""));
        assert!(json.contains("\"is_housed_by_employer\":false"));
        assert!(json.contains("\"audit_trace\":{\"steps\":[]}"));
    }

    #[test]
    fn test_calculation_result_deserialization() {
        let json = serde_json::to_string(&create_sample_result()).unwrap();
        let result: CalculationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, create_sample_result());
    }

    #[test]
    fn test_audit_step_serialization() {
        let step = AuditStep {
            step_number: 1,
            rule_id: "health_levy".to_string(),
            rule_name: "Health Levy".to_string(),
            reference: "NHIF rates".to_string(),
            input: serde_json::json!({"gross_pay": "50000"}),
            output: serde_json::json!({"levy": "1200"}),
            reasoning: "Gross pay falls in band 12".to_string(),
        };

        let json = serde_json::to_string(&step).unwrap();
        assert!(json.contains("\"step_number\":1"));
        assert!(json.contains("\"rule_id\":\"health_levy\""));
        assert!(json.contains("\"reference\":\"NHIF rates\""));
    }
}
