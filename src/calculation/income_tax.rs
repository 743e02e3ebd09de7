//! Progressive income tax (PAYE) calculation.
//!
//! Tax is the sum over brackets of the income falling in each bracket times
//! its marginal rate, less the monthly personal relief, floored at zero.

use rust_decimal::Decimal;

use crate::config::{DeductionSchedule, TaxBracket};
use crate::models::AuditStep;

use super::round_currency;

/// Tax charged within a single bracket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketCharge {
    /// Taxable income falling in the bracket.
    pub income: Decimal,
    /// The bracket's marginal rate.
    pub rate: Decimal,
    /// `income * rate`, unrounded.
    pub tax: Decimal,
}

/// The result of the income tax calculation.
#[derive(Debug, Clone)]
pub struct IncomeTaxResult {
    /// Per-bracket breakdown, lowest bracket first. Empty brackets are omitted.
    pub charges: Vec<BracketCharge>,
    /// Tax before personal relief, unrounded.
    pub tax_before_relief: Decimal,
    /// Personal relief subtracted.
    pub relief: Decimal,
    /// Tax payable, floored at zero and rounded to 2 places.
    pub amount: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Splits taxable income across brackets by their fixed widths.
pub fn charge_brackets(brackets: &[TaxBracket], taxable_income: Decimal) -> Vec<BracketCharge> {
    let mut remaining = taxable_income.max(Decimal::ZERO);
    let mut charges = Vec::new();

    for bracket in brackets {
        if remaining <= Decimal::ZERO {
            break;
        }
        let income = match bracket.width {
            Some(width) => remaining.min(width),
            None => remaining,
        };
        remaining -= income;
        charges.push(BracketCharge {
            income,
            rate: bracket.rate,
            tax: income * bracket.rate,
        });
    }

    charges
}

/// Calculates income tax payable on the month's taxable income.
///
/// # Examples
///
/// ```
/// use paye_engine::calculation::calculate_income_tax;
/// use paye_engine::config::DeductionSchedule;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let result = calculate_income_tax(Decimal::new(46970, 0), &DeductionSchedule::default(), 6);
/// assert_eq!(result.amount, Decimal::from_str("6474.35").unwrap());
/// ```
pub fn calculate_income_tax(
    taxable_income: Decimal,
    schedule: &DeductionSchedule,
    step_number: u32,
) -> IncomeTaxResult {
    let charges = charge_brackets(&schedule.tax_brackets, taxable_income);
    let tax_before_relief: Decimal = charges.iter().map(|c| c.tax).sum();
    let relief = schedule.personal_relief;
    let amount = round_currency((tax_before_relief - relief).max(Decimal::ZERO));

    let breakdown: Vec<serde_json::Value> = charges
        .iter()
        .map(|c| {
            serde_json::json!({
                "income": c.income.normalize().to_string(),
                "rate": c.rate.normalize().to_string(),
                "tax": c.tax.normalize().to_string()
            })
        })
        .collect();

    let audit_step = AuditStep {
        step_number,
        rule_id: "income_tax".to_string(),
        rule_name: "Income Tax (PAYE)".to_string(),
        reference: "Income Tax Act Cap 470, Third Schedule".to_string(),
        input: serde_json::json!({
            "taxable_income": taxable_income.to_string()
        }),
        output: serde_json::json!({
            "brackets": breakdown,
            "tax_before_relief": tax_before_relief.normalize().to_string(),
            "personal_relief": relief.to_string(),
            "amount": amount.to_string()
        }),
        reasoning: format!(
            "KES {} across {} bracket(s) = KES {} before relief; less KES {} relief = KES {}",
            taxable_income,
            charges.len(),
            tax_before_relief.normalize(),
            relief,
            amount
        ),
    };

    IncomeTaxResult {
        charges,
        tax_before_relief,
        relief,
        amount,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn tax(taxable_income: &str) -> IncomeTaxResult {
        calculate_income_tax(dec(taxable_income), &DeductionSchedule::default(), 6)
    }

    #[test]
    fn test_mid_third_bracket() {
        // 2400 + 2083.25 + 14637 x 0.30 = 8874.35
        let result = tax("46970");
        assert_eq!(result.tax_before_relief, dec("8874.35"));
        assert_eq!(result.amount, dec("6474.35"));
        assert_eq!(result.charges.len(), 3);
    }

    #[test]
    fn test_top_of_first_bracket_fully_relieved() {
        let result = tax("24000");
        assert_eq!(result.tax_before_relief, dec("2400"));
        assert_eq!(result.amount, dec("0.00"));
    }

    #[test]
    fn test_relief_larger_than_tax_floors_at_zero() {
        let result = tax("10000");
        assert_eq!(result.tax_before_relief, dec("1000"));
        assert_eq!(result.amount, dec("0.00"));
    }

    #[test]
    fn test_top_of_second_bracket() {
        let result = tax("32333");
        assert_eq!(result.amount, dec("2083.25"));
    }

    #[test]
    fn test_top_of_third_bracket() {
        let result = tax("500000");
        assert_eq!(result.tax_before_relief, dec("144783.35"));
        assert_eq!(result.amount, dec("142383.35"));
    }

    #[test]
    fn test_top_of_fourth_bracket() {
        let result = tax("800000");
        assert_eq!(result.amount, dec("239883.35"));
    }

    #[test]
    fn test_top_bracket() {
        let result = tax("1000000");
        assert_eq!(result.tax_before_relief, dec("312283.35"));
        assert_eq!(result.amount, dec("309883.35"));
        assert_eq!(result.charges.len(), 5);
        assert_eq!(result.charges[4].income, dec("200000"));
    }

    #[test]
    fn test_zero_income_has_no_charges() {
        let result = tax("0");
        assert!(result.charges.is_empty());
        assert_eq!(result.amount, dec("0.00"));
        assert_eq!(result.relief, dec("2400"));
    }

    #[test]
    fn test_fractional_income_rounds_once() {
        // 2400 + 2083.25 + 0.01 x 0.30 = 4483.253 -> 2083.253 after relief
        let result = tax("32333.01");
        assert_eq!(result.amount, dec("2083.25"));
    }

    #[test]
    fn test_audit_breakdown_lists_brackets() {
        let result = tax("46970");
        let brackets = result.audit_step.output["brackets"].as_array().unwrap();
        assert_eq!(brackets.len(), 3);
        assert_eq!(brackets[0]["income"].as_str().unwrap(), "24000");
        assert_eq!(brackets[1]["tax"].as_str().unwrap(), "2083.25");
        assert_eq!(brackets[2]["income"].as_str().unwrap(), "14637");
        assert_eq!(result.audit_step.rule_id, "income_tax");
    }

    #[test]
    fn test_charge_brackets_ignores_negative_income() {
        let schedule = DeductionSchedule::default();
        assert!(charge_brackets(&schedule.tax_brackets, dec("-5")).is_empty());
    }
}
