//! Caller-side input validation.
//!
//! The engine trusts its input. Front-ends collect amounts as text, so this
//! module turns raw form fields into a [`CalculationInput`], reporting the
//! first bad field as [`EngineError::InvalidInput`] instead of computing.
//! The API's `POST /calculate/form` route accepts bodies in this shape.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{CalculationInput, check_amount};

/// Raw calculator form fields as entered by a user.
///
/// Empty optional amounts count as zero. Gross pay is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationForm {
    /// Monthly gross pay.
    pub gross_pay: String,
    /// Non-cash benefits.
    #[serde(default)]
    pub non_cash_benefits: String,
    /// Pension contribution.
    #[serde(default)]
    pub pension_contribution: String,
    /// Other allowable deductions.
    #[serde(default)]
    pub other_allowable_deductions: String,
    /// Whether the employer provides housing.
    #[serde(default)]
    pub is_housed_by_employer: bool,
    /// Housing value. Ignored when not housed.
    #[serde(default)]
    pub housing_value: String,
    /// Rent paid to employer. Ignored when not housed.
    #[serde(default)]
    pub rent_paid_to_employer: String,
    /// Treat benefits under the threshold as tax free.
    #[serde(default)]
    pub ignore_benefits_under_threshold: bool,
    /// Use the tiered contribution schedule.
    #[serde(default)]
    pub use_tiered_contribution_schedule: bool,
    /// Include contribution tier 2.
    #[serde(default)]
    pub include_second_contribution_tier: bool,
    /// Deduct the housing levy.
    #[serde(default)]
    pub apply_housing_levy: bool,
}

/// Parses a required amount between zero and [`crate::models::MAX_AMOUNT`].
///
/// Thousands separators (`,`) and surrounding whitespace are accepted.
///
/// # Examples
///
/// ```
/// use paye_engine::validation::parse_amount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_amount("gross_pay", " 50,000 ").unwrap(), Decimal::new(50000, 0));
/// assert!(parse_amount("gross_pay", "-1").is_err());
/// assert!(parse_amount("gross_pay", "").is_err());
/// ```
pub fn parse_amount(field: &str, raw: &str) -> EngineResult<Decimal> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return Err(EngineError::invalid_input(field, "a value is required"));
    }

    let value = Decimal::from_str(&cleaned).map_err(|_| {
        EngineError::invalid_input(field, format!("'{}' is not a number", raw.trim()))
    })?;

    check_amount(field, value)?;
    Ok(value)
}

/// Parses an optional amount; blank means zero.
pub fn parse_optional_amount(field: &str, raw: &str) -> EngineResult<Decimal> {
    if raw.trim().is_empty() {
        Ok(Decimal::ZERO)
    } else {
        parse_amount(field, raw)
    }
}

impl TryFrom<CalculationForm> for CalculationInput {
    type Error = EngineError;

    fn try_from(form: CalculationForm) -> EngineResult<Self> {
        let housed = form.is_housed_by_employer;
        let (housing_value, rent_paid_to_employer) = if housed {
            (
                parse_optional_amount("housing_value", &form.housing_value)?,
                parse_optional_amount("rent_paid_to_employer", &form.rent_paid_to_employer)?,
            )
        } else {
            (Decimal::ZERO, Decimal::ZERO)
        };

        Ok(CalculationInput {
            gross_pay: parse_amount("gross_pay", &form.gross_pay)?,
            non_cash_benefits: parse_optional_amount("non_cash_benefits", &form.non_cash_benefits)?,
            pension_contribution: parse_optional_amount(
                "pension_contribution",
                &form.pension_contribution,
            )?,
            other_allowable_deductions: parse_optional_amount(
                "other_allowable_deductions",
                &form.other_allowable_deductions,
            )?,
            is_housed_by_employer: housed,
            housing_value,
            rent_paid_to_employer,
            ignore_benefits_under_threshold: form.ignore_benefits_under_threshold,
            use_tiered_contribution_schedule: form.use_tiered_contribution_schedule,
            include_second_contribution_tier: form.include_second_contribution_tier,
            apply_housing_levy: form.apply_housing_levy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn form(gross: &str) -> CalculationForm {
        CalculationForm {
            gross_pay: gross.to_string(),
            ..CalculationForm::default()
        }
    }

    fn invalid_field(result: EngineResult<CalculationInput>) -> String {
        match result {
            Err(EngineError::InvalidInput { field, .. }) => field,
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_minimal_form_converts() {
        let input = CalculationInput::try_from(form("50000")).unwrap();
        assert_eq!(input, CalculationInput::new(dec("50000")));
    }

    #[test]
    fn test_full_form_converts() {
        let input = CalculationInput::try_from(CalculationForm {
            gross_pay: "80,000.50".to_string(),
            non_cash_benefits: "7000".to_string(),
            pension_contribution: " 5000 ".to_string(),
            other_allowable_deductions: "".to_string(),
            is_housed_by_employer: true,
            housing_value: "15000".to_string(),
            rent_paid_to_employer: "5000".to_string(),
            ignore_benefits_under_threshold: true,
            use_tiered_contribution_schedule: true,
            include_second_contribution_tier: false,
            apply_housing_levy: true,
        })
        .unwrap();

        assert_eq!(input.gross_pay, dec("80000.50"));
        assert_eq!(input.pension_contribution, dec("5000"));
        assert_eq!(input.other_allowable_deductions, Decimal::ZERO);
        assert_eq!(input.housing_value, dec("15000"));
        assert!(input.use_tiered_contribution_schedule);
        assert!(!input.include_second_contribution_tier);
    }

    #[test]
    fn test_missing_gross_pay_rejected() {
        assert_eq!(invalid_field(CalculationInput::try_from(form("  "))), "gross_pay");
    }

    #[test]
    fn test_non_numeric_rejected() {
        let result = CalculationInput::try_from(CalculationForm {
            pension_contribution: "abc".to_string(),
            ..form("50000")
        });
        match result {
            Err(EngineError::InvalidInput { field, message }) => {
                assert_eq!(field, "pension_contribution");
                assert!(message.contains("'abc' is not a number"));
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_rejected() {
        let result = CalculationInput::try_from(CalculationForm {
            non_cash_benefits: "-100".to_string(),
            ..form("50000")
        });
        assert_eq!(invalid_field(result), "non_cash_benefits");
    }

    #[test]
    fn test_housing_fields_ignored_when_not_housed() {
        let input = CalculationInput::try_from(CalculationForm {
            housing_value: "not checked".to_string(),
            rent_paid_to_employer: "-5".to_string(),
            ..form("50000")
        })
        .unwrap();

        assert_eq!(input.housing_value, Decimal::ZERO);
        assert_eq!(input.rent_paid_to_employer, Decimal::ZERO);
    }

    #[test]
    fn test_housing_fields_validated_when_housed() {
        let result = CalculationInput::try_from(CalculationForm {
            is_housed_by_employer: true,
            housing_value: "10000".to_string(),
            rent_paid_to_employer: "-5".to_string(),
            ..form("50000")
        });
        assert_eq!(invalid_field(result), "rent_paid_to_employer");
    }

    #[test]
    fn test_too_large_rejected() {
        let result = CalculationInput::try_from(CalculationForm {
            other_allowable_deductions: "79228162514264337593543950335".to_string(),
            ..form("50000")
        });
        match result {
            Err(EngineError::InvalidInput { field, message }) => {
                assert_eq!(field, "other_allowable_deductions");
                assert!(message.contains("too large"));
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_infinity_and_nan_rejected() {
        assert!(parse_amount("gross_pay", "inf").is_err());
        assert!(parse_amount("gross_pay", "NaN").is_err());
    }
}
