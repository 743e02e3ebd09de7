//! Calculation input model.
//!
//! This module defines [`CalculationInput`], the salary figures and policy
//! toggles that drive a single net pay computation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Largest accepted monetary amount: one trillion KES.
///
/// Sums and products of amounts up to this size stay far inside `Decimal`'s
/// range, so [`crate::calculation::compute`] cannot overflow on valid input.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Salary inputs and policy toggles for one monthly net pay computation.
///
/// All monetary fields are monthly KES amounts between zero and [`MAX_AMOUNT`].
/// The engine assumes this holds; callers check it with [`validate`] or build
/// the input through [`crate::validation::CalculationForm`].
///
/// [`validate`]: CalculationInput::validate
///
/// # Example
///
/// ```
/// use paye_engine::models::CalculationInput;
/// use rust_decimal::Decimal;
///
/// let input = CalculationInput {
///     apply_housing_levy: true,
///     ..CalculationInput::new(Decimal::new(50000, 0))
/// };
/// assert!(input.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationInput {
    /// Monthly gross pay.
    pub gross_pay: Decimal,
    /// Value of non-cash (fringe) benefits.
    #[serde(default)]
    pub non_cash_benefits: Decimal,
    /// Pension contribution paid by the employee.
    #[serde(default)]
    pub pension_contribution: Decimal,
    /// Other allowable deductions asserted by the caller.
    #[serde(default)]
    pub other_allowable_deductions: Decimal,
    /// Whether the employer provides housing.
    #[serde(default)]
    pub is_housed_by_employer: bool,
    /// Value of employer-provided housing. Only used when housed.
    #[serde(default)]
    pub housing_value: Decimal,
    /// Rent paid back to the employer for the housing. Only used when housed.
    #[serde(default)]
    pub rent_paid_to_employer: Decimal,
    /// Treat non-cash benefits up to the threshold as tax free.
    #[serde(default)]
    pub ignore_benefits_under_threshold: bool,
    /// Use the tiered contribution schedule instead of the legacy flat amount.
    #[serde(default)]
    pub use_tiered_contribution_schedule: bool,
    /// Include tier 2 when the tiered schedule is used.
    #[serde(default)]
    pub include_second_contribution_tier: bool,
    /// Deduct the housing levy.
    #[serde(default)]
    pub apply_housing_levy: bool,
}

impl CalculationInput {
    /// Creates an input with the given gross pay and everything else zero or off.
    pub fn new(gross_pay: Decimal) -> Self {
        Self {
            gross_pay,
            ..Self::default()
        }
    }

    /// Returns the monetary fields paired with their field names.
    pub fn monetary_fields(&self) -> [(&'static str, Decimal); 6] {
        [
            ("gross_pay", self.gross_pay),
            ("non_cash_benefits", self.non_cash_benefits),
            ("pension_contribution", self.pension_contribution),
            ("other_allowable_deductions", self.other_allowable_deductions),
            ("housing_value", self.housing_value),
            ("rent_paid_to_employer", self.rent_paid_to_employer),
        ]
    }

    /// Rejects inputs outside the engine's domain.
    ///
    /// Returns `InvalidInput` naming the first monetary field that is negative
    /// or larger than [`MAX_AMOUNT`].
    pub fn validate(&self) -> EngineResult<()> {
        for (field, value) in self.monetary_fields() {
            check_amount(field, value)?;
        }
        Ok(())
    }
}

/// Checks that a single amount lies within `0..=MAX_AMOUNT`.
pub fn check_amount(field: &str, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO {
        return Err(EngineError::invalid_input(
            field,
            format!("must not be negative (got {})", value),
        ));
    }
    if value > MAX_AMOUNT {
        return Err(EngineError::invalid_input(
            field,
            format!("is too large (maximum {})", MAX_AMOUNT),
        ));
    }
    Ok(())
}
