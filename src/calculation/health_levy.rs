//! Health levy (NHIF/SHIF) calculation.
//!
//! The levy is a step function of gross pay over the schedule's bands.

use rust_decimal::Decimal;

use crate::config::{DeductionSchedule, HealthLevyBand};
use crate::models::AuditStep;

use super::round_currency;

/// The result of the health levy calculation.
#[derive(Debug, Clone)]
pub struct HealthLevyResult {
    /// Index of the matching band in the schedule.
    pub band_index: usize,
    /// The levy, rounded to 2 places.
    pub amount: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Returns the index of the band covering `gross_pay`.
///
/// Bands are right-open: a band with `below: Some(6000)` covers gross pay
/// strictly below 6000. The first band whose bound exceeds the gross pay, or
/// the unbounded band, matches. Gross pay beyond every bound of a schedule
/// lacking an unbounded band falls into the last band.
pub fn find_health_levy_band(bands: &[HealthLevyBand], gross_pay: Decimal) -> usize {
    bands
        .iter()
        .position(|band| band.below.is_none_or(|below| gross_pay < below))
        .unwrap_or(bands.len().saturating_sub(1))
}

/// Calculates the health levy for a month's gross pay.
///
/// # Examples
///
/// ```
/// use paye_engine::calculation::calculate_health_levy;
/// use paye_engine::config::DeductionSchedule;
/// use rust_decimal::Decimal;
///
/// let result = calculate_health_levy(Decimal::new(50000, 0), &DeductionSchedule::default(), 3);
/// assert_eq!(result.amount, Decimal::new(1200, 0));
/// ```
pub fn calculate_health_levy(
    gross_pay: Decimal,
    schedule: &DeductionSchedule,
    step_number: u32,
) -> HealthLevyResult {
    let bands = &schedule.health_levy_bands;
    let band_index = find_health_levy_band(bands, gross_pay);
    let band = bands.get(band_index);
    let amount = round_currency(band.map_or(Decimal::ZERO, |b| b.levy));

    let lower_bound = band_index
        .checked_sub(1)
        .and_then(|i| bands.get(i))
        .and_then(|b| b.below)
        .unwrap_or(Decimal::ZERO);
    let band_label = match band.and_then(|b| b.below) {
        Some(below) => format!("KES {} to below KES {}", lower_bound, below),
        None => format!("KES {} and above", lower_bound),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "health_levy".to_string(),
        rule_name: "Health Levy".to_string(),
        reference: "NHIF Act Cap 255, Standard Contribution Rates".to_string(),
        input: serde_json::json!({
            "gross_pay": gross_pay.to_string()
        }),
        output: serde_json::json!({
            "band_index": band_index,
            "band": band_label,
            "amount": amount.to_string()
        }),
        reasoning: format!(
            "Gross pay KES {} falls in band {} ({}): levy KES {}",
            gross_pay,
            band_index + 1,
            band_label,
            amount
        ),
    };

    HealthLevyResult {
        band_index,
        amount,
        audit_step,
    }
}
