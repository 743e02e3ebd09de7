//! Retirement-fund contribution (NSSF) calculation.
//!
//! This module applies either the legacy flat contribution or the two-tier
//! percentage schedule to gross pay. Only tiers 1 and 2 are modelled.

use rust_decimal::Decimal;

use crate::config::DeductionSchedule;
use crate::models::AuditStep;

use super::round_currency;

/// The result of the contribution calculation.
#[derive(Debug, Clone)]
pub struct ContributionResult {
    /// Tier 1 amount (or the flat amount in legacy mode).
    pub tier_one: Decimal,
    /// Tier 2 amount, zero when not applicable.
    pub tier_two: Decimal,
    /// Total contribution, rounded to 2 places.
    pub amount: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the retirement-fund contribution for a month's gross pay.
///
/// In legacy mode (`use_tiered_schedule == false`) the flat amount from the
/// schedule applies regardless of pay. In tiered mode tier 1 is
/// `min(gross, tier_one_ceiling) * rate`; when `include_second_tier` is set
/// and gross exceeds the tier 1 ceiling, tier 2 adds
/// `(min(gross, tier_two_ceiling) - tier_one_ceiling) * rate`.
///
/// # Examples
///
/// ```
/// use paye_engine::calculation::calculate_contribution;
/// use paye_engine::config::DeductionSchedule;
/// use rust_decimal::Decimal;
///
/// let schedule = DeductionSchedule::default();
/// let result = calculate_contribution(Decimal::new(50000, 0), true, true, &schedule, 1);
/// assert_eq!(result.amount, Decimal::new(1080, 0));
/// ```
pub fn calculate_contribution(
    gross_pay: Decimal,
    use_tiered_schedule: bool,
    include_second_tier: bool,
    schedule: &DeductionSchedule,
    step_number: u32,
) -> ContributionResult {
    let contribution = &schedule.contribution;

    if !use_tiered_schedule {
        let amount = round_currency(contribution.legacy_flat_amount);
        let audit_step = AuditStep {
            step_number,
            rule_id: "contribution_tier".to_string(),
            rule_name: "Retirement Fund Contribution".to_string(),
            reference: "NSSF Act Cap 258 (legacy rates)".to_string(),
            input: serde_json::json!({
                "gross_pay": gross_pay.to_string(),
                "use_tiered_schedule": false
            }),
            output: serde_json::json!({
                "amount": amount.to_string(),
                "mode": "legacy_flat"
            }),
            reasoning: format!("Legacy flat contribution of KES {}", amount),
        };

        return ContributionResult {
            tier_one: contribution.legacy_flat_amount,
            tier_two: Decimal::ZERO,
            amount,
            audit_step,
        };
    }

    let tier_one = gross_pay.min(contribution.tier_one_ceiling) * contribution.rate;
    let tier_two = if include_second_tier && gross_pay > contribution.tier_one_ceiling {
        (gross_pay.min(contribution.tier_two_ceiling) - contribution.tier_one_ceiling)
            * contribution.rate
    } else {
        Decimal::ZERO
    };
    let amount = round_currency(tier_one + tier_two);

    let audit_step = AuditStep {
        step_number,
        rule_id: "contribution_tier".to_string(),
        rule_name: "Retirement Fund Contribution".to_string(),
        reference: "NSSF Act 2013, s.20".to_string(),
        input: serde_json::json!({
            "gross_pay": gross_pay.to_string(),
            "use_tiered_schedule": true,
            "include_second_tier": include_second_tier
        }),
        output: serde_json::json!({
            "tier_one": tier_one.normalize().to_string(),
            "tier_two": tier_two.normalize().to_string(),
            "amount": amount.to_string(),
            "mode": "tiered"
        }),
        reasoning: format!(
            "Tier 1: KES {} x {} = KES {}; tier 2: KES {}; total KES {}",
            gross_pay.min(contribution.tier_one_ceiling).normalize(),
            contribution.rate.normalize(),
            tier_one.normalize(),
            tier_two.normalize(),
            amount
        ),
    };

    ContributionResult {
        tier_one,
        tier_two,
        amount,
        audit_step,
    }
}
