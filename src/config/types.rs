//! Configuration types for the statutory deduction schedule.
//!
//! This module contains the strongly-typed schedule structures that are
//! deserialized from YAML, together with the built-in default schedule.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Metadata describing which statutory rules a schedule encodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleMetadata {
    /// The human-readable name of the schedule.
    pub name: String,
    /// The date from which these rates apply.
    pub effective_date: NaiveDate,
    /// URL to the official rate documentation.
    pub source_url: String,
}

/// Retirement-fund contribution (NSSF) parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionSchedule {
    /// Flat monthly amount used when the tiered schedule is switched off.
    pub legacy_flat_amount: Decimal,
    /// Contribution rate applied to each tier.
    pub rate: Decimal,
    /// Upper earnings limit of tier 1.
    pub tier_one_ceiling: Decimal,
    /// Upper earnings limit of tier 2.
    pub tier_two_ceiling: Decimal,
}

/// A single health levy (NHIF/SHIF) band.
///
/// A band covers gross pay from the previous band's `below` (inclusive) up to
/// its own `below` (exclusive). The topmost band has no upper bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthLevyBand {
    /// Exclusive upper bound of the band, `None` for the top band.
    #[serde(default)]
    pub below: Option<Decimal>,
    /// Fixed monthly levy for gross pay falling in this band.
    pub levy: Decimal,
}

/// A single marginal income tax (PAYE) bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Width of the bracket in taxable income, `None` for the top bracket.
    #[serde(default)]
    pub width: Option<Decimal>,
    /// Marginal rate applied to income within the bracket.
    pub rate: Decimal,
}

/// The complete set of constants driving a net pay computation.
///
/// [`DeductionSchedule::default`] is the canonical monthly schedule; a YAML
/// file may replace it through [`super::ConfigLoader`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionSchedule {
    /// Schedule metadata.
    pub metadata: ScheduleMetadata,
    /// Non-cash benefits up to this value are tax free when the threshold toggle is on.
    pub benefits_threshold: Decimal,
    /// Retirement-fund contribution parameters.
    pub contribution: ContributionSchedule,
    /// Health levy bands, ordered by ascending upper bound.
    pub health_levy_bands: Vec<HealthLevyBand>,
    /// Housing levy rate applied to gross pay.
    pub housing_levy_rate: Decimal,
    /// Maximum pension contribution allowed to reduce taxable income.
    pub pension_relief_cap: Decimal,
    /// Marginal tax brackets, lowest first.
    pub tax_brackets: Vec<TaxBracket>,
    /// Fixed monthly personal relief subtracted from computed tax.
    pub personal_relief: Decimal,
}

impl Default for DeductionSchedule {
    fn default() -> Self {
        let band = |below: Option<i64>, levy: i64| HealthLevyBand {
            below: below.map(Decimal::from),
            levy: Decimal::from(levy),
        };

        Self {
            metadata: ScheduleMetadata {
                name: "Kenya Monthly Statutory Deductions".to_string(),
                effective_date: NaiveDate::from_ymd_opt(2023, 7, 1)
                    .unwrap_or(NaiveDate::MIN),
                source_url: "https://www.kra.go.ke/individual/calculate-tax/calculating-tax/paye"
                    .to_string(),
            },
            benefits_threshold: Decimal::new(5000, 0),
            contribution: ContributionSchedule {
                legacy_flat_amount: Decimal::new(200, 0),
                rate: Decimal::new(6, 2),
                tier_one_ceiling: Decimal::new(6000, 0),
                tier_two_ceiling: Decimal::new(18000, 0),
            },
            health_levy_bands: vec![
                band(Some(6000), 150),
                band(Some(8000), 300),
                band(Some(12000), 400),
                band(Some(15000), 500),
                band(Some(20000), 600),
                band(Some(25000), 750),
                band(Some(30000), 850),
                band(Some(35000), 900),
                band(Some(40000), 950),
                band(Some(45000), 1000),
                band(Some(50000), 1100),
                band(Some(60000), 1200),
                band(Some(70000), 1300),
                band(Some(80000), 1400),
                band(Some(90000), 1500),
                band(Some(100000), 1600),
                band(None, 1700),
            ],
            housing_levy_rate: Decimal::new(15, 3),
            pension_relief_cap: Decimal::new(30000, 0),
            // Widths are fixed literals, not derived from the bracket boundaries.
            tax_brackets: vec![
                TaxBracket {
                    width: Some(Decimal::new(24000, 0)),
                    rate: Decimal::new(10, 2),
                },
                TaxBracket {
                    width: Some(Decimal::new(8333, 0)),
                    rate: Decimal::new(25, 2),
                },
                TaxBracket {
                    width: Some(Decimal::new(467667, 0)),
                    rate: Decimal::new(30, 2),
                },
                TaxBracket {
                    width: Some(Decimal::new(300000, 0)),
                    rate: Decimal::new(325, 3),
                },
                TaxBracket {
                    width: None,
                    rate: Decimal::new(35, 2),
                },
            ],
            personal_relief: Decimal::new(2400, 0),
        }
    }
}

impl DeductionSchedule {
    /// Checks that the schedule can drive a total, well-defined computation.
    ///
    /// Health levy bands must have strictly increasing bounds with exactly one
    /// unbounded band at the end, so every non-negative gross pay matches one
    /// band. Tax brackets must have positive widths and end in one unbounded
    /// bracket. All amounts and rates must be non-negative.
    pub fn validate(&self) -> EngineResult<()> {
        let invalid = |message: String| Err(EngineError::InvalidSchedule { message });

        for (name, value) in [
            ("benefits_threshold", self.benefits_threshold),
            ("contribution.legacy_flat_amount", self.contribution.legacy_flat_amount),
            ("contribution.rate", self.contribution.rate),
            ("contribution.tier_one_ceiling", self.contribution.tier_one_ceiling),
            ("housing_levy_rate", self.housing_levy_rate),
            ("pension_relief_cap", self.pension_relief_cap),
            ("personal_relief", self.personal_relief),
        ] {
            if value < Decimal::ZERO {
                return invalid(format!("{} must not be negative", name));
            }
        }

        if self.contribution.tier_two_ceiling < self.contribution.tier_one_ceiling {
            return invalid("contribution.tier_two_ceiling is below tier_one_ceiling".to_string());
        }

        let Some((top_band, lower_bands)) = self.health_levy_bands.split_last() else {
            return invalid("health_levy_bands is empty".to_string());
        };
        if top_band.below.is_some() {
            return invalid("the last health levy band must be unbounded".to_string());
        }
        let mut previous_bound = Decimal::ZERO;
        let mut previous_levy = Decimal::ZERO;
        for (index, band) in self.health_levy_bands.iter().enumerate() {
            if band.levy < previous_levy {
                return invalid(format!("health levy band {} decreases the levy", index));
            }
            previous_levy = band.levy;
            if index == lower_bands.len() {
                break;
            }
            match band.below {
                Some(bound) if bound > previous_bound => previous_bound = bound,
                Some(_) => {
                    return invalid(format!(
                        "health levy band {} bound is not strictly increasing",
                        index
                    ));
                }
                None => {
                    return invalid(format!(
                        "health levy band {} is unbounded but not last",
                        index
                    ));
                }
            }
        }

        let Some((top_bracket, lower_brackets)) = self.tax_brackets.split_last() else {
            return invalid("tax_brackets is empty".to_string());
        };
        if top_bracket.width.is_some() {
            return invalid("the last tax bracket must be unbounded".to_string());
        }
        for (index, bracket) in self.tax_brackets.iter().enumerate() {
            if bracket.rate < Decimal::ZERO {
                return invalid(format!("tax bracket {} has a negative rate", index));
            }
        }
        for (index, bracket) in lower_brackets.iter().enumerate() {
            match bracket.width {
                Some(width) if width > Decimal::ZERO => {}
                Some(_) => {
                    return invalid(format!("tax bracket {} width must be positive", index));
                }
                None => {
                    return invalid(format!(
                        "tax bracket {} is unbounded but not last",
                        index
                    ));
                }
            }
        }

        Ok(())
    }
}
