//! Plain-text export of calculation results.
//!
//! Renders a result as a fixed-label summary suitable for sharing as text.

use std::fmt::Write;

use rust_decimal::Decimal;

use crate::calculation::round_currency;
use crate::models::{CalculationResult, HistoryEntry};

const LABEL_WIDTH: usize = 24;

/// Formats an amount as `KES 1,234,567.89`.
///
/// # Examples
///
/// ```
/// use paye_engine::export::format_kes;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(format_kes(Decimal::from_str("40495.65").unwrap()), "KES 40,495.65");
/// assert_eq!(format_kes(Decimal::from_str("-4350").unwrap()), "KES -4,350.00");
/// ```
pub fn format_kes(amount: Decimal) -> String {
    let rounded = round_currency(amount);
    let text = rounded.abs().to_string();
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    format!("KES {}{}.{}", sign, grouped, fraction)
}

fn line(out: &mut String, label: &str, value: &str) {
    // Writing to a String cannot fail.
    let _ = writeln!(out, "{:<width$}{}", format!("{}:", label), value, width = LABEL_WIDTH);
}

/// Renders a result as a plain-text summary.
///
/// Housing lines appear only for employees housed by their employer.
pub fn render_summary(result: &CalculationResult) -> String {
    let mut out = String::new();
    out.push_str("Net Pay Summary\n");
    out.push_str("===============\n");

    line(&mut out, "Gross pay", &format_kes(result.gross_pay));
    line(&mut out, "Non-cash benefits", &format_kes(result.non_cash_benefits));
    line(&mut out, "Pension contribution", &format_kes(result.pension_contribution));
    line(
        &mut out,
        "Other deductions",
        &format_kes(result.other_allowable_deductions),
    );
    line(
        &mut out,
        "Housed by employer",
        if result.is_housed_by_employer { "Yes" } else { "No" },
    );
    if result.is_housed_by_employer {
        line(&mut out, "Housing value", &format_kes(result.housing_value));
        line(&mut out, "Rent paid to employer", &format_kes(result.rent_paid_to_employer));
    }

    out.push('\n');
    line(&mut out, "Taxable benefits", &format_kes(result.taxable_benefits));
    line(&mut out, "Taxable income", &format_kes(result.taxable_income));
    line(&mut out, "Personal relief", &format_kes(result.relief_applied));

    out.push('\n');
    line(&mut out, "PAYE", &format_kes(result.income_tax_amount));
    line(&mut out, "NSSF", &format_kes(result.contribution_tier_amount));
    line(&mut out, "SHIF/NHIF", &format_kes(result.health_levy_amount));
    line(&mut out, "Housing levy", &format_kes(result.housing_levy_amount));
    line(
        &mut out,
        "Statutory deductions",
        &format_kes(result.statutory_deductions()),
    );
    line(&mut out, "Total deductions", &format_kes(result.total_deductions));

    out.push('\n');
    line(&mut out, "Net pay", &format_kes(result.net_pay));
    out
}

/// Renders a history entry: its timestamp followed by the result summary.
pub fn render_entry(entry: &HistoryEntry) -> String {
    let mut out = String::new();
    line(
        &mut out,
        "Calculated",
        &entry.created_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    );
    out.push_str(&render_summary(&entry.result));
    out
}
