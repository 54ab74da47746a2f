//! Number formatting shared by the report, the console output and chart axes
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Formats a monetary amount as `$1,234.57`
///
/// Rounds half away from zero to cents; negatives render as `-$1.00`.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    format!(
        "{}${}.{}",
        if negative { "-" } else { "" },
        group_thousands(whole),
        cents
    )
}

/// Formats a count with thousands separators
pub fn format_count(value: u64) -> String {
    group_thousands(&value.to_string())
}

/// Compact axis label for money, e.g. `$1.2M`, `$45K`, `$900`
pub fn format_axis_money(value: f64) -> String {
    let magnitude = value.abs();
    let sign = if value < 0.0 { "-" } else { "" };
    if magnitude >= 1_000_000.0 {
        format!("{}${:.1}M", sign, magnitude / 1_000_000.0)
    } else if magnitude >= 1_000.0 {
        format!("{}${:.0}K", sign, magnitude / 1_000.0)
    } else {
        format!("{}${:.0}", sign, magnitude)
    }
}

/// Lossy conversion used only for plotting
pub fn decimal_to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn currency_rounds_and_groups() {
        assert_eq!(format_currency(dec!(1234.567)), "$1,234.57");
        assert_eq!(format_currency(dec!(0)), "$0.00");
        assert_eq!(format_currency(dec!(999.995)), "$1,000.00");
        assert_eq!(format_currency(dec!(1234567.8)), "$1,234,567.80");
        assert_eq!(format_currency(dec!(0.005)), "$0.01");
    }

    #[test]
    fn negative_currency() {
        assert_eq!(format_currency(dec!(-1)), "-$1.00");
        assert_eq!(format_currency(dec!(-0.001)), "$0.00");
    }

    #[test]
    fn counts_and_axis() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(1234567), "1,234,567");
        assert_eq!(format_axis_money(1_300_000.0), "$1.3M");
        assert_eq!(format_axis_money(45_000.0), "$45K");
        assert_eq!(format_axis_money(900.0), "$900");
    }
}
