//! Formatting amounts for display.

use numfmt::{Formatter, Precision};

/// Format `number` as a currency amount with two decimal places, e.g. "₹1,234.50".
///
/// Negative amounts are written with the minus sign in front of the symbol,
/// e.g. "-₹200.00".
pub fn format_currency(number: f64, currency_symbol: &str) -> String {
    if number == 0.0 || !number.is_finite() {
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        return format!("{currency_symbol}0.00");
    }

    let sign = if number < 0.0 { "-" } else { "" };
    let prefix = format!("{sign}{currency_symbol}");

    let mut formatted_string = match Formatter::currency(&prefix) {
        Ok(formatter) => formatter
            .precision(Precision::Decimals(2))
            .fmt_string(number.abs()),
        Err(error) => {
            tracing::debug!("Could not use {prefix:?} as a currency prefix: {error}");
            return format!("{prefix}{:.2}", number.abs());
        }
    };

    // numfmt omits trailing zeros, so we must add them ourselves
    // For example, "12.30" is rendered as "12.3" and "12.00" as "12".
    match formatted_string.rfind('.') {
        Some(position) if formatted_string.len() - position == 2 => formatted_string.push('0'),
        Some(_) => {}
        None => formatted_string.push_str(".00"),
    }

    formatted_string
}
