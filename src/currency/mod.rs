//! Display formatting for amounts shown next to the configured currency symbol.

use rust_decimal::Decimal;

/// Two decimals with `,` thousands grouping; the sign goes before the symbol.
///
/// `format_amount(dec!(-1234.5), "₹")` gives `-₹1,234.50`.
pub fn format_amount(amount: Decimal, symbol: &str) -> String {
    let formatted = format!("{:.2}", amount.abs());
    let (int_part, dec_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));
    let grouped = group_thousands(int_part);
    let sign = if amount < Decimal::ZERO && !amount.round_dp(2).is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{symbol}{grouped}.{dec_part}")
}

/// One decimal followed by `%`, e.g. `42.5%`.
pub fn format_percentage(value: Decimal) -> String {
    format!("{:.1}%", value)
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
