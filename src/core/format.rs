//! Amount and percentage formatting for printed documents.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::totals::round_half_up;

/// How amounts are printed. Defaults to the French convention:
/// `1 234,56 €` with a narrow no-break space as thousands separator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyFormat {
    pub thousands_separator: String,
    pub decimal_separator: String,
    /// Appended after the number, including any leading space.
    pub symbol_suffix: String,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            thousands_separator: "\u{202F}".to_string(),
            decimal_separator: ",".to_string(),
            symbol_suffix: " €".to_string(),
        }
    }
}

/// Format an amount with 2 decimals (half-up), grouped thousands and the
/// trailing currency symbol.
pub fn format_amount(value: Decimal, format: &CurrencyFormat) -> String {
    let mut rounded = round_half_up(value.abs(), 2);
    rounded.rescale(2);
    let digits = rounded.to_string();
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut out = String::with_capacity(digits.len() + 8);
    if value.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part, &format.thousands_separator));
    out.push_str(&format.decimal_separator);
    out.push_str(frac_part);
    out.push_str(&format.symbol_suffix);
    out
}

/// Format a VAT rate or schedule share: `20 %`, `5,5 %`.
pub fn format_percentage(rate: Decimal, format: &CurrencyFormat) -> String {
    let text = rate.normalize().to_string();
    format!("{} %", text.replace('.', &format.decimal_separator))
}

fn group_thousands(int_part: &str, separator: &str) -> String {
    let len = int_part.len();
    let mut out = String::with_capacity(len + len / 3 * separator.len());
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(c);
    }
    out
}
