//! Locale-aware numeric normalization.
//!
//! Source documents mix Argentine formatting (`1.234,56`) with plain
//! formatting (`1234.56`) unpredictably, so this is a best-effort
//! heuristic rather than a strict parser. Unparseable input resolves
//! to [`DEFAULT_AMOUNT`], never an error.

use lazy_static::lazy_static;
use regex::Regex;

/// Value returned for empty or unparseable numeric input.
pub const DEFAULT_AMOUNT: &str = "0.00";

lazy_static! {
    static ref SIGNED_NUMBER: Regex = Regex::new(r"-?\d+(?:\.\d+)?").unwrap();
}

/// Normalize a locale-formatted numeric string into a canonical
/// decimal string with `.` as the decimal point.
///
/// Separator disambiguation:
/// - both `.` and `,` present: `.` is thousands, `,` is decimal;
/// - only `.`: multiple dots are thousands; a single dot followed by
///   more than two digits is also treated as thousands;
/// - only `,`: decimal point.
pub fn normalize_amount(raw: &str) -> String {
    let mut cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '-'))
        .collect();

    if cleaned.contains('.') && cleaned.contains(',') {
        cleaned = cleaned.replace('.', "").replace(',', ".");
    } else if cleaned.contains('.') {
        let dots = cleaned.matches('.').count();
        if dots > 1 {
            cleaned = cleaned.replace('.', "");
        } else if let Some((_, frac)) = cleaned.split_once('.') {
            if frac.len() > 2 {
                cleaned = cleaned.replace('.', "");
            }
        }
    } else if cleaned.contains(',') {
        cleaned = cleaned.replace(',', ".");
    }

    SIGNED_NUMBER
        .find(&cleaned)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| DEFAULT_AMOUNT.to_string())
}

/// Normalize and round to whole currency units.
///
/// Used by the reconciliation preprocessor, where amounts from the two
/// sources only agree at integer precision.
pub fn round_amount(raw: &str) -> i64 {
    let normalized = normalize_amount(raw);
    normalized
        .parse::<f64>()
        .map(|v| v.round() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argentine_format() {
        assert_eq!(normalize_amount("1.234,56"), "1234.56");
        assert_eq!(normalize_amount("$ 7.092.636,97"), "7092636.97");
        assert_eq!(normalize_amount("-1.234,56"), "-1234.56");
    }

    #[test]
    fn test_plain_format() {
        assert_eq!(normalize_amount("1234.56"), "1234.56");
        assert_eq!(normalize_amount("0.50"), "0.50");
    }

    #[test]
    fn test_comma_decimal() {
        assert_eq!(normalize_amount("1,56"), "1.56");
        assert_eq!(normalize_amount("1234,5"), "1234.5");
    }

    #[test]
    fn test_single_dot_thousands() {
        // One dot with more than two trailing digits is a thousands
        // separator, not a decimal point.
        assert_eq!(normalize_amount("1.234"), "1234");
        assert_eq!(normalize_amount("12.345.678"), "12345678");
    }

    #[test]
    fn test_unparseable_input() {
        assert_eq!(normalize_amount(""), "0.00");
        assert_eq!(normalize_amount("abc"), "0.00");
        assert_eq!(normalize_amount("$ "), "0.00");
    }

    #[test]
    fn test_round_amount() {
        assert_eq!(round_amount("1.234,56"), 1235);
        assert_eq!(round_amount("1.234,49"), 1234);
        assert_eq!(round_amount("-10,5"), -11);
        assert_eq!(round_amount("garbage"), 0);
    }
}
