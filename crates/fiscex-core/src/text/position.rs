//! Positional value lookup in raw document text.
//!
//! PDF-to-text output for fixed-template documents places values a
//! constant number of lines below their label, so the extractors here
//! work on line offsets and anchored regexes. Every lookup is
//! best-effort: a miss returns an empty or default value, never an
//! error. No field is mandatory at this layer.

use lazy_static::lazy_static;
use regex::Regex;

use super::locale::normalize_amount;

lazy_static! {
    static ref NUMERIC_LOOKING: Regex = Regex::new(r"^[\d.,\-\s$]+$").unwrap();
}

/// Find the first line containing `label` as a substring and return
/// the line `lines_below` further down, trimmed.
///
/// Values that look numeric are routed through the locale normalizer.
/// Out-of-bounds offsets and missing labels yield `""`.
pub fn value_below(label: &str, text: &str, lines_below: usize) -> String {
    let lines: Vec<&str> = text.split('\n').collect();

    for (i, line) in lines.iter().enumerate() {
        if line.contains(label) {
            let Some(target) = lines.get(i + lines_below) else {
                return String::new();
            };
            let value = target.trim();
            if !value.is_empty() && NUMERIC_LOOKING.is_match(value) {
                return normalize_amount(value);
            }
            return value.to_string();
        }
    }

    String::new()
}

/// Return the first capture group of the first match, trimmed.
pub fn first_match(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// Like [`first_match`] but resolving a miss to `default`.
pub fn first_match_or(re: &Regex, text: &str, default: &str) -> String {
    first_match(re, text).unwrap_or_else(|| default.to_string())
}

/// First capture group of the first match, normalized as an amount.
///
/// Misses resolve to `"0.00"` like every other monetary default.
pub fn monetary_match(re: &Regex, text: &str) -> String {
    match first_match(re, text) {
        Some(v) => normalize_amount(&v),
        None => crate::text::locale::DEFAULT_AMOUNT.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_below_offsets() {
        let text = "A\nLABEL\nB\nC";
        assert_eq!(value_below("LABEL", text, 2), "C");
        assert_eq!(value_below("LABEL", text, 1), "B");
        assert_eq!(value_below("A", text, 0), "A");
    }

    #[test]
    fn test_value_below_misses() {
        let text = "A\nLABEL\nB\nC";
        assert_eq!(value_below("MISSING", text, 1), "");
        // Offset past the end of the document.
        assert_eq!(value_below("LABEL", text, 10), "");
    }

    #[test]
    fn test_value_below_normalizes_numbers() {
        let text = "TOTAL PRESENTADO $\n1.234,56";
        assert_eq!(value_below("TOTAL PRESENTADO", text, 1), "1234.56");
    }

    #[test]
    fn test_first_match() {
        let re = Regex::new(r"CAE\s*N°:\s*(\d+)").unwrap();
        assert_eq!(
            first_match(&re, "CAE N°: 12345678901"),
            Some("12345678901".to_string())
        );
        assert_eq!(first_match(&re, "no cae here"), None);
        assert_eq!(first_match_or(&re, "no cae here", ""), "");
    }

    #[test]
    fn test_monetary_match_default() {
        let re = Regex::new(r"SALDO\s+\$\s*([\d.,]+)").unwrap();
        assert_eq!(monetary_match(&re, "SALDO $ 1.000,00"), "1000.00");
        assert_eq!(monetary_match(&re, "nothing"), "0.00");
    }
}
