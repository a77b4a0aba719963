//! Provider classification and line-item extraction strategies.
//!
//! Each supported supplier ships its invoices in a distinct layout, so
//! the vision model is driven by a per-provider instruction text and
//! its reply is coerced onto a per-provider fixed key schema. The
//! strategy registry keeps the instruction payloads as data.

pub mod prompts;
pub mod schema;

use serde::{Deserialize, Serialize};

pub use schema::{reshape_reply, ReshapedInvoice};

/// Supported invoice providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Cocacola,
    Quilmes,
    General,
}

/// Keyword sets checked in order; the first hit wins.
const KEYWORDS: &[(Provider, &[&str])] = &[
    (Provider::Cocacola, &["coca", "femsa"]),
    (Provider::Quilmes, &["quilmes", "cerveceria y malteria", "cervecería y maltería"]),
];

/// Classify a provider from extracted document text.
///
/// Pure and total: always returns a value, `""` and unmatched text
/// classify as [`Provider::General`].
pub fn classify(text: &str) -> Provider {
    let lower = text.to_lowercase();

    // Coca-Cola needs both brand words to avoid false hits on
    // product lines in other suppliers' invoices.
    if lower.contains("coca") && lower.contains("cola") {
        return Provider::Cocacola;
    }

    for (provider, keywords) in KEYWORDS {
        if keywords.iter().any(|k| lower.contains(k)) {
            return *provider;
        }
    }
    Provider::General
}

/// Classify from the filename alone, used as a pre-filter when no text
/// has been extracted yet.
pub fn classify_by_name(filename: &str) -> Provider {
    classify(filename)
}

/// Per-provider extraction strategy: instruction text plus the fixed
/// line-item key schema the model reply is coerced onto.
#[derive(Debug, Clone, Copy)]
pub struct Strategy {
    pub provider: Provider,
    /// Natural-language instruction sent to the vision model.
    pub instruction: &'static str,
    /// Fixed key set of one line item, in output column order.
    pub item_keys: &'static [&'static str],
    /// Whether numeric item values round to whole currency units.
    pub integer_amounts: bool,
}

/// Look up the strategy for a classified provider.
pub fn strategy_for(provider: Provider) -> Strategy {
    match provider {
        Provider::Cocacola => Strategy {
            provider,
            instruction: prompts::COCA_COLA,
            item_keys: schema::COCA_COLA_KEYS,
            integer_amounts: true,
        },
        Provider::Quilmes => Strategy {
            provider,
            instruction: prompts::QUILMES,
            item_keys: schema::QUILMES_KEYS,
            integer_amounts: false,
        },
        Provider::General => Strategy {
            provider,
            instruction: prompts::GENERAL,
            item_keys: schema::GENERAL_KEYS,
            integer_amounts: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_keywords() {
        assert_eq!(classify("COCA-COLA FEMSA de Buenos Aires S.A."), Provider::Cocacola);
        assert_eq!(classify("Cervecería y Maltería Quilmes"), Provider::Quilmes);
        assert_eq!(classify("Distribuidora Mayorista S.R.L."), Provider::General);
    }

    #[test]
    fn test_classify_is_total() {
        assert_eq!(classify(""), Provider::General);
        // "cola" alone must not classify as Coca-Cola.
        assert_eq!(classify("pegamento cola vinilica"), Provider::General);
    }

    #[test]
    fn test_classify_by_name() {
        assert_eq!(classify_by_name("factura_quilmes_0001.pdf"), Provider::Quilmes);
        assert_eq!(classify_by_name("scan001.pdf"), Provider::General);
    }

    #[test]
    fn test_strategy_schemas() {
        assert_eq!(strategy_for(Provider::Cocacola).item_keys.len(), 18);
        assert_eq!(strategy_for(Provider::Quilmes).item_keys.len(), 21);
        assert_eq!(strategy_for(Provider::General).item_keys.len(), 5);
        assert!(strategy_for(Provider::Cocacola).integer_amounts);
        assert!(!strategy_for(Provider::Quilmes).integer_amounts);
    }
}
