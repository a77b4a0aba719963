//! Field extraction strategies, one per document class.
//!
//! Each strategy is an ordered list of field recipes: candidate rules
//! tried in order, first non-default hit wins, misses resolve to the
//! documented default. A document is classified and extracted in a
//! single pass, with fallback rules running synchronously in that
//! pass.

pub mod declaration;
pub mod invoice;
pub mod patterns;
pub mod settlement;

use tracing::debug;

use crate::models::config::SettlementConfig;
use crate::models::record::{DocumentClass, DocumentRecord};
use crate::text::locale::DEFAULT_AMOUNT;

/// Candidate-rule adapter: treat an empty string as a miss.
pub(crate) fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

/// Candidate-rule adapter for monetary fields: `"0.00"` is a miss too,
/// so a later rule may still find the real value. Positional lookups
/// can land on arbitrary prose, so anything that does not parse as a
/// normalized amount is also a miss.
pub(crate) fn amount_hit(value: String) -> Option<String> {
    if value == DEFAULT_AMOUNT || value.parse::<f64>().is_err() {
        None
    } else {
        Some(value)
    }
}

/// Run the extraction strategy for an already-classified document.
pub fn extract(
    class: DocumentClass,
    text: &str,
    source_name: &str,
    settlement: &SettlementConfig,
) -> DocumentRecord {
    debug!(
        "extracting {:?} from {} ({} chars)",
        class,
        source_name,
        text.len()
    );
    match class {
        DocumentClass::GenericInvoice => invoice::extract(text, source_name),
        DocumentClass::CardSettlement => settlement::extract(text, source_name, settlement),
        DocumentClass::TaxDeclaration => declaration::extract(text, source_name),
        // Provider invoices are line-item based and go through the
        // vision collaborator, not the regex strategies.
        DocumentClass::ProviderInvoice => {
            DocumentRecord::with_defaults(source_name, class, &[("Archivo_PDF", source_name)])
        }
    }
}

/// Classify and extract in one step.
pub fn extract_auto(text: &str, source_name: &str, settlement: &SettlementConfig) -> DocumentRecord {
    let class = DocumentClass::detect(text);
    extract(class, text, source_name, settlement)
}
