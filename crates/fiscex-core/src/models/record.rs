//! Parsed document representations.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::provider::Provider;

/// Document class, determined once per document before extraction and
/// immutable thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentClass {
    /// Electronic invoice or credit note (factura / nota de crédito).
    GenericInvoice,
    /// Card-network settlement statement (liquidación de tarjeta).
    CardSettlement,
    /// VAT tax declaration (declaración jurada).
    TaxDeclaration,
    /// Supplier invoice whose line items come from the vision model.
    ProviderInvoice,
}

impl DocumentClass {
    /// Keyword-based class detection over extracted text.
    ///
    /// Settlement statements and declarations carry distinctive
    /// headings; anything else is treated as a generic invoice.
    pub fn detect(text: &str) -> Self {
        let upper = text.to_uppercase();
        if upper.contains("TOTAL PRESENTADO") || upper.contains("LIQUIDACION") {
            return DocumentClass::CardSettlement;
        }
        if upper.contains("DECLARACION JURADA")
            || upper.contains("DECLARACIÓN JURADA")
            || upper.contains("DEBITO FISCAL")
            || upper.contains("DÉBITO FISCAL")
        {
            return DocumentClass::TaxDeclaration;
        }
        DocumentClass::GenericInvoice
    }
}

/// One parsed source document: a fixed field schema populated by the
/// extraction strategy for its class.
///
/// Created with per-class defaults, populated field by field in a
/// single extraction pass, then never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Original filename, kept for traceability.
    pub source_name: String,

    /// Document class the extraction strategy was chosen for.
    pub class: DocumentClass,

    /// Field name to normalized value, in schema order.
    pub fields: IndexMap<String, String>,
}

impl DocumentRecord {
    /// Create a record with every schema field set to its default.
    pub fn with_defaults(
        source_name: impl Into<String>,
        class: DocumentClass,
        schema: &[(&str, &str)],
    ) -> Self {
        let mut fields = IndexMap::with_capacity(schema.len());
        for (name, default) in schema {
            fields.insert((*name).to_string(), (*default).to_string());
        }
        Self {
            source_name: source_name.into(),
            class,
            fields,
        }
    }

    /// Set a field, keeping schema order for known fields.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.fields.insert(name.to_string(), value.into());
    }

    /// Field value, or `""` for unknown names.
    pub fn get(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or("")
    }
}

/// One product row within a provider invoice.
///
/// The key set is fixed per provider; numeric values follow the
/// provider's rounding rule (Coca-Cola whole currency units, Quilmes
/// two decimals). Items belong to their source document by ordering,
/// grouping is per source file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LineItem {
    /// Provider-specific keys in schema order; missing values are null.
    pub fields: IndexMap<String, Value>,
}

impl LineItem {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

/// Per-document result of a provider-invoice batch run.
///
/// Every input document yields exactly one of these; failures carry an
/// error message and an empty item list instead of aborting the batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedInvoice {
    /// Original filename.
    pub file_name: String,

    /// Classified provider.
    pub provider: Provider,

    /// Invoice number reported by the model, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,

    /// Invoice total reported by the model, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_total: Option<i64>,

    /// Extracted line items, coerced onto the provider schema.
    pub items: Vec<LineItem>,

    /// Extraction failure for this document, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProcessedInvoice {
    /// Empty, error-flagged result for a failed document.
    pub fn failed(file_name: impl Into<String>, provider: Provider, error: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            provider,
            invoice_number: None,
            invoice_total: None,
            items: Vec::new(),
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_detection() {
        assert_eq!(
            DocumentClass::detect("LIQUIDACION VISA\nTOTAL PRESENTADO $"),
            DocumentClass::CardSettlement
        );
        assert_eq!(
            DocumentClass::detect("F.2002 Declaración Jurada IVA"),
            DocumentClass::TaxDeclaration
        );
        assert_eq!(
            DocumentClass::detect("FACTURA A"),
            DocumentClass::GenericInvoice
        );
    }

    #[test]
    fn test_record_defaults_keep_schema_order() {
        let record = DocumentRecord::with_defaults(
            "a.pdf",
            DocumentClass::CardSettlement,
            &[("Total_Presentado", "0.00"), ("Logo_Marca", "No reconocido")],
        );
        let keys: Vec<&String> = record.fields.keys().collect();
        assert_eq!(keys, ["Total_Presentado", "Logo_Marca"]);
        assert_eq!(record.get("Logo_Marca"), "No reconocido");
        assert_eq!(record.get("missing"), "");
    }
}
