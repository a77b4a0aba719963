//! VAT declaration (DDJJ) extraction.
//!
//! The declaration form is entirely label-driven, so this strategy is
//! a flat regex table walk over the monetary fields plus a handful of
//! header lookups.

use crate::models::record::{DocumentClass, DocumentRecord};
use crate::text::first_match_or;

use super::patterns::*;

const HEADER_SCHEMA: &[(&str, &str)] = &[
    ("Archivo_PDF", ""),
    ("CUIT", ""),
    ("Razon_Social", ""),
    ("Fecha_Presentacion", ""),
    ("Hora", ""),
];

/// Extract a tax declaration into its fixed schema: the header fields
/// followed by every monetary field the form declares, in form order.
pub fn extract(text: &str, source_name: &str) -> DocumentRecord {
    let mut record =
        DocumentRecord::with_defaults(source_name, DocumentClass::TaxDeclaration, HEADER_SCHEMA);
    record.set("Archivo_PDF", source_name);

    record.set("CUIT", first_match_or(&DDJJ_CUIT, text, ""));
    record.set("Razon_Social", first_match_or(&DDJJ_RAZON_SOCIAL, text, ""));
    record.set(
        "Fecha_Presentacion",
        first_match_or(&DDJJ_FECHA_PRESENTACION, text, ""),
    );
    record.set("Hora", first_match_or(&DDJJ_HORA, text, ""));

    for (field, re) in DDJJ_AMOUNTS.iter() {
        let value = match re.captures(text).and_then(|caps| caps.get(1)) {
            Some(m) => ddjj_number(m.as_str()),
            None => "0.00".to_string(),
        };
        record.set(field, value);
    }

    record
}

/// The form prints amounts with a comma decimal separator and no
/// thousands grouping, so a single comma-to-period swap suffices.
fn ddjj_number(raw: &str) -> String {
    raw.trim().replacen(',', ".", 1)
}
