//! Consolidation of tax-authority ledger CSV exports.
//!
//! The authority exports one semicolon-delimited CSV per entity and
//! direction (issued / received), with column names that drifted
//! across export versions. Consolidation classifies each file from its
//! name, renames drifted headers, drops the itemized-VAT detail
//! columns and standardizes every row against one canonical schema so
//! downstream reconciliation sees a single table.

use csv::ReaderBuilder;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, warn};

use crate::error::LedgerError;
use crate::models::ledger::{LedgerFile, LedgerRow, MovementClass};

use indexmap::IndexMap;

/// Canonical data columns of the consolidated table, in output order.
/// With the `MC` and `Contribuyente` columns prepended this is the
/// 22-column consolidated schema.
pub const CANONICAL_COLUMNS: &[&str] = &[
    "Fecha de Emisión",
    "Tipo de Comprobante",
    "Punto de Venta",
    "Número Desde",
    "Número Hasta",
    "CUIT Receptor/Emisor",
    "Nombre Receptor/Emisor",
    "Importe Total",
    "Moneda",
    "Cotización",
    "Importe Neto Gravado",
    "Importe Exento",
    "IVA",
    "Percepciones",
    "Retenciones",
    "Conceptos no Categorizados",
    "Fecha de Recepción",
    "Fecha de Vencimiento",
    "CAE",
    "Vencimiento CAE",
];

/// Header renames: issued-side exports label the counterparty columns
/// by the other role, and amount labels drifted across versions.
const HEADER_RENAMES: &[(&str, &str)] = &[
    ("Tipo Doc. Emisor", "Tipo Doc. Receptor"),
    ("Nro. Doc. Emisor", "Nro. Doc. Receptor"),
    ("Denominación Emisor", "Denominación Receptor"),
    ("Tipo de cambio", "Tipo Cambio"),
    ("Imp. Neto Gravado", "Importe Neto Gravado"),
    ("Imp. Op. Exentas", "Importe Exento"),
    ("Imp. Total", "Importe Total"),
];

/// Itemized-VAT detail columns, dropped in favor of the aggregate
/// `IVA` column.
const VAT_DETAIL_COLUMNS: &[&str] = &[
    "Imp. Neto Gravado IVA 0%",
    "IVA 2,5%",
    "Imp. Neto Gravado IVA 2,5%",
    "IVA 5%",
    "Imp. Neto Gravado IVA 5%",
    "IVA 10,5%",
    "Imp. Neto Gravado IVA 10,5%",
    "IVA 21%",
    "Imp. Neto Gravado IVA 21%",
    "IVA 27%",
    "Imp. Neto Gravado IVA 27%",
];

lazy_static! {
    /// CUIT as it appears embedded in export filenames.
    static ref CUIT_IN_FILENAME: Regex = Regex::new(r"\d{2}-?\d{8}-?\d").unwrap();
}

/// Consolidate ledger exports into standardized rows.
///
/// A file that fails to parse is logged and skipped; the batch always
/// continues. Fully blank rows are dropped.
pub fn consolidate(files: &[LedgerFile]) -> Vec<LedgerRow> {
    let mut rows = Vec::new();

    for file in files {
        let movement = MovementClass::from_filename(&file.name);
        let entity = entity_from_filename(&file.name, movement);

        let parsed = match parse_rows(file) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("{}: skipping unreadable ledger file: {e}", file.name);
                continue;
            }
        };

        debug!("{}: {} row(s) as {}", file.name, parsed.len(), movement.tag());
        for raw in parsed {
            rows.push(standardize(raw, movement, &entity));
        }
    }

    rows
}

/// Raw consolidation: keep every source column untouched and append an
/// origin label, for audits of the standardization itself.
pub fn consolidate_raw(files: &[LedgerFile]) -> Vec<LedgerRow> {
    let mut rows = Vec::new();

    for file in files {
        let movement = MovementClass::from_filename(&file.name);
        let entity = entity_from_filename(&file.name, movement);

        let parsed = match parse_rows(file) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("{}: skipping unreadable ledger file: {e}", file.name);
                continue;
            }
        };

        for mut fields in parsed {
            fields.insert(
                "Etiqueta Origen".to_string(),
                format!("{} {}", movement.origin_label(), entity),
            );
            rows.push(LedgerRow {
                movement,
                entity: entity.clone(),
                fields,
            });
        }
    }

    rows
}

/// Entity name from the export filename: the stem minus the embedded
/// CUIT and everything from the movement token on.
pub fn entity_from_filename(name: &str, movement: MovementClass) -> String {
    let stem = name
        .strip_suffix(".csv")
        .or_else(|| name.strip_suffix(".CSV"))
        .unwrap_or(name);
    let without_cuit = CUIT_IN_FILENAME.replace_all(stem, "");

    let token = format!("_{}_", movement.tag().to_lowercase());
    let head = without_cuit.split(token.as_str()).next().unwrap_or("");
    let head = head.trim();

    if head.is_empty() {
        "Sin nombre".to_string()
    } else {
        head.to_string()
    }
}

/// Parse one file into header-keyed raw rows, headers trimmed, blank
/// rows dropped.
fn parse_rows(file: &LedgerFile) -> Result<Vec<IndexMap<String, String>>, LedgerError> {
    let parse_error = |e: csv::Error| LedgerError::Parse {
        file: file.name.clone(),
        reason: e.to_string(),
    };

    let mut reader = ReaderBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .from_reader(file.content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(parse_error)?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                warn!("{}: skipping malformed row: {e}", file.name);
                continue;
            }
        };
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }

        let mut fields = IndexMap::with_capacity(headers.len());
        for (i, header) in headers.iter().enumerate() {
            let value = record.get(i).unwrap_or("").trim().to_string();
            fields.insert(header.clone(), value);
        }
        rows.push(fields);
    }

    Ok(rows)
}

/// Rename drifted headers, drop VAT detail columns, then project onto
/// the canonical schema with extras preserved in encounter order.
fn standardize(
    raw: IndexMap<String, String>,
    movement: MovementClass,
    entity: &str,
) -> LedgerRow {
    let mut renamed: IndexMap<String, String> = IndexMap::with_capacity(raw.len());
    for (header, value) in raw {
        if VAT_DETAIL_COLUMNS.contains(&header.as_str()) {
            continue;
        }
        let name = HEADER_RENAMES
            .iter()
            .find(|(from, _)| *from == header)
            .map(|(_, to)| (*to).to_string())
            .unwrap_or(header);
        renamed.insert(name, value);
    }

    let mut fields = IndexMap::with_capacity(CANONICAL_COLUMNS.len());
    for &column in CANONICAL_COLUMNS {
        let value = renamed.shift_remove(column).unwrap_or_default();
        fields.insert(column.to_string(), value);
    }
    // Whatever the export added beyond the canonical set rides along.
    for (header, value) in renamed {
        fields.insert(header, value);
    }

    LedgerRow {
        movement,
        entity: entity.to_string(),
        fields,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn file(name: &str, content: &str) -> LedgerFile {
        LedgerFile {
            name: name.to_string(),
            content: content.to_string(),
        }
    }

    const RECEIVED_CSV: &str = "\
Fecha de Emisión;Tipo de Comprobante;Punto de Venta;Número Desde;Imp. Total;IVA 21%;Denominación Emisor;Columna Rara
15/01/2024;1 - Factura A;10;123;5000,00;867,77;PROVEEDORA DEL SUR S.A.;x
;;;;;;;
16/01/2024;1 - Factura A;10;124;7000,00;1214,88;PROVEEDORA DEL SUR S.A.;y
";

    #[test]
    fn test_consolidate_renames_and_standardizes() {
        let rows = consolidate(&[file("ACME 30-71234567-8_mcr_202401 recibidos.csv", RECEIVED_CSV)]);
        assert_eq!(rows.len(), 2);

        let row = &rows[0];
        assert_eq!(row.movement, MovementClass::Received);
        assert_eq!(row.entity, "ACME");
        // Renamed amount column lands on the canonical name.
        assert_eq!(row.get("Importe Total"), "5000,00");
        // VAT detail columns are gone, canonical misses are "".
        assert_eq!(row.get("IVA 21%"), "");
        assert_eq!(row.get("CAE"), "");
        // Canonical order first, extras afterwards.
        let keys: Vec<&String> = row.fields.keys().collect();
        assert_eq!(keys[..3], ["Fecha de Emisión", "Tipo de Comprobante", "Punto de Venta"]);
        assert_eq!(keys.last().unwrap().as_str(), "Columna Rara");
        assert_eq!(row.get("Columna Rara"), "x");
    }

    #[test]
    fn test_blank_rows_are_dropped() {
        let rows = consolidate(&[file("acme_mcr_x recibido.csv", RECEIVED_CSV)]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].get("Número Desde"), "124");
    }

    #[test]
    fn test_entity_from_filename() {
        assert_eq!(
            entity_from_filename(
                "ACME SRL 30-71234567-8_mcr_202401 recibidos.csv",
                MovementClass::Received
            ),
            "ACME SRL"
        );
        assert_eq!(
            entity_from_filename("30712345678_mce_2024 emitidos.csv", MovementClass::Issued),
            "Sin nombre"
        );
        assert_eq!(
            entity_from_filename("misterio.csv", MovementClass::Unknown),
            "misterio"
        );
    }

    #[test]
    fn test_empty_file_contributes_nothing() {
        let rows = consolidate(&[
            file("vacio_mcr_ recibido.csv", ""),
            file("acme_mcr_x recibido.csv", RECEIVED_CSV),
        ]);
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_raw_mode_keeps_columns_and_labels_origin() {
        let rows = consolidate_raw(&[file("ACME_mcr_202401 recibidos.csv", RECEIVED_CSV)]);
        assert_eq!(rows.len(), 2);
        // Original headers survive untouched.
        assert_eq!(rows[0].get("Imp. Total"), "5000,00");
        assert_eq!(rows[0].get("IVA 21%"), "867,77");
        assert_eq!(rows[0].get("Etiqueta Origen"), "Recibidos ACME");
    }
}
