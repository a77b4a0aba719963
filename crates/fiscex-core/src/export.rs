//! Tabular export assembly.
//!
//! Everything downstream of the pipeline is a sheet of ordered string
//! cells. Assembly (headers, row order, error thinning) happens here;
//! serialization is behind [`RowSink`] so the CLI can ship a plain CSV
//! sink while spreadsheet writers stay external.

use indexmap::IndexSet;
use serde_json::Value;

use crate::models::ledger::LedgerRow;
use crate::models::record::{DocumentRecord, ProcessedInvoice};
use crate::reconcile::{Diagnosed, Side};
use crate::Result;

/// Destination for one or more named sheets of string cells.
pub trait RowSink {
    fn write_sheet(&mut self, name: &str, headers: &[String], rows: &[Vec<String>]) -> Result<()>;
}

/// One assembled sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sheet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Columns dropped from the authority error report; keys and working
/// columns that only add noise for the person chasing the errors.
const ERROR_REPORT_DROP: &[&str] = &[
    "Tipo Cambio",
    "Moneda",
    "Cotización",
    "Importe Exento",
    "Conceptos no Categorizados",
    "Número Hasta",
    "Monto",
    "Comprobante",
    "ID1",
    "ID2",
    "ID3",
];

/// Extracted-document sheet: header union in first-seen order, one row
/// per document, misses as `""`.
pub fn document_sheet(records: &[DocumentRecord]) -> Sheet {
    let mut headers: IndexSet<String> = IndexSet::new();
    for record in records {
        for key in record.fields.keys() {
            headers.insert(key.clone());
        }
    }
    let headers: Vec<String> = headers.into_iter().collect();

    let rows = records
        .iter()
        .map(|record| headers.iter().map(|h| record.get(h).to_string()).collect())
        .collect();

    Sheet { headers, rows }
}

/// Line-item sheet for one provider: source file first, then the
/// provider's item keys in schema order.
pub fn line_item_sheet(invoices: &[ProcessedInvoice], item_keys: &[&str]) -> Sheet {
    let mut headers = vec!["Archivo".to_string()];
    headers.extend(item_keys.iter().map(|k| (*k).to_string()));

    let mut rows = Vec::new();
    for invoice in invoices {
        for item in &invoice.items {
            let mut row = Vec::with_capacity(headers.len());
            row.push(invoice.file_name.clone());
            for &key in item_keys {
                row.push(cell(item.get(key)));
            }
            rows.push(row);
        }
    }

    Sheet { headers, rows }
}

/// Failed-documents sheet of a batch run.
pub fn batch_error_sheet(invoices: &[ProcessedInvoice]) -> Sheet {
    let headers = vec!["Archivo".to_string(), "Error".to_string()];
    let rows = invoices
        .iter()
        .filter_map(|invoice| {
            invoice
                .error
                .as_ref()
                .map(|error| vec![invoice.file_name.clone(), error.clone()])
        })
        .collect();
    Sheet { headers, rows }
}

/// Consolidated-ledger sheet: movement tag and entity first, then the
/// standardized columns.
pub fn ledger_sheet(rows: &[LedgerRow]) -> Sheet {
    let mut headers: IndexSet<String> = IndexSet::new();
    headers.insert("MC".to_string());
    headers.insert("Contribuyente".to_string());
    for row in rows {
        for key in row.fields.keys() {
            headers.insert(key.clone());
        }
    }
    let headers: Vec<String> = headers.into_iter().collect();

    let assembled = rows
        .iter()
        .map(|row| {
            headers
                .iter()
                .map(|h| match h.as_str() {
                    "MC" => row.movement.tag().to_string(),
                    "Contribuyente" => row.entity.clone(),
                    other => row.get(other).to_string(),
                })
                .collect()
        })
        .collect();

    Sheet {
        headers,
        rows: assembled,
    }
}

/// Diagnosed reconciliation sheet for one side: source columns, the
/// three keys, the diagnosis and, on the internal side, the filter
/// status.
pub fn reconciliation_sheet(diagnosed: &[Diagnosed], side: Side) -> Sheet {
    let mut headers: IndexSet<String> = IndexSet::new();
    for d in diagnosed {
        for key in d.record.fields.keys() {
            headers.insert(key.clone());
        }
    }
    headers.insert("ID1".to_string());
    headers.insert("ID2".to_string());
    headers.insert("ID3".to_string());
    headers.insert("Diagnostico".to_string());
    let with_filter = diagnosed.iter().any(|d| d.filter.is_some());
    if with_filter {
        headers.insert("Estado_Filtro".to_string());
    }
    let headers: Vec<String> = headers.into_iter().collect();

    let rows = diagnosed
        .iter()
        .map(|d| {
            headers
                .iter()
                .map(|h| match h.as_str() {
                    "ID1" => d.record.key.key1.clone(),
                    "ID2" => d.record.key.key2.clone(),
                    "ID3" => d.record.key.key3.clone(),
                    "Diagnostico" => d.diagnosis.label(side).to_string(),
                    "Estado_Filtro" => d
                        .filter
                        .map(|f| f.label().to_string())
                        .unwrap_or_default(),
                    other => d.record.fields.get(other).cloned().unwrap_or_default(),
                })
                .collect()
        })
        .collect();

    Sheet { headers, rows }
}

/// Authority error report: error rows only, working columns thinned
/// out so the report reads like a to-do list.
pub fn error_report(diagnosed: &[Diagnosed], side: Side) -> Sheet {
    let full = reconciliation_sheet(
        &diagnosed
            .iter()
            .filter(|d| d.diagnosis.is_error())
            .cloned()
            .collect::<Vec<_>>(),
        side,
    );

    let kept: Vec<usize> = full
        .headers
        .iter()
        .enumerate()
        .filter(|(_, h)| {
            let name = h.trim();
            !name.is_empty() && !ERROR_REPORT_DROP.contains(&name)
        })
        .map(|(i, _)| i)
        .collect();

    Sheet {
        headers: kept.iter().map(|&i| full.headers[i].clone()).collect(),
        rows: full
            .rows
            .iter()
            .map(|row| kept.iter().map(|&i| row[i].clone()).collect())
            .collect(),
    }
}

/// Render one JSON cell value the way the sheets print it.
fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
