//! Per-side preprocessing into [`ReconRecord`]s.
//!
//! Both ledgers arrive with their own column names and number formats;
//! everything is normalized here so the key builder sees identical
//! components from either side.

use indexmap::IndexMap;
use tracing::debug;

use crate::models::config::EntityAlias;
use crate::models::ledger::{LedgerRow, MovementClass};
use crate::text::locale::round_amount;

use super::{parse_date, ReconRecord};

/// Zero-pad a numeric token, dropping any spreadsheet decimal tail.
fn zero_pad(raw: &str, width: usize) -> String {
    let token = raw.split('.').next().unwrap_or("").trim();
    format!("{token:0>width$}")
}

/// Prepare consolidated authority rows for reconciliation.
///
/// Only received invoices participate; issued ones belong to the
/// mirror reconciliation run by the counterparty.
pub fn prepare_authority_rows(rows: &[LedgerRow]) -> Vec<ReconRecord> {
    let mut records = Vec::new();

    for row in rows {
        if row.movement != MovementClass::Received {
            continue;
        }

        let venue = zero_pad(row.get("Punto de Venta"), 5);
        let number = zero_pad(row.get("Número Desde"), 8);
        let amount = round_amount(row.get("Importe Total"));
        let date = parse_date(row.get("Fecha de Emisión"));
        let counterparty = row.get("Nombre Receptor/Emisor").to_string();

        let mut fields = row.fields.clone();
        fields.insert("Punto de Venta".to_string(), venue.clone());
        fields.insert("Número Desde".to_string(), number.clone());
        fields.insert("Monto".to_string(), amount.to_string());
        fields.insert("Sociedad".to_string(), row.entity.clone());

        records.push(ReconRecord::new(
            venue,
            number,
            amount,
            row.entity.clone(),
            date,
            counterparty,
            fields,
        ));
    }

    debug!("prepared {} authority row(s)", records.len());
    records
}

/// Prepare internal-ledger rows for reconciliation.
///
/// The export appends a "Registros: N" summary block; everything from
/// that row on is dropped. The entity comes from the label-to-legal-
/// name alias table, the venue and number from splitting the invoice
/// number on `-`.
pub fn prepare_internal_rows(
    rows: &[IndexMap<String, String>],
    aliases: &[EntityAlias],
) -> Vec<ReconRecord> {
    let data_rows = match rows
        .iter()
        .position(|row| row.get("Nro").is_some_and(|v| v.contains("Registros:")))
    {
        Some(at) => &rows[..at],
        None => rows,
    };

    let records: Vec<ReconRecord> = data_rows
        .iter()
        .map(|row| {
            let get = |column: &str| row.get(column).map(String::as_str).unwrap_or("");

            let mut parts = get("Nro de Factura").splitn(2, '-');
            let venue = zero_pad(parts.next().unwrap_or(""), 5);
            let number = zero_pad(parts.next().unwrap_or(""), 8);

            let label = get("Etiquetas");
            let entity = aliases
                .iter()
                .find(|alias| alias.label == label)
                .map(|alias| alias.legal_name.clone())
                .unwrap_or_default();

            let amount = round_amount(get("Total Factura"));
            let date = parse_date(get("Fecha Vto."));
            let counterparty = get("Proveedor").to_string();

            let mut fields = row.clone();
            fields.insert("PV".to_string(), venue.clone());
            fields.insert("Num".to_string(), number.clone());
            fields.insert("Sociedades".to_string(), entity.clone());
            fields.insert("Monto".to_string(), amount.to_string());

            ReconRecord::new(venue, number, amount, entity, date, counterparty, fields)
        })
        .collect();

    debug!("prepared {} internal row(s)", records.len());
    records
}
