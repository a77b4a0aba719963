//! Reconcile command - internal ledger against the consolidated
//! authority ledger.

use std::path::PathBuf;

use clap::Args;
use console::style;
use indexmap::IndexMap;
use tracing::info;

use fiscex_core::export::{error_report, reconciliation_sheet, RowSink};
use fiscex_core::models::config::FiscexConfig;
use fiscex_core::reconcile::{prepare_authority_rows, prepare_internal_rows, reconcile, Side};
use fiscex_core::{Diagnosed, LedgerRow, MovementClass};

use super::read_rows;
use crate::sink::CsvDirSink;

/// Arguments for the reconcile command.
#[derive(Args)]
pub struct ReconcileArgs {
    /// Internal ledger CSV export
    #[arg(long)]
    internal: PathBuf,

    /// Consolidated authority ledger CSV
    #[arg(long)]
    authority: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = "salida")]
    output: PathBuf,
}

pub async fn run(args: ReconcileArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = if let Some(path) = config_path {
        FiscexConfig::from_file(std::path::Path::new(path))?
    } else {
        FiscexConfig::default()
    };

    let internal_rows = read_rows(&args.internal)?;
    let authority_rows = read_rows(&args.authority)?;
    info!(
        "read {} internal and {} authority row(s)",
        internal_rows.len(),
        authority_rows.len()
    );

    let internal = prepare_internal_rows(&internal_rows, &config.reconcile.entity_aliases);
    let authority = prepare_authority_rows(&to_ledger_rows(authority_rows));

    let (internal_result, authority_result) = reconcile(
        internal,
        authority,
        &config.reconcile.excluded_counterparties,
    );

    let mut sink = CsvDirSink::new(&args.output)?;

    let sheet = reconciliation_sheet(&internal_result, Side::Internal);
    sink.write_sheet("conciliacion_interna", &sheet.headers, &sheet.rows)?;

    let sheet = reconciliation_sheet(&authority_result, Side::Authority);
    sink.write_sheet("conciliacion_autoridad", &sheet.headers, &sheet.rows)?;

    let errors = error_report(&authority_result, Side::Authority);
    sink.write_sheet("errores_autoridad", &errors.headers, &errors.rows)?;

    print_summary("interna", &internal_result);
    print_summary("autoridad", &authority_result);
    println!(
        "{} Reports written to {}",
        style("✓").green(),
        args.output.display()
    );

    Ok(())
}

/// Rebuild ledger rows from a consolidated CSV: the `MC` and
/// `Contribuyente` columns carry the movement and entity.
fn to_ledger_rows(rows: Vec<IndexMap<String, String>>) -> Vec<LedgerRow> {
    rows.into_iter()
        .map(|mut fields| {
            let movement = MovementClass::from_tag(
                fields.shift_remove("MC").unwrap_or_default().as_str(),
            );
            let entity = fields.shift_remove("Contribuyente").unwrap_or_default();
            LedgerRow {
                movement,
                entity,
                fields,
            }
        })
        .collect()
}

fn print_summary(label: &str, diagnosed: &[Diagnosed]) {
    let errors = diagnosed.iter().filter(|d| d.diagnosis.is_error()).count();
    let glyph = if errors == 0 {
        style("✓").green()
    } else {
        style("!").yellow()
    };
    println!(
        "{} Conciliación {}: {} fila(s), {} con diferencias",
        glyph,
        label,
        diagnosed.len(),
        errors
    );
}
