//! Consolidate command - tax-authority ledger CSV exports into one
//! standardized table.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use fiscex_core::export::{ledger_sheet, RowSink};
use fiscex_core::ledger;
use fiscex_core::LedgerFile;

use crate::sink::CsvDirSink;

/// Arguments for the consolidate command.
#[derive(Args)]
pub struct ConsolidateArgs {
    /// Glob pattern of ledger CSV exports
    #[arg(required = true)]
    pattern: String,

    /// Output directory
    #[arg(short, long, default_value = "salida")]
    output: PathBuf,

    /// Keep all source columns and tag rows with their origin instead
    /// of standardizing
    #[arg(long)]
    raw: bool,
}

pub async fn run(args: ConsolidateArgs) -> anyhow::Result<()> {
    let files = collect_files(&args.pattern)?;
    if files.is_empty() {
        anyhow::bail!("No CSV files match: {}", args.pattern);
    }
    info!("consolidating {} file(s)", files.len());

    let (rows, sheet_name) = if args.raw {
        (ledger::consolidate_raw(&files), "comprobantes_crudo")
    } else {
        (ledger::consolidate(&files), "comprobantes_consolidado")
    };

    if rows.is_empty() {
        anyhow::bail!("No rows found in the matched files");
    }

    let sheet = ledger_sheet(&rows);
    let mut sink = CsvDirSink::new(&args.output)?;
    sink.write_sheet(sheet_name, &sheet.headers, &sheet.rows)?;

    println!(
        "{} {} row(s) from {} file(s) written to {}",
        style("✓").green(),
        sheet.rows.len(),
        files.len(),
        sink.path_for(sheet_name).display()
    );

    Ok(())
}

fn collect_files(pattern: &str) -> anyhow::Result<Vec<LedgerFile>> {
    let mut files = Vec::new();

    for entry in glob::glob(pattern)? {
        let path = entry?;
        if !path.is_file() {
            continue;
        }
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("")
            .to_string();
        if !name.to_lowercase().ends_with(".csv") {
            continue;
        }
        files.push(LedgerFile {
            name,
            content: fs::read_to_string(&path)?,
        });
    }

    Ok(files)
}
