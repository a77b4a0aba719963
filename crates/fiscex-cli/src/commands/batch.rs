//! Batch command - provider invoices through the vision model.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

use fiscex_core::export::{batch_error_sheet, line_item_sheet, RowSink};
use fiscex_core::models::config::FiscexConfig;
use fiscex_core::provider::strategy_for;
use fiscex_core::{process_batch, ProcessedInvoice, Provider, SourceDocument};

use crate::client::VisionClient;
use crate::sink::CsvDirSink;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern of invoice files (PDF or images)
    #[arg(required = true)]
    pattern: String,

    /// Output directory
    #[arg(short, long, default_value = "salida")]
    output: PathBuf,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = if let Some(path) = config_path {
        FiscexConfig::from_file(std::path::Path::new(path))?
    } else {
        FiscexConfig::default()
    };

    let documents = collect_documents(&args.pattern)?;
    if documents.is_empty() {
        anyhow::bail!("No supported files match: {}", args.pattern);
    }

    let client = VisionClient::shared()?;

    println!(
        "{} Processing {} invoice(s), {} at a time",
        style("→").cyan(),
        documents.len(),
        config.batch.batch_size
    );

    let pb = ProgressBar::new(documents.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("##-"),
    );

    let mut results: Vec<ProcessedInvoice> = Vec::with_capacity(documents.len());
    for chunk in documents.chunks(config.batch.batch_size.max(1)) {
        let outcomes = process_batch(client, chunk, &config.batch).await;
        pb.inc(chunk.len() as u64);
        results.extend(outcomes);
    }
    pb.finish_with_message("Done");

    write_results(&results, &args.output)?;

    let failed = results.iter().filter(|r| r.error.is_some()).count();
    println!(
        "{} {} invoice(s) processed, {} failed",
        style("✓").green(),
        results.len() - failed,
        failed
    );
    println!(
        "{} Results written to {}",
        style("✓").green(),
        args.output.display()
    );

    Ok(())
}

/// Expand the glob and load every supported file.
fn collect_documents(pattern: &str) -> anyhow::Result<Vec<SourceDocument>> {
    let mut documents = Vec::new();

    for entry in glob::glob(pattern)? {
        let path = entry?;
        if !path.is_file() {
            continue;
        }

        let Some(media_type) = media_type(&path) else {
            warn!("skipping unsupported file: {}", path.display());
            continue;
        };

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("documento")
            .to_string();
        let data = fs::read(&path)?;
        documents.push(SourceDocument::new(name, media_type, data));
    }

    Ok(documents)
}

fn media_type(path: &std::path::Path) -> Option<&'static str> {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
        .as_str()
    {
        "pdf" => Some("application/pdf"),
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        _ => None,
    }
}

fn write_results(results: &[ProcessedInvoice], output: &std::path::Path) -> anyhow::Result<()> {
    let mut sink = CsvDirSink::new(output)?;

    for provider in [Provider::Cocacola, Provider::Quilmes, Provider::General] {
        let of_provider: Vec<ProcessedInvoice> = results
            .iter()
            .filter(|r| r.provider == provider && r.error.is_none())
            .cloned()
            .collect();
        if of_provider.is_empty() {
            continue;
        }

        let sheet = line_item_sheet(&of_provider, strategy_for(provider).item_keys);
        sink.write_sheet(
            &format!("items_{}", provider_slug(provider)),
            &sheet.headers,
            &sheet.rows,
        )?;
    }

    let errors = batch_error_sheet(results);
    if !errors.rows.is_empty() {
        sink.write_sheet("errores", &errors.headers, &errors.rows)?;
    }

    let json = serde_json::to_string_pretty(results)?;
    fs::write(output.join("resultados.json"), json)?;

    Ok(())
}

fn provider_slug(provider: Provider) -> &'static str {
    match provider {
        Provider::Cocacola => "cocacola",
        Provider::Quilmes => "quilmes",
        Provider::General => "general",
    }
}
