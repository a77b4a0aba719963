//! Process command - extract fields from a single document text file.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use fiscex_core::export::document_sheet;
use fiscex_core::extract;
use fiscex_core::models::config::FiscexConfig;
use fiscex_core::{DocumentClass, DocumentRecord};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (extracted document text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = if let Some(path) = config_path {
        FiscexConfig::from_file(std::path::Path::new(path))?
    } else {
        FiscexConfig::default()
    };

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());
    let text = fs::read_to_string(&args.input)?;
    let source_name = args
        .input
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("documento")
        .to_string();

    let class = DocumentClass::detect(&text);
    let record = extract::extract(class, &text, &source_name, &config.settlement);

    let output = format_record(&record, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{output}");
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn format_record(record: &DocumentRecord, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Csv => {
            let sheet = document_sheet(std::slice::from_ref(record));
            let mut writer = csv::Writer::from_writer(Vec::new());
            writer.write_record(&sheet.headers)?;
            for row in &sheet.rows {
                writer.write_record(row)?;
            }
            Ok(String::from_utf8(writer.into_inner()?)?)
        }
        OutputFormat::Text => {
            let mut out = String::new();
            out.push_str(&format!(
                "{} ({:?})\n",
                style(&record.source_name).bold(),
                record.class
            ));
            for (field, value) in &record.fields {
                out.push_str(&format!("  {field}: {value}\n"));
            }
            Ok(out)
        }
    }
}
