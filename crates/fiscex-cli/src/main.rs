//! CLI application for fiscal-document extraction and reconciliation.

mod client;
mod commands;
mod sink;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{batch, consolidate, process, reconcile};

/// Fiscal document pipeline - extraction, consolidation and
/// reconciliation for Argentine fiscal documents
#[derive(Parser)]
#[command(name = "fiscex")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract fields from a single document text file
    Process(process::ProcessArgs),

    /// Extract line items from provider invoices via the vision model
    Batch(batch::BatchArgs),

    /// Consolidate tax-authority ledger CSV exports
    Consolidate(consolidate::ConsolidateArgs),

    /// Reconcile the internal ledger against the authority ledger
    Reconcile(reconcile::ReconcileArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Process(args) => process::run(args, cli.config.as_deref()).await,
        Commands::Batch(args) => batch::run(args, cli.config.as_deref()).await,
        Commands::Consolidate(args) => consolidate::run(args).await,
        Commands::Reconcile(args) => reconcile::run(args, cli.config.as_deref()).await,
    }
}
