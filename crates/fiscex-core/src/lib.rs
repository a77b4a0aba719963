//! Core library for fiscal-document extraction and reconciliation.
//!
//! This crate provides:
//! - Field extraction for Argentine fiscal documents (invoices, card
//!   settlements, VAT declarations)
//! - Provider-invoice line-item extraction through a vision-model
//!   collaborator with bounded-concurrency batching
//! - Consolidation of tax-authority ledger CSV exports
//! - Three-tier composite-key reconciliation between the internal and
//!   authority ledgers

pub mod collaborator;
pub mod error;
pub mod export;
pub mod extract;
pub mod ledger;
pub mod models;
pub mod provider;
pub mod reconcile;
pub mod text;

pub use collaborator::{process_batch, SourceDocument, VisionModel};
pub use error::{FiscexError, Result};
pub use models::config::FiscexConfig;
pub use models::ledger::{LedgerFile, LedgerRow, MovementClass};
pub use models::record::{DocumentClass, DocumentRecord, LineItem, ProcessedInvoice};
pub use provider::{classify, strategy_for, Provider, Strategy};
pub use reconcile::{reconcile, Diagnosed, Diagnosis, FilterStatus, ReconRecord, Side};
