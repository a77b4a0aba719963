//! Data models for extracted documents, ledgers, and configuration.

pub mod config;
pub mod ledger;
pub mod record;

pub use config::FiscexConfig;
pub use ledger::{LedgerFile, LedgerRow, MovementClass};
pub use record::{DocumentClass, DocumentRecord, LineItem, ProcessedInvoice};
