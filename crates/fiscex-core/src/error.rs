//! Error types for the fiscex-core library.
//!
//! Field extraction is deliberately absent here: strategies are
//! best-effort and resolve misses to documented defaults instead of
//! failing.

use thiserror::Error;

/// Main error type for the fiscex library.
#[derive(Error, Debug)]
pub enum FiscexError {
    /// Ledger consolidation error.
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    /// Vision-model collaborator error.
    #[error("collaborator error: {0}")]
    Collaborator(#[from] CollaboratorError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to ledger CSV consolidation.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// The CSV file could not be parsed.
    #[error("failed to parse {file}: {reason}")]
    Parse { file: String, reason: String },
}

/// Errors raised at the vision-model collaborator boundary.
#[derive(Error, Debug)]
pub enum CollaboratorError {
    /// The remote call failed.
    #[error("model call failed: {0}")]
    Call(String),

    /// The model reply was not valid JSON after fence stripping.
    #[error("model reply is not valid JSON: {0}")]
    BadReply(String),

    /// Required credentials are not configured.
    #[error("credentials not configured: set {0}")]
    Credentials(String),
}

/// Result type for the fiscex library.
pub type Result<T> = std::result::Result<T, FiscexError>;
