//! Ledger row models for tax-authority CSV exports.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Whether a ledger file holds issued or received invoices, derived
/// from a filename token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementClass {
    /// Issued invoices ("emitido" files).
    Issued,
    /// Received invoices ("recibido" files).
    Received,
    /// Filename carried neither token.
    Unknown,
}

impl MovementClass {
    /// Detect the movement from a filename.
    pub fn from_filename(name: &str) -> Self {
        let lower = name.to_lowercase();
        if lower.contains("emitido") {
            MovementClass::Issued
        } else if lower.contains("recibido") {
            MovementClass::Received
        } else {
            MovementClass::Unknown
        }
    }

    /// Inverse of [`tag`](Self::tag), for re-reading consolidated
    /// output.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "MCE" => MovementClass::Issued,
            "MCR" => MovementClass::Received,
            _ => MovementClass::Unknown,
        }
    }

    /// Short tag used in the consolidated output ("MC" column).
    pub fn tag(&self) -> &'static str {
        match self {
            MovementClass::Issued => "MCE",
            MovementClass::Received => "MCR",
            MovementClass::Unknown => "DESCONOCIDO",
        }
    }

    /// Origin label used by the raw consolidation mode.
    pub fn origin_label(&self) -> &'static str {
        match self {
            MovementClass::Issued => "Emitidos",
            MovementClass::Received => "Recibidos",
            MovementClass::Unknown => "Desconocido",
        }
    }
}

/// An in-memory ledger CSV, already materialized by the caller.
#[derive(Debug, Clone)]
pub struct LedgerFile {
    /// Original filename, used for movement and entity derivation.
    pub name: String,
    /// Raw file content. Windows and mixed line endings are tolerated.
    pub content: String,
}

/// One row from a consolidated ledger export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerRow {
    /// Movement derived from the source filename.
    pub movement: MovementClass,

    /// Counterparty name derived from the source filename.
    pub entity: String,

    /// Standardized column name to raw value. Canonical columns come
    /// first in canonical order; extra source columns follow under
    /// their original names.
    pub fields: IndexMap<String, String>,
}

impl LedgerRow {
    /// Field value, or `""` for unknown columns.
    pub fn get(&self, column: &str) -> &str {
        self.fields.get(column).map(String::as_str).unwrap_or("")
    }
}
