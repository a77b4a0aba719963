//! Three-tier reconciliation between the internal ledger and the
//! tax-authority ledger.
//!
//! Each row condenses into three composite keys of increasing
//! specificity: venue + number + amount, plus entity, plus date.
//! Diagnosis walks the opposing side's key sets from most to least
//! specific, so the first failing component names the discrepancy.

pub mod prepare;

use std::collections::HashSet;

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::info;

pub use prepare::{prepare_authority_rows, prepare_internal_rows};

/// Composite keys of one row. `key1` is a prefix of `key2`, `key2` of
/// `key3`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconKey {
    /// venue + number + rounded amount.
    pub key1: String,
    /// key1 + entity.
    pub key2: String,
    /// key2 + excel date serial ("" when the date is missing).
    pub key3: String,
}

impl ReconKey {
    /// Build the key triple from normalized components.
    pub fn new(venue: &str, number: &str, amount: i64, entity: &str, date_serial: &str) -> Self {
        let key1 = format!("{venue}{number}{amount}");
        let key2 = format!("{key1}{entity}");
        let key3 = format!("{key2}{date_serial}");
        Self { key1, key2, key3 }
    }
}

/// Which ledger a row came from. Decides the wording of the
/// missing-row diagnosis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The in-house bookkeeping ledger.
    Internal,
    /// The tax-authority ledger.
    Authority,
}

/// Reconciliation outcome of one row, most specific failure first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Diagnosis {
    /// Full key3 match on the opposing side.
    Matched,
    /// Not even key1 matched: the row is absent on the other side, or
    /// its amount or number differ.
    MissingOrAmountMismatch,
    /// key1 matched but the entity differs.
    EntityMismatch,
    /// key2 matched but the date differs.
    DateMismatch,
}

impl Diagnosis {
    /// Spanish display label as printed in the reports.
    pub fn label(&self, side: Side) -> &'static str {
        match (self, side) {
            (Diagnosis::Matched, _) => "OK - Matcheado",
            (Diagnosis::MissingOrAmountMismatch, Side::Internal) => {
                "Error: FC No existe o Monto/Número mal"
            }
            (Diagnosis::MissingOrAmountMismatch, Side::Authority) => {
                "Error: Falta cargar o Monto/Número de factura mal"
            }
            (Diagnosis::EntityMismatch, _) => "Error: Sociedad incorrecta",
            (Diagnosis::DateMismatch, _) => "Error: Fecha incorrecta",
        }
    }

    pub fn is_error(&self) -> bool {
        !matches!(self, Diagnosis::Matched)
    }
}

/// Counterparty-exclusion outcome, reported next to the diagnosis and
/// never replacing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterStatus {
    /// Counterparty is on the exclusion list.
    NotApplicable,
    /// Row participates normally.
    Valid,
}

impl FilterStatus {
    pub fn label(&self) -> &'static str {
        match self {
            FilterStatus::NotApplicable => "No corresponde",
            FilterStatus::Valid => "Válido",
        }
    }
}

/// One row prepared for reconciliation: normalized key components plus
/// the original columns, carried through for the reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconRecord {
    /// Point of sale, zero-padded to 5.
    pub venue: String,
    /// Invoice sequence number, zero-padded to 8.
    pub number: String,
    /// Amount rounded to whole currency units.
    pub amount: i64,
    /// Legal entity name.
    pub entity: String,
    /// Excel date serial, `""` when the date is missing.
    pub date_serial: String,
    /// Counterparty name, matched against the exclusion list.
    pub counterparty: String,
    /// Composite keys derived from the fields above.
    pub key: ReconKey,
    /// Source columns, passed through to the report.
    pub fields: IndexMap<String, String>,
}

impl ReconRecord {
    pub fn new(
        venue: impl Into<String>,
        number: impl Into<String>,
        amount: i64,
        entity: impl Into<String>,
        date: Option<NaiveDate>,
        counterparty: impl Into<String>,
        fields: IndexMap<String, String>,
    ) -> Self {
        let venue = venue.into();
        let number = number.into();
        let entity = entity.into();
        let date_serial = date.map(|d| excel_serial(d).to_string()).unwrap_or_default();
        let key = ReconKey::new(&venue, &number, amount, &entity, &date_serial);
        Self {
            venue,
            number,
            amount,
            entity,
            date_serial,
            counterparty: counterparty.into(),
            key,
            fields,
        }
    }
}

/// One diagnosed report row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnosed {
    pub record: ReconRecord,
    pub diagnosis: Diagnosis,
    /// Exclusion-filter status; reported for internal-side rows only.
    pub filter: Option<FilterStatus>,
}

/// Reconcile both ledgers against each other in one pass.
///
/// Every row on each side gets a diagnosis against the opposing key
/// sets; internal rows additionally get a filter status from
/// `excluded_counterparties`. An empty opposing side diagnoses every
/// row as missing, which is the expected answer, not a failure.
pub fn reconcile(
    internal: Vec<ReconRecord>,
    authority: Vec<ReconRecord>,
    excluded_counterparties: &[String],
) -> (Vec<Diagnosed>, Vec<Diagnosed>) {
    let excluded: HashSet<String> = excluded_counterparties
        .iter()
        .map(|name| name.trim().to_uppercase())
        .collect();

    let authority_keys = KeySets::collect(&authority);
    let internal_keys = KeySets::collect(&internal);

    let internal_result: Vec<Diagnosed> = internal
        .into_iter()
        .map(|record| {
            let diagnosis = authority_keys.diagnose(&record.key);
            let filter = if excluded.contains(&record.counterparty.trim().to_uppercase()) {
                FilterStatus::NotApplicable
            } else {
                FilterStatus::Valid
            };
            Diagnosed {
                record,
                diagnosis,
                filter: Some(filter),
            }
        })
        .collect();

    let authority_result: Vec<Diagnosed> = authority
        .into_iter()
        .map(|record| Diagnosed {
            diagnosis: internal_keys.diagnose(&record.key),
            record,
            filter: None,
        })
        .collect();

    info!(
        "reconciled {} internal vs {} authority row(s), {} / {} matched",
        internal_result.len(),
        authority_result.len(),
        internal_result.iter().filter(|d| !d.diagnosis.is_error()).count(),
        authority_result.iter().filter(|d| !d.diagnosis.is_error()).count(),
    );

    (internal_result, authority_result)
}

/// Per-tier key sets of one side.
struct KeySets {
    key1: HashSet<String>,
    key2: HashSet<String>,
    key3: HashSet<String>,
}

impl KeySets {
    fn collect(records: &[ReconRecord]) -> Self {
        Self {
            key1: records.iter().map(|r| r.key.key1.clone()).collect(),
            key2: records.iter().map(|r| r.key.key2.clone()).collect(),
            key3: records.iter().map(|r| r.key.key3.clone()).collect(),
        }
    }

    /// Most specific hit wins; the first missing tier names the error.
    fn diagnose(&self, key: &ReconKey) -> Diagnosis {
        if self.key3.contains(&key.key3) {
            Diagnosis::Matched
        } else if !self.key1.contains(&key.key1) {
            Diagnosis::MissingOrAmountMismatch
        } else if !self.key2.contains(&key.key2) {
            Diagnosis::EntityMismatch
        } else {
            Diagnosis::DateMismatch
        }
    }
}

/// Days since 1899-12-30, the spreadsheet epoch.
pub fn excel_serial(date: NaiveDate) -> i64 {
    let base = NaiveDate::from_ymd_opt(1899, 12, 30).expect("valid epoch");
    (date - base).num_days()
}

/// Parse the date formats the ledgers actually use.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    for format in ["%d/%m/%Y", "%Y-%m-%d", "%d-%m-%Y", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(date);
        }
    }
    None
}
