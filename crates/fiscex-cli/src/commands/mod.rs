//! Command implementations.

pub mod batch;
pub mod consolidate;
pub mod process;
pub mod reconcile;

use std::fs;
use std::path::Path;

use anyhow::Context;
use indexmap::IndexMap;

/// Read a delimited file into header-keyed rows.
///
/// The exports in the field come both comma- and semicolon-delimited;
/// the delimiter is sniffed from the header line.
pub(crate) fn read_rows(path: &Path) -> anyhow::Result<Vec<IndexMap<String, String>>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;

    let delimiter = sniff_delimiter(&content);
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .with_context(|| format!("reading header of {}", path.display()))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let mut row = IndexMap::with_capacity(headers.len());
        for (i, header) in headers.iter().enumerate() {
            row.insert(
                header.clone(),
                record.get(i).unwrap_or("").trim().to_string(),
            );
        }
        rows.push(row);
    }

    Ok(rows)
}

fn sniff_delimiter(content: &str) -> u8 {
    let header = content.lines().next().unwrap_or("");
    if header.matches(';').count() > header.matches(',').count() {
        b';'
    } else {
        b','
    }
}
