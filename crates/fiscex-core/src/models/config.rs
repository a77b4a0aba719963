//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};

/// Main configuration for the fiscex pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FiscexConfig {
    /// Settlement-statement extraction configuration.
    pub settlement: SettlementConfig,

    /// Provider-invoice batch configuration.
    pub batch: BatchConfig,

    /// Reconciliation configuration.
    pub reconcile: ReconcileConfig,
}

/// Positional offsets for the card-settlement template.
///
/// These are tuned to one fixed source template. Different acquirer
/// layouts need different offsets, which is why they live in config
/// rather than in the extraction code.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SettlementConfig {
    /// Lines below a header label where its value appears.
    pub header_offset: usize,

    /// Lines below a totals label where its value appears.
    pub totals_offset: usize,
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self {
            header_offset: 22,
            totals_offset: 29,
        }
    }
}

/// Provider-invoice batch dispatch configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Documents sent to the vision model concurrently. The remote
    /// service rate-limits, so batches run sequentially with this
    /// many concurrent calls each.
    pub batch_size: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self { batch_size: 3 }
    }
}

/// Reconciliation configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcileConfig {
    /// Counterparty names excluded from the reconciliation report.
    /// Compared case-insensitively after whitespace trimming.
    pub excluded_counterparties: Vec<String>,

    /// Internal-ledger label to legal-name aliases (Etiqueta ->
    /// Razón Social).
    pub entity_aliases: Vec<EntityAlias>,
}

/// One label-to-legal-name alias for the internal ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityAlias {
    pub label: String,
    pub legal_name: String,
}

impl FiscexConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FiscexConfig::default();
        assert_eq!(config.settlement.header_offset, 22);
        assert_eq!(config.settlement.totals_offset, 29);
        assert_eq!(config.batch.batch_size, 3);
        assert!(config.reconcile.excluded_counterparties.is_empty());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: FiscexConfig =
            serde_json::from_str(r#"{"batch": {"batch_size": 5}}"#).unwrap();
        assert_eq!(config.batch.batch_size, 5);
        assert_eq!(config.settlement.header_offset, 22);
    }
}
