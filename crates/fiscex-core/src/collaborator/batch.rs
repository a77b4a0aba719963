//! Bounded-concurrency batch dispatch to the vision model.
//!
//! The remote service rate-limits, so documents run in sequential
//! batches of `batch_size`, concurrent within each batch. Output order
//! matches input order and one failing document never aborts the run.

use futures_util::future::join_all;
use tracing::{info, warn};

use crate::models::config::BatchConfig;
use crate::models::record::ProcessedInvoice;
use crate::provider::{classify, classify_by_name, reshape_reply, strategy_for};

use super::{SourceDocument, VisionModel};

/// Process a set of provider invoices through the vision model.
///
/// Each document is classified from its extracted text, analyzed with
/// its provider's instruction, and the reply reshaped onto the
/// provider schema. Every input yields exactly one result, failures
/// included.
pub async fn process_batch<M: VisionModel + Sync>(
    model: &M,
    documents: &[SourceDocument],
    config: &BatchConfig,
) -> Vec<ProcessedInvoice> {
    let batch_size = config.batch_size.max(1);
    let mut results = Vec::with_capacity(documents.len());

    for (i, batch) in documents.chunks(batch_size).enumerate() {
        info!(
            "batch {}/{}: {} document(s)",
            i + 1,
            documents.len().div_ceil(batch_size),
            batch.len()
        );
        let outcomes = join_all(batch.iter().map(|doc| process_one(model, doc))).await;
        results.extend(outcomes);
    }

    results
}

async fn process_one<M: VisionModel + Sync>(
    model: &M,
    document: &SourceDocument,
) -> ProcessedInvoice {
    let text = match model.extract_text(document).await {
        Ok(text) => text,
        Err(e) => {
            warn!("{}: text extraction failed: {e}", document.name);
            return ProcessedInvoice::failed(
                &document.name,
                classify_by_name(&document.name),
                e.to_string(),
            );
        }
    };

    let provider = classify(&text);
    let strategy = strategy_for(provider);

    let reply = match model.analyze(document, strategy.instruction).await {
        Ok(reply) => reply,
        Err(e) => {
            warn!("{}: analysis failed: {e}", document.name);
            return ProcessedInvoice::failed(&document.name, provider, e.to_string());
        }
    };

    match reshape_reply(&reply, &strategy) {
        Ok(reshaped) => ProcessedInvoice {
            file_name: document.name.clone(),
            provider,
            invoice_number: reshaped.invoice_number,
            invoice_total: reshaped.invoice_total,
            items: reshaped.items,
            error: None,
        },
        Err(e) => {
            warn!("{}: unusable reply: {e}", document.name);
            ProcessedInvoice::failed(&document.name, provider, e.to_string())
        }
    }
}
