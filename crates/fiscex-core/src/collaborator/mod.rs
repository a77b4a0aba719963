//! Vision-model collaborator boundary.
//!
//! Provider invoices are scanned tables the regex strategies cannot
//! read, so their line items come from a remote vision model. The
//! model is behind the [`VisionModel`] trait; everything downstream of
//! the raw reply string (fence stripping, JSON reshaping, schema
//! coercion) lives on this side of the boundary and is deterministic.

pub mod batch;

use std::future::Future;

use crate::error::CollaboratorError;

pub use batch::process_batch;

/// One input document as handed to the model.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    /// Original filename, used for provider hints and reporting.
    pub name: String,

    /// MIME type of the payload (`application/pdf`, `image/png`, ...).
    pub media_type: String,

    /// Raw document bytes.
    pub data: Vec<u8>,
}

impl SourceDocument {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            data,
        }
    }
}

/// Remote vision model.
///
/// Implementations call out over the network; replies are returned as
/// raw strings and never interpreted here. Both calls are fallible and
/// failures are isolated per document by the batch engine.
pub trait VisionModel {
    /// Plain-text rendition of the document, for provider
    /// classification.
    fn extract_text(
        &self,
        document: &SourceDocument,
    ) -> impl Future<Output = Result<String, CollaboratorError>> + Send;

    /// Run an extraction instruction against the document and return
    /// the model's raw reply.
    fn analyze(
        &self,
        document: &SourceDocument,
        instruction: &str,
    ) -> impl Future<Output = Result<String, CollaboratorError>> + Send;
}
