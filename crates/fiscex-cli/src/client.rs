//! HTTP client for the vision-model service.

use std::sync::OnceLock;

use base64::Engine;
use fiscex_core::error::CollaboratorError;
use fiscex_core::{SourceDocument, VisionModel};
use serde::{Deserialize, Serialize};
use tracing::debug;

const ENDPOINT_VAR: &str = "FISCEX_VISION_ENDPOINT";
const API_KEY_VAR: &str = "FISCEX_VISION_API_KEY";

static SHARED: OnceLock<VisionClient> = OnceLock::new();

/// Thin wrapper over the vision service HTTP API.
pub struct VisionClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    name: &'a str,
    media_type: &'a str,
    /// Document bytes, base64-encoded.
    data: String,
    /// Extraction instruction; empty for plain text extraction.
    instruction: &'a str,
}

#[derive(Deserialize)]
struct AnalyzeResponse {
    reply: String,
}

impl VisionClient {
    /// Build a client from the environment. Missing credentials are a
    /// configuration error, raised before any document is touched.
    pub fn from_env() -> Result<Self, CollaboratorError> {
        let endpoint = std::env::var(ENDPOINT_VAR)
            .map_err(|_| CollaboratorError::Credentials(ENDPOINT_VAR.to_string()))?;
        let api_key = std::env::var(API_KEY_VAR)
            .map_err(|_| CollaboratorError::Credentials(API_KEY_VAR.to_string()))?;

        Ok(Self {
            http: reqwest::Client::new(),
            endpoint,
            api_key,
        })
    }

    /// Process-lifetime shared client, built on first use.
    pub fn shared() -> Result<&'static VisionClient, CollaboratorError> {
        if let Some(client) = SHARED.get() {
            return Ok(client);
        }
        let client = VisionClient::from_env()?;
        Ok(SHARED.get_or_init(|| client))
    }

    async fn call(
        &self,
        document: &SourceDocument,
        instruction: &str,
    ) -> Result<String, CollaboratorError> {
        debug!("calling vision service for {}", document.name);

        let request = AnalyzeRequest {
            name: &document.name,
            media_type: &document.media_type,
            data: base64::engine::general_purpose::STANDARD.encode(&document.data),
            instruction,
        };

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| CollaboratorError::Call(e.to_string()))?;

        let response = response
            .error_for_status()
            .map_err(|e| CollaboratorError::Call(e.to_string()))?;

        let body: AnalyzeResponse = response
            .json()
            .await
            .map_err(|e| CollaboratorError::BadReply(e.to_string()))?;

        Ok(body.reply)
    }
}

impl VisionModel for VisionClient {
    async fn extract_text(
        &self,
        document: &SourceDocument,
    ) -> Result<String, CollaboratorError> {
        self.call(document, "").await
    }

    async fn analyze(
        &self,
        document: &SourceDocument,
        instruction: &str,
    ) -> Result<String, CollaboratorError> {
        self.call(document, instruction).await
    }
}
