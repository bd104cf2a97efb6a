// In crates/api-client/src/lib.rs

use app_config::types::GatewaySettings;
use async_trait::async_trait;
use core_types::AnalysisBatch;
use reqwest::StatusCode;

pub mod error;
pub mod prompt;
pub mod types;

// Re-export public types
pub use error::{Error, Result};
pub use types::*;

/// A capability that turns a validated batch of trades into feedback text.
///
/// Implemented by [`GatewayClient`] for the real endpoint and by fakes in tests.
#[async_trait]
pub trait FeedbackGateway: Send + Sync {
    /// Requests feedback for the batch. No retries are attempted.
    async fn request_feedback(&self, batch: &AnalysisBatch) -> Result<String>;
}

/// Client for an OpenAI-compatible chat completion endpoint.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    http_client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GatewayClient {
    /// Constructs a new client from `GatewaySettings`.
    ///
    /// Fails with `app_config::Error::MissingCredential` when no API key is configured;
    /// callers treat that as a startup fault, not a per-request error.
    pub fn new(settings: &GatewaySettings) -> std::result::Result<Self, app_config::Error> {
        let api_key = settings.api_key()?.to_string();
        Ok(Self {
            http_client: reqwest::Client::new(),
            api_key,
            model: settings.model.clone(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl FeedbackGateway for GatewayClient {
    async fn request_feedback(&self, batch: &AnalysisBatch) -> Result<String> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: prompt::build_messages(batch),
        };

        tracing::info!(trades = batch.len(), model = %self.model, "Requesting trade feedback");

        let response = self
            .http_client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(Error::RequestFailed)?;

        let status = response.status();
        let text = response.text().await.map_err(Error::RequestFailed)?;
        check_status(status, text.as_str())?;

        let body: ChatCompletionResponse =
            serde_json::from_str(&text).map_err(Error::DeserializationFailed)?;
        body.into_first_text().ok_or(Error::MissingCompletion)
    }
}

/// Maps an upstream status onto the error taxonomy.
///
/// 429 and 402 get their own variants; any other non-success carries the raw body,
/// which must only ever be logged server-side.
pub fn check_status(status: StatusCode, body: &str) -> Result<()> {
    if status.is_success() {
        return Ok(());
    }
    match status {
        StatusCode::TOO_MANY_REQUESTS => Err(Error::RateLimited),
        StatusCode::PAYMENT_REQUIRED => Err(Error::QuotaExhausted),
        other => Err(Error::UpstreamStatus {
            status: other.as_u16(),
            body: body.to_string(),
        }),
    }
}

// Free function to allow api_client::new usage
pub fn new(settings: &GatewaySettings) -> std::result::Result<GatewayClient, app_config::Error> {
    GatewayClient::new(settings)
}
