// In crates/analysis/src/service.rs

use std::sync::Arc;

use api_client::FeedbackGateway;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::validator::validate;
use crate::{Error, Result};

/// Body of an analysis reply: `{ "feedback": ... }` or `{ "error": ... }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReplyBody {
    Feedback { feedback: String },
    Error { error: String },
}

/// A fully shaped reply, ready for the transport layer.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReply {
    pub status: u16,
    pub body: ReplyBody,
}

impl AnalysisReply {
    pub fn feedback(feedback: String) -> Self {
        Self { status: 200, body: ReplyBody::Feedback { feedback } }
    }

    pub fn error(status: u16, message: impl Into<String>) -> Self {
        Self { status, body: ReplyBody::Error { error: message.into() } }
    }

    /// Reply used for every request while the gateway credential is missing.
    pub fn not_configured() -> Self {
        Self::error(500, "Analysis service is not configured")
    }
}

impl From<Error> for AnalysisReply {
    fn from(err: Error) -> Self {
        Self::error(err.status_code(), err.user_message())
    }
}

/// The boundary a client talks to when it wants feedback on a batch of trades.
#[async_trait]
pub trait AnalysisEndpoint: Send + Sync {
    async fn invoke(&self, body: Value) -> AnalysisReply;
}

/// Validates an inbound batch and forwards it to the feedback gateway.
#[derive(Clone)]
pub struct AnalysisService {
    gateway: Arc<dyn FeedbackGateway>,
}

impl AnalysisService {
    pub fn new(gateway: Arc<dyn FeedbackGateway>) -> Self {
        Self { gateway }
    }

    /// Validation completes before any upstream call is made.
    pub async fn analyze(&self, body: &Value) -> Result<String> {
        let batch = validate(body)?;
        let feedback = self.gateway.request_feedback(&batch).await?;
        Ok(feedback)
    }

    /// Runs [`analyze`](Self::analyze) and always shapes the outcome into a reply.
    pub async fn handle(&self, body: &Value) -> AnalysisReply {
        match self.analyze(body).await {
            Ok(feedback) => AnalysisReply::feedback(feedback),
            Err(err) => {
                match &err {
                    Error::Validation(e) => tracing::warn!(error = %e, "Rejected analysis request"),
                    Error::Gateway(api_client::Error::UpstreamStatus { status, body }) => {
                        tracing::error!(status, body = %body, "AI gateway error")
                    }
                    Error::Gateway(e) => tracing::error!(error = %e, "AI gateway call failed"),
                }
                AnalysisReply::from(err)
            }
        }
    }
}

#[async_trait]
impl AnalysisEndpoint for AnalysisService {
    async fn invoke(&self, body: Value) -> AnalysisReply {
        self.handle(&body).await
    }
}
