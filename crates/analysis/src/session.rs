// In crates/analysis/src/session.rs

use std::sync::Arc;

use core_types::{AnalysisTrade, TradeRecord};
use serde_json::json;

use crate::service::{AnalysisEndpoint, ReplyBody};
use crate::throttle::{ThrottleDecision, ThrottleState};

/// How many of the most recent trades are sent for analysis.
pub const RECENT_TRADE_WINDOW: usize = 5;

/// What the trader sees after asking for feedback.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    /// Nothing to analyze yet.
    NoTrades,
    /// Asked again too soon.
    Throttled { retry_after_secs: u64 },
    Feedback(String),
    Failed { status: u16, message: String },
}

/// A trader's session with the analysis endpoint.
///
/// Owns its own throttle; sessions never share cooldown state.
pub struct AnalysisSession {
    endpoint: Arc<dyn AnalysisEndpoint>,
    throttle: ThrottleState,
}

impl AnalysisSession {
    pub fn new(endpoint: Arc<dyn AnalysisEndpoint>) -> Self {
        Self { endpoint, throttle: ThrottleState::new() }
    }

    pub fn throttle(&self) -> &ThrottleState {
        &self.throttle
    }

    /// Requests feedback on the most recent trades.
    ///
    /// `trades` is expected newest first, as the trade store lists them. The throttle
    /// is stamped before the endpoint is called, so a failed call still consumes the
    /// cooldown window.
    pub async fn request_feedback(&mut self, trades: &[TradeRecord], now_ms: i64) -> SessionOutcome {
        if trades.is_empty() {
            return SessionOutcome::NoTrades;
        }

        if let ThrottleDecision::Denied { retry_after_secs } = self.throttle.try_acquire(now_ms) {
            tracing::info!(retry_after_secs, "Analysis request throttled");
            return SessionOutcome::Throttled { retry_after_secs };
        }

        let recent: Vec<AnalysisTrade> = trades
            .iter()
            .take(RECENT_TRADE_WINDOW)
            .map(AnalysisTrade::from)
            .collect();

        let reply = self.endpoint.invoke(json!({ "trades": recent })).await;
        match reply.body {
            ReplyBody::Feedback { feedback } => SessionOutcome::Feedback(feedback),
            ReplyBody::Error { error } => SessionOutcome::Failed { status: reply.status, message: error },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::AnalysisReply;
    use async_trait::async_trait;
    use chrono::Utc;
    use core_types::{TradeId, UserId};
    use serde_json::Value;
    use std::sync::Mutex;
    use uuid::Uuid;

    #[derive(Default)]
    struct RecordingEndpoint {
        bodies: Mutex<Vec<Value>>,
        fail: bool,
    }

    #[async_trait]
    impl AnalysisEndpoint for RecordingEndpoint {
        async fn invoke(&self, body: Value) -> AnalysisReply {
            self.bodies.lock().unwrap().push(body);
            if self.fail {
                AnalysisReply::error(429, "Rate limit exceeded. Please try again later.")
            } else {
                AnalysisReply::feedback("ok".to_string())
            }
        }
    }

    fn record(pair: &str) -> TradeRecord {
        TradeRecord {
            id: TradeId(Uuid::new_v4()),
            user_id: UserId(Uuid::new_v4()),
            crypto_pair: pair.to_string(),
            entry_price: 100.0,
            stop_loss: 95.0,
            account_size: 1_000.0,
            risk_percent: 1.0,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn no_trades_is_guidance_and_leaves_throttle_alone() {
        let endpoint = Arc::new(RecordingEndpoint::default());
        let mut session = AnalysisSession::new(endpoint.clone());
        assert_eq!(session.request_feedback(&[], 0).await, SessionOutcome::NoTrades);
        assert!(session.throttle().last_invocation_ms().is_none());
        assert!(endpoint.bodies.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn sends_only_the_most_recent_five() {
        let endpoint = Arc::new(RecordingEndpoint::default());
        let mut session = AnalysisSession::new(endpoint.clone());
        let trades: Vec<_> = (0..7).map(|i| record(&format!("PAIR{}", i))).collect();

        assert_eq!(session.request_feedback(&trades, 1_000).await, SessionOutcome::Feedback("ok".to_string()));

        let bodies = endpoint.bodies.lock().unwrap();
        let sent = bodies[0]["trades"].as_array().unwrap();
        assert_eq!(sent.len(), RECENT_TRADE_WINDOW);
        assert_eq!(sent[0]["crypto_pair"], "PAIR0");
        assert_eq!(sent[4]["crypto_pair"], "PAIR4");
        assert!(sent[0].get("account_size").is_none());
    }

    #[tokio::test]
    async fn failed_call_still_consumes_the_cooldown() {
        let endpoint = Arc::new(RecordingEndpoint { fail: true, ..Default::default() });
        let mut session = AnalysisSession::new(endpoint.clone());
        let trades = vec![record("BTC/USDT")];

        assert_eq!(
            session.request_feedback(&trades, 0).await,
            SessionOutcome::Failed {
                status: 429,
                message: "Rate limit exceeded. Please try again later.".to_string()
            }
        );
        assert_eq!(
            session.request_feedback(&trades, 5_000).await,
            SessionOutcome::Throttled { retry_after_secs: 25 }
        );
        assert_eq!(endpoint.bodies.lock().unwrap().len(), 1);
    }
}
