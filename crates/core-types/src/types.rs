// In crates/core-types/src/types.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::{Error, Result};

/// The maximum number of trades that can be submitted in one analysis request.
pub const MAX_BATCH_SIZE: usize = 10;

/// The maximum length (in characters) of a crypto pair symbol like `BTC/USDT`.
pub const MAX_PAIR_LEN: usize = 20;

/// Identifies the user that owns a trade record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub Uuid);

/// A store-assigned trade identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TradeId(pub Uuid);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Display for TradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The raw fields of a trade as entered by the trader.
///
/// `position_size` is only needed to derive the risk figures; it is never persisted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TradeInput {
    pub crypto_pair: String,
    pub entry_price: f64,
    pub stop_loss: f64,
    pub position_size: f64,
    pub account_size: f64,
}

/// A validated trade ready to be handed to the trade store.
///
/// Built by `risk::prepare_trade`, which derives `risk_percent` from the input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTrade {
    pub user_id: UserId,
    pub crypto_pair: String,
    pub entry_price: f64,
    pub stop_loss: f64,
    pub account_size: f64,
    pub risk_percent: f64,
}

/// A trade as stored by the trade store. Records are never updated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub id: TradeId,
    pub user_id: UserId,
    pub crypto_pair: String,
    pub entry_price: f64,
    pub stop_loss: f64,
    pub account_size: f64,
    pub risk_percent: f64,
    pub created_at: DateTime<Utc>,
}

/// The subset of trade fields sent for AI analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisTrade {
    pub crypto_pair: String,
    pub entry_price: f64,
    pub stop_loss: f64,
    pub risk_percent: f64,
}

impl From<&TradeRecord> for AnalysisTrade {
    fn from(record: &TradeRecord) -> Self {
        Self {
            crypto_pair: record.crypto_pair.clone(),
            entry_price: record.entry_price,
            stop_loss: record.stop_loss,
            risk_percent: record.risk_percent,
        }
    }
}

/// An ordered batch of 1 to `MAX_BATCH_SIZE` trades.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AnalysisBatch(Vec<AnalysisTrade>);

impl AnalysisBatch {
    /// Wraps the trades, rejecting empty or oversized batches.
    pub fn new(trades: Vec<AnalysisTrade>) -> Result<Self> {
        if trades.is_empty() || trades.len() > MAX_BATCH_SIZE {
            return Err(Error::BatchSize { len: trades.len(), max: MAX_BATCH_SIZE });
        }
        Ok(Self(trades))
    }

    pub fn trades(&self) -> &[AnalysisTrade] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
