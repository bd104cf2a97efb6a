// In crates/web-server/src/types.rs

use core_types::TradeInput;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// The `?user_id=...` query for listing trades.
#[derive(Debug, Deserialize)]
pub struct ListTradesParams {
    pub user_id: Uuid,
}

/// Body of `POST /api/trades`: the owning user plus the raw form fields.
#[derive(Debug, Deserialize)]
pub struct CreateTradeRequest {
    pub user_id: Uuid,
    #[serde(flatten)]
    pub input: TradeInput,
}
