// In crates/core-types/src/lib.rs

pub mod error;
pub mod types;

// Re-export the most important types for easy access from other crates.
pub use error::{Error, Result};
pub use types::{
    AnalysisBatch, AnalysisTrade, NewTrade, TradeId, TradeInput, TradeRecord, UserId,
    MAX_BATCH_SIZE, MAX_PAIR_LEN,
};
