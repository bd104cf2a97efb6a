// In crates/analysis/src/error.rs

use thiserror::Error;

/// Why an inbound analysis request was rejected. Positions are 1-based.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid request: trades array is required")]
    MalformedRequest,

    #[error("At least one trade is required")]
    EmptyBatch,

    #[error("Maximum 10 trades allowed per analysis")]
    BatchTooLarge,

    #[error("Invalid trade at position {0}")]
    InvalidElement(usize),

    #[error("Invalid crypto_pair at trade {0}")]
    InvalidPair(usize),

    #[error("Invalid entry_price at trade {0}")]
    InvalidEntryPrice(usize),

    #[error("Invalid stop_loss at trade {0}")]
    InvalidStopLoss(usize),

    #[error("Invalid risk_percent at trade {0}")]
    InvalidRiskPercent(usize),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Gateway error: {0}")]
    Gateway(#[from] api_client::Error),
}

impl Error {
    /// The HTTP status this error is reported with.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Validation(_) => 400,
            Error::Gateway(api_client::Error::RateLimited) => 429,
            Error::Gateway(api_client::Error::QuotaExhausted) => 402,
            Error::Gateway(_) => 500,
        }
    }

    /// The message shown to the caller. Upstream details never leak through here.
    pub fn user_message(&self) -> String {
        match self {
            Error::Validation(e) => e.to_string(),
            Error::Gateway(api_client::Error::RateLimited) => {
                "Rate limit exceeded. Please try again later.".to_string()
            }
            Error::Gateway(api_client::Error::QuotaExhausted) => {
                "AI credits depleted. Please add credits to continue.".to_string()
            }
            Error::Gateway(_) => "AI gateway error".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
