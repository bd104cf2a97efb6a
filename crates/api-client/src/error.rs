// In crates/api-client/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to build the API client: {0}")]
    ClientBuildError(String),

    /// Upstream answered 429. Retryable by the caller after a backoff.
    #[error("Upstream rate limit exceeded")]
    RateLimited,

    /// Upstream answered 402. Needs the account to be topped up.
    #[error("Upstream credits exhausted")]
    QuotaExhausted,

    #[error("Upstream returned status {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error("Upstream response had no completion text")]
    MissingCompletion,

    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Deserialization failed: {0}")]
    DeserializationFailed(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
