// In crates/app-config/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to load configuration")]
    LoadError(#[from] config::ConfigError),

    /// The reasoning endpoint credential is absent. Fatal for the analysis path.
    #[error("Gateway API key is not configured (set APP_GATEWAY__API_KEY)")]
    MissingCredential,
}

pub type Result<T> = std::result::Result<T, Error>;
