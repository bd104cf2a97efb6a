// In crates/database/src/error.rs

use core_types::TradeId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to connect to the database")]
    ConnectionError(#[from] sqlx::Error),
    #[error("Database migration failed: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),
    #[error("Database operation failed")]
    OperationFailed(sqlx::Error),
    #[error("Trade {0} not found")]
    NotFound(TradeId),
}

pub type Result<T> = std::result::Result<T, Error>;
