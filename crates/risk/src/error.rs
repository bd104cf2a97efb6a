// In crates/risk/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum Error {
    #[error("Crypto pair must be between 1 and {max} characters")]
    InvalidPair { max: usize },

    #[error("Please fill in all fields with valid numbers")]
    InsufficientInput,
}

pub type Result<T> = std::result::Result<T, Error>;
