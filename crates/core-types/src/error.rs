// In crates/core-types/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum Error {
    #[error("An analysis batch needs between 1 and {max} trades, got {len}")]
    BatchSize { len: usize, max: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
