// In crates/risk/src/lib.rs

use core_types::{NewTrade, TradeInput, UserId, MAX_PAIR_LEN};

pub mod calculator;
pub mod error;

// Re-export public types
pub use calculator::{compute_risk, RiskMetrics, HIGH_RISK_THRESHOLD_PERCENT};
pub use error::{Error, Result};

/// Validates a trade entered by the trader and derives its risk figures.
///
/// The returned `NewTrade` carries the computed `risk_percent`; the position size is
/// consumed here and not stored.
///
/// # Errors
///
/// * `Error::InvalidPair` if the pair is blank or longer than `MAX_PAIR_LEN` characters.
/// * `Error::InsufficientInput` if the numeric fields do not yield a risk figure, or the
///   stop loss is not a positive price.
pub fn prepare_trade(user_id: UserId, input: &TradeInput) -> Result<NewTrade> {
    let pair = input.crypto_pair.trim();
    if pair.is_empty() || pair.chars().count() > MAX_PAIR_LEN {
        return Err(Error::InvalidPair { max: MAX_PAIR_LEN });
    }

    // Stored trades feed analysis batches, which only accept positive stops.
    if !(input.stop_loss.is_finite() && input.stop_loss > 0.0) {
        return Err(Error::InsufficientInput);
    }

    let metrics = compute_risk(
        input.entry_price,
        input.stop_loss,
        input.position_size,
        input.account_size,
    )
    .ok_or(Error::InsufficientInput)?;

    Ok(NewTrade {
        user_id,
        crypto_pair: pair.to_string(),
        entry_price: input.entry_price,
        stop_loss: input.stop_loss,
        account_size: input.account_size,
        risk_percent: metrics.risk_percent,
    })
}
