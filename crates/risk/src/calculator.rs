// In crates/risk/src/calculator.rs

use serde::Serialize;
use std::fmt;

/// Above this account-risk percentage a trade is flagged as high risk.
pub const HIGH_RISK_THRESHOLD_PERCENT: f64 = 2.0;

/// Dollar and percentage risk of a single trade against an account.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskMetrics {
    /// Dollars lost if the stop is hit.
    pub risk_amount: f64,
    /// `risk_amount` as a percentage of the account. Not clamped; may exceed 100.
    pub risk_percent: f64,
}

impl RiskMetrics {
    /// A display threshold only, not a data constraint.
    pub fn is_high_risk(&self) -> bool {
        self.risk_percent > HIGH_RISK_THRESHOLD_PERCENT
    }
}

impl fmt::Display for RiskMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Risk: {:.2}% (${:.2})", self.risk_percent, self.risk_amount)?;
        if self.is_high_risk() {
            write!(f, " HIGH RISK")?;
        }
        Ok(())
    }
}

/// Computes the risk of a trade.
///
/// Returns `None` when the inputs are insufficient: any value non-finite, a zero
/// stop loss, or a non-positive entry price, position size or account size. This is
/// the "nothing to show yet" state, not an error.
///
/// ```text
/// price_diff   = |entry - stop|
/// risk_amount  = price_diff / entry * position_size
/// risk_percent = risk_amount / account_size * 100
/// ```
pub fn compute_risk(
    entry_price: f64,
    stop_loss: f64,
    position_size: f64,
    account_size: f64,
) -> Option<RiskMetrics> {
    let all_finite = [entry_price, stop_loss, position_size, account_size]
        .iter()
        .all(|v| v.is_finite());
    if !all_finite || stop_loss == 0.0 {
        return None;
    }
    if entry_price <= 0.0 || position_size <= 0.0 || account_size <= 0.0 {
        return None;
    }

    let price_diff = (entry_price - stop_loss).abs();
    let risk_amount = (price_diff / entry_price) * position_size;
    let risk_percent = (risk_amount / account_size) * 100.0;

    Some(RiskMetrics { risk_amount, risk_percent })
}

/// Same as [`compute_risk`], for raw form text. Blank or non-numeric fields yield `None`.
pub fn compute_risk_from_text(
    entry_price: &str,
    stop_loss: &str,
    position_size: &str,
    account_size: &str,
) -> Option<RiskMetrics> {
    compute_risk(
        parse_field(entry_price)?,
        parse_field(stop_loss)?,
        parse_field(position_size)?,
        parse_field(account_size)?,
    )
}

fn parse_field(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok()
}
