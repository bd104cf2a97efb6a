// In crates/analysis/src/validator.rs

use core_types::{AnalysisBatch, AnalysisTrade, MAX_BATCH_SIZE, MAX_PAIR_LEN};
use serde_json::{Map, Value};

use crate::error::ValidationError;

/// Validates a raw request body and builds the batch it describes.
///
/// Checks run in order and stop at the first failure. The input is never mutated.
pub fn validate(body: &Value) -> Result<AnalysisBatch, ValidationError> {
    let trades = body
        .as_object()
        .and_then(|obj| obj.get("trades"))
        .and_then(Value::as_array)
        .ok_or(ValidationError::MalformedRequest)?;

    if trades.is_empty() {
        return Err(ValidationError::EmptyBatch);
    }
    if trades.len() > MAX_BATCH_SIZE {
        return Err(ValidationError::BatchTooLarge);
    }

    let trades = trades
        .iter()
        .enumerate()
        .map(|(i, element)| validate_trade(i + 1, element))
        .collect::<Result<Vec<_>, _>>()?;

    AnalysisBatch::new(trades).map_err(|_| ValidationError::BatchTooLarge)
}

fn validate_trade(position: usize, element: &Value) -> Result<AnalysisTrade, ValidationError> {
    let obj = element
        .as_object()
        .ok_or(ValidationError::InvalidElement(position))?;

    let crypto_pair = obj
        .get("crypto_pair")
        .and_then(Value::as_str)
        .filter(|pair| {
            let len = pair.chars().count();
            (1..=MAX_PAIR_LEN).contains(&len)
        })
        .ok_or(ValidationError::InvalidPair(position))?;

    let entry_price = positive_number(obj, "entry_price")
        .ok_or(ValidationError::InvalidEntryPrice(position))?;
    let stop_loss =
        positive_number(obj, "stop_loss").ok_or(ValidationError::InvalidStopLoss(position))?;
    let risk_percent = number(obj, "risk_percent")
        .filter(|v| (0.0..=100.0).contains(v))
        .ok_or(ValidationError::InvalidRiskPercent(position))?;

    Ok(AnalysisTrade {
        crypto_pair: crypto_pair.to_string(),
        entry_price,
        stop_loss,
        risk_percent,
    })
}

/// A finite JSON number. Strings that look numeric are rejected.
fn number(obj: &Map<String, Value>, field: &str) -> Option<f64> {
    obj.get(field)
        .and_then(Value::as_f64)
        .filter(|v| v.is_finite())
}

fn positive_number(obj: &Map<String, Value>, field: &str) -> Option<f64> {
    number(obj, field).filter(|v| *v > 0.0)
}
