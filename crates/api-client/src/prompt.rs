// In crates/api-client/src/prompt.rs

use core_types::{AnalysisBatch, AnalysisTrade};

use crate::types::ChatMessage;

pub const SYSTEM_PROMPT: &str = "You are an expert crypto trading advisor. Analyze trades and provide actionable feedback on risk management, entry/exit strategies, and overall trading patterns. Be concise and practical.";

/// Renders one trade as `Trade {n}: {pair} - Entry: ${entry}, Stop Loss: ${stop}, Risk: {pct}%`.
///
/// `position` is 1-based.
pub fn render_trade_line(position: usize, trade: &AnalysisTrade) -> String {
    format!(
        "Trade {}: {} - Entry: ${}, Stop Loss: ${}, Risk: {}%",
        position,
        trade.crypto_pair,
        trade.entry_price,
        trade.stop_loss,
        format_percent(trade.risk_percent)
    )
}

/// Formats with two decimals, rounding exact ties away from zero and printing `-0.0` as `0.00`.
///
/// `{:.2}` rounds ties to even. The only `f64` values exactly on a two-decimal tie are odd
/// multiples of 1/8 (`0.125`, `1.375`, ...); every other value has a single nearest result.
pub fn format_percent(value: f64) -> String {
    if value == 0.0 {
        return "0.00".to_string();
    }
    let eighths = value.abs() * 8.0;
    let is_tie = eighths < 1e15 && eighths.fract() == 0.0 && eighths % 2.0 == 1.0;
    if !is_tie {
        return format!("{:.2}", value);
    }
    // Exact: an odd number of eighths times 100 always ends in .5
    let cents = (value.abs() * 100.0).ceil() as u64;
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}{}.{:02}", sign, cents / 100, cents % 100)
}

/// One line per trade, newline separated, no trailing newline.
pub fn render_trades(batch: &AnalysisBatch) -> String {
    batch
        .trades()
        .iter()
        .enumerate()
        .map(|(i, trade)| render_trade_line(i + 1, trade))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Builds the system and user messages for a batch.
pub fn build_messages(batch: &AnalysisBatch) -> Vec<ChatMessage> {
    let user = format!(
        "Analyze these trades and provide feedback:\n\n{}\n\nProvide specific recommendations to improve risk management and trading strategy.",
        render_trades(batch)
    );
    vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(user)]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trade(pair: &str, entry: f64, stop: f64, risk: f64) -> AnalysisTrade {
        AnalysisTrade {
            crypto_pair: pair.to_string(),
            entry_price: entry,
            stop_loss: stop,
            risk_percent: risk,
        }
    }

    #[test]
    fn renders_one_line_per_trade() {
        let batch = AnalysisBatch::new(vec![
            trade("BTC/USDT", 50000.0, 49000.0, 1.5),
            trade("ETH/USDT", 3000.5, 2950.25, 0.333),
        ])
        .unwrap();

        let text = render_trades(&batch);
        assert_eq!(
            text,
            "Trade 1: BTC/USDT - Entry: $50000, Stop Loss: $49000, Risk: 1.50%\n\
             Trade 2: ETH/USDT - Entry: $3000.5, Stop Loss: $2950.25, Risk: 0.33%"
        );
        assert_eq!(text.lines().count(), 2);
        assert!(!text.ends_with('\n'));
    }

    #[test]
    fn percent_ties_round_up() {
        assert_eq!(format_percent(1.125), "1.13");
        assert_eq!(format_percent(0.125), "0.13");
        assert_eq!(format_percent(0.375), "0.38");
        assert_eq!(format_percent(99.875), "99.88");
        assert_eq!(format_percent(-0.125), "-0.13");
    }

    #[test]
    fn percent_non_ties_keep_nearest_rounding() {
        // 2.675 and 0.285 sit just below the tie in binary.
        assert_eq!(format_percent(2.675), "2.67");
        assert_eq!(format_percent(0.285), "0.28");
        assert_eq!(format_percent(1.5), "1.50");
        assert_eq!(format_percent(0.333), "0.33");
        assert_eq!(format_percent(100.0), "100.00");
    }

    #[test]
    fn negative_zero_percent_prints_as_zero() {
        assert_eq!(format_percent(-0.0), "0.00");
        assert_eq!(format_percent(0.0), "0.00");
    }

    #[test]
    fn tie_percent_in_rendered_line() {
        let line = render_trade_line(1, &trade("BTC/USDT", 100.0, 99.0, 1.125));
        assert_eq!(line, "Trade 1: BTC/USDT - Entry: $100, Stop Loss: $99, Risk: 1.13%");
    }

    #[test]
    fn user_message_embeds_summary() {
        let batch = AnalysisBatch::new(vec![trade("SOL/USDT", 150.0, 140.0, 2.0)]).unwrap();
        let messages = build_messages(&batch);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[1].role, "user");
        assert!(messages[1].content.contains("Trade 1: SOL/USDT - Entry: $150, Stop Loss: $140, Risk: 2.00%"));
        assert!(messages[1].content.ends_with("improve risk management and trading strategy."));
    }
}
