// In crates/database/src/memory.rs

use async_trait::async_trait;
use chrono::Utc;
use core_types::{NewTrade, TradeId, TradeRecord, UserId};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{Error, Result, TradeStore};

/// A process-local trade store, used in tests and when no database is configured.
#[derive(Debug, Default)]
pub struct MemoryTradeStore {
    trades: RwLock<Vec<TradeRecord>>,
}

impl MemoryTradeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TradeStore for MemoryTradeStore {
    async fn create(&self, trade: NewTrade) -> Result<TradeRecord> {
        let record = TradeRecord {
            id: TradeId(Uuid::new_v4()),
            user_id: trade.user_id,
            crypto_pair: trade.crypto_pair,
            entry_price: trade.entry_price,
            stop_loss: trade.stop_loss,
            account_size: trade.account_size,
            risk_percent: trade.risk_percent,
            created_at: Utc::now(),
        };
        self.trades.write().await.push(record.clone());
        Ok(record)
    }

    async fn list(&self, user_id: UserId) -> Result<Vec<TradeRecord>> {
        let trades = self.trades.read().await;
        // Newest insert first; the stable sort keeps that order for equal timestamps.
        let mut owned: Vec<TradeRecord> = trades
            .iter()
            .rev()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }

    async fn delete(&self, id: TradeId) -> Result<()> {
        let mut trades = self.trades.write().await;
        let index = trades
            .iter()
            .position(|t| t.id == id)
            .ok_or(Error::NotFound(id))?;
        trades.remove(index);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_trade(user_id: UserId, pair: &str) -> NewTrade {
        NewTrade {
            user_id,
            crypto_pair: pair.to_string(),
            entry_price: 100.0,
            stop_loss: 95.0,
            account_size: 10_000.0,
            risk_percent: 0.5,
        }
    }

    #[tokio::test]
    async fn lists_own_trades_newest_first() {
        let store = MemoryTradeStore::new();
        let alice = UserId(Uuid::new_v4());
        let bob = UserId(Uuid::new_v4());

        store.create(new_trade(alice, "BTC/USDT")).await.unwrap();
        store.create(new_trade(bob, "SOL/USDT")).await.unwrap();
        store.create(new_trade(alice, "ETH/USDT")).await.unwrap();

        let pairs: Vec<_> = store
            .list(alice)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.crypto_pair)
            .collect();
        assert_eq!(pairs, vec!["ETH/USDT", "BTC/USDT"]);
    }

    #[tokio::test]
    async fn delete_removes_exactly_one() {
        let store = MemoryTradeStore::new();
        let user = UserId(Uuid::new_v4());
        let first = store.create(new_trade(user, "BTC/USDT")).await.unwrap();
        store.create(new_trade(user, "ETH/USDT")).await.unwrap();

        store.delete(first.id).await.unwrap();
        assert_eq!(store.list(user).await.unwrap().len(), 1);
        assert!(matches!(store.delete(first.id).await, Err(Error::NotFound(id)) if id == first.id));
    }
}
