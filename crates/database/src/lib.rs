// In crates/database/src/lib.rs

use app_config::types::DatabaseSettings;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use core_types::{NewTrade, TradeId, TradeRecord, UserId};
use sqlx::{postgres::PgPoolOptions, PgPool};
use uuid::Uuid;

pub mod error;
pub mod memory;

// Re-export the most important types for easy access.
pub use error::{Error, Result};
pub use memory::MemoryTradeStore;

/// The trade persistence boundary.
///
/// Records are created, listed and deleted; never updated in place.
#[async_trait]
pub trait TradeStore: Send + Sync {
    /// Stores a new trade and returns it with its assigned id and timestamp.
    async fn create(&self, trade: NewTrade) -> Result<TradeRecord>;

    /// Lists a user's trades, newest first.
    async fn list(&self, user_id: UserId) -> Result<Vec<TradeRecord>>;

    /// Removes exactly one trade, or fails with `Error::NotFound`.
    async fn delete(&self, id: TradeId) -> Result<()>;
}

/// A wrapper around the `sqlx` connection pool.
#[derive(Debug, Clone)]
pub struct Db(PgPool);

/// Establishes a connection pool to the PostgreSQL database and runs migrations.
///
/// # Arguments
///
/// * `settings`: The database configuration settings.
///
/// # Returns
///
/// A `Result` containing the `Db` wrapper on success, or an `Error` on failure.
pub async fn connect(settings: &DatabaseSettings) -> Result<Db> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&settings.url)
        .await?;

    // Run database migrations. This ensures the database schema is up-to-date.
    sqlx::migrate!("../../migrations").run(&pool).await.map_err(Error::from)?;

    Ok(Db(pool))
}

/// Row shape of the `trades` table.
#[derive(Debug, sqlx::FromRow)]
struct TradeRow {
    id: Uuid,
    user_id: Uuid,
    crypto_pair: String,
    entry_price: f64,
    stop_loss: f64,
    account_size: f64,
    risk_percent: f64,
    created_at: DateTime<Utc>,
}

impl From<TradeRow> for TradeRecord {
    fn from(row: TradeRow) -> Self {
        TradeRecord {
            id: TradeId(row.id),
            user_id: UserId(row.user_id),
            crypto_pair: row.crypto_pair,
            entry_price: row.entry_price,
            stop_loss: row.stop_loss,
            account_size: row.account_size,
            risk_percent: row.risk_percent,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl TradeStore for Db {
    async fn create(&self, trade: NewTrade) -> Result<TradeRecord> {
        let row = sqlx::query_as::<_, TradeRow>(
            r#"
            INSERT INTO trades (id, user_id, crypto_pair, entry_price, stop_loss, account_size, risk_percent)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, user_id, crypto_pair, entry_price, stop_loss, account_size, risk_percent, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(trade.user_id.0)
        .bind(&trade.crypto_pair)
        .bind(trade.entry_price)
        .bind(trade.stop_loss)
        .bind(trade.account_size)
        .bind(trade.risk_percent)
        .fetch_one(&self.0)
        .await
        .map_err(Error::OperationFailed)?;

        tracing::info!(trade_id = %row.id, pair = %row.crypto_pair, "Trade stored");
        Ok(row.into())
    }

    async fn list(&self, user_id: UserId) -> Result<Vec<TradeRecord>> {
        let rows = sqlx::query_as::<_, TradeRow>(
            r#"
            SELECT id, user_id, crypto_pair, entry_price, stop_loss, account_size, risk_percent, created_at
            FROM trades
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id.0)
        .fetch_all(&self.0)
        .await
        .map_err(Error::OperationFailed)?;

        Ok(rows.into_iter().map(TradeRecord::from).collect())
    }

    async fn delete(&self, id: TradeId) -> Result<()> {
        let result = sqlx::query("DELETE FROM trades WHERE id = $1")
            .bind(id.0)
            .execute(&self.0)
            .await
            .map_err(Error::OperationFailed)?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(id));
        }
        tracing::info!(trade_id = %id, "Trade deleted");
        Ok(())
    }
}
