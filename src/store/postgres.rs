//! Postgres-backed trade store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::FromRow;
use std::time::Duration;
use tracing::{debug, info, instrument};

use super::window::WindowQuery;
use crate::common::errors::{MonitorError, Result};
use crate::common::traits::WindowFetcher;
use crate::common::types::{Outcome, Side, TradeRecord};
use crate::config::types::DatabaseConfig;

/// Raw `trades` row as stored by the ingestor
#[derive(Debug, Clone, FromRow)]
pub struct TradeRow {
    pub timestamp: DateTime<Utc>,
    pub slug: String,
    pub side: Option<String>,
    pub outcome: Option<String>,
    pub price: Option<Decimal>,
    pub size: Option<Decimal>,
}

impl From<TradeRow> for TradeRecord {
    fn from(row: TradeRow) -> Self {
        TradeRecord {
            timestamp: row.timestamp,
            market_id: row.slug,
            outcome: Outcome::parse(row.outcome.as_deref().unwrap_or_default()),
            price: row.price,
            size: row.size,
            side: row.side.as_deref().and_then(Side::parse),
        }
    }
}

/// Trade store reading fills from a Postgres table
#[derive(Debug, Clone)]
pub struct PgTradeStore {
    pool: PgPool,
    table: String,
}

impl PgTradeStore {
    /// Connect a pool using the database configuration
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        if !is_valid_identifier(&config.trades_table) {
            return Err(MonitorError::Configuration(format!(
                "Invalid trades table name: {:?}",
                config.trades_table
            )));
        }

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout_seconds))
            .connect(&config.url)
            .await?;

        info!(table = %config.trades_table, "Connected to trade store");

        Ok(Self {
            pool,
            table: config.trades_table.clone(),
        })
    }

    /// Wrap an existing pool
    pub fn from_pool(pool: PgPool, table: impl Into<String>) -> Result<Self> {
        let table = table.into();
        if !is_valid_identifier(&table) {
            return Err(MonitorError::Configuration(format!(
                "Invalid trades table name: {:?}",
                table
            )));
        }
        Ok(Self { pool, table })
    }

    /// Get the underlying pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// SQL text for a window query; placeholders are bound in the same order
    fn window_sql(&self, query: &WindowQuery) -> String {
        let mut sql = format!(
            "SELECT timestamp, slug, side, outcome, price, size FROM {} WHERE timestamp > $1",
            self.table
        );
        let mut next_param = 2;
        if query.market_filter.is_some() {
            sql.push_str(&format!(" AND slug LIKE ${}", next_param));
            next_param += 1;
        }
        sql.push_str(" ORDER BY timestamp DESC");
        if query.limit.is_some() {
            sql.push_str(&format!(" LIMIT ${}", next_param));
        }
        sql
    }
}

#[async_trait]
impl WindowFetcher for PgTradeStore {
    #[instrument(skip(self), fields(table = %self.table))]
    async fn fetch_window(&self, query: &WindowQuery) -> Result<Vec<TradeRecord>> {
        let sql = self.window_sql(query);

        let mut statement = sqlx::query_as::<_, TradeRow>(&sql).bind(query.since);
        if let Some(filter) = &query.market_filter {
            statement = statement.bind(like_pattern(filter));
        }
        if let Some(limit) = query.limit {
            statement = statement.bind(i64::from(limit));
        }

        let rows = statement.fetch_all(&self.pool).await?;
        debug!(rows = rows.len(), "Fetched trade window");

        Ok(rows.into_iter().map(TradeRecord::from).collect())
    }

    fn source_name(&self) -> &'static str {
        "postgres"
    }
}

/// `%filter%` with LIKE metacharacters escaped
pub fn like_pattern(filter: &str) -> String {
    let mut pattern = String::with_capacity(filter.len() + 2);
    pattern.push('%');
    for c in filter.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Accepts plain or schema-qualified SQL identifiers (`trades`, `polymarket.trades`)
pub fn is_valid_identifier(name: &str) -> bool {
    !name.is_empty()
        && name.split('.').all(|part| {
            let mut chars = part.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}
