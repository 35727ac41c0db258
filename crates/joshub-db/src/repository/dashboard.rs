//! # Dashboard Repository
//!
//! Read-only aggregates for the dashboard cards.

use serde::Serialize;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;

/// Values behind the three dashboard cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DashboardSummary {
    /// Σ sale header totals.
    pub sales_total_cents: i64,
    /// Σ quantity × (sale price − product cost) over sale lines.
    pub profit_cents: i64,
    pub active_products: i64,
}

#[derive(Debug, Clone)]
pub struct DashboardRepository {
    pool: SqlitePool,
}

impl DashboardRepository {
    pub fn new(pool: SqlitePool) -> Self {
        DashboardRepository { pool }
    }

    /// Computes the summary. Profit uses each product's current cost,
    /// soft-deleted products included.
    pub async fn summary(&self) -> DbResult<DashboardSummary> {
        let sales_total_cents: i64 =
            sqlx::query_scalar("SELECT COALESCE(SUM(total_cents), 0) FROM sales")
                .fetch_one(&self.pool)
                .await?;

        let profit_cents: i64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(d.quantity * (d.price_cents - p.cost_cents)), 0)
            FROM sales_detail d
            JOIN products p ON p.code = d.product_code
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        let active_products: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE deleted_at IS NULL")
                .fetch_one(&self.pool)
                .await?;

        let summary = DashboardSummary {
            sales_total_cents,
            profit_cents,
            active_products,
        };
        debug!(?summary, "Computed dashboard summary");

        Ok(summary)
    }
}
