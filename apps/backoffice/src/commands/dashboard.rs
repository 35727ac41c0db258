//! # Dashboard Command
//!
//! ```text
//! ┌───────────────────┬───────────────────┬───────────────────┐
//! │  Ventas           │  Ganancia         │  Productos        │
//! │  $1.200,00        │  $450,00          │  8                │
//! └───────────────────┴───────────────────┴───────────────────┘
//!  Últimas ventas (recent_limit)   Últimos pedidos (recent_limit)
//! ```

use serde::Serialize;

use crate::commands::order::list_recent_orders;
use crate::commands::sale::list_recent_sales;
use crate::context::AppContext;
use crate::error::{ApiError, ApiResult};
use crate::state::QueryKey;
use joshub_core::{Order, Sale};
use joshub_db::DashboardSummary;

/// Summary cards, raw and formatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardCards {
    pub sales_total_cents: i64,
    pub profit_cents: i64,
    pub active_products: i64,
    pub sales_total: String,
    pub profit: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub cards: DashboardCards,
    pub recent_sales: Vec<Sale>,
    pub recent_orders: Vec<Order>,
}

pub async fn get_dashboard(ctx: &AppContext) -> ApiResult<DashboardView> {
    let summary: DashboardSummary = ctx
        .cache
        .fetch(QueryKey::Dashboard, || async {
            ctx.db.dashboard().summary().await.map_err(ApiError::from)
        })
        .await?;

    let cards = DashboardCards {
        sales_total_cents: summary.sales_total_cents,
        profit_cents: summary.profit_cents,
        active_products: summary.active_products,
        sales_total: ctx.config.format_currency(summary.sales_total_cents),
        profit: ctx.config.format_currency(summary.profit_cents),
    };

    Ok(DashboardView {
        cards,
        recent_sales: list_recent_sales(ctx).await?,
        recent_orders: list_recent_orders(ctx).await?,
    })
}
