//! # Joshub Dashboard Report
//!
//! Prints the dashboard of the configured store to stdout.
//!
//! ```text
//! $ JOSHUB_DB_PATH=./joshub.db joshub
//! Joshub
//! ──────────────────────────────────────────
//! Ventas            $1.250,00
//! Ganancia          $430,00
//! Productos activos 8
//! ...
//! ```
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging)
//! 2. Load configuration from `JOSHUB_*` variables
//! 3. Connect to database & run migrations
//! 4. Load and print the dashboard

use std::error::Error;

use joshub_backoffice::commands::dashboard::get_dashboard;
use joshub_backoffice::{init_tracing, AppConfig, AppContext};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    let config = AppConfig::from_env()?;
    let ctx = AppContext::connect(config).await?;
    let view = get_dashboard(&ctx).await?;
    let fmt = |cents: i64| ctx.config.format_currency(cents);

    println!("{}", ctx.config.store_name);
    println!("{}", "─".repeat(42));
    println!("{:<18}{}", "Ventas", view.cards.sales_total);
    println!("{:<18}{}", "Ganancia", view.cards.profit);
    println!("{:<18}{}", "Productos activos", view.cards.active_products);

    println!();
    println!("Últimas ventas");
    for sale in &view.recent_sales {
        println!(
            "  #{:<6} {}  cliente {:<12} {}",
            sale.id,
            sale.created_at.format("%Y-%m-%d %H:%M"),
            sale.customer_id,
            fmt(sale.total_cents)
        );
    }

    println!();
    println!("Últimos pedidos");
    for order in &view.recent_orders {
        println!(
            "  #{:<6} {}  cliente {:<12} {}  {}",
            order.id,
            order.created_at.format("%Y-%m-%d %H:%M"),
            order.customer_id,
            fmt(order.total_cents),
            order.address
        );
    }

    ctx.db.close().await;
    Ok(())
}
