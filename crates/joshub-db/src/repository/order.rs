//! # Order Repository
//!
//! Delivery order headers (`orders`) and their lines (`orders_detail`).
//!
//! ## Two Writes, No Transaction
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  insert_header(NewOrder)                                               │
//! │       │  INSERT INTO orders ... RETURNING id                           │
//! │       ▼                                                                 │
//! │  Order { id: 42, .. }                                                  │
//! │       │                                                                 │
//! │       │  accumulation.to_detail_rows(42)                               │
//! │       ▼                                                                 │
//! │  insert_details(&rows)                                                 │
//! │       │  multi-row INSERTs into orders_detail, one transaction         │
//! │       ▼                                                                 │
//! │  all rows or none                                                      │
//! │                                                                         │
//! │  A failed detail write leaves the header committed.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use serde::Deserialize;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use crate::repository::detail::insert_detail_rows;
use joshub_core::{DetailRow, Order, OrderDetail};

const ORDER_COLUMNS: &str = "id, customer_id, employee_id, address, total_cents, created_at";

/// An order header before the store assigns its id.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewOrder {
    pub customer_id: String,
    pub employee_id: String,
    pub address: String,
    pub total_cents: i64,
}

/// Repository for delivery order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Inserts an order header and returns it with the assigned id.
    pub async fn insert_header(&self, order: &NewOrder) -> DbResult<Order> {
        debug!(
            customer_id = %order.customer_id,
            employee_id = %order.employee_id,
            total_cents = order.total_cents,
            "Inserting order header"
        );

        let sql = format!(
            "INSERT INTO orders (customer_id, employee_id, address, total_cents, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5) RETURNING {}",
            ORDER_COLUMNS
        );

        let stored = sqlx::query_as::<_, Order>(&sql)
            .bind(&order.customer_id)
            .bind(&order.employee_id)
            .bind(&order.address)
            .bind(order.total_cents)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await?;

        debug!(id = stored.id, "Order header inserted");
        Ok(stored)
    }

    /// Inserts all detail rows in one transaction. Returns the row count.
    ///
    /// `parent_id` of each row is the `order_id`. An empty slice is a no-op.
    pub async fn insert_details(&self, rows: &[DetailRow]) -> DbResult<u64> {
        if rows.is_empty() {
            return Ok(0);
        }

        debug!(
            order_id = rows[0].parent_id,
            count = rows.len(),
            "Inserting order details"
        );

        insert_detail_rows(&self.pool, "orders_detail", "order_id", rows).await
    }

    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Order>> {
        let sql = format!("SELECT {} FROM orders WHERE id = ?1", ORDER_COLUMNS);

        let order = sqlx::query_as::<_, Order>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(order)
    }

    /// Detail rows of an order in insertion order.
    pub async fn get_details(&self, order_id: i64) -> DbResult<Vec<OrderDetail>> {
        let details = sqlx::query_as::<_, OrderDetail>(
            r#"
            SELECT order_id, product_code, quantity, price_cents, total_cents
            FROM orders_detail
            WHERE order_id = ?1
            ORDER BY rowid
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(details)
    }

    /// The `limit` most recent orders, newest first.
    pub async fn recent(&self, limit: u32) -> DbResult<Vec<Order>> {
        let sql = format!(
            "SELECT {} FROM orders ORDER BY created_at DESC, id DESC LIMIT ?1",
            ORDER_COLUMNS
        );

        let orders = sqlx::query_as::<_, Order>(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(orders)
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn count_details(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders_detail")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::{seed_parties, test_db};

    fn new_order(customer_id: &str, employee_id: &str) -> NewOrder {
        NewOrder {
            customer_id: customer_id.to_string(),
            employee_id: employee_id.to_string(),
            address: "Cra 7 # 45-10".to_string(),
            total_cents: 30,
        }
    }

    fn row(parent_id: i64, code: &str, quantity: i64) -> DetailRow {
        DetailRow {
            parent_id,
            product_code: code.to_string(),
            quantity,
            price_cents: 10,
            total_cents: quantity * 10,
        }
    }

    #[tokio::test]
    async fn test_header_ids_are_assigned() {
        let db = test_db().await;
        let (customer, employee) = seed_parties(&db).await;

        let first = db.orders().insert_header(&new_order(&customer, &employee)).await.unwrap();
        let second = db.orders().insert_header(&new_order(&customer, &employee)).await.unwrap();

        assert!(second.id > first.id);
        assert_eq!(first.address, "Cra 7 # 45-10");
        assert_eq!(db.orders().get_by_id(first.id).await.unwrap(), Some(first));
    }

    #[tokio::test]
    async fn test_details_round_trip_in_order() {
        let db = test_db().await;
        let (customer, employee) = seed_parties(&db).await;
        let order = db.orders().insert_header(&new_order(&customer, &employee)).await.unwrap();

        let inserted = db
            .orders()
            .insert_details(&[row(order.id, "B", 1), row(order.id, "A", 2)])
            .await
            .unwrap();
        assert_eq!(inserted, 2);

        let details = db.orders().get_details(order.id).await.unwrap();
        let codes: Vec<&str> = details.iter().map(|d| d.product_code.as_str()).collect();
        assert_eq!(codes, vec!["B", "A"]);
        assert_eq!(details[1].total_cents, 20);
    }

    #[tokio::test]
    async fn test_unknown_product_rejects_whole_batch() {
        let db = test_db().await;
        let (customer, employee) = seed_parties(&db).await;
        let order = db.orders().insert_header(&new_order(&customer, &employee)).await.unwrap();

        let err = db
            .orders()
            .insert_details(&[row(order.id, "A", 1), row(order.id, "NOPE", 1)])
            .await
            .unwrap_err();

        assert!(err.is_foreign_key_violation());
        assert_eq!(db.orders().count_details().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_empty_details_is_noop() {
        let db = test_db().await;
        assert_eq!(db.orders().insert_details(&[]).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_recent_newest_first_and_limited() {
        let db = test_db().await;
        let (customer, employee) = seed_parties(&db).await;

        let mut ids = Vec::new();
        for _ in 0..7 {
            let order = db.orders().insert_header(&new_order(&customer, &employee)).await.unwrap();
            ids.push(order.id);
        }

        let recent: Vec<i64> = db
            .orders()
            .recent(5)
            .await
            .unwrap()
            .into_iter()
            .map(|o| o.id)
            .collect();

        ids.reverse();
        assert_eq!(recent, ids[..5].to_vec());
    }
}
