//! # Sale Repository
//!
//! Counter sale headers (`sales`) and their lines (`sales_detail`).
//!
//! Same write shape as [`OrderRepository`](super::order::OrderRepository):
//! header first (id from `RETURNING`), then one detail batch.
//! Detail prices are whatever tier the clerk picked per line, so the
//! same product may appear twice in one sale.

use chrono::Utc;
use serde::Deserialize;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use crate::repository::detail::insert_detail_rows;
use joshub_core::{DetailRow, Sale, SaleDetail};

const SALE_COLUMNS: &str = "id, customer_id, employee_id, total_cents, created_at";

/// A sale header before the store assigns its id.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewSale {
    pub customer_id: String,
    pub employee_id: String,
    pub total_cents: i64,
}

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Inserts a sale header and returns it with the assigned id.
    pub async fn insert_header(&self, sale: &NewSale) -> DbResult<Sale> {
        debug!(
            customer_id = %sale.customer_id,
            employee_id = %sale.employee_id,
            total_cents = sale.total_cents,
            "Inserting sale header"
        );

        let sql = format!(
            "INSERT INTO sales (customer_id, employee_id, total_cents, created_at) \
             VALUES (?1, ?2, ?3, ?4) RETURNING {}",
            SALE_COLUMNS
        );

        let stored = sqlx::query_as::<_, Sale>(&sql)
            .bind(&sale.customer_id)
            .bind(&sale.employee_id)
            .bind(sale.total_cents)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await?;

        debug!(id = stored.id, "Sale header inserted");
        Ok(stored)
    }

    /// Inserts all detail rows in one transaction. `parent_id` is the
    /// `sale_id`.
    pub async fn insert_details(&self, rows: &[DetailRow]) -> DbResult<u64> {
        if rows.is_empty() {
            return Ok(0);
        }

        debug!(
            sale_id = rows[0].parent_id,
            count = rows.len(),
            "Inserting sale details"
        );

        insert_detail_rows(&self.pool, "sales_detail", "sale_id", rows).await
    }

    /// Gets a sale by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Sale>> {
        let sql = format!("SELECT {} FROM sales WHERE id = ?1", SALE_COLUMNS);

        let sale = sqlx::query_as::<_, Sale>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(sale)
    }

    /// Gets all lines of a sale, in insertion order.
    pub async fn get_details(&self, sale_id: i64) -> DbResult<Vec<SaleDetail>> {
        let details = sqlx::query_as::<_, SaleDetail>(
            r#"
            SELECT sale_id, product_code, quantity, price_cents, total_cents
            FROM sales_detail
            WHERE sale_id = ?1
            ORDER BY rowid
            "#,
        )
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(details)
    }

    /// The `limit` most recent sales, newest first.
    pub async fn recent(&self, limit: u32) -> DbResult<Vec<Sale>> {
        let sql = format!(
            "SELECT {} FROM sales ORDER BY created_at DESC, id DESC LIMIT ?1",
            SALE_COLUMNS
        );

        let sales = sqlx::query_as::<_, Sale>(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(sales)
    }

    /// Counts sale headers (for diagnostics and tests).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn count_details(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales_detail")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::{seed_parties, test_db};

    #[tokio::test]
    async fn test_unknown_customer_rejects_header() {
        let db = test_db().await;
        let (_, employee) = seed_parties(&db).await;

        let err = db
            .sales()
            .insert_header(&NewSale {
                customer_id: "nobody".to_string(),
                employee_id: employee,
                total_cents: 10,
            })
            .await
            .unwrap_err();

        assert!(err.is_foreign_key_violation());
        assert_eq!(db.sales().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_same_product_at_two_prices() {
        let db = test_db().await;
        let (customer, employee) = seed_parties(&db).await;

        let sale = db
            .sales()
            .insert_header(&NewSale {
                customer_id: customer,
                employee_id: employee,
                total_cents: 80,
            })
            .await
            .unwrap();

        let rows = vec![
            DetailRow {
                parent_id: sale.id,
                product_code: "A".to_string(),
                quantity: 2,
                price_cents: 10,
                total_cents: 20,
            },
            DetailRow {
                parent_id: sale.id,
                product_code: "A".to_string(),
                quantity: 3,
                price_cents: 20,
                total_cents: 60,
            },
        ];
        db.sales().insert_details(&rows).await.unwrap();

        let details = db.sales().get_details(sale.id).await.unwrap();
        assert_eq!(details.len(), 2);
        assert!(details.iter().all(|d| d.sale_id == sale.id));
        assert_eq!(details[0].price_cents, 10);
        assert_eq!(details[1].price_cents, 20);

        let stored = db.sales().get_by_id(sale.id).await.unwrap().unwrap();
        assert_eq!(stored.total_cents, 80);
        assert_eq!(db.sales().recent(5).await.unwrap(), vec![stored]);
    }
}
