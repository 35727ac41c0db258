//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Product Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Product Lifecycle                                 │
//! │                                                                         │
//! │  insert(product)          code is the key, chosen by the user          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  list_active / get_by_code ──► ProductSnapshot in the entry form       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  update(product)          every field except code                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  soft_delete(code)        deleted_at = now; detail rows still join     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use joshub_core::Product;

const PRODUCT_COLUMNS: &str = "code, name, quantity, cost_cents, \
     watertight_price_cents, cold_spot_price_cents, deleted_at";

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Inserts a new product. `deleted_at` is ignored.
    pub async fn insert(&self, product: &Product) -> DbResult<()> {
        debug!(code = %product.code, name = %product.name, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (
                code, name, quantity, cost_cents,
                watertight_price_cents, cold_spot_price_cents
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&product.code)
        .bind(&product.name)
        .bind(product.quantity)
        .bind(product.cost_cents)
        .bind(product.watertight_price_cents)
        .bind(product.cold_spot_price_cents)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Lists products that are not soft-deleted, by name.
    pub async fn list_active(&self) -> DbResult<Vec<Product>> {
        let sql = format!(
            "SELECT {} FROM products WHERE deleted_at IS NULL ORDER BY name, code",
            PRODUCT_COLUMNS
        );

        let products = sqlx::query_as::<_, Product>(&sql)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = products.len(), "Listed active products");
        Ok(products)
    }

    /// Gets an active product by code.
    pub async fn get_by_code(&self, code: &str) -> DbResult<Option<Product>> {
        let sql = format!(
            "SELECT {} FROM products WHERE code = ?1 AND deleted_at IS NULL",
            PRODUCT_COLUMNS
        );

        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(code)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Updates every field of an active product except its code.
    pub async fn update(&self, product: &Product) -> DbResult<()> {
        debug!(code = %product.code, "Updating product");

        let result = sqlx::query(
            r#"
            UPDATE products
            SET
                name = ?2,
                quantity = ?3,
                cost_cents = ?4,
                watertight_price_cents = ?5,
                cold_spot_price_cents = ?6
            WHERE code = ?1 AND deleted_at IS NULL
            "#,
        )
        .bind(&product.code)
        .bind(&product.name)
        .bind(product.quantity)
        .bind(product.cost_cents)
        .bind(product.watertight_price_cents)
        .bind(product.cold_spot_price_cents)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", &product.code));
        }

        Ok(())
    }

    /// Soft-deletes a product.
    pub async fn soft_delete(&self, code: &str) -> DbResult<()> {
        debug!(code = %code, "Soft-deleting product");

        let result = sqlx::query(
            "UPDATE products SET deleted_at = ?2 WHERE code = ?1 AND deleted_at IS NULL",
        )
        .bind(code)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", code));
        }

        Ok(())
    }

    /// Counts active products (dashboard card).
    pub async fn count_active(&self) -> DbResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE deleted_at IS NULL")
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }
}
