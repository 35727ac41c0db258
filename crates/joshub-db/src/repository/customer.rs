//! # Customer Repository
//!
//! Customers are keyed by their identification number and never deleted.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use joshub_core::Customer;

/// Repository for customer database operations.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Inserts a customer. A repeated id fails with `UniqueViolation`.
    pub async fn insert(&self, customer: &Customer) -> DbResult<()> {
        debug!(id = %customer.id, "Inserting customer");

        sqlx::query("INSERT INTO customers (id, name) VALUES (?1, ?2)")
            .bind(&customer.id)
            .bind(&customer.name)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Lists all customers by name.
    pub async fn list(&self) -> DbResult<Vec<Customer>> {
        let customers =
            sqlx::query_as::<_, Customer>("SELECT id, name FROM customers ORDER BY name, id")
                .fetch_all(&self.pool)
                .await?;

        debug!(count = customers.len(), "Listed customers");
        Ok(customers)
    }

    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Customer>> {
        let customer =
            sqlx::query_as::<_, Customer>("SELECT id, name FROM customers WHERE id = ?1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(customer)
    }
}
