//! # Repository Module
//!
//! One repository per table group, each holding a pool clone.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Layout                                    │
//! │                                                                         │
//! │  backoffice command                                                    │
//! │       │  db.sales().insert_header(&new_sale)                           │
//! │       ▼                                                                 │
//! │  SaleRepository                                                        │
//! │  ├── insert_header(&self, header)  → Sale (id from RETURNING)          │
//! │  ├── insert_details(&self, rows)   → chunked INSERTs, one transaction  │
//! │  ├── get_by_id / get_details                                           │
//! │  └── recent(&self, limit)                                              │
//! │       │  SQL                                                            │
//! │       ▼                                                                 │
//! │  SQLite                                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`customer::CustomerRepository`] - Customer registration and listing
//! - [`employee::EmployeeRepository`] - Staff records with soft delete
//! - [`product::ProductRepository`] - Product CRUD with soft delete
//! - [`order::OrderRepository`] - Delivery order headers and details
//! - [`sale::SaleRepository`] - Counter sale headers and details
//! - [`auth::AuthRepository`] - Staff logins (argon2)
//! - [`dashboard::DashboardRepository`] - Summary aggregates
//! - [`detail`] - Chunked detail-row inserts shared by orders and sales

pub mod auth;
pub mod customer;
pub mod dashboard;
pub mod detail;
pub mod employee;
pub mod order;
pub mod product;
pub mod sale;

/// Fixtures shared by the repository tests.
#[cfg(test)]
pub(crate) mod test_support {
    use joshub_core::{Customer, Employee, Product};

    use crate::pool::{Database, DbConfig};
    use crate::repository::employee::NewEmployee;

    pub async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    pub fn product(code: &str, quantity: i64) -> Product {
        Product {
            code: code.to_string(),
            name: format!("Product {}", code),
            quantity,
            cost_cents: 5,
            watertight_price_cents: 20,
            cold_spot_price_cents: 10,
            deleted_at: None,
        }
    }

    /// Inserts a customer, a login, an employee and two products
    /// (`A`, `B`), returning `(customer_id, employee_id)`.
    pub async fn seed_parties(db: &Database) -> (String, String) {
        db.customers()
            .insert(&Customer {
                id: "1001".to_string(),
                name: "Ana Gómez".to_string(),
            })
            .await
            .unwrap();

        let user = db.auth().sign_up("clerk@joshub.co", "secreto").await.unwrap();
        let employee: Employee = db
            .employees()
            .insert(&NewEmployee {
                id: "2002".to_string(),
                name: "Luis Pérez".to_string(),
                phone: "3001234567".to_string(),
                salary_cents: 130_000_000,
                user_id: user.id,
            })
            .await
            .unwrap();

        db.products().insert(&product("A", 100)).await.unwrap();
        db.products().insert(&product("B", 100)).await.unwrap();

        ("1001".to_string(), employee.id)
    }
}
