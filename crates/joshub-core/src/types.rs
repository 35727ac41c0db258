//! # Domain Types
//!
//! Persisted entities of the back-office.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Customer     │   │    Employee     │   │    Product      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (national)  │   │  id (national)  │   │  code           │       │
//! │  │  name           │   │  user_id (auth) │   │  two prices     │       │
//! │  └────────┬────────┘   └────────┬────────┘   └────────┬────────┘       │
//! │           │                     │                     │                 │
//! │           ▼                     ▼                     ▼                 │
//! │  ┌─────────────────────────────────────┐   ┌─────────────────────┐     │
//! │  │  Order / Sale (header)              │◄──│ OrderDetail /       │     │
//! │  │  id assigned by the store           │   │ SaleDetail          │     │
//! │  │  total_cents (derived)              │   │ (parent id FK)      │     │
//! │  └─────────────────────────────────────┘   └─────────────────────┘     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Customer
// =============================================================================

/// A customer. The id is the customer's identification number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Customer {
    pub id: String,
    pub name: String,
}

// =============================================================================
// Employee
// =============================================================================

/// A staff member with a login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Employee {
    /// Identification number (cédula).
    pub id: String,
    pub name: String,
    pub phone: String,
    pub salary_cents: i64,
    /// Auth user this employee signs in as.
    pub user_id: String,
    /// Set when the employee is soft-deleted.
    #[ts(as = "Option<String>")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Employee {
    #[inline]
    pub fn salary(&self) -> Money {
        Money::from_cents(self.salary_cents)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale or delivery.
///
/// ## Two Prices
/// - `cold_spot_price_cents`: discounted price, always used for orders
/// - `watertight_price_cents`: standard price, selectable on sales
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Product {
    /// Business identifier, unique.
    pub code: String,

    /// Display name.
    pub name: String,

    /// Units on hand.
    pub quantity: i64,

    /// Unit cost (for profit on the dashboard).
    pub cost_cents: i64,

    /// Standard ("estanco") unit price.
    pub watertight_price_cents: i64,

    /// Discounted ("punto frío") unit price.
    pub cold_spot_price_cents: i64,

    /// Set when the product is soft-deleted.
    #[ts(as = "Option<String>")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Product {
    #[inline]
    pub fn cost(&self) -> Money {
        Money::from_cents(self.cost_cents)
    }

    #[inline]
    pub fn watertight_price(&self) -> Money {
        Money::from_cents(self.watertight_price_cents)
    }

    #[inline]
    pub fn cold_spot_price(&self) -> Money {
        Money::from_cents(self.cold_spot_price_cents)
    }

    /// Freezes the fields a line item needs at selection time.
    pub fn snapshot(&self) -> ProductSnapshot {
        ProductSnapshot::from(self)
    }
}

// =============================================================================
// Product Snapshot
// =============================================================================

/// Denormalized copy of a product taken when it is picked in an entry form.
///
/// Used for display and the advisory stock check; never re-fetched, so it
/// can be stale by the time the checkout is submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductSnapshot {
    pub code: String,
    pub name: String,
    /// Units available when the product was selected.
    pub quantity: i64,
    pub watertight_price_cents: i64,
    pub cold_spot_price_cents: i64,
}

impl From<&Product> for ProductSnapshot {
    fn from(product: &Product) -> Self {
        ProductSnapshot {
            code: product.code.clone(),
            name: product.name.clone(),
            quantity: product.quantity,
            watertight_price_cents: product.watertight_price_cents,
            cold_spot_price_cents: product.cold_spot_price_cents,
        }
    }
}

// =============================================================================
// Headers
// =============================================================================

/// A header record whose id is required before its detail rows can be
/// written.
pub trait Header {
    /// Identifier assigned by the store on insert.
    fn id(&self) -> i64;

    /// Derived total stored on the header.
    fn total(&self) -> Money;
}

/// A delivery order ("domicilio").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Order {
    pub id: i64,
    pub customer_id: String,
    pub employee_id: String,
    /// Delivery address.
    pub address: String,
    pub total_cents: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Header for Order {
    fn id(&self) -> i64 {
        self.id
    }

    fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

/// An over-the-counter sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Sale {
    pub id: i64,
    pub customer_id: String,
    pub employee_id: String,
    pub total_cents: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Header for Sale {
    fn id(&self) -> i64 {
        self.id
    }

    fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Detail Rows
// =============================================================================

/// A persisted order line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct OrderDetail {
    pub order_id: i64,
    pub product_code: String,
    pub quantity: i64,
    pub price_cents: i64,
    pub total_cents: i64,
}

/// A persisted sale line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct SaleDetail {
    pub sale_id: i64,
    pub product_code: String,
    pub quantity: i64,
    pub price_cents: i64,
    pub total_cents: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn water() -> Product {
        Product {
            code: "AGUA-600".to_string(),
            name: "Agua 600ml".to_string(),
            quantity: 40,
            cost_cents: 80_000,
            watertight_price_cents: 150_000,
            cold_spot_price_cents: 120_000,
            deleted_at: None,
        }
    }

    #[test]
    fn test_snapshot_copies_prices_and_stock() {
        let snapshot = water().snapshot();
        assert_eq!(snapshot.code, "AGUA-600");
        assert_eq!(snapshot.quantity, 40);
        assert_eq!(snapshot.watertight_price_cents, 150_000);
        assert_eq!(snapshot.cold_spot_price_cents, 120_000);
    }

    #[test]
    fn test_price_accessors() {
        let product = water();
        assert_eq!(product.cost().cents(), 80_000);
        assert_eq!(product.cold_spot_price().cents(), 120_000);
        assert_eq!(product.watertight_price().cents(), 150_000);
    }

    #[test]
    fn test_header_trait() {
        let sale = Sale {
            id: 42,
            customer_id: "1001".to_string(),
            employee_id: "2002".to_string(),
            total_cents: 3500,
            created_at: Utc::now(),
        };
        assert_eq!(Header::id(&sale), 42);
        assert_eq!(sale.total().cents(), 3500);
    }
}
