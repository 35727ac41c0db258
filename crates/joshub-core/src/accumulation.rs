//! # Line-Item Accumulation
//!
//! The in-progress cart of a sale or delivery order: the only piece of real
//! business logic in the back-office.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Accumulation Lifecycle                               │
//! │                                                                         │
//! │  Header form opens ──────► Accumulation::new(kind)       (empty)        │
//! │                                                                         │
//! │  Entry form submits ─────► add_or_merge(item)            (repeat)       │
//! │                              ├── new merge key?  → append               │
//! │                              └── existing key?   → sum quantities       │
//! │                                                                         │
//! │  Summary table ──────────► summary() / total()           (read only)    │
//! │                                                                         │
//! │  Header persisted ───────► to_detail_rows(header.id)     (exactly once) │
//! │                                                                         │
//! │  Success / navigate away ► dropped                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Merge Keys
//! The two flows deliberately disagree on what "the same line" means:
//!
//! | Flow  | Policy              | Same line when                   |
//! |-------|---------------------|----------------------------------|
//! | Order | `ByProduct`         | product code matches             |
//! | Sale  | `ByProductAndPrice` | product code AND unit price match |
//!
//! On an order merge the existing entry keeps its price and snapshot; the
//! newly submitted price is dropped.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;
use crate::types::ProductSnapshot;

// =============================================================================
// Checkout Kind
// =============================================================================

/// Which checkout flow an accumulation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutKind {
    /// Delivery order: always priced at the cold-spot price.
    Order,
    /// Counter sale: the clerk picks one of the two prices per line.
    Sale,
}

impl CheckoutKind {
    /// The merge policy of this flow.
    pub const fn merge_policy(self) -> MergePolicy {
        match self {
            CheckoutKind::Order => MergePolicy::ByProduct,
            CheckoutKind::Sale => MergePolicy::ByProductAndPrice,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            CheckoutKind::Order => "order",
            CheckoutKind::Sale => "sale",
        }
    }
}

impl fmt::Display for CheckoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Merge Policy
// =============================================================================

/// Decides whether a submitted line folds into an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum MergePolicy {
    ByProduct,
    ByProductAndPrice,
}

impl MergePolicy {
    fn same_line(self, existing: &LineItem, candidate: &LineItem) -> bool {
        match self {
            MergePolicy::ByProduct => existing.product_code() == candidate.product_code(),
            MergePolicy::ByProductAndPrice => {
                existing.product_code() == candidate.product_code()
                    && existing.unit_price_cents == candidate.unit_price_cents
            }
        }
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One validated line of an accumulation.
///
/// Built by [`EntryForm::into_line_item`](crate::entry::EntryForm::into_line_item),
/// which guarantees `quantity > 0` and a non-empty product code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    /// Product as it was when selected.
    pub product: ProductSnapshot,
    pub quantity: i64,
    pub unit_price_cents: i64,
}

impl LineItem {
    pub fn new(product: ProductSnapshot, quantity: i64, unit_price_cents: i64) -> Self {
        LineItem {
            product,
            quantity,
            unit_price_cents,
        }
    }

    #[inline]
    pub fn product_code(&self) -> &str {
        &self.product.code
    }

    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Detail Row
// =============================================================================

/// A line item bound to its persisted header, ready for the batch insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DetailRow {
    /// Header id (`order_id` or `sale_id` in the store).
    pub parent_id: i64,
    pub product_code: String,
    pub quantity: i64,
    pub price_cents: i64,
    pub total_cents: i64,
}

// =============================================================================
// Summary Line
// =============================================================================

/// One row of the summary table shown under the entry form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SummaryLine {
    pub product_code: String,
    pub name: String,
    pub unit_price_cents: i64,
    pub quantity: i64,
    pub line_total_cents: i64,
}

// =============================================================================
// Accumulation
// =============================================================================

/// The ordered, de-duplicated collection of line items of one checkout.
///
/// ## Invariants
/// - No two entries share a merge key (see [`MergePolicy`])
/// - Entries keep their first-insertion order
/// - Never fails: input is validated before it gets here
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Accumulation {
    kind: CheckoutKind,
    items: Vec<LineItem>,
}

impl Accumulation {
    /// Creates an empty accumulation for a flow.
    pub fn new(kind: CheckoutKind) -> Self {
        Accumulation {
            kind,
            items: Vec::new(),
        }
    }

    /// Adds a line, or folds it into the existing line with the same merge
    /// key by summing quantities.
    ///
    /// ## Example
    /// ```rust
    /// use joshub_core::{Accumulation, CheckoutKind, LineItem, ProductSnapshot};
    ///
    /// let product = ProductSnapshot {
    ///     code: "A".to_string(),
    ///     name: "Hielo".to_string(),
    ///     quantity: 100,
    ///     watertight_price_cents: 20,
    ///     cold_spot_price_cents: 10,
    /// };
    ///
    /// let sale = Accumulation::new(CheckoutKind::Sale)
    ///     .add_or_merge(LineItem::new(product.clone(), 2, 10))
    ///     .add_or_merge(LineItem::new(product, 3, 20));
    ///
    /// // Same product at two prices stays as two lines on a sale
    /// assert_eq!(sale.len(), 2);
    /// ```
    #[must_use]
    pub fn add_or_merge(mut self, item: LineItem) -> Self {
        let policy = self.kind.merge_policy();

        match self.items.iter_mut().find(|e| policy.same_line(e, &item)) {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(item.quantity)
            }
            None => self.items.push(item),
        }

        self
    }

    /// Σ quantity × unit price over all lines. Zero when empty.
    pub fn total(&self) -> Money {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Converts every line into a detail row tagged with `parent_id`,
    /// preserving insertion order.
    pub fn to_detail_rows(&self, parent_id: i64) -> Vec<DetailRow> {
        self.items
            .iter()
            .map(|item| DetailRow {
                parent_id,
                product_code: item.product_code().to_string(),
                quantity: item.quantity,
                price_cents: item.unit_price_cents,
                total_cents: item.line_total().cents(),
            })
            .collect()
    }

    /// Rows for the summary table.
    pub fn summary(&self) -> Vec<SummaryLine> {
        self.items
            .iter()
            .map(|item| SummaryLine {
                product_code: item.product_code().to_string(),
                name: item.product.name.clone(),
                unit_price_cents: item.unit_price_cents,
                quantity: item.quantity,
                line_total_cents: item.line_total().cents(),
            })
            .collect()
    }

    #[inline]
    pub fn kind(&self) -> CheckoutKind {
        self.kind
    }

    #[inline]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(code: &str) -> ProductSnapshot {
        ProductSnapshot {
            code: code.to_string(),
            name: format!("Product {}", code),
            quantity: 1_000,
            watertight_price_cents: 20,
            cold_spot_price_cents: 10,
        }
    }

    fn item(code: &str, quantity: i64, price: i64) -> LineItem {
        LineItem::new(product(code), quantity, price)
    }

    #[test]
    fn test_distinct_codes_append_in_order() {
        let cart = Accumulation::new(CheckoutKind::Order)
            .add_or_merge(item("A", 1, 10))
            .add_or_merge(item("B", 2, 10))
            .add_or_merge(item("C", 3, 10));

        let codes: Vec<&str> = cart.items().iter().map(LineItem::product_code).collect();
        assert_eq!(codes, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_length_equals_distinct_codes_and_quantities_sum() {
        let submissions = [("A", 2), ("B", 1), ("A", 4), ("C", 7), ("B", 3), ("A", 1)];

        let cart = submissions
            .iter()
            .fold(Accumulation::new(CheckoutKind::Order), |cart, (code, qty)| {
                cart.add_or_merge(item(code, *qty, 10))
            });

        assert_eq!(cart.len(), 3);
        let quantities: Vec<(String, i64)> = cart
            .items()
            .iter()
            .map(|i| (i.product_code().to_string(), i.quantity))
            .collect();
        assert_eq!(
            quantities,
            vec![
                ("A".to_string(), 7),
                ("B".to_string(), 4),
                ("C".to_string(), 7)
            ]
        );
    }

    #[test]
    fn test_order_merge_keeps_first_price() {
        let cart = Accumulation::new(CheckoutKind::Order)
            .add_or_merge(item("A", 2, 10))
            .add_or_merge(item("A", 3, 99));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 5);
        assert_eq!(cart.items()[0].unit_price_cents, 10);
    }

    #[test]
    fn test_order_merge_keeps_first_snapshot() {
        let mut newer = product("A");
        newer.name = "Renamed".to_string();

        let cart = Accumulation::new(CheckoutKind::Order)
            .add_or_merge(item("A", 1, 10))
            .add_or_merge(LineItem::new(newer, 1, 10));

        assert_eq!(cart.items()[0].product.name, "Product A");
    }

    #[test]
    fn test_sale_different_prices_stay_separate() {
        let cart = Accumulation::new(CheckoutKind::Sale)
            .add_or_merge(item("A", 2, 10))
            .add_or_merge(item("A", 3, 20));

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(cart.items()[1].quantity, 3);
    }

    #[test]
    fn test_sale_same_price_merges_only_matching_line() {
        let cart = Accumulation::new(CheckoutKind::Sale)
            .add_or_merge(item("A", 2, 10))
            .add_or_merge(item("A", 3, 20))
            .add_or_merge(item("A", 4, 20));

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(cart.items()[0].unit_price_cents, 10);
        assert_eq!(cart.items()[1].quantity, 7);
        assert_eq!(cart.items()[1].unit_price_cents, 20);
    }

    #[test]
    fn test_total_empty_is_zero() {
        assert!(Accumulation::new(CheckoutKind::Sale).total().is_zero());
    }

    #[test]
    fn test_total() {
        let cart = Accumulation::new(CheckoutKind::Sale)
            .add_or_merge(item("A", 2, 10))
            .add_or_merge(item("B", 3, 5));

        assert_eq!(cart.total().cents(), 35);
    }

    #[test]
    fn test_total_is_stable_across_calls() {
        let cart = Accumulation::new(CheckoutKind::Order)
            .add_or_merge(item("A", 2, 10))
            .add_or_merge(item("B", 3, 5));

        assert_eq!(cart.total(), cart.total());
    }

    #[test]
    fn test_detail_rows_mirror_lines() {
        let cart = Accumulation::new(CheckoutKind::Sale)
            .add_or_merge(item("B", 3, 5))
            .add_or_merge(item("A", 2, 10))
            .add_or_merge(item("A", 1, 20));

        let rows = cart.to_detail_rows(7);

        assert_eq!(rows.len(), cart.len());
        for (row, line) in rows.iter().zip(cart.items()) {
            assert_eq!(row.parent_id, 7);
            assert_eq!(row.product_code, line.product_code());
            assert_eq!(row.quantity, line.quantity);
            assert_eq!(row.price_cents, line.unit_price_cents);
            assert_eq!(row.total_cents, row.quantity * row.price_cents);
        }
    }

    #[test]
    fn test_header_id_42_tags_every_row_in_order() {
        let cart = Accumulation::new(CheckoutKind::Order)
            .add_or_merge(item("X", 1, 10))
            .add_or_merge(item("Y", 2, 10))
            .add_or_merge(item("Z", 3, 10));

        let rows = cart.to_detail_rows(42);

        assert!(rows.iter().all(|r| r.parent_id == 42));
        let codes: Vec<&str> = rows.iter().map(|r| r.product_code.as_str()).collect();
        assert_eq!(codes, vec!["X", "Y", "Z"]);
    }

    #[test]
    fn test_summary_lines() {
        let cart = Accumulation::new(CheckoutKind::Order).add_or_merge(item("A", 3, 10));

        let summary = cart.summary();
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].name, "Product A");
        assert_eq!(summary[0].unit_price_cents, 10);
        assert_eq!(summary[0].quantity, 3);
        assert_eq!(summary[0].line_total_cents, 30);
    }

    #[test]
    fn test_kind_policies() {
        assert_eq!(CheckoutKind::Order.merge_policy(), MergePolicy::ByProduct);
        assert_eq!(
            CheckoutKind::Sale.merge_policy(),
            MergePolicy::ByProductAndPrice
        );
        assert_eq!(CheckoutKind::Order.to_string(), "order");
    }

    #[test]
    fn test_huge_lines_saturate_instead_of_overflowing() {
        let half = i64::MAX / 2 + 1;
        let cart = Accumulation::new(CheckoutKind::Order)
            .add_or_merge(item("A", half, 10))
            .add_or_merge(item("A", half, 10));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, i64::MAX);
        assert_eq!(cart.total().cents(), i64::MAX);

        let cart = Accumulation::new(CheckoutKind::Sale)
            .add_or_merge(item("A", 1_000_000_000, 100_000_000_000))
            .add_or_merge(item("B", 1, 10));
        assert_eq!(cart.total().cents(), i64::MAX);
    }
}
