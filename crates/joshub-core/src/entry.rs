//! # Entry Form
//!
//! The validation boundary between the frontend's entry form and the
//! accumulator. Everything the accumulator assumes is checked here, once.
//!
//! ```text
//! Frontend JSON                           EntryForm::into_line_item(kind)
//! { "product": {...},          ──serde──►   ├── product present?
//!   "quantity": "3",                        ├── quantity > 0? (already i64)
//!   "priceTier": "watertight" }             ├── quantity ≤ snapshot stock?
//!                                           └── unit price from kind + tier
//!                                                      │
//!                                                      ▼
//!                                                   LineItem
//! ```

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::accumulation::{CheckoutKind, LineItem};
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::ProductSnapshot;
use crate::validation::{validate_price_cents, validate_quantity};

// =============================================================================
// Price Tier
// =============================================================================

/// Which of the product's two prices a sale line uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PriceTier {
    /// Discounted price ("punto frío").
    ColdSpot,
    /// Standard price ("estanco").
    Watertight,
}

impl PriceTier {
    /// Picks this tier's price from a snapshot.
    pub fn price_of(self, product: &ProductSnapshot) -> i64 {
        match self {
            PriceTier::ColdSpot => product.cold_spot_price_cents,
            PriceTier::Watertight => product.watertight_price_cents,
        }
    }
}

// =============================================================================
// Entry Form
// =============================================================================

/// One submission of the entry form, as sent by the frontend.
///
/// Every field is optional so that a half-filled form deserializes and the
/// missing field is reported by name instead of as a parse error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct EntryForm {
    #[serde(default)]
    pub product: Option<ProductSnapshot>,

    /// Accepts `3` or `"3"`.
    #[serde(default, deserialize_with = "deserialize_quantity")]
    #[ts(type = "number | string | null")]
    pub quantity: Option<i64>,

    /// Ignored on orders.
    #[serde(default)]
    pub price_tier: Option<PriceTier>,
}

impl EntryForm {
    /// Validates the form into a line item for the given flow.
    ///
    /// ## Example
    /// ```rust
    /// use joshub_core::{CheckoutKind, EntryForm, PriceTier, ProductSnapshot};
    ///
    /// let form = EntryForm {
    ///     product: Some(ProductSnapshot {
    ///         code: "HIELO".to_string(),
    ///         name: "Bolsa de hielo".to_string(),
    ///         quantity: 10,
    ///         watertight_price_cents: 300_000,
    ///         cold_spot_price_cents: 250_000,
    ///     }),
    ///     quantity: Some(2),
    ///     price_tier: Some(PriceTier::Watertight),
    /// };
    ///
    /// // Orders always use the cold-spot price
    /// let line = form.clone().into_line_item(CheckoutKind::Order).unwrap();
    /// assert_eq!(line.unit_price_cents, 250_000);
    ///
    /// let line = form.into_line_item(CheckoutKind::Sale).unwrap();
    /// assert_eq!(line.unit_price_cents, 300_000);
    /// ```
    pub fn into_line_item(self, kind: CheckoutKind) -> CoreResult<LineItem> {
        let product = self
            .product
            .ok_or_else(|| ValidationError::required("product"))?;

        let quantity = self
            .quantity
            .ok_or_else(|| ValidationError::required("quantity"))?;
        validate_quantity(quantity)?;

        // Advisory: the snapshot may be stale.
        if quantity > product.quantity {
            return Err(CoreError::InsufficientStock {
                code: product.code,
                available: product.quantity,
                requested: quantity,
            });
        }

        let unit_price_cents = match kind {
            CheckoutKind::Order => product.cold_spot_price_cents,
            CheckoutKind::Sale => self
                .price_tier
                .ok_or_else(|| ValidationError::required("price"))?
                .price_of(&product),
        };
        validate_price_cents("price", unit_price_cents)?;

        Ok(LineItem::new(product, quantity, unit_price_cents))
    }
}

/// Coerces a JSON number or numeric string into an integer quantity.
/// Blank strings and `null` read as missing.
fn deserialize_quantity<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Int(n)) => Ok(Some(n)),
        Some(Raw::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(None);
            }
            text.parse::<i64>().map(Some).map_err(|_| {
                de::Error::custom(format!("quantity must be an integer, got {:?}", text))
            })
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
