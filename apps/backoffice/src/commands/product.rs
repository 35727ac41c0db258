//! # Product Commands
//!
//! Product catalogue maintenance and the snapshot handed to the entry form.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Product Lifecycle                                    │
//! │                                                                         │
//! │  register_product ──► active ──► update_product (code fixed)           │
//! │                         │                                               │
//! │                         ├──► select_product ──► ProductSnapshot         │
//! │                         │      (entry form, stock at that moment)       │
//! │                         ▼                                               │
//! │                  delete_product (deleted_at set, row kept so old        │
//! │                  detail rows still resolve)                             │
//! │                                                                         │
//! │  Every write invalidates Products and Dashboard.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Deserialize;
use tracing::{debug, info};

use crate::context::AppContext;
use crate::error::{ApiError, ApiResult};
use crate::state::QueryKey;
use joshub_core::validation::{
    validate_code, validate_name, validate_price_cents, validate_stock_quantity,
};
use joshub_core::{Product, ProductSnapshot};

const PRODUCT_WRITES: [QueryKey; 2] = [QueryKey::Products, QueryKey::Dashboard];

/// Product registration / edit form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductForm {
    pub code: String,
    pub name: String,
    pub quantity: i64,
    pub cost_cents: i64,
    pub watertight_price_cents: i64,
    pub cold_spot_price_cents: i64,
}

impl ProductForm {
    fn validate(self) -> ApiResult<Product> {
        validate_stock_quantity(self.quantity)?;
        validate_price_cents("cost", self.cost_cents)?;
        validate_price_cents("watertight price", self.watertight_price_cents)?;
        validate_price_cents("cold spot price", self.cold_spot_price_cents)?;

        Ok(Product {
            code: validate_code(&self.code)?,
            name: validate_name(&self.name)?,
            quantity: self.quantity,
            cost_cents: self.cost_cents,
            watertight_price_cents: self.watertight_price_cents,
            cold_spot_price_cents: self.cold_spot_price_cents,
            deleted_at: None,
        })
    }
}

pub async fn register_product(ctx: &AppContext, form: ProductForm) -> ApiResult<Product> {
    let product = form.validate()?;
    debug!(code = %product.code, "register_product command");

    ctx.cache
        .mutate(&PRODUCT_WRITES, ctx.db.products().insert(&product))
        .await?;

    info!(code = %product.code, "Product registered");
    Ok(product)
}

/// Active products, cached.
pub async fn list_products(ctx: &AppContext) -> ApiResult<Vec<Product>> {
    ctx.cache
        .fetch(QueryKey::Products, || async {
            ctx.db.products().list_active().await.map_err(ApiError::from)
        })
        .await
}

/// Replaces every field of the product `code` except the code itself.
///
/// A different code in the form is ignored.
pub async fn update_product(ctx: &AppContext, code: &str, form: ProductForm) -> ApiResult<Product> {
    let code = validate_code(code)?;
    let product = ProductForm { code, ..form }.validate()?;
    debug!(code = %product.code, "update_product command");

    ctx.cache
        .mutate(&PRODUCT_WRITES, ctx.db.products().update(&product))
        .await?;

    info!(code = %product.code, "Product updated");
    Ok(product)
}

pub async fn delete_product(ctx: &AppContext, code: &str) -> ApiResult<()> {
    debug!(code = %code, "delete_product command");

    ctx.cache
        .mutate(&PRODUCT_WRITES, ctx.db.products().soft_delete(code))
        .await?;

    info!(code = %code, "Product deleted");
    Ok(())
}

/// Loads an active product for the entry form.
///
/// Always reads the store so the stock bound is as fresh as possible.
pub async fn select_product(ctx: &AppContext, code: &str) -> ApiResult<ProductSnapshot> {
    ctx.db
        .products()
        .get_by_code(code)
        .await?
        .map(|product| product.snapshot())
        .ok_or_else(|| ApiError::not_found("Product", code))
}
