//! # Sale Commands
//!
//! Counter sales. Same checkout as orders, without an address; each line
//! carries the price tier chosen at entry.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::checkout::{persist_checkout, CheckoutError, CheckoutReceipt};
use crate::commands::auth::current_employee;
use crate::context::AppContext;
use crate::error::{ApiError, ApiResult};
use crate::state::QueryKey;
use joshub_core::validation::validate_identifier;
use joshub_core::{Accumulation, CheckoutKind, Sale, SaleDetail};
use joshub_db::NewSale;

const SALE_WRITES: [QueryKey; 2] = [QueryKey::RecentSales, QueryKey::Dashboard];

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleHeaderForm {
    #[serde(default)]
    pub customer_id: Option<String>,
}

/// A sale with its lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleView {
    pub sale: Sale,
    pub details: Vec<SaleDetail>,
}

/// Saves the sale header, then its lines.
///
/// The accumulation is only borrowed: after `CHECKOUT_FAILED` the same
/// lines can be submitted again.
pub async fn submit_sale(
    ctx: &AppContext,
    form: SaleHeaderForm,
    accumulation: &Accumulation,
) -> ApiResult<CheckoutReceipt<Sale>> {
    if accumulation.kind() != CheckoutKind::Sale {
        return Err(ApiError::validation(format!(
            "Expected sale lines, got {} lines",
            accumulation.kind()
        )));
    }

    let customer_id =
        validate_identifier("customer", form.customer_id.as_deref().unwrap_or_default())?;
    let employee = current_employee(ctx).await?;

    debug!(customer_id = %customer_id, employee_id = %employee.id, lines = accumulation.len(), "submit_sale command");

    let repo = ctx.db.sales();
    let sales = &repo;

    let outcome = ctx
        .cache
        .mutate(
            &SALE_WRITES,
            persist_checkout(
                accumulation,
                |total| {
                    let header = NewSale {
                        customer_id,
                        employee_id: employee.id,
                        total_cents: total.cents(),
                    };
                    async move { sales.insert_header(&header).await }
                },
                |rows| async move { sales.insert_details(&rows).await },
            ),
        )
        .await;

    if let Err(CheckoutError::DetailWrite { .. }) = &outcome {
        ctx.cache.invalidate(&SALE_WRITES).await;
    }

    outcome.map_err(ApiError::from)
}

/// Newest sales, up to `config.recent_limit`.
pub async fn list_recent_sales(ctx: &AppContext) -> ApiResult<Vec<Sale>> {
    let limit = ctx.config.recent_limit;
    ctx.cache
        .fetch(QueryKey::RecentSales, || async {
            ctx.db.sales().recent(limit).await.map_err(ApiError::from)
        })
        .await
}

pub async fn get_sale(ctx: &AppContext, id: i64) -> ApiResult<SaleView> {
    let repo = ctx.db.sales();

    let sale = repo
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Sale", &id.to_string()))?;
    let details = repo.get_details(id).await?;

    Ok(SaleView { sale, details })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkout::add_entry;
    use crate::commands::product::select_product;
    use crate::commands::test_support::signed_in_ctx;
    use crate::error::ErrorCode;
    use joshub_core::{EntryForm, LineItem, PriceTier, ProductSnapshot};

    fn header(customer: &str) -> SaleHeaderForm {
        SaleHeaderForm {
            customer_id: Some(customer.to_string()),
        }
    }

    async fn entry(ctx: &AppContext, code: &str, qty: i64, tier: PriceTier) -> EntryForm {
        EntryForm {
            product: Some(select_product(ctx, code).await.unwrap()),
            quantity: Some(qty),
            price_tier: Some(tier),
        }
    }

    /// A×2 cold, A×1 watertight, A×3 cold, B×1 watertight.
    async fn cart(ctx: &AppContext) -> Accumulation {
        let mut cart = Accumulation::new(CheckoutKind::Sale);
        for (code, qty, tier) in [
            ("A", 2, PriceTier::ColdSpot),
            ("A", 1, PriceTier::Watertight),
            ("A", 3, PriceTier::ColdSpot),
            ("B", 1, PriceTier::Watertight),
        ] {
            add_entry(&mut cart, entry(ctx, code, qty, tier).await).unwrap();
        }
        cart
    }

    #[tokio::test]
    async fn test_submit_keeps_price_tiers_apart() {
        let ctx = signed_in_ctx().await;
        let cart = cart(&ctx).await;

        let receipt = submit_sale(&ctx, header("1001"), &cart).await.unwrap();
        // 5×10 + 1×20 + 1×20
        assert_eq!(receipt.header.total_cents, 90);

        let view = get_sale(&ctx, receipt.header.id).await.unwrap();
        let lines: Vec<_> = view
            .details
            .iter()
            .map(|d| (d.product_code.as_str(), d.quantity, d.price_cents))
            .collect();
        assert_eq!(lines, vec![("A", 5, 10), ("A", 1, 20), ("B", 1, 20)]);
        assert!(view.details.iter().all(|d| d.sale_id == receipt.header.id));
    }

    #[tokio::test]
    async fn test_entry_requires_price_tier() {
        let ctx = signed_in_ctx().await;
        let mut cart = Accumulation::new(CheckoutKind::Sale);

        let form = EntryForm {
            price_tier: None,
            ..entry(&ctx, "A", 1, PriceTier::ColdSpot).await
        };
        let err = add_entry(&mut cart, form).unwrap_err();
        assert_eq!(err.message, "price is required");
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn test_entry_over_stock() {
        let ctx = signed_in_ctx().await;
        let mut cart = Accumulation::new(CheckoutKind::Sale);

        let err = add_entry(&mut cart, entry(&ctx, "A", 101, PriceTier::ColdSpot).await)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InsufficientStock);
    }

    #[tokio::test]
    async fn test_header_failure_writes_nothing() {
        let ctx = signed_in_ctx().await;
        let cart = cart(&ctx).await;

        let err = submit_sale(&ctx, header("9999"), &cart).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::CheckoutFailed);
        assert_eq!(ctx.db.sales().count().await.unwrap(), 0);
        assert_eq!(ctx.db.sales().count_details().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_detail_failure_keeps_header() {
        let ctx = signed_in_ctx().await;

        let ghost = ProductSnapshot {
            code: "GHOST".to_string(),
            name: "Not in catalogue".to_string(),
            quantity: 10,
            watertight_price_cents: 20,
            cold_spot_price_cents: 10,
        };
        let cart = Accumulation::new(CheckoutKind::Sale).add_or_merge(LineItem::new(ghost, 2, 20));

        let err = submit_sale(&ctx, header("1001"), &cart).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::PartialCheckout);
        assert!(err.message.contains("sale #"));
        assert_eq!(ctx.db.sales().count().await.unwrap(), 1);
        assert_eq!(ctx.db.sales().count_details().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_success_invalidates_recent_sales() {
        let ctx = signed_in_ctx().await;
        assert!(list_recent_sales(&ctx).await.unwrap().is_empty());

        let cart = cart(&ctx).await;
        submit_sale(&ctx, header("1001"), &cart).await.unwrap();

        assert!(!ctx.cache.contains(&QueryKey::RecentSales).await);
        assert_eq!(list_recent_sales(&ctx).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_recent_sales_respects_limit() {
        let ctx = signed_in_ctx().await;
        let cart = cart(&ctx).await;

        for _ in 0..7 {
            submit_sale(&ctx, header("1001"), &cart).await.unwrap();
        }

        assert_eq!(list_recent_sales(&ctx).await.unwrap().len(), 5);
    }
}
