//! # Order Commands
//!
//! Delivery orders: a customer, an address, and lines priced at the
//! cold-spot price.
//!
//! ## Submit Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    submit_order(ctx, form, &accumulation)               │
//! │                                                                         │
//! │  1. accumulation.kind() == Order?          else VALIDATION_ERROR        │
//! │  2. customer id + address present          else VALIDATION_ERROR        │
//! │  3. current_employee(ctx)                  else UNAUTHORIZED/NOT_FOUND  │
//! │  4. persist_checkout                                                    │
//! │       ├── orders().insert_header(NewOrder { total, .. }) → Order { id } │
//! │       └── orders().insert_details(rows tagged with id)                  │
//! │  5. RecentOrders + Dashboard invalidated once the header exists         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::checkout::{persist_checkout, CheckoutError, CheckoutReceipt};
use crate::commands::auth::current_employee;
use crate::context::AppContext;
use crate::error::{ApiError, ApiResult};
use crate::state::QueryKey;
use joshub_core::validation::{validate_address, validate_identifier};
use joshub_core::{Accumulation, CheckoutKind, Order, OrderDetail};
use joshub_db::NewOrder;

const ORDER_WRITES: [QueryKey; 2] = [QueryKey::RecentOrders, QueryKey::Dashboard];

/// Header form of the order screen.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderHeaderForm {
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// An order with its lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    pub order: Order,
    pub details: Vec<OrderDetail>,
}

pub async fn submit_order(
    ctx: &AppContext,
    form: OrderHeaderForm,
    accumulation: &Accumulation,
) -> ApiResult<CheckoutReceipt<Order>> {
    if accumulation.kind() != CheckoutKind::Order {
        return Err(ApiError::validation(format!(
            "Expected order lines, got {} lines",
            accumulation.kind()
        )));
    }

    let customer_id =
        validate_identifier("customer", form.customer_id.as_deref().unwrap_or_default())?;
    let address = validate_address(form.address.as_deref().unwrap_or_default())?;
    let employee = current_employee(ctx).await?;

    debug!(customer_id = %customer_id, employee_id = %employee.id, lines = accumulation.len(), "submit_order command");

    let repo = ctx.db.orders();
    let orders = &repo;

    let outcome = ctx
        .cache
        .mutate(
            &ORDER_WRITES,
            persist_checkout(
                accumulation,
                |total| {
                    let header = NewOrder {
                        customer_id,
                        employee_id: employee.id,
                        address,
                        total_cents: total.cents(),
                    };
                    async move { orders.insert_header(&header).await }
                },
                |rows| async move { orders.insert_details(&rows).await },
            ),
        )
        .await;

    if let Err(CheckoutError::DetailWrite { .. }) = &outcome {
        // The header row exists even though the write failed.
        ctx.cache.invalidate(&ORDER_WRITES).await;
    }

    outcome.map_err(ApiError::from)
}

/// Newest orders, up to `config.recent_limit`.
pub async fn list_recent_orders(ctx: &AppContext) -> ApiResult<Vec<Order>> {
    let limit = ctx.config.recent_limit;
    ctx.cache
        .fetch(QueryKey::RecentOrders, || async {
            ctx.db.orders().recent(limit).await.map_err(ApiError::from)
        })
        .await
}

pub async fn get_order(ctx: &AppContext, id: i64) -> ApiResult<OrderView> {
    let repo = ctx.db.orders();

    let order = repo
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Order", &id.to_string()))?;
    let details = repo.get_details(id).await?;

    Ok(OrderView { order, details })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkout::add_entry;
    use crate::commands::product::select_product;
    use crate::commands::test_support::{seeded_ctx, signed_in_ctx};
    use crate::error::ErrorCode;
    use joshub_core::{EntryForm, LineItem, PriceTier, ProductSnapshot};

    fn header(customer: &str) -> OrderHeaderForm {
        OrderHeaderForm {
            customer_id: Some(customer.to_string()),
            address: Some("Calle 10 # 5-20".to_string()),
        }
    }

    async fn cart(ctx: &AppContext) -> Accumulation {
        let mut cart = Accumulation::new(CheckoutKind::Order);
        for (code, qty) in [("A", 2), ("B", 1), ("A", 3)] {
            add_entry(
                &mut cart,
                EntryForm {
                    product: Some(select_product(ctx, code).await.unwrap()),
                    quantity: Some(qty),
                    // Ignored on orders
                    price_tier: Some(PriceTier::Watertight),
                },
            )
            .unwrap();
        }
        cart
    }

    #[tokio::test]
    async fn test_submit_writes_header_and_details() {
        let ctx = signed_in_ctx().await;
        let cart = cart(&ctx).await;

        let receipt = submit_order(&ctx, header("1001"), &cart).await.unwrap();
        assert_eq!(receipt.header.employee_id, "2002");
        // Cold-spot price (10) on 5 × A and 1 × B
        assert_eq!(receipt.header.total_cents, 60);
        assert_eq!(receipt.header.total_cents, cart.total().cents());

        let view = get_order(&ctx, receipt.header.id).await.unwrap();
        let lines: Vec<_> = view
            .details
            .iter()
            .map(|d| (d.product_code.as_str(), d.quantity, d.total_cents))
            .collect();
        assert_eq!(lines, vec![("A", 5, 50), ("B", 1, 10)]);
        assert!(view.details.iter().all(|d| d.order_id == receipt.header.id));
    }

    #[tokio::test]
    async fn test_unknown_customer_writes_nothing() {
        let ctx = signed_in_ctx().await;
        let cart = cart(&ctx).await;

        let err = submit_order(&ctx, header("9999"), &cart).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::CheckoutFailed);
        assert_eq!(ctx.db.orders().count().await.unwrap(), 0);
        assert_eq!(ctx.db.orders().count_details().await.unwrap(), 0);

        // Same lines go through once the customer is fixed
        submit_order(&ctx, header("1001"), &cart).await.unwrap();
        assert_eq!(ctx.db.orders().count_details().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_detail_failure_keeps_header() {
        let ctx = signed_in_ctx().await;
        list_recent_orders(&ctx).await.unwrap();

        let ghost = ProductSnapshot {
            code: "GHOST".to_string(),
            name: "Not in catalogue".to_string(),
            quantity: 10,
            watertight_price_cents: 20,
            cold_spot_price_cents: 10,
        };
        let cart = Accumulation::new(CheckoutKind::Order).add_or_merge(LineItem::new(ghost, 1, 10));

        let err = submit_order(&ctx, header("1001"), &cart).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::PartialCheckout);
        assert_eq!(ctx.db.orders().count().await.unwrap(), 1);
        assert_eq!(ctx.db.orders().count_details().await.unwrap(), 0);

        // The orphan header shows up in the recent list
        assert_eq!(list_recent_orders(&ctx).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_header_form_validation() {
        let ctx = signed_in_ctx().await;
        let cart = cart(&ctx).await;

        let err = submit_order(&ctx, OrderHeaderForm::default(), &cart).await.unwrap_err();
        assert_eq!(err.message, "customer is required");

        let no_address = OrderHeaderForm {
            address: Some("   ".to_string()),
            ..header("1001")
        };
        let err = submit_order(&ctx, no_address, &cart).await.unwrap_err();
        assert_eq!(err.message, "address is required");
    }

    #[tokio::test]
    async fn test_rejections_before_any_write() {
        let ctx = signed_in_ctx().await;

        let err = submit_order(&ctx, header("1001"), &Accumulation::new(CheckoutKind::Order))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = submit_order(&ctx, header("1001"), &Accumulation::new(CheckoutKind::Sale))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        assert_eq!(ctx.db.orders().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_requires_sign_in() {
        let ctx = seeded_ctx().await;
        let cart = cart(&ctx).await;

        let err = submit_order(&ctx, header("1001"), &cart).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);
    }

    #[tokio::test]
    async fn test_recent_orders_newest_first() {
        let ctx = signed_in_ctx().await;
        let cart = cart(&ctx).await;

        let first = submit_order(&ctx, header("1001"), &cart).await.unwrap();
        let second = submit_order(&ctx, header("1001"), &cart).await.unwrap();

        let recent = list_recent_orders(&ctx).await.unwrap();
        let ids: Vec<i64> = recent.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![second.header.id, first.header.id]);
    }
}
