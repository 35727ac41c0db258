//! # Customer Commands

use serde::Deserialize;
use tracing::{debug, info};

use crate::context::AppContext;
use crate::error::{ApiError, ApiResult};
use crate::state::QueryKey;
use joshub_core::validation::{validate_identifier, validate_name};
use joshub_core::Customer;

/// Customer registration form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerForm {
    /// National identification number.
    pub id: String,
    pub name: String,
}

pub async fn register_customer(ctx: &AppContext, form: CustomerForm) -> ApiResult<Customer> {
    let customer = Customer {
        id: validate_identifier("id", &form.id)?,
        name: validate_name(&form.name)?,
    };
    debug!(id = %customer.id, "register_customer command");

    ctx.cache
        .mutate(&[QueryKey::Customers], ctx.db.customers().insert(&customer))
        .await?;

    info!(id = %customer.id, "Customer registered");
    Ok(customer)
}

/// All customers by name.
pub async fn list_customers(ctx: &AppContext) -> ApiResult<Vec<Customer>> {
    ctx.cache
        .fetch(QueryKey::Customers, || async {
            ctx.db.customers().list().await.map_err(ApiError::from)
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::AppContext;
    use crate::error::ErrorCode;

    fn form(id: &str, name: &str) -> CustomerForm {
        CustomerForm {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_invalidates_list() {
        let ctx = AppContext::in_memory().await.unwrap();

        assert!(list_customers(&ctx).await.unwrap().is_empty());
        assert!(ctx.cache.contains(&QueryKey::Customers).await);

        let customer = register_customer(&ctx, form(" 1001 ", "  Ana Gómez ")).await.unwrap();
        assert_eq!(customer.id, "1001");
        assert_eq!(customer.name, "Ana Gómez");
        assert!(!ctx.cache.contains(&QueryKey::Customers).await);

        assert_eq!(list_customers(&ctx).await.unwrap(), vec![customer]);
    }

    #[tokio::test]
    async fn test_register_validates_fields() {
        let ctx = AppContext::in_memory().await.unwrap();

        let err = register_customer(&ctx, form("", "Ana")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = register_customer(&ctx, form("10-01", "Ana")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = register_customer(&ctx, form("1001", "   ")).await.unwrap_err();
        assert_eq!(err.message, "name is required");
    }

    #[tokio::test]
    async fn test_duplicate_id_is_rejected() {
        let ctx = AppContext::in_memory().await.unwrap();
        register_customer(&ctx, form("1001", "Ana")).await.unwrap();

        let err = register_customer(&ctx, form("1001", "Otra")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.contains("already exists"));
    }
}
