//! # Employee Commands
//!
//! ## Registration
//! ```text
//! register_employee(form)
//!      ├── validate all fields (nothing written on failure)
//!      ├── 1. db.auth().sign_up(email, password)   ──► AuthUser { id }
//!      └── 2. db.employees().insert(user_id = id)
//!                  │
//!                  └── Err → the login from step 1 stays; no rollback
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::commands::auth::current_session;
use crate::context::AppContext;
use crate::error::{ApiError, ApiResult};
use crate::state::QueryKey;
use joshub_core::validation::{
    validate_email, validate_identifier, validate_name, validate_password, validate_phone,
    validate_price_cents,
};
use joshub_core::Employee;
use joshub_db::NewEmployee;

/// Employee registration form, including the login to create.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterEmployeeRequest {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub salary_cents: i64,
    pub email: String,
    pub password: String,
}

/// Employee list row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRow {
    #[serde(flatten)]
    pub employee: Employee,
    /// The signed-in employee
    pub is_current: bool,
}

pub async fn register_employee(
    ctx: &AppContext,
    request: RegisterEmployeeRequest,
) -> ApiResult<Employee> {
    let id = validate_identifier("id", &request.id)?;
    let name = validate_name(&request.name)?;
    let phone = validate_phone(&request.phone)?;
    validate_price_cents("salary", request.salary_cents)?;
    let email = validate_email(&request.email)?;
    validate_password(&request.password)?;

    debug!(id = %id, email = %email, "register_employee command");

    let user = ctx.db.auth().sign_up(&email, &request.password).await?;

    let new_employee = NewEmployee {
        id,
        name,
        phone,
        salary_cents: request.salary_cents,
        user_id: user.id,
    };

    let employee = ctx
        .cache
        .mutate(&[QueryKey::Employees], ctx.db.employees().insert(&new_employee))
        .await
        .map_err(|e| {
            warn!(user_id = %new_employee.user_id, error = %e, "Login created but employee record was not");
            ApiError::from(e)
        })?;

    info!(id = %employee.id, "Employee registered");
    Ok(employee)
}

/// Active employees, with the signed-in one marked.
pub async fn list_employees(ctx: &AppContext) -> ApiResult<Vec<EmployeeRow>> {
    let employees: Vec<Employee> = ctx
        .cache
        .fetch(QueryKey::Employees, || async {
            ctx.db.employees().list_active().await.map_err(ApiError::from)
        })
        .await?;

    let current_user = current_session(ctx).await.map(|s| s.user_id);

    Ok(employees
        .into_iter()
        .map(|employee| EmployeeRow {
            is_current: current_user.as_deref() == Some(employee.user_id.as_str()),
            employee,
        })
        .collect())
}

pub async fn delete_employee(ctx: &AppContext, id: &str) -> ApiResult<()> {
    debug!(id = %id, "delete_employee command");

    let employee = ctx
        .db
        .employees()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Employee", id))?;

    ctx.cache
        .mutate(
            &[
                QueryKey::Employees,
                QueryKey::CurrentEmployee(employee.user_id),
            ],
            ctx.db.employees().soft_delete(id),
        )
        .await?;

    info!(id = %id, "Employee deleted");
    Ok(())
}
