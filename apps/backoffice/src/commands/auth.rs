//! # Auth Commands
//!
//! Staff sign-in and the employee behind the current session.
//!
//! ```text
//! sign_in(email, password)
//!      ├── validate_email
//!      ├── db.auth().sign_in  ── bad credentials ──► UNAUTHORIZED
//!      └── session.set(Session { user_id, .. })
//!
//! current_employee()
//!      ├── session.require()  ── none ──► UNAUTHORIZED
//!      └── cache.fetch(CurrentEmployee(user_id),
//!                      db.employees().find_by_user_id)
//! ```

use chrono::Utc;
use tracing::{debug, info};

use crate::context::AppContext;
use crate::error::{ApiError, ApiResult};
use crate::state::{QueryKey, Session};
use joshub_core::validation::validate_email;
use joshub_core::Employee;

pub async fn sign_in(ctx: &AppContext, email: &str, password: &str) -> ApiResult<Session> {
    let email = validate_email(email)?;
    debug!(email = %email, "sign_in command");

    let user = ctx.db.auth().sign_in(&email, password).await?;

    let session = Session {
        user_id: user.id,
        email: user.email,
        signed_in_at: Utc::now(),
    };
    ctx.session.set(session.clone()).await;

    info!(user_id = %session.user_id, "Signed in");
    Ok(session)
}

/// Ends the session and drops every cached query.
pub async fn sign_out(ctx: &AppContext) {
    if let Some(session) = ctx.session.clear().await {
        info!(user_id = %session.user_id, "Signed out");
    }
    ctx.cache.clear().await;
}

pub async fn current_session(ctx: &AppContext) -> Option<Session> {
    ctx.session.current().await
}

/// The active employee linked to the signed-in login.
///
/// `NOT_FOUND` when the login has no employee record (or it was deleted).
pub async fn current_employee(ctx: &AppContext) -> ApiResult<Employee> {
    let session = ctx.session.require().await?;
    let user_id = session.user_id;

    ctx.cache
        .fetch(QueryKey::CurrentEmployee(user_id.clone()), || async {
            match ctx.db.employees().find_by_user_id(&user_id).await {
                Ok(Some(employee)) => Ok(employee),
                Ok(None) => Err(ApiError::not_found("Employee for user", &user_id)),
                Err(e) => Err(ApiError::from(e)),
            }
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{seeded_ctx, signed_in_ctx, EMAIL, PASSWORD};
    use crate::error::ErrorCode;

    #[tokio::test]
    async fn test_sign_in_sets_session() {
        let ctx = seeded_ctx().await;

        // Email is normalized before lookup
        let session = sign_in(&ctx, "  CLERK@joshub.co ", PASSWORD).await.unwrap();
        assert_eq!(session.email, EMAIL);
        assert_eq!(current_session(&ctx).await, Some(session));
    }

    #[tokio::test]
    async fn test_sign_in_rejects_bad_password() {
        let ctx = seeded_ctx().await;

        let err = sign_in(&ctx, EMAIL, "wrong-password").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);
        assert!(current_session(&ctx).await.is_none());
    }

    #[tokio::test]
    async fn test_current_employee_is_cached() {
        let ctx = signed_in_ctx().await;

        let employee = current_employee(&ctx).await.unwrap();
        assert_eq!(employee.id, "2002");

        let key = QueryKey::CurrentEmployee(employee.user_id.clone());
        assert!(ctx.cache.contains(&key).await);
    }

    #[tokio::test]
    async fn test_current_employee_requires_session() {
        let ctx = seeded_ctx().await;
        let err = current_employee(&ctx).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);
    }

    #[tokio::test]
    async fn test_sign_out_clears_session_and_cache() {
        let ctx = signed_in_ctx().await;
        current_employee(&ctx).await.unwrap();

        sign_out(&ctx).await;

        assert!(current_session(&ctx).await.is_none());
        assert!(current_employee(&ctx).await.is_err());
    }
}
