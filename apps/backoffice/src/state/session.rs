//! # Session State
//!
//! Who is signed in. Set by `sign_in`, cleared by `sign_out`; the header
//! forms read it to stamp the employee on new sales and orders.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;

use crate::error::{ApiError, ApiResult};

/// The signed-in staff login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: String,
    pub email: String,
    pub signed_in_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct SessionState {
    current: RwLock<Option<Session>>,
}

impl SessionState {
    pub fn new() -> Self {
        SessionState::default()
    }

    /// Replaces the current session.
    pub async fn set(&self, session: Session) {
        *self.current.write().await = Some(session);
    }

    /// Ends the session, returning it if there was one.
    pub async fn clear(&self) -> Option<Session> {
        self.current.write().await.take()
    }

    pub async fn current(&self) -> Option<Session> {
        self.current.read().await.clone()
    }

    /// The current session, or `UNAUTHORIZED`.
    pub async fn require(&self) -> ApiResult<Session> {
        self.current()
            .await
            .ok_or_else(|| ApiError::unauthorized("Sign in first"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn session() -> Session {
        Session {
            user_id: "u1".to_string(),
            email: "clerk@joshub.co".to_string(),
            signed_in_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_set_and_clear() {
        let state = SessionState::new();
        assert!(state.current().await.is_none());

        state.set(session()).await;
        assert_eq!(state.require().await.unwrap().user_id, "u1");

        assert!(state.clear().await.is_some());
        assert!(state.clear().await.is_none());
    }

    #[tokio::test]
    async fn test_require_without_session() {
        let err = SessionState::new().require().await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);
    }
}
