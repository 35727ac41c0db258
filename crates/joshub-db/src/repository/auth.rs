//! # Auth Repository
//!
//! Staff logins: email plus an argon2 password hash.
//!
//! ```text
//! sign_up(email, password)
//!   ├── argon2 hash with a random salt
//!   └── INSERT auth_users (uuid, email, hash)
//!
//! sign_in(email, password)
//!   ├── SELECT by email ── none? ──► InvalidCredentials
//!   └── verify hash ────── fail? ──► InvalidCredentials
//! ```

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{AuthError, DbResult};

/// A staff login, without its hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct CredentialRow {
    id: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

/// Repository for staff logins.
#[derive(Debug, Clone)]
pub struct AuthRepository {
    pool: SqlitePool,
}

impl AuthRepository {
    pub fn new(pool: SqlitePool) -> Self {
        AuthRepository { pool }
    }

    /// Creates a login. A taken email fails with `UniqueViolation`.
    ///
    /// The email is stored as given; callers normalize it first.
    pub async fn sign_up(&self, email: &str, password: &str) -> DbResult<AuthUser> {
        let id = Uuid::new_v4().to_string();
        let password_hash = hash_password(password)?;

        debug!(id = %id, email = %email, "Creating auth user");

        let user = sqlx::query_as::<_, AuthUser>(
            r#"
            INSERT INTO auth_users (id, email, password_hash, created_at)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id, email, created_at
            "#,
        )
        .bind(&id)
        .bind(email)
        .bind(&password_hash)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        info!(id = %user.id, "Auth user created");
        Ok(user)
    }

    /// Checks credentials and returns the login.
    pub async fn sign_in(&self, email: &str, password: &str) -> DbResult<AuthUser> {
        let row = sqlx::query_as::<_, CredentialRow>(
            "SELECT id, email, password_hash, created_at FROM auth_users WHERE email = ?1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, &row.password_hash) {
            debug!(email = %email, "Password mismatch");
            return Err(AuthError::InvalidCredentials.into());
        }

        Ok(AuthUser {
            id: row.id,
            email: row.email,
            created_at: row.created_at,
        })
    }

    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<AuthUser>> {
        let user = sqlx::query_as::<_, AuthUser>(
            "SELECT id, email, created_at FROM auth_users WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}

// =============================================================================
// Password Hashing
// =============================================================================

/// Hashes a password with argon2 and a random salt (PHC string).
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::Hashing(e.to_string()))?;

    Ok(hash.to_string())
}

/// Verifies a password against a stored PHC hash. Malformed hashes fail.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::repository::test_support::test_db;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("secreto").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("secreto", &hash));
        assert!(!verify_password("otro", &hash));
        assert!(!verify_password("secreto", "not-a-hash"));
    }

    #[tokio::test]
    async fn test_sign_up_then_sign_in() {
        let db = test_db().await;

        let created = db.auth().sign_up("admin@joshub.co", "secreto").await.unwrap();
        let signed_in = db.auth().sign_in("admin@joshub.co", "secreto").await.unwrap();

        assert_eq!(created, signed_in);
        assert_eq!(db.auth().get_by_id(&created.id).await.unwrap(), Some(created));
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email() {
        let db = test_db().await;
        db.auth().sign_up("admin@joshub.co", "secreto").await.unwrap();

        for (email, password) in [("admin@joshub.co", "wrong!"), ("who@joshub.co", "secreto")] {
            let err = db.auth().sign_in(email, password).await.unwrap_err();
            assert!(matches!(err, DbError::Auth(AuthError::InvalidCredentials)));
        }
    }

    #[tokio::test]
    async fn test_duplicate_email() {
        let db = test_db().await;
        db.auth().sign_up("admin@joshub.co", "secreto").await.unwrap();

        let err = db
            .auth()
            .sign_up("admin@joshub.co", "another")
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }
}
