//! # Employee Repository
//!
//! Staff records. Each employee is linked to one auth user through
//! `user_id`, which is how the signed-in employee is resolved.
//!
//! ```text
//! register_employee
//!   1. auth().sign_up(email, password) ──► AuthUser { id }
//!   2. employees().insert(NewEmployee { user_id: id, .. })
//!
//! sign_in ──► session.user_id ──► employees().find_by_user_id(user_id)
//! ```

use chrono::Utc;
use serde::Deserialize;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use joshub_core::Employee;

const EMPLOYEE_COLUMNS: &str = "id, name, phone, salary_cents, user_id, deleted_at";

/// Fields needed to register an employee.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewEmployee {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub salary_cents: i64,
    pub user_id: String,
}

/// Repository for employee database operations.
#[derive(Debug, Clone)]
pub struct EmployeeRepository {
    pool: SqlitePool,
}

impl EmployeeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        EmployeeRepository { pool }
    }

    /// Inserts an employee and returns the stored row.
    ///
    /// Fails with `ForeignKeyViolation` if `user_id` is not an auth user.
    pub async fn insert(&self, employee: &NewEmployee) -> DbResult<Employee> {
        debug!(id = %employee.id, user_id = %employee.user_id, "Inserting employee");

        let sql = format!(
            "INSERT INTO employees (id, name, phone, salary_cents, user_id) \
             VALUES (?1, ?2, ?3, ?4, ?5) RETURNING {}",
            EMPLOYEE_COLUMNS
        );

        let stored = sqlx::query_as::<_, Employee>(&sql)
            .bind(&employee.id)
            .bind(&employee.name)
            .bind(&employee.phone)
            .bind(employee.salary_cents)
            .bind(&employee.user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(stored)
    }

    /// Lists employees that are not soft-deleted, by name.
    pub async fn list_active(&self) -> DbResult<Vec<Employee>> {
        let sql = format!(
            "SELECT {} FROM employees WHERE deleted_at IS NULL ORDER BY name, id",
            EMPLOYEE_COLUMNS
        );

        let employees = sqlx::query_as::<_, Employee>(&sql)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = employees.len(), "Listed active employees");
        Ok(employees)
    }

    /// Gets an employee by id, including soft-deleted ones.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Employee>> {
        let sql = format!("SELECT {} FROM employees WHERE id = ?1", EMPLOYEE_COLUMNS);

        let employee = sqlx::query_as::<_, Employee>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(employee)
    }

    /// Finds the active employee signed in as `user_id`.
    pub async fn find_by_user_id(&self, user_id: &str) -> DbResult<Option<Employee>> {
        let sql = format!(
            "SELECT {} FROM employees WHERE user_id = ?1 AND deleted_at IS NULL",
            EMPLOYEE_COLUMNS
        );

        let employee = sqlx::query_as::<_, Employee>(&sql)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(employee)
    }

    /// Marks an employee as deleted. Past sales and orders keep
    /// referencing the row.
    pub async fn soft_delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Soft-deleting employee");

        let result = sqlx::query(
            "UPDATE employees SET deleted_at = ?2 WHERE id = ?1 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Employee", id));
        }

        Ok(())
    }
}
