//! Database repository for user management operations.
//!
//! This is the credential store: user records keyed by email.

use crate::database::models::{CreateUser, UpdateUser, User};
use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;

const USER_COLUMNS: &str =
    "id, email, password_hash, first_name, last_name, created_at, updated_at";

/// Repository for user database operations.
pub struct UserRepository<'a> {
    /// Shared SQLite connection pool
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// * `pool` - Reference to SQLite connection pool
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates a new user in the database.
    ///
    /// # Arguments
    /// * `user` - CreateUser DTO containing user details
    ///
    /// # Returns
    /// The newly created User with all fields populated
    pub async fn create_user(&self, user: CreateUser) -> Result<User> {
        let now = Utc::now();
        let query = format!(
            "INSERT INTO users (id, email, password_hash, first_name, last_name, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)
             RETURNING {USER_COLUMNS}"
        );

        let user = sqlx::query_as::<_, User>(&query)
            .bind(user.id)
            .bind(user.email)
            .bind(user.password_hash)
            .bind(user.first_name)
            .bind(user.last_name)
            .bind(now)
            .bind(now)
            .fetch_one(self.pool)
            .await?;

        Ok(user)
    }

    /// Retrieves a user by their email.
    ///
    /// # Returns
    /// `Some(User)` if found, `None` otherwise
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?");

        let user = sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(self.pool)
            .await?;

        Ok(user)
    }

    /// Checks if an email already exists in the system.
    pub async fn email_exists(&self, email: &str) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = ?")
            .bind(email)
            .fetch_one(self.pool)
            .await?;

        Ok(count > 0)
    }

    /// Lists every user, oldest first.
    pub async fn list_users(&self) -> Result<Vec<User>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users ORDER BY created_at ASC, id ASC");

        let users = sqlx::query_as::<_, User>(&query)
            .fetch_all(self.pool)
            .await?;

        Ok(users)
    }

    /// Applies `changes` to the user with `email`.
    ///
    /// # Returns
    /// `Some(User)` with the updated row, `None` if no such user exists
    pub async fn update_user(&self, email: &str, changes: UpdateUser) -> Result<Option<User>> {
        let query = format!(
            "UPDATE users SET
                password_hash = COALESCE(?, password_hash),
                first_name = COALESCE(?, first_name),
                last_name = COALESCE(?, last_name),
                updated_at = ?
             WHERE email = ?
             RETURNING {USER_COLUMNS}"
        );

        let user = sqlx::query_as::<_, User>(&query)
            .bind(changes.password_hash)
            .bind(changes.first_name)
            .bind(changes.last_name)
            .bind(Utc::now())
            .bind(email)
            .fetch_optional(self.pool)
            .await?;

        Ok(user)
    }
}

/// Whether `error` came from a UNIQUE constraint, e.g. a racing duplicate insert.
pub fn is_unique_violation(error: &anyhow::Error) -> bool {
    error
        .downcast_ref::<sqlx::Error>()
        .and_then(|e| e.as_database_error())
        .is_some_and(|db_error| db_error.is_unique_violation())
}
