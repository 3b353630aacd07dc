//! User business logic service.
//!
//! Handles registration, credential checks, listing and profile updates on
//! top of the user repository.

use crate::database::models::{CreateNewUser, CreateUser, UpdateUser, UpdateUserRequest, UserProfile};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::user_repository::{UserRepository, is_unique_violation};
use crate::services::validate_input;
use bcrypt::{hash, verify};
use sqlx::SqlitePool;
use uuid::Uuid;

pub struct UserService<'a> {
    /// Shared database connection pool
    pool: &'a SqlitePool,
    /// bcrypt work factor for new hashes
    password_cost: u32,
}

impl<'a> UserService<'a> {
    /// Creates a new UserService instance.
    ///
    /// # Arguments
    /// * `pool` - Reference to SQLite connection pool
    /// * `password_cost` - bcrypt cost used when hashing passwords
    pub fn new(pool: &'a SqlitePool, password_cost: u32) -> Self {
        Self {
            pool,
            password_cost,
        }
    }

    /// Registers a new user.
    ///
    /// # Arguments
    /// * `create_user` - Registration payload with the plain text password
    ///
    /// # Returns
    /// The stored user without credentials
    ///
    /// # Errors
    /// Returns `ServiceError` for:
    /// - Validation failures
    /// - An email that is already registered (`AlreadyExists`)
    pub async fn register(&self, create_user: CreateNewUser) -> ServiceResult<UserProfile> {
        validate_input(&create_user)?;

        let repo = UserRepository::new(self.pool);

        if repo.email_exists(&create_user.email).await? {
            return Err(ServiceError::already_exists("User", &create_user.email));
        }

        let password_hash = self.hash_password(&create_user.password)?;

        let data = CreateUser {
            id: Uuid::now_v7().to_string(),
            email: create_user.email,
            password_hash,
            first_name: create_user.first_name,
            last_name: create_user.last_name,
        };

        let email = data.email.clone();
        let user = repo.create_user(data).await.map_err(|e| {
            if is_unique_violation(&e) {
                ServiceError::already_exists("User", &email)
            } else {
                ServiceError::from(e)
            }
        })?;

        tracing::info!("Registered user {}", user.id);
        Ok(user.into())
    }

    /// Checks an email/password pair against the stored hash.
    ///
    /// # Errors
    /// Returns `ServiceError::InvalidCredentials` when the email is unknown or
    /// the password does not match; the two cases are indistinguishable.
    pub async fn authenticate(&self, email: &str, password: &str) -> ServiceResult<UserProfile> {
        let repo = UserRepository::new(self.pool);

        let user = repo
            .get_user_by_email(email)
            .await?
            .ok_or(ServiceError::InvalidCredentials)?;

        if !Self::verify_password(password, &user.password_hash)? {
            return Err(ServiceError::InvalidCredentials);
        }

        Ok(user.into())
    }

    /// Returns every registered user.
    pub async fn list_all(&self) -> ServiceResult<Vec<UserProfile>> {
        let repo = UserRepository::new(self.pool);
        let users = repo.list_users().await?;
        Ok(users.into_iter().map(UserProfile::from).collect())
    }

    /// Updates the mutable fields of an existing user.
    ///
    /// # Errors
    /// Returns `ServiceError::NotFound` if no user has the request's email
    pub async fn update(&self, request: UpdateUserRequest) -> ServiceResult<UserProfile> {
        validate_input(&request)?;

        let password_hash = match request.password.as_deref() {
            Some(password) => Some(self.hash_password(password)?),
            None => None,
        };

        let changes = UpdateUser {
            password_hash,
            first_name: request.first_name,
            last_name: request.last_name,
        };

        let repo = UserRepository::new(self.pool);
        let user = repo
            .update_user(&request.email, changes)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", &request.email))?;

        tracing::info!("Updated user {}", user.id);
        Ok(user.into())
    }

    fn hash_password(&self, password: &str) -> ServiceResult<String> {
        hash(password, self.password_cost)
            .map_err(|e| ServiceError::internal_error(format!("Password hashing failed: {}", e)))
    }

    fn verify_password(password: &str, hash: &str) -> ServiceResult<bool> {
        verify(password, hash).map_err(|e| {
            ServiceError::internal_error(format!("Password verification failed: {}", e))
        })
    }
}
