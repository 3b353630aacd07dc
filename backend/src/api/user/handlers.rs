//! Handler functions for user listing and profile updates.
//!
//! Both endpoints sit behind `jwt_auth`, so an `AuthenticatedUser` is always
//! present in the request extensions.

use crate::api::common::{ApiError, ApiJson, service_error_to_http};
use crate::auth::models::AuthenticatedUser;
use crate::config::Config;
use crate::database::models::{UpdateUserRequest, UserProfile};
use crate::errors::ServiceError;
use crate::services::user_service::UserService;
use axum::extract::{Extension, Json};
use sqlx::SqlitePool;

/// Lists all registered users.
#[axum::debug_handler]
pub async fn list_users(
    Extension(caller): Extension<AuthenticatedUser>,
    Extension(pool): Extension<SqlitePool>,
    Extension(config): Extension<Config>,
) -> Result<Json<Vec<UserProfile>>, ApiError> {
    tracing::info!("Listing users for {}", caller.email);

    let user_service = UserService::new(&pool, config.bcrypt_cost);
    let users = user_service
        .list_all()
        .await
        .map_err(service_error_to_http)?;

    Ok(Json(users))
}

/// Updates the caller's own profile.
#[axum::debug_handler]
pub async fn update_user(
    Extension(caller): Extension<AuthenticatedUser>,
    Extension(pool): Extension<SqlitePool>,
    Extension(config): Extension<Config>,
    ApiJson(payload): ApiJson<UpdateUserRequest>,
) -> Result<Json<UserProfile>, ApiError> {
    if !payload.email.eq_ignore_ascii_case(&caller.email) {
        tracing::warn!(
            "User {} attempted to update {}",
            caller.email,
            payload.email
        );
        return Err(service_error_to_http(ServiceError::permission_denied(
            "Users can only update their own profile",
        )));
    }

    let user_service = UserService::new(&pool, config.bcrypt_cost);
    let user = user_service
        .update(payload)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update user {}: {}", caller.email, e);
            service_error_to_http(e)
        })?;

    Ok(Json(user))
}
