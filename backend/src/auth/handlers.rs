//! Handler functions for authentication-related API endpoints.
//!
//! These functions process incoming HTTP requests for sign-up, sign-in and
//! token refresh, and delegate to `auth::service` for the actual work.

use crate::api::common::{ApiError, ApiJson, ApiQuery, service_error_to_http, unauthorized};
use crate::auth::middleware::bearer_token;
use crate::auth::models::*;
use crate::auth::service::AuthService;
use crate::config::Config;
use crate::database::models::CreateNewUser;
use crate::services::token_service::TokenService;
use axum::{
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::Json as ResponseJson,
};
use sqlx::SqlitePool;
use std::sync::Arc;

/// Handle user registration request
#[axum::debug_handler]
pub async fn signup(
    Extension(pool): Extension<SqlitePool>,
    Extension(tokens): Extension<Arc<TokenService>>,
    Extension(config): Extension<Config>,
    ApiJson(payload): ApiJson<CreateNewUser>,
) -> Result<(StatusCode, ResponseJson<AuthResponse>), ApiError> {
    let auth_service = AuthService::new(&pool, &tokens, config.bcrypt_cost);

    let response = auth_service
        .signup(payload)
        .await
        .map_err(service_error_to_http)?;

    Ok((StatusCode::CREATED, ResponseJson(response)))
}

/// Handle user sign-in request
#[axum::debug_handler]
pub async fn signin(
    Extension(pool): Extension<SqlitePool>,
    Extension(tokens): Extension<Arc<TokenService>>,
    Extension(config): Extension<Config>,
    ApiJson(payload): ApiJson<SignInRequest>,
) -> Result<ResponseJson<AuthResponse>, ApiError> {
    let auth_service = AuthService::new(&pool, &tokens, config.bcrypt_cost);

    match auth_service.signin(payload).await {
        Ok(response) => Ok(ResponseJson(response)),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle token refresh request.
///
/// The refresh token is read from the bearer header, falling back to the
/// `refresh_token` query parameter. Refresh is stateless, so only the token
/// service is involved.
#[axum::debug_handler]
pub async fn refresh_token(
    Extension(tokens): Extension<Arc<TokenService>>,
    headers: HeaderMap,
    ApiQuery(query): ApiQuery<RefreshTokenQuery>,
) -> Result<ResponseJson<RefreshTokenResponse>, ApiError> {
    let token = bearer_token(&headers)
        .map(str::to_string)
        .or(query.refresh_token)
        .ok_or_else(unauthorized)?;

    match tokens.refresh(&token) {
        Ok(access_token) => Ok(ResponseJson(RefreshTokenResponse { access_token })),
        Err(error) => Err(service_error_to_http(error.into())),
    }
}
