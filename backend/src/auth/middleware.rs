//! Middleware for protecting authenticated routes.
//!
//! `jwt_auth` is the single authorization guard: every protected route layers
//! it, and handlers read the resulting `AuthenticatedUser` from extensions.

use crate::api::common::{ApiError, unauthorized};
use crate::auth::models::AuthenticatedUser;
use crate::errors::TokenError;
use crate::services::token_service::TokenService;
use axum::{
    Extension,
    extract::Request,
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Extracts the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    if scheme.eq_ignore_ascii_case("Bearer") && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}

/// JWT authentication middleware
pub async fn jwt_auth(
    Extension(tokens): Extension<Arc<TokenService>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(token) = bearer_token(request.headers()) else {
        tracing::debug!("Missing or malformed bearer token on {}", request.uri());
        return Err(unauthorized());
    };

    match tokens.verify_token(token) {
        Ok(email) => {
            // Add identity to request extensions for use in handlers
            request.extensions_mut().insert(AuthenticatedUser { email });
            Ok(next.run(request).await)
        }
        Err(error) => {
            match error {
                TokenError::ExpiredToken => tracing::debug!("Expired token on {}", request.uri()),
                _ => tracing::warn!("Rejected token on {}: {}", request.uri(), error),
            }
            Err(unauthorized())
        }
    }
}
