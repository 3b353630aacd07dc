//! Error handling utilities for API responses.
//!
//! Provides the JSON error body shared by every endpoint and the conversion
//! from service-layer errors to HTTP responses.
//!
//! # Response Format
//! Errors return `{"error": <message>, "error_type": <category>}`. Token
//! failures are collapsed into a bare `{"error": "Failed to authorize"}` so
//! clients cannot tell an invalid token from an expired one.

use crate::errors::{ServiceError, TokenError};
use axum::{
    Json,
    extract::{
        FromRequest, FromRequestParts, Query, Request,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, request::Parts},
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

pub const UNAUTHORIZED_MESSAGE: &str = "Failed to authorize";

/// JSON body returned on failure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable message
    pub error: String,
    /// Machine-readable error category
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
}

/// Rejection type used by handlers and middleware.
pub type ApiError = (StatusCode, Json<ErrorResponse>);

impl ErrorResponse {
    pub fn new(error: impl Into<String>, error_type: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            error_type: Some(error_type.into()),
        }
    }
}

/// The generic 401 returned for any missing, invalid or expired token.
pub fn unauthorized() -> ApiError {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse {
            error: UNAUTHORIZED_MESSAGE.to_string(),
            error_type: None,
        }),
    )
}

/// `Json` extractor whose rejections use the standard error body.
#[derive(Debug)]
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(json_rejection_to_http(rejection)),
        }
    }
}

/// `Query` extractor whose rejections use the standard error body.
#[derive(Debug)]
pub struct ApiQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(ApiQuery(value)),
            Err(rejection) => Err(query_rejection_to_http(rejection)),
        }
    }
}

/// Malformed or incomplete bodies are 400; a missing JSON content type is 415.
pub fn json_rejection_to_http(rejection: JsonRejection) -> ApiError {
    let (status, error_type) = match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            (StatusCode::UNSUPPORTED_MEDIA_TYPE, "unsupported_media_type")
        }
        _ => (StatusCode::BAD_REQUEST, "validation_error"),
    };
    tracing::debug!("Rejected request body: {}", rejection.body_text());
    (
        status,
        Json(ErrorResponse::new(rejection.body_text(), error_type)),
    )
}

pub fn query_rejection_to_http(rejection: QueryRejection) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::new(rejection.body_text(), "validation_error")),
    )
}

/// Converts ServiceError to appropriate HTTP response with standard format
pub fn service_error_to_http(error: ServiceError) -> ApiError {
    let (status, error_type, message) = match error {
        ServiceError::Validation { message } => {
            (StatusCode::BAD_REQUEST, "validation_error", message)
        }
        ServiceError::NotFound { entity, identifier } => (
            StatusCode::NOT_FOUND,
            "not_found",
            format!("{} '{}' not found", entity, identifier),
        ),
        ServiceError::AlreadyExists { entity, identifier } => (
            StatusCode::CONFLICT,
            "already_exists",
            format!("{} '{}' already exists", entity, identifier),
        ),
        ServiceError::InvalidCredentials => (
            StatusCode::UNAUTHORIZED,
            "invalid_credentials",
            "Invalid email or password".to_string(),
        ),
        ServiceError::PermissionDenied { message } => {
            (StatusCode::FORBIDDEN, "permission_denied", message)
        }
        ServiceError::Unauthorized(TokenError::Encoding(message)) => {
            tracing::error!("Token encoding failed: {}", message);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "Internal server error".to_string(),
            )
        }
        ServiceError::Unauthorized(reason) => {
            tracing::debug!("Token rejected: {}", reason);
            return unauthorized();
        }
        ServiceError::Database { source } => {
            tracing::error!("Database error: {}", source);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "database_error",
                "Internal server error".to_string(),
            )
        }
        ServiceError::InternalError { message } => {
            tracing::error!("Internal error: {}", message);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "Internal server error".to_string(),
            )
        }
    };

    (status, Json(ErrorResponse::new(message, error_type)))
}
