//! Data structures for authentication requests and responses.

use crate::database::models::UserProfile;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Sign-in request payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignInRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Access/refresh pair handed out on sign-up and sign-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Sign-up and sign-in response containing tokens and user info
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: TokenPair,
    pub user: UserProfile,
}

/// Query parameters accepted by the refresh endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct RefreshTokenQuery {
    pub refresh_token: Option<String>,
}

/// Token refresh response
#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshTokenResponse {
    pub access_token: String,
}

/// Identity attached to requests that passed `jwt_auth`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub email: String,
}
