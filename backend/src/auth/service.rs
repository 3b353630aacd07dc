//! Core business logic for the authentication system.
//!
//! Token refresh is stateless and handled by `TokenService::refresh` directly.

use crate::auth::models::*;
use crate::database::models::{CreateNewUser, UserProfile};
use crate::errors::ServiceResult;
use crate::services::token_service::TokenService;
use crate::services::user_service::UserService;
use crate::services::validate_input;
use sqlx::SqlitePool;

/// Authentication service for sign-up and sign-in
pub struct AuthService<'a> {
    tokens: &'a TokenService,
    user_service: UserService<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService instance
    pub fn new(pool: &'a SqlitePool, tokens: &'a TokenService, password_cost: u32) -> Self {
        AuthService {
            tokens,
            user_service: UserService::new(pool, password_cost),
        }
    }

    /// Register a user and sign them in straight away
    pub async fn signup(&self, request: CreateNewUser) -> ServiceResult<AuthResponse> {
        let user = self.user_service.register(request).await?;
        self.issue_tokens(user)
    }

    /// Authenticate user and generate JWT tokens
    pub async fn signin(&self, request: SignInRequest) -> ServiceResult<AuthResponse> {
        validate_input(&request)?;

        let user = self
            .user_service
            .authenticate(&request.email, &request.password)
            .await?;

        tracing::info!("User {} signed in", user.id);
        self.issue_tokens(user)
    }

    fn issue_tokens(&self, user: UserProfile) -> ServiceResult<AuthResponse> {
        let access_token = self.tokens.issue_access_token(&user.email)?;
        let refresh_token = self.tokens.issue_refresh_token(&user.email)?;

        Ok(AuthResponse {
            token: TokenPair {
                access_token,
                refresh_token,
            },
            user,
        })
    }
}
