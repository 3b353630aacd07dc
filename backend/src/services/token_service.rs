//! JWT issuance and verification.
//!
//! Tokens are stateless HS256 JWTs bound to a user's email. Access tokens are
//! short-lived and accepted by protected routes; refresh tokens live longer
//! and are only good for minting new access tokens.

use anyhow::Context;
use chrono::{Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::Config;
use crate::errors::TokenError;

/// Which tier a token belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenScope {
    Access,
    Refresh,
}

impl fmt::Display for TokenScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenScope::Access => write!(f, "access"),
            TokenScope::Refresh => write!(f, "refresh"),
        }
    }
}

/// JWT claims carried by both token tiers.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// User email
    pub sub: String,
    pub scope: TokenScope,
    /// Token expiration timestamp
    pub exp: usize,
    /// Token issued at timestamp
    pub iat: usize,
}

/// Issues and verifies access/refresh tokens with a single signing secret.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str, access_ttl: Duration, refresh_ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        TokenService {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            access_ttl,
            refresh_ttl,
        }
    }

    /// Builds the service from validated configuration.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        config.validate()?;

        Ok(Self::new(
            &config.jwt_secret,
            ttl_from_seconds(config.access_token_expires_in_seconds)
                .context("Invalid access token lifetime")?,
            ttl_from_seconds(config.refresh_token_expires_in_seconds)
                .context("Invalid refresh token lifetime")?,
        ))
    }

    /// Lifetime of an access token, in seconds.
    pub fn access_expires_in(&self) -> i64 {
        self.access_ttl.num_seconds()
    }

    /// Lifetime of a refresh token, in seconds.
    pub fn refresh_expires_in(&self) -> i64 {
        self.refresh_ttl.num_seconds()
    }

    pub fn issue_access_token(&self, identity: &str) -> Result<String, TokenError> {
        self.issue(identity, TokenScope::Access, self.access_ttl)
    }

    pub fn issue_refresh_token(&self, identity: &str) -> Result<String, TokenError> {
        self.issue(identity, TokenScope::Refresh, self.refresh_ttl)
    }

    /// Validates an access token and returns the identity it was issued for.
    pub fn verify_token(&self, token: &str) -> Result<String, TokenError> {
        self.decode_scoped(token, TokenScope::Access)
            .map(|claims| claims.sub)
    }

    /// Validates a refresh token and returns the identity it was issued for.
    pub fn verify_refresh_token(&self, token: &str) -> Result<String, TokenError> {
        self.decode_scoped(token, TokenScope::Refresh)
            .map(|claims| claims.sub)
    }

    /// Exchanges a valid refresh token for a fresh access token.
    pub fn refresh(&self, refresh_token: &str) -> Result<String, TokenError> {
        let identity = self.verify_refresh_token(refresh_token)?;
        self.issue_access_token(&identity)
    }

    fn issue(&self, identity: &str, scope: TokenScope, ttl: Duration) -> Result<String, TokenError> {
        let now = Utc::now();
        let exp = now + ttl;

        let claims = Claims {
            sub: identity.to_string(),
            scope,
            exp: exp.timestamp().max(0) as usize,
            iat: now.timestamp() as usize,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Encoding(e.to_string()))
    }

    fn decode_scoped(&self, token: &str, expected: TokenScope) -> Result<Claims, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::ExpiredToken,
                _ => TokenError::InvalidToken,
            })?;

        if claims.scope != expected {
            tracing::debug!(
                "Rejected {} token where {} token was required",
                claims.scope,
                expected
            );
            return Err(TokenError::InvalidToken);
        }

        Ok(claims)
    }
}

fn ttl_from_seconds(seconds: u64) -> anyhow::Result<Duration> {
    let seconds = i64::try_from(seconds).context("Lifetime does not fit in i64 seconds")?;
    Duration::try_seconds(seconds).context("Lifetime is out of range")
}
