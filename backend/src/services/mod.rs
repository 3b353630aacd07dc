//! Module for core business logic services.
//!
//! This module encapsulates the token, user and (in `crate::auth`) auth
//! services that sit between the HTTP handlers and the repositories.

use crate::errors::{ServiceError, ServiceResult};
use validator::Validate;

pub mod token_service;
pub mod user_service;

/// Runs `validator` checks on a request payload.
pub(crate) fn validate_input<T: Validate>(input: &T) -> ServiceResult<()> {
    input.validate().map_err(ServiceError::from_validation)
}
