//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid API base URL format")]
    InvalidBaseUrl,

    #[error("max_tokens must be greater than zero")]
    InvalidMaxTokens,

    #[error("Conference ID must be non-empty uppercase alphanumeric")]
    InvalidConferenceId,

    #[error("Coupon prefix must be non-empty uppercase alphanumeric")]
    InvalidCouponPrefix,

    #[error("Minimum story length must be between 1 and 1000")]
    InvalidMinStoryLength,
}
