//! Centralized error types for the Clima application.
//!
//! This module provides a typed error hierarchy that:
//! - Enables precise error handling throughout the codebase
//! - Provides user-friendly messages suitable for UI display
//! - Preserves full error context for debugging/logging
//!
//! The four classes that matter at the query boundary are `Network`,
//! `NotFound`, `MalformedResponse` and `Validation`. `Validation` is
//! special: it must prevent a query from being issued at all, never be
//! thrown from one.

use thiserror::Error;

/// Top-level application error type.
///
/// All errors in the Clima application should be convertible to this type.
/// Use `user_message()` to get a UI-appropriate message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("No results: {0}")]
    NotFound(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Returns a user-friendly message suitable for display in the UI.
    ///
    /// These messages are designed to be actionable and non-technical, and
    /// to distinguish "no results" from "something went wrong".
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Network(e) => e.user_message(),
            AppError::NotFound(_) => "No results found. Try a different search.",
            AppError::MalformedResponse(_) => {
                "Received an unusable response. Please try again."
            }
            AppError::Validation(_) => "Some required information is missing.",
            AppError::Config(e) => e.user_message(),
            AppError::Io(_) => "A file operation failed. Please try again.",
            AppError::Other(_) => "An unexpected error occurred. Please try again.",
        }
    }

    /// Whether retrying the same request can plausibly succeed.
    ///
    /// Used by the UI to decide between a retry affordance and a plain
    /// message.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AppError::Network(_) | AppError::MalformedResponse(_)
        )
    }
}

/// Network-related errors (HTTP, connectivity).
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl NetworkError {
    pub fn user_message(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed(_) => {
                "Unable to connect. Check your internet connection."
            }
            NetworkError::Timeout => "The request timed out. Please try again.",
            NetworkError::ServerError { status, .. } if *status >= 500 => {
                "The server is experiencing issues. Please try again later."
            }
            NetworkError::ServerError { .. } => "The request failed. Please try again.",
            NetworkError::InvalidResponse(_) => {
                "Received an unexpected response. Please try again."
            }
        }
    }
}

impl From<reqwest::Error> for NetworkError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return NetworkError::Timeout;
        }
        if let Some(status) = err.status() {
            return NetworkError::ServerError {
                status: status.as_u16(),
                message: err.to_string(),
            };
        }
        NetworkError::ConnectionFailed(err.to_string())
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),

    #[error("Missing required setting: {0}")]
    MissingSetting(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::NotFound(_) => "Configuration not found. Using defaults.",
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::ParseError(_) => "Configuration file is malformed. Check your settings.",
            ConfigError::MissingSetting(_) => "A required setting is missing. Check your settings.",
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    #[test]
    fn network_error_messages_are_actionable() {
        let err = NetworkError::Timeout;
        assert!(err.user_message().contains("timed out"));

        let err = NetworkError::ServerError {
            status: 503,
            message: "unavailable".into(),
        };
        assert!(err.user_message().contains("server"));
    }

    #[test]
    fn not_found_distinct_from_network_failure() {
        let not_found = AppError::NotFound("london".into());
        let network = AppError::Network(NetworkError::Timeout);
        assert_ne!(not_found.user_message(), network.user_message());
        assert!(not_found.user_message().contains("No results"));
    }

    #[test]
    fn retryable_classes() {
        assert!(AppError::Network(NetworkError::Timeout).is_retryable());
        assert!(AppError::MalformedResponse("not json".into()).is_retryable());
        assert!(!AppError::NotFound("x".into()).is_retryable());
        assert!(!AppError::Validation("profile incomplete".into()).is_retryable());
    }
}
