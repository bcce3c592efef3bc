// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Frontdesk backend.

use thiserror::Error;

/// The primary error type used across all Frontdesk adapter traits and services.
#[derive(Debug, Error)]
pub enum FrontdeskError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Completion provider errors (API failure, auth, malformed response).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The completion provider refused the request for quota or billing reasons.
    #[error("provider quota exceeded: {message}")]
    QuotaExceeded { message: String },

    /// An upstream service is required but has no credentials configured.
    #[error("{0} is not configured")]
    NotConfigured(String),

    /// Mail transport errors (SMTP connect, auth, rejected recipient).
    #[error("mail error: {message}")]
    Mail {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Payment provider errors.
    #[error("payment error: {message}")]
    Payment {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Other third-party HTTP services (integration catalog, etc.).
    #[error("{service} error: {message}")]
    Upstream { service: String, message: String },

    /// Caller-supplied input failed validation.
    #[error("{0}")]
    Validation(String),

    /// An optimistic-concurrency check failed.
    #[error("conversation {id} was modified concurrently (expected version {expected}, found {actual})")]
    Conflict {
        id: String,
        expected: i64,
        actual: i64,
    },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl FrontdeskError {
    /// Wrap any error as a storage error.
    pub fn storage<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        FrontdeskError::Storage {
            source: Box::new(err),
        }
    }

    /// True for errors caused by the caller rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            FrontdeskError::Validation(_) | FrontdeskError::Conflict { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_message_names_versions() {
        let err = FrontdeskError::Conflict {
            id: "conv-1".into(),
            expected: 3,
            actual: 5,
        };
        let msg = err.to_string();
        assert!(msg.contains("conv-1"));
        assert!(msg.contains("expected version 3"));
        assert!(msg.contains("found 5"));
    }

    #[test]
    fn validation_message_is_passed_through() {
        let err = FrontdeskError::Validation("Email is required".into());
        assert_eq!(err.to_string(), "Email is required");
        assert!(err.is_client_error());
    }

    #[test]
    fn storage_helper_boxes_source() {
        let err = FrontdeskError::storage(std::io::Error::other("disk full"));
        assert!(err.to_string().contains("disk full"));
        assert!(!err.is_client_error());
    }
}
