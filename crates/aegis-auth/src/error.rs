//! Access token lifecycle error types.
//!
//! This module defines all error types that can occur during token
//! issuance, validation, and revocation.

use crate::config::ConfigError;

/// Errors that can occur during access token lifecycle operations.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The access token is revoked or expired and cannot be used.
    ///
    /// The message text is fixed so that every caller surfaces the same
    /// string; callers should map this to an unauthorized response.
    #[error("The access token is unavailable and can not be used.")]
    AccessTokenUnavailable,

    /// A token or session identifier does not resolve to a record.
    #[error("Not found: {message}")]
    NotFound {
        /// Description of what could not be resolved.
        message: String,
    },

    /// An error occurred while storing or retrieving token data.
    #[error("Storage error: {message}")]
    Storage {
        /// Description of the storage error.
        message: String,
    },

    /// The service configuration is invalid.
    ///
    /// Raised at service construction, not per-request.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error.
        message: String,
    },
}

impl AuthError {
    /// Creates a new `NotFound` error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Creates a new `Storage` error.
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Creates a new `Configuration` error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

impl From<ConfigError> for AuthError {
    fn from(err: ConfigError) -> Self {
        Self::Configuration {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_message_is_fixed() {
        assert_eq!(
            AuthError::AccessTokenUnavailable.to_string(),
            "The access token is unavailable and can not be used."
        );
    }

    #[test]
    fn test_error_display() {
        let err = AuthError::not_found("access token 42");
        assert_eq!(err.to_string(), "Not found: access token 42");

        let err = AuthError::storage("connection lost");
        assert_eq!(err.to_string(), "Storage error: connection lost");
    }

    #[test]
    fn test_config_error_conversion() {
        let err: AuthError =
            ConfigError::InvalidValue("access_token_expiration_time must be > 0".into()).into();
        assert!(matches!(err, AuthError::Configuration { .. }));
        assert!(err.to_string().contains("access_token_expiration_time"));
    }
}
