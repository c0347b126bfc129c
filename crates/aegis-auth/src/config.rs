//! Token lifecycle configuration.
//!
//! The lifecycle service recognizes a single option: the access token
//! expiration time. It is required, has no default, and is validated at
//! service construction. A missing or zero value is a startup failure,
//! never a per-request one.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Access token lifecycle configuration.
///
/// # Example (TOML)
///
/// ```toml
/// [auth]
/// access_token_expiration_time = "2h"
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// How long an issued access token lives, measured from `created_at`.
    /// Required; there is no default.
    #[serde(with = "humantime_serde")]
    pub access_token_expiration_time: Duration,
}

/// Configuration validation errors.
///
/// A missing `access_token_expiration_time` never reaches validation: the
/// field has no serde default, so absence already fails deserialization.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// An invalid configuration value was provided.
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

impl AuthConfig {
    /// Creates a configuration with the given expiration time.
    #[must_use]
    pub fn new(access_token_expiration_time: Duration) -> Self {
        Self {
            access_token_expiration_time,
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the expiration time is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.access_token_expiration_time.is_zero() {
            return Err(ConfigError::InvalidValue(
                "access_token_expiration_time must be > 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Expiration time in whole seconds, as stored on issued tokens.
    #[must_use]
    pub fn expiration_seconds(&self) -> i64 {
        i64::try_from(self.access_token_expiration_time.as_secs()).unwrap_or(i64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        let config = AuthConfig::new(Duration::from_secs(7200));
        assert!(config.validate().is_ok());
        assert_eq!(config.expiration_seconds(), 7200);
    }

    #[test]
    fn test_zero_expiration_fails_validation() {
        let config = AuthConfig::new(Duration::ZERO);
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));
        assert!(err.to_string().contains("access_token_expiration_time"));
    }

    #[test]
    fn test_humantime_deserialization() {
        let config: AuthConfig =
            serde_json::from_str(r#"{"access_token_expiration_time": "2h"}"#).unwrap();
        assert_eq!(
            config.access_token_expiration_time,
            Duration::from_secs(7200)
        );
    }

    #[test]
    fn test_missing_expiration_fails_deserialization() {
        let result: Result<AuthConfig, _> = serde_json::from_str("{}");
        assert!(result.is_err());
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = AuthConfig::new(Duration::from_secs(3600));
        let json = serde_json::to_string(&config).unwrap();
        let parsed: AuthConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(
            config.access_token_expiration_time,
            parsed.access_token_expiration_time
        );
    }
}
