//! Access token domain type.
//!
//! # Security
//!
//! - Secrets are 64 random bytes from a CSPRNG, hex-encoded to 128 chars
//! - Secrets are generated exactly once, at creation, and never regenerated
//! - Revocation is monotone: `revoked_at`, once set, is never cleared
//! - Tokens are retained for audit after revocation, never deleted

use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

/// Access token bound to an OAuth session.
///
/// A session may own many tokens over time, but the lifecycle service
/// keeps at most one of them non-revoked: using a token cascade-revokes
/// every sibling under the same session.
///
/// There is no stored expiry timestamp. Expiration is always derived from
/// `created_at + expires_in_seconds`, so `created_at` is mandatory and set
/// eagerly when the record is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessToken {
    /// Unique identifier for this token record.
    pub id: Uuid,

    /// Session that owns this token.
    pub session_id: Uuid,

    /// Opaque secret presented by clients. 128 hex characters.
    pub token: String,

    /// Opaque secret for future token-rotation flows. Same generation
    /// scheme as `token`.
    pub refresh_token: String,

    /// Token lifetime in seconds, fixed at creation from configuration.
    pub expires_in_seconds: i64,

    /// When this token was created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,

    /// When this token was revoked (None = not revoked).
    /// Set exactly once; never cleared or overwritten.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::rfc3339::option"
    )]
    pub revoked_at: Option<OffsetDateTime>,
}

impl AccessToken {
    /// Creates a new token for `session_id` with freshly generated secrets.
    ///
    /// All fields are populated eagerly; a token is never partially
    /// initialized.
    #[must_use]
    pub fn new(session_id: Uuid, expires_in_seconds: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_id,
            token: Self::generate_secret(),
            refresh_token: Self::generate_secret(),
            expires_in_seconds,
            created_at: OffsetDateTime::now_utc(),
            revoked_at: None,
        }
    }

    /// The instant at which this token expires.
    #[must_use]
    pub fn expires_at(&self) -> OffsetDateTime {
        self.created_at + Duration::seconds(self.expires_in_seconds)
    }

    /// Returns `true` if this token has expired.
    ///
    /// The comparison is strict: a token is still live at exactly
    /// `created_at + expires_in_seconds`.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(OffsetDateTime::now_utc())
    }

    /// Returns `true` if this token is expired as of `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
        now > self.expires_at()
    }

    /// Returns `true` if this token itself has been revoked.
    ///
    /// This checks only the token's own `revoked_at` flag. Session-level
    /// revocation also renders a token revoked; that combined check lives
    /// on the lifecycle service, which consults the session registry.
    #[must_use]
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    /// Generate a cryptographically secure random secret.
    ///
    /// Returns a 512-bit random value encoded as hex (128 characters).
    #[must_use]
    pub fn generate_secret() -> String {
        let mut bytes = [0u8; 64];
        rand::Rng::fill(&mut rand::thread_rng(), &mut bytes[..]);
        hex::encode(bytes)
    }
}
