//! Access token storage trait.
//!
//! This module defines the persistence interface for access token records.
//!
//! # Security Considerations
//!
//! - Revocation must be atomic and immediate
//! - Tokens are never deleted, only marked revoked (audit retention)
//! - Access to this storage should be restricted
//! - Never log token secrets

use async_trait::async_trait;
use uuid::Uuid;

use crate::AuthResult;
use crate::types::AccessToken;

/// Storage trait for access tokens.
///
/// This trait defines the interface for persisting and managing access
/// token records. Implementations must ensure atomicity of the revocation
/// operations; see the individual method docs.
///
/// # Implementations
///
/// - `aegis-auth-memory` - in-memory backend (reference implementation)
#[async_trait]
pub trait AccessTokenStorage: Send + Sync {
    /// Creates and persists a new access token for a session.
    ///
    /// Both secrets are generated here, eagerly, from a cryptographically
    /// secure random source (64 bytes each, hex-encoded to 128 characters),
    /// and `created_at` is stamped with the current time. A record is never
    /// persisted partially initialized.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the record cannot be persisted
    /// (e.g., duplicate secret, storage unavailable).
    async fn create(&self, session_id: Uuid, expires_in_seconds: i64) -> AuthResult<AccessToken>;

    /// Finds a token by its ID.
    ///
    /// Returns `Some(token)` if found, `None` if not found, regardless of
    /// revocation/expiration status.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn find_by_id(&self, id: Uuid) -> AuthResult<Option<AccessToken>>;

    /// Finds a token by its secret value.
    ///
    /// This is the authentication lookup path. Production backends should
    /// make this lookup constant-time-safe (e.g., lookup by a keyed index
    /// rather than a linear string scan) to avoid timing side channels.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn find_by_token(&self, token: &str) -> AuthResult<Option<AccessToken>>;

    /// Revokes every other non-revoked token under a session.
    ///
    /// Sets `revoked_at` to the current time for every record with matching
    /// `session_id`, `revoked_at` unset, and `id != exclude_id`. The
    /// excluded token is left untouched.
    ///
    /// # Atomicity
    ///
    /// This must be a single atomic operation with respect to concurrent
    /// calls for the same session. A SQL backend would use one conditional
    /// bulk update:
    ///
    /// ```sql
    /// UPDATE access_tokens
    /// SET revoked_at = NOW()
    /// WHERE session_id = $1 AND revoked_at IS NULL AND id != $2
    /// ```
    ///
    /// The `revoked_at IS NULL` condition makes the operation idempotent
    /// and safe under concurrent retries regardless of ordering.
    ///
    /// # Returns
    ///
    /// Returns the number of tokens revoked by this call.
    ///
    /// # Errors
    ///
    /// Returns an error if the operation fails.
    async fn revoke_others_under_session(
        &self,
        session_id: Uuid,
        exclude_id: Uuid,
    ) -> AuthResult<u64>;

    /// Revokes a single token.
    ///
    /// Sets `revoked_at` to the current time if not already set. Idempotent:
    /// revoking an already-revoked token is a no-op and never overwrites the
    /// original timestamp.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotFound` if the id does not resolve, or an
    /// error if the operation fails.
    async fn revoke(&self, id: Uuid) -> AuthResult<()>;

    /// Lists all tokens under a session, revoked or not.
    ///
    /// Useful for audit and session management surfaces.
    ///
    /// # Errors
    ///
    /// Returns an error if the operation fails.
    async fn list_by_session(&self, session_id: Uuid) -> AuthResult<Vec<AccessToken>>;
}
