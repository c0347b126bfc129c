//! Access token lifecycle service.
//!
//! This module provides the service that owns the business rules layered
//! over the token store:
//!
//! - Token issuance
//! - Availability (revocation + expiry) checks
//! - Single-use activation with sibling cascade-revocation
//! - Explicit revocation
//!
//! # Usage
//!
//! ```ignore
//! use aegis_auth::config::AuthConfig;
//! use aegis_auth::token::AccessTokenService;
//!
//! let config = AuthConfig::new(std::time::Duration::from_secs(7200));
//! let service = AccessTokenService::new(storage, sessions, config)?;
//!
//! let token = service.issue(session_id).await?;
//! service.use_token(token.id).await?;
//! ```

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::AuthResult;
use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::storage::access_token::AccessTokenStorage;
use crate::storage::session::SessionRegistry;
use crate::types::{AccessToken, OAuthSession};

/// Service for managing the lifecycle of issued access tokens.
///
/// The service is stateless; all mutable state lives in the token store,
/// so a single instance is safe to share across concurrent requests.
pub struct AccessTokenService {
    /// Access token storage.
    storage: Arc<dyn AccessTokenStorage>,

    /// External session registry.
    sessions: Arc<dyn SessionRegistry>,

    /// Service configuration.
    config: AuthConfig,
}

impl AccessTokenService {
    /// Creates a new lifecycle service.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Configuration` if the configuration is invalid
    /// (zero expiration time). Configuration problems are fatal at startup,
    /// never surfaced per-request.
    pub fn new(
        storage: Arc<dyn AccessTokenStorage>,
        sessions: Arc<dyn SessionRegistry>,
        config: AuthConfig,
    ) -> AuthResult<Self> {
        config.validate()?;

        Ok(Self {
            storage,
            sessions,
            config,
        })
    }

    /// Issues a new access token under a session.
    ///
    /// The token's lifetime comes from the configured
    /// `access_token_expiration_time`. No session check is performed here;
    /// a token issued under a revoked session is simply never available.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the record cannot be persisted.
    pub async fn issue(&self, session_id: Uuid) -> AuthResult<AccessToken> {
        let token = self
            .storage
            .create(session_id, self.config.expiration_seconds())
            .await?;

        debug!(token_id = %token.id, session_id = %session_id, "issued access token");
        Ok(token)
    }

    /// Resolves a presented secret to an available token.
    ///
    /// This is the per-request authentication lookup: the token is returned
    /// only if it is neither revoked nor expired.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotFound` if the secret resolves to nothing, or
    /// `AuthError::AccessTokenUnavailable` if the token is revoked or
    /// expired.
    pub async fn authenticate(&self, secret: &str) -> AuthResult<AccessToken> {
        let token = self
            .storage
            .find_by_token(secret)
            .await?
            .ok_or_else(|| AuthError::not_found("access token for presented secret"))?;

        if !self.is_available(&token).await? {
            return Err(AuthError::AccessTokenUnavailable);
        }

        Ok(token)
    }

    /// Returns `true` if the token is neither revoked nor expired.
    ///
    /// # Errors
    ///
    /// Returns an error if the session registry lookup fails.
    pub async fn is_available(&self, token: &AccessToken) -> AuthResult<bool> {
        Ok(!self.is_revoked(token).await? && !self.is_expired(token))
    }

    /// Returns `true` if the token has expired.
    ///
    /// Strict comparison: a token is still live at exactly
    /// `created_at + expires_in_seconds`.
    #[must_use]
    pub fn is_expired(&self, token: &AccessToken) -> bool {
        token.is_expired()
    }

    /// Returns `true` if the token is revoked.
    ///
    /// Session revocation is authoritative: a token under a revoked session
    /// is revoked even if its own `revoked_at` is still unset. The token's
    /// own flag is not written back when only the session is revoked; the
    /// session-level check is derived fresh on every call.
    ///
    /// # Errors
    ///
    /// Returns an error if the session registry lookup fails.
    pub async fn is_revoked(&self, token: &AccessToken) -> AuthResult<bool> {
        if token.is_revoked() {
            return Ok(true);
        }

        self.sessions.is_revoked(token.session_id).await
    }

    /// Activates a token, revoking every sibling under its session.
    ///
    /// If the token is available, all *other* non-revoked tokens under the
    /// same session are revoked in one atomic bulk update, enforcing
    /// single-active-token semantics (e.g., rotation on refresh). The used
    /// token itself stays non-revoked, so a repeat `use_token` succeeds.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotFound` if the id does not resolve,
    /// `AuthError::AccessTokenUnavailable` if the token is revoked or
    /// expired (in which case nothing is mutated), or a storage error.
    pub async fn use_token(&self, token_id: Uuid) -> AuthResult<()> {
        let token = self
            .storage
            .find_by_id(token_id)
            .await?
            .ok_or_else(|| AuthError::not_found(format!("access token {token_id}")))?;

        if !self.is_available(&token).await? {
            return Err(AuthError::AccessTokenUnavailable);
        }

        let revoked = self
            .storage
            .revoke_others_under_session(token.session_id, token.id)
            .await?;

        debug!(
            token_id = %token.id,
            session_id = %token.session_id,
            revoked_siblings = revoked,
            "used access token"
        );
        Ok(())
    }

    /// Revokes a token.
    ///
    /// Idempotent: safe to retry after a transient storage error.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotFound` if the id does not resolve, or a
    /// storage error.
    pub async fn revoke(&self, token_id: Uuid) -> AuthResult<()> {
        self.storage.revoke(token_id).await?;
        debug!(token_id = %token_id, "revoked access token");
        Ok(())
    }

    /// Identity of the resource owner behind a token's session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotFound` if the owning session does not resolve.
    pub async fn resource_owner(&self, token: &AccessToken) -> AuthResult<String> {
        Ok(self.session_for(token).await?.resource_owner)
    }

    /// Device name of a token's session, if any.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotFound` if the owning session does not resolve.
    pub async fn device_name(&self, token: &AccessToken) -> AuthResult<Option<String>> {
        Ok(self.session_for(token).await?.device_name)
    }

    /// Device type of a token's session, if any.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotFound` if the owning session does not resolve.
    pub async fn device_type(&self, token: &AccessToken) -> AuthResult<Option<String>> {
        Ok(self.session_for(token).await?.device_type)
    }

    /// Device identifier of a token's session, if any.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotFound` if the owning session does not resolve.
    pub async fn device_identifier(&self, token: &AccessToken) -> AuthResult<Option<String>> {
        Ok(self.session_for(token).await?.device_identifier)
    }

    /// Fetches the owning session, read through on every call.
    ///
    /// Session metadata is never cached and never embedded on the token
    /// entity.
    async fn session_for(&self, token: &AccessToken) -> AuthResult<OAuthSession> {
        self.sessions
            .get_session(token.session_id)
            .await?
            .ok_or_else(|| AuthError::not_found(format!("session {}", token.session_id)))
    }
}
