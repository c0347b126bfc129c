//! Session registry trait.
//!
//! The session registry is an external collaborator: it owns `OAuthSession`
//! records and their revocation state. The token lifecycle service only
//! reads from it, and never caches what it reads: session revocation must
//! take effect on the next token check.

use async_trait::async_trait;
use uuid::Uuid;

use crate::AuthResult;
use crate::types::OAuthSession;

/// Read-only contract over the session registry.
///
/// Session revocation is monotone (a revoked session is never un-revoked),
/// so implementations need no locking around reads.
#[async_trait]
pub trait SessionRegistry: Send + Sync {
    /// Fetches a session by ID.
    ///
    /// Returns `Some(session)` if found, `None` if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry lookup fails.
    async fn get_session(&self, session_id: Uuid) -> AuthResult<Option<OAuthSession>>;

    /// Returns `true` if the session has been revoked.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotFound` if the session id does not resolve,
    /// or an error if the registry lookup fails.
    async fn is_revoked(&self, session_id: Uuid) -> AuthResult<bool>;
}
