//! In-memory session registry.
//!
//! Stands in for the external session registry in tests and embedded
//! deployments. Revocation is monotone, matching the collaborator
//! contract: a revoked session is never un-revoked.

use std::collections::HashMap;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use aegis_auth::error::AuthError;
use aegis_auth::storage::SessionRegistry;
use aegis_auth::types::OAuthSession;
use aegis_auth::AuthResult;

/// In-memory session registry backend.
#[derive(Default)]
pub struct InMemorySessionRegistry {
    sessions: RwLock<HashMap<Uuid, OAuthSession>>,
}

impl InMemorySessionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the session id already exists.
    pub async fn insert(&self, session: OAuthSession) -> AuthResult<()> {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&session.id) {
            return Err(AuthError::storage(format!(
                "duplicate session id {}",
                session.id
            )));
        }

        sessions.insert(session.id, session);
        Ok(())
    }

    /// Revokes a session.
    ///
    /// Idempotent; the first revocation timestamp is kept.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotFound` if the session id does not resolve.
    pub async fn revoke(&self, session_id: Uuid) -> AuthResult<()> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(&session_id)
            .ok_or_else(|| AuthError::not_found(format!("session {session_id}")))?;

        if session.revoked_at.is_none() {
            session.revoked_at = Some(OffsetDateTime::now_utc());
        }

        Ok(())
    }
}

#[async_trait]
impl SessionRegistry for InMemorySessionRegistry {
    async fn get_session(&self, session_id: Uuid) -> AuthResult<Option<OAuthSession>> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(&session_id).cloned())
    }

    async fn is_revoked(&self, session_id: Uuid) -> AuthResult<bool> {
        let sessions = self.sessions.read().await;
        sessions
            .get(&session_id)
            .map(OAuthSession::is_revoked)
            .ok_or_else(|| AuthError::not_found(format!("session {session_id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(id: Uuid) -> OAuthSession {
        OAuthSession {
            id,
            resource_owner: "user-1".to_string(),
            device_name: None,
            device_type: None,
            device_identifier: None,
            revoked_at: None,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let registry = InMemorySessionRegistry::new();
        let id = Uuid::new_v4();

        registry.insert(session(id)).await.unwrap();

        let found = registry.get_session(id).await.unwrap().unwrap();
        assert_eq!(found.resource_owner, "user-1");
        assert!(registry.get_session(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_revocation_is_monotone() {
        let registry = InMemorySessionRegistry::new();
        let id = Uuid::new_v4();
        registry.insert(session(id)).await.unwrap();

        assert!(!registry.is_revoked(id).await.unwrap());

        registry.revoke(id).await.unwrap();
        let first = registry.get_session(id).await.unwrap().unwrap().revoked_at;

        registry.revoke(id).await.unwrap();
        let second = registry.get_session(id).await.unwrap().unwrap().revoked_at;

        assert!(registry.is_revoked(id).await.unwrap());
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let registry = InMemorySessionRegistry::new();
        let err = registry.is_revoked(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AuthError::NotFound { .. }));
    }
}
