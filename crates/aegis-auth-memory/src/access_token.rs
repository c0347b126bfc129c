//! In-memory access token storage.

use std::collections::HashMap;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use aegis_auth::error::AuthError;
use aegis_auth::storage::AccessTokenStorage;
use aegis_auth::types::AccessToken;
use aegis_auth::AuthResult;

/// Token table plus a secret index, guarded together by one lock so that
/// bulk updates are atomic and the index never goes stale.
#[derive(Default)]
struct TokenTable {
    tokens: HashMap<Uuid, AccessToken>,
    by_secret: HashMap<String, Uuid>,
}

/// In-memory access token storage backend.
///
/// Every mutating operation takes the single write lock, so
/// `revoke_others_under_session` observes and updates the whole table in
/// one step, as the trait requires.
///
/// The secret lookup here is a plain hash map probe; a production backend
/// would use a constant-time-safe lookup path instead.
#[derive(Default)]
pub struct InMemoryAccessTokenStorage {
    table: RwLock<TokenTable>,
}

impl InMemoryAccessTokenStorage {
    /// Creates an empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a pre-built token record.
    ///
    /// Intended for seeding state in tests and embedded deployments;
    /// normal issuance goes through [`AccessTokenStorage::create`].
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the id or secret already exists.
    pub async fn insert(&self, token: AccessToken) -> AuthResult<()> {
        let mut table = self.table.write().await;

        if table.tokens.contains_key(&token.id) {
            return Err(AuthError::storage(format!(
                "duplicate access token id {}",
                token.id
            )));
        }
        if table.by_secret.contains_key(&token.token) {
            return Err(AuthError::storage("duplicate access token secret"));
        }

        table.by_secret.insert(token.token.clone(), token.id);
        table.tokens.insert(token.id, token);
        Ok(())
    }
}

#[async_trait]
impl AccessTokenStorage for InMemoryAccessTokenStorage {
    async fn create(&self, session_id: Uuid, expires_in_seconds: i64) -> AuthResult<AccessToken> {
        let token = AccessToken::new(session_id, expires_in_seconds);
        self.insert(token.clone()).await?;
        Ok(token)
    }

    async fn find_by_id(&self, id: Uuid) -> AuthResult<Option<AccessToken>> {
        let table = self.table.read().await;
        Ok(table.tokens.get(&id).cloned())
    }

    async fn find_by_token(&self, token: &str) -> AuthResult<Option<AccessToken>> {
        let table = self.table.read().await;
        Ok(table
            .by_secret
            .get(token)
            .and_then(|id| table.tokens.get(id))
            .cloned())
    }

    async fn revoke_others_under_session(
        &self,
        session_id: Uuid,
        exclude_id: Uuid,
    ) -> AuthResult<u64> {
        let now = OffsetDateTime::now_utc();
        let mut table = self.table.write().await;

        let mut revoked = 0u64;
        for token in table.tokens.values_mut() {
            if token.session_id == session_id
                && token.id != exclude_id
                && token.revoked_at.is_none()
            {
                token.revoked_at = Some(now);
                revoked += 1;
            }
        }

        Ok(revoked)
    }

    async fn revoke(&self, id: Uuid) -> AuthResult<()> {
        let mut table = self.table.write().await;
        let token = table
            .tokens
            .get_mut(&id)
            .ok_or_else(|| AuthError::not_found(format!("access token {id}")))?;

        // Idempotent: the first timestamp is never overwritten
        if token.revoked_at.is_none() {
            token.revoked_at = Some(OffsetDateTime::now_utc());
        }

        Ok(())
    }

    async fn list_by_session(&self, session_id: Uuid) -> AuthResult<Vec<AccessToken>> {
        let table = self.table.read().await;
        Ok(table
            .tokens
            .values()
            .filter(|token| token.session_id == session_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_find() {
        let storage = InMemoryAccessTokenStorage::new();
        let session_id = Uuid::new_v4();

        let token = storage.create(session_id, 3600).await.unwrap();

        let by_id = storage.find_by_id(token.id).await.unwrap().unwrap();
        assert_eq!(by_id.session_id, session_id);

        let by_secret = storage.find_by_token(&token.token).await.unwrap().unwrap();
        assert_eq!(by_secret.id, token.id);

        assert!(storage.find_by_token("no-such-secret").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicates() {
        let storage = InMemoryAccessTokenStorage::new();
        let token = AccessToken::new(Uuid::new_v4(), 3600);

        storage.insert(token.clone()).await.unwrap();
        let err = storage.insert(token).await.unwrap_err();
        assert!(matches!(err, AuthError::Storage { .. }));
    }

    #[tokio::test]
    async fn test_revoke_is_idempotent() {
        let storage = InMemoryAccessTokenStorage::new();
        let token = storage.create(Uuid::new_v4(), 3600).await.unwrap();

        storage.revoke(token.id).await.unwrap();
        let first = storage
            .find_by_id(token.id)
            .await
            .unwrap()
            .unwrap()
            .revoked_at
            .unwrap();

        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        storage.revoke(token.id).await.unwrap();
        let second = storage
            .find_by_id(token.id)
            .await
            .unwrap()
            .unwrap()
            .revoked_at
            .unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_revoke_unknown_id() {
        let storage = InMemoryAccessTokenStorage::new();
        let err = storage.revoke(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AuthError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_revoke_others_excludes_given_id() {
        let storage = InMemoryAccessTokenStorage::new();
        let session_id = Uuid::new_v4();

        let a = storage.create(session_id, 3600).await.unwrap();
        let b = storage.create(session_id, 3600).await.unwrap();
        let c = storage.create(session_id, 3600).await.unwrap();
        let other = storage.create(Uuid::new_v4(), 3600).await.unwrap();

        let revoked = storage
            .revoke_others_under_session(session_id, a.id)
            .await
            .unwrap();
        assert_eq!(revoked, 2);

        let a = storage.find_by_id(a.id).await.unwrap().unwrap();
        assert!(a.revoked_at.is_none());

        for id in [b.id, c.id] {
            let token = storage.find_by_id(id).await.unwrap().unwrap();
            assert!(token.revoked_at.is_some());
        }

        // Tokens under other sessions are untouched
        let other = storage.find_by_id(other.id).await.unwrap().unwrap();
        assert!(other.revoked_at.is_none());

        // Second call finds nothing left to revoke
        let revoked = storage
            .revoke_others_under_session(session_id, a.id)
            .await
            .unwrap();
        assert_eq!(revoked, 0);
    }

    #[tokio::test]
    async fn test_list_by_session() {
        let storage = InMemoryAccessTokenStorage::new();
        let session_id = Uuid::new_v4();

        storage.create(session_id, 3600).await.unwrap();
        storage.create(session_id, 3600).await.unwrap();
        storage.create(Uuid::new_v4(), 3600).await.unwrap();

        let tokens = storage.list_by_session(session_id).await.unwrap();
        assert_eq!(tokens.len(), 2);
        assert!(tokens.iter().all(|t| t.session_id == session_id));
    }
}
