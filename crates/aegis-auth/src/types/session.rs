//! OAuth session view type.
//!
//! Sessions are owned by an external collaborator (the session registry);
//! this is the read-only shape of a session as consumed by the token
//! lifecycle service. Session metadata is never copied onto tokens; it is
//! read through the registry on every access.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// An OAuth session as seen by the token lifecycle service.
///
/// A session is the higher-level grant (resource owner + device) under
/// which access tokens are issued. Session revocation is authoritative:
/// every token under a revoked session is revoked, regardless of the
/// token's own `revoked_at` flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthSession {
    /// Unique identifier for this session.
    pub id: Uuid,

    /// Identity of the resource owner who granted this session.
    pub resource_owner: String,

    /// Human-readable name of the device the session was granted to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_name: Option<String>,

    /// Device type (e.g. "mobile", "desktop").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_type: Option<String>,

    /// Opaque device identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_identifier: Option<String>,

    /// When this session was revoked (None = not revoked).
    /// Session revocation is monotone; it is never undone.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::rfc3339::option"
    )]
    pub revoked_at: Option<OffsetDateTime>,
}

impl OAuthSession {
    /// Returns `true` if this session has been revoked.
    #[must_use]
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }
}
