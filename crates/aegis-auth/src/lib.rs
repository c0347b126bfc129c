//! # aegis-auth
//!
//! Access token lifecycle service for the Aegis authentication subsystem.
//!
//! This crate provides:
//! - Issuance of session-bound access tokens with random secrets
//! - Availability checks composed from expiry and revocation
//! - Single-active-token enforcement (using a token cascade-revokes its
//!   siblings under the same session)
//! - Explicit, idempotent revocation with audit retention
//!
//! ## Overview
//!
//! The service is deliberately independent of any web framework or ORM.
//! HTTP/RPC layers, grant-flow negotiation (authorization code exchange,
//! PKCE, scopes), and session ownership are external collaborators; this
//! crate only manages tokens that have already been issued to a session.
//!
//! ## Modules
//!
//! - [`config`] - Lifecycle configuration
//! - [`error`] - Error types
//! - [`types`] - Access token and session domain types
//! - [`storage`] - Storage traits (token store, session registry)
//! - [`token`] - The lifecycle service

pub mod config;
pub mod error;
pub mod storage;
pub mod token;
pub mod types;

pub use config::{AuthConfig, ConfigError};
pub use error::AuthError;
pub use storage::{AccessTokenStorage, SessionRegistry};
pub use token::AccessTokenService;
pub use types::{AccessToken, OAuthSession};

/// Type alias for token lifecycle results.
pub type AuthResult<T> = Result<T, AuthError>;
