//! Storage traits for token lifecycle data.
//!
//! This module defines the persistence interfaces consumed by the
//! lifecycle service:
//!
//! - Access token records (CRUD plus atomic bulk-revoke)
//! - The external session registry (read-only)
//!
//! # Implementations
//!
//! Storage implementations are provided in separate crates:
//!
//! - `aegis-auth-memory` - in-memory backend

pub mod access_token;
pub mod session;

pub use access_token::AccessTokenStorage;
pub use session::SessionRegistry;
