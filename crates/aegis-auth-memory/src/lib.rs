//! # aegis-auth-memory
//!
//! In-memory implementations of the `aegis-auth` storage traits.
//!
//! This is the reference backend: it is used as the test double for the
//! lifecycle service and is suitable for embedded or single-process
//! deployments where durability is not required.
//!
//! All mutations go through a single write lock per table, which gives the
//! atomicity the storage traits require without further coordination.

pub mod access_token;
pub mod session;

pub use access_token::InMemoryAccessTokenStorage;
pub use session::InMemorySessionRegistry;
