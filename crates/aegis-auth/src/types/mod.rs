//! Domain types for the token lifecycle service.

pub mod access_token;
pub mod session;

pub use access_token::AccessToken;
pub use session::OAuthSession;
