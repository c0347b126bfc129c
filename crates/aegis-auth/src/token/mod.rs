//! Token lifecycle management.

pub mod service;

pub use service::AccessTokenService;
