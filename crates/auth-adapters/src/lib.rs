//! # auth-adapters
//!
//! Credential Service implementations: Argon2id password hashing and
//! HMAC-signed session tokens.

pub mod password;
#[cfg(feature = "auth-jwt")]
pub mod jwt;

pub use password::ArgonHasher;
#[cfg(feature = "auth-jwt")]
pub use jwt::JwtTokenService;
