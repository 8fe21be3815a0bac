//! The central domain logic and interface definitions for the blog platform.
//!
//! Nothing in here performs I/O: adapters implement [`ports`], services
//! orchestrate them, and the rules that decide who may do what live in
//! [`policy`] and [`moderation`].

pub mod errors;
pub mod models;
pub mod moderation;
pub mod policy;
pub mod ports;
pub mod threading;

// Re-exporting for easier access in other crates
pub use errors::*;
pub use models::*;
pub use ports::*;
