//! # storage-adapters
//!
//! Content Repository implementations. The SQLite adapter implements every
//! repository port on a single [`SqliteStore`](sqlite::SqliteStore) so one
//! pool backs the whole application.

#[cfg(feature = "db-sqlite")]
pub mod sqlite;

#[cfg(feature = "db-sqlite")]
pub use sqlite::SqliteStore;
