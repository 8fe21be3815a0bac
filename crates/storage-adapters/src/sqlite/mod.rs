//! # SQLite implementation
//!
//! Maps the relational model to `domains` models. Cascades and the flag
//! uniqueness rule are enforced by the schema (see `migrations/`); this layer
//! translates their violations into `DomainError`s.

mod accounts;
mod comments;
mod flags;
mod likes;
mod posts;
mod roles;
mod stats;

use domains::{ContentKind, DomainError};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// One pool, every repository port.
#[derive(Clone, Debug)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Opens (creating if needed) the database at `url` with foreign keys on.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;
        Ok(Self { pool })
    }

    /// A private in-memory database, already migrated.
    ///
    /// Every connection to `sqlite::memory:` sees its own database, so the
    /// pool is pinned to a single connection that is never recycled.
    pub async fn in_memory() -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        MIGRATOR.run(&self.pool).await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Table and content-column names for likes and flags of one content kind.
struct ContentTables {
    likes: &'static str,
    flags: &'static str,
    column: &'static str,
}

fn tables(kind: ContentKind) -> ContentTables {
    match kind {
        ContentKind::Post => ContentTables { likes: "blog_likes", flags: "flagged_blogs", column: "blog_id" },
        ContentKind::Comment => ContentTables {
            likes: "comment_likes",
            flags: "flagged_comments",
            column: "comment_id",
        },
    }
}

/// Translates driver errors; integrity violations become `Conflict` with the
/// given message.
fn translate(err: sqlx::Error, conflict: impl Into<String>) -> DomainError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() || db.is_foreign_key_violation() => {
            DomainError::Conflict(conflict.into())
        }
        sqlx::Error::Database(db) if db.is_check_violation() => {
            DomainError::Validation(db.message().to_string())
        }
        _ => {
            tracing::error!(error = %err, "database error");
            DomainError::internal("database error")
        }
    }
}

fn db_err(err: sqlx::Error) -> DomainError {
    translate(err, "integrity constraint violated")
}
