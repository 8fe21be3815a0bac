//! # Core Traits (Ports)
//!
//! Storage and credential adapters implement these; services depend only on
//! the trait objects. Every mutating repository method is atomic: it either
//! commits fully or leaves the store unchanged.

use async_trait::async_trait;

use crate::errors::Result;
use crate::models::{
    Account, AccountChanges, AccountId, Claims, Comment, CommentId, ContentKind, Flag, FlagId,
    IssuedToken, NewAccount, NewComment, NewPost, PlatformStats, Post, PostChanges, PostId, Role,
    RoleId,
};

/// Persistence contract for accounts.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Inserts the account with the default (`user`) role.
    /// Fails with `Conflict` on a duplicate email.
    async fn create(&self, account: NewAccount) -> Result<Account>;
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>>;
    async fn update_profile(&self, id: AccountId, changes: AccountChanges) -> Result<Account>;
    /// Fails with `NotFound` when either the account or the role is missing.
    async fn set_role(&self, id: AccountId, role_id: RoleId) -> Result<Account>;
    /// Cascades to owned posts, comments and likes; nulls authored flags.
    async fn delete(&self, id: AccountId) -> Result<bool>;
}

/// Persistence contract for roles.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait RoleRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Role>>;
    async fn find(&self, id: RoleId) -> Result<Option<Role>>;
    async fn find_by_name(&self, name: &str) -> Result<Option<Role>>;
    /// Fails with `Conflict` on a duplicate name.
    async fn create(&self, name: &str) -> Result<Role>;
    async fn rename(&self, id: RoleId, name: &str) -> Result<Role>;
    /// Fails with `Conflict` while any account still holds the role.
    async fn delete(&self, id: RoleId) -> Result<bool>;
}

/// Persistence contract for blog posts.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Post>>;
    async fn find(&self, id: PostId) -> Result<Option<Post>>;
    async fn create(&self, owner: AccountId, post: NewPost) -> Result<Post>;
    async fn update(&self, id: PostId, changes: PostChanges) -> Result<Post>;
    /// Cascades to comments, likes and flags.
    async fn delete(&self, id: PostId) -> Result<bool>;
}

/// Persistence contract for comments.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Ordered by creation.
    async fn list_for_post(&self, post_id: PostId) -> Result<Vec<Comment>>;
    async fn find(&self, id: CommentId) -> Result<Option<Comment>>;
    async fn create(&self, owner: AccountId, comment: NewComment) -> Result<Comment>;
    async fn update_content(&self, id: CommentId, content: String) -> Result<Comment>;
    /// Cascades to replies, likes and flags.
    async fn delete(&self, id: CommentId) -> Result<bool>;
}

/// Account <-> content like sets.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait LikeRepository: Send + Sync {
    /// Adds the like if absent, removes it if present. Returns whether the
    /// account likes the content afterwards.
    async fn toggle(&self, kind: ContentKind, content_id: i64, account: AccountId) -> Result<bool>;
    async fn likers(&self, kind: ContentKind, content_id: i64) -> Result<Vec<AccountId>>;
}

/// Moderation flag records.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait FlagRepository: Send + Sync {
    /// Fails with `Conflict` when this account already flagged this content.
    async fn create(&self, kind: ContentKind, content_id: i64, account: AccountId) -> Result<Flag>;
    async fn list(&self, kind: ContentKind) -> Result<Vec<Flag>>;
    /// Oldest first.
    async fn list_for_content(&self, kind: ContentKind, content_id: i64) -> Result<Vec<Flag>>;
    async fn delete(&self, kind: ContentKind, id: FlagId) -> Result<bool>;
}

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait StatsRepository: Send + Sync {
    async fn stats(&self) -> Result<PlatformStats>;
}

/// Slow, salted one-way password hashing.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Fails with `Validation` on an empty password.
    fn hash(&self, password: &str) -> Result<String>;
    /// Never errors on mismatch or on a malformed hash; returns `false`.
    fn verify(&self, password: &str, hash: &str) -> bool;
}

/// Signed, tamper-evident session tokens.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait TokenService: Send + Sync {
    fn issue(&self, account: AccountId, email: &str, role: &str) -> Result<IssuedToken>;
    /// Fails with `Unauthenticated` if the token is malformed, forged or expired.
    fn decode(&self, token: &str) -> Result<Claims>;
}
