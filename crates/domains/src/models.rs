//! # Domain Models
//!
//! These structs represent the core entities of the blog platform.
//! Identifiers are store-assigned integers; timestamps are always UTC.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub type AccountId = i64;
pub type RoleId = i64;
pub type PostId = i64;
pub type CommentId = i64;
pub type FlagId = i64;

/// The closed set of roles the authorization layer understands.
///
/// Role rows in the store carry free-form names so administrators can add
/// their own, but only these four names ever satisfy a gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleKind {
    Admin,
    Moderator,
    Author,
    User,
}

impl RoleKind {
    pub const ALL: [RoleKind; 4] = [
        RoleKind::Admin,
        RoleKind::Moderator,
        RoleKind::Author,
        RoleKind::User,
    ];

    /// Lowest-privilege role, assigned on registration and on revoke.
    pub const DEFAULT: RoleKind = RoleKind::User;

    pub fn as_str(&self) -> &'static str {
        match self {
            RoleKind::Admin => "admin",
            RoleKind::Moderator => "moderator",
            RoleKind::Author => "author",
            RoleKind::User => "user",
        }
    }

    /// Exact, case-sensitive match against the stored role name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }
}

impl fmt::Display for RoleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: RoleId,
    /// Unique, at most 20 characters.
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Role {
    pub fn kind(&self) -> Option<RoleKind> {
        RoleKind::from_name(&self.name)
    }

    pub fn is_builtin(&self) -> bool {
        self.kind().is_some()
    }
}

/// A registered user. Always carries exactly one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub role: Role,
}

impl Account {
    pub fn role_kind(&self) -> Option<RoleKind> {
        self.role.kind()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub email: String,
    pub password_hash: String,
    pub name: String,
}

/// Partial profile update; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AccountChanges {
    pub email: Option<String>,
    pub name: Option<String>,
}

/// A blog post, exclusively owned by one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub main_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub owner_id: AccountId,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub main_image_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub main_image_url: Option<String>,
}

/// A comment on a post. `parent_id` points at another comment on the same
/// post when this is a reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub owner_id: AccountId,
    pub post_id: PostId,
    pub parent_id: Option<CommentId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub content: String,
    pub post_id: PostId,
    pub parent_id: Option<CommentId>,
}

/// Which table a flag or like refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Post,
    Comment,
}

impl ContentKind {
    pub fn label(&self) -> &'static str {
        match self {
            ContentKind::Post => "Blog",
            ContentKind::Comment => "Comment",
        }
    }
}

/// A pending-review marker left by one account on one content item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flag {
    pub id: FlagId,
    pub created_at: DateTime<Utc>,
    pub kind: ContentKind,
    pub content_id: i64,
    /// Cleared (not deleted) when the flagging account goes away.
    pub account_id: Option<AccountId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeSummary {
    pub content_id: i64,
    pub likes_count: usize,
    pub user_ids: Vec<AccountId>,
}

/// Aggregate counts shown on the admin dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformStats {
    pub total_users: i64,
    pub total_blog_posts: i64,
    pub total_blog_likes: i64,
    pub total_comments: i64,
    pub total_comment_likes: i64,
    pub flagged_blogs: i64,
    pub flagged_comments: i64,
    pub total_roles: i64,
}

/// Claims embedded in a session token.
///
/// `sub` is the account id and is what identifies the caller; the email can
/// change over an account's life and is informational only, like `role`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: AccountId,
    pub email: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub ttl_seconds: i64,
}

/// Raw credential material found on an inbound request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// Value of the `access_token` cookie.
    pub cookie_token: Option<String>,
    /// Token from an `Authorization: Bearer` header.
    pub bearer_token: Option<String>,
}

impl Credentials {
    /// The cookie wins when both are present.
    pub fn token(&self) -> Option<&str> {
        self.cookie_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .or_else(|| self.bearer_token.as_deref().filter(|t| !t.is_empty()))
    }
}
