//! Request bodies, query strings and response shapes.

use chrono::{DateTime, Utc};
use domains::moderation::{ModerationState, ReviewDecision, ReviewOutcome};
use domains::{Account, AccountId, CommentId, ContentKind, Flag, FlagId, LikeSummary, Role};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct CommentCreate {
    pub content: String,
    pub parent_id: Option<CommentId>,
}

#[derive(Debug, Deserialize)]
pub struct CommentUpdate {
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct RoleWrite {
    pub role_name: String,
}

#[derive(Debug, Deserialize)]
pub struct UserQuery {
    pub user_id: AccountId,
}

#[derive(Debug, Deserialize)]
pub struct ReviewQuery {
    pub approved: bool,
    pub flag_id: Option<FlagId>,
}

#[derive(Debug, Serialize)]
pub struct UserRead {
    pub id: AccountId,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub role_id: i64,
    pub role_name: String,
}

impl From<Account> for UserRead {
    fn from(account: Account) -> Self {
        UserRead {
            id: account.id,
            email: account.email,
            name: account.name,
            created_at: account.created_at,
            updated_at: account.updated_at,
            role_id: account.role.id,
            role_name: account.role.name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: UserRead,
    pub message: &'static str,
    pub access_token: String,
    pub token_type: &'static str,
}

#[derive(Debug, Serialize)]
pub struct RoleRead {
    pub id: i64,
    pub role_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<Role> for RoleRead {
    fn from(role: Role) -> Self {
        RoleRead { id: role.id, role_name: role.name, created_at: role.created_at }
    }
}

/// Serializes as `{"blog_id": n}` or `{"comment_id": n}` when flattened.
#[derive(Debug, Serialize)]
pub enum ContentRef {
    #[serde(rename = "blog_id")]
    Blog(i64),
    #[serde(rename = "comment_id")]
    Comment(i64),
}

impl ContentRef {
    fn new(kind: ContentKind, id: i64) -> Self {
        match kind {
            ContentKind::Post => ContentRef::Blog(id),
            ContentKind::Comment => ContentRef::Comment(id),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FlagRead {
    pub id: FlagId,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub target: ContentRef,
    pub user_id: Option<AccountId>,
}

impl From<Flag> for FlagRead {
    fn from(flag: Flag) -> Self {
        FlagRead {
            id: flag.id,
            created_at: flag.created_at,
            target: ContentRef::new(flag.kind, flag.content_id),
            user_id: flag.account_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LikesRead {
    #[serde(flatten)]
    pub target: ContentRef,
    pub likes_count: usize,
    pub user_ids: Vec<AccountId>,
}

impl LikesRead {
    pub fn new(kind: ContentKind, summary: LikeSummary) -> Self {
        LikesRead {
            target: ContentRef::new(kind, summary.content_id),
            likes_count: summary.likes_count,
            user_ids: summary.user_ids,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReviewRead {
    pub message: String,
    pub decision: ReviewDecision,
    pub flag: FlagRead,
    #[serde(flatten)]
    pub state: ModerationState,
}

impl From<ReviewOutcome> for ReviewRead {
    fn from(outcome: ReviewOutcome) -> Self {
        let label = outcome.flag.kind.label();
        let message = match outcome.decision {
            ReviewDecision::Approve => format!("{label} approved and removed from flagged list."),
            ReviewDecision::Reject => format!("{label} deleted due to disapproval"),
        };
        ReviewRead {
            message,
            decision: outcome.decision,
            flag: outcome.flag.into(),
            state: outcome.state,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Message { message: message.into() }
    }
}

#[derive(Debug, Serialize)]
pub struct LikeToggled {
    pub message: String,
    pub liked: bool,
}

impl LikeToggled {
    pub fn new(kind: ContentKind, liked: bool) -> Self {
        let action = if liked { "liked" } else { "unliked" };
        LikeToggled { message: format!("{} {action} successfully.", kind.label()), liked }
    }
}
