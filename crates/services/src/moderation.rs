//! # Moderation Workflow
//!
//! Flagging by readers and review by admins/moderators. The per-content
//! state machine itself lives in `domains::moderation`; this service loads
//! the content, runs the gates and applies the transition to the store.

use std::sync::Arc;

use domains::moderation::{ensure_not_self_flag, select_review_target, ReviewDecision, ReviewOutcome};
use domains::policy::{authorize, RoleGated};
use domains::{
    Account, AccountId, CommentRepository, ContentKind, DomainError, Flag, FlagId, FlagRepository,
    PostRepository, Result,
};

#[derive(Clone)]
pub struct ModerationService {
    posts: Arc<dyn PostRepository>,
    comments: Arc<dyn CommentRepository>,
    flags: Arc<dyn FlagRepository>,
}

impl ModerationService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        comments: Arc<dyn CommentRepository>,
        flags: Arc<dyn FlagRepository>,
    ) -> Self {
        Self { posts, comments, flags }
    }

    /// Owner of the content, or `NotFound` with the given message.
    async fn owner_of(&self, kind: ContentKind, id: i64, missing: &str) -> Result<AccountId> {
        let owner = match kind {
            ContentKind::Post => self.posts.find(id).await?.map(|p| p.owner_id),
            ContentKind::Comment => self.comments.find(id).await?.map(|c| c.owner_id),
        };
        owner.ok_or_else(|| DomainError::not_found(missing))
    }

    async fn flag(&self, caller: &Account, kind: ContentKind, id: i64) -> Result<Flag> {
        authorize(caller, RoleGated::FlagContent)?;
        let owner = self
            .owner_of(kind, id, &format!("{} doesn't exist", kind.label()))
            .await?;
        ensure_not_self_flag(caller, owner, kind)?;

        let flag = self.flags.create(kind, id, caller.id).await?;
        tracing::info!(flag_id = flag.id, ?kind, content_id = id, by = caller.id, "content flagged");
        Ok(flag)
    }

    pub async fn flag_post(&self, caller: &Account, post_id: i64) -> Result<Flag> {
        self.flag(caller, ContentKind::Post, post_id).await
    }

    pub async fn flag_comment(&self, caller: &Account, comment_id: i64) -> Result<Flag> {
        self.flag(caller, ContentKind::Comment, comment_id).await
    }

    /// Every open flag of the kind, oldest first.
    pub async fn list_flags(&self, caller: &Account, kind: ContentKind) -> Result<Vec<Flag>> {
        authorize(caller, RoleGated::ModerateContent)?;
        self.flags.list(kind).await
    }

    /// Resolves one flag on the content: `requested`, or the oldest.
    ///
    /// Approving drops only that flag; rejecting deletes the content, which
    /// takes every flag, like and reply with it.
    pub async fn review(
        &self,
        caller: &Account,
        kind: ContentKind,
        content_id: i64,
        decision: ReviewDecision,
        requested: Option<FlagId>,
    ) -> Result<ReviewOutcome> {
        authorize(caller, RoleGated::ModerateContent)?;
        self.owner_of(kind, content_id, &format!("{} not found", kind.label()))
            .await?;

        let open = self.flags.list_for_content(kind, content_id).await?;
        let flag = select_review_target(&open, requested, kind)?;

        let removed = match decision {
            ReviewDecision::Approve => self.flags.delete(kind, flag.id).await?,
            ReviewDecision::Reject => match kind {
                ContentKind::Post => self.posts.delete(content_id).await?,
                ContentKind::Comment => self.comments.delete(content_id).await?,
            },
        };
        if !removed {
            return Err(DomainError::conflict("Content changed during review, try again"));
        }

        let state = decision.apply(open.len());
        tracing::info!(
            flag_id = flag.id,
            ?kind,
            content_id,
            ?decision,
            by = caller.id,
            "flag reviewed"
        );
        Ok(ReviewOutcome { decision, flag, state })
    }

    pub async fn review_post(
        &self,
        caller: &Account,
        post_id: i64,
        decision: ReviewDecision,
        requested: Option<FlagId>,
    ) -> Result<ReviewOutcome> {
        self.review(caller, ContentKind::Post, post_id, decision, requested).await
    }

    pub async fn review_comment(
        &self,
        caller: &Account,
        comment_id: i64,
        decision: ReviewDecision,
        requested: Option<FlagId>,
    ) -> Result<ReviewOutcome> {
        self.review(caller, ContentKind::Comment, comment_id, decision, requested).await
    }
}
