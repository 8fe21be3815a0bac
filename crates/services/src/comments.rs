//! Comments, reply threads and comment likes.

use std::sync::Arc;

use domains::policy::{authorize, authorize_owned, OwnerGated, RoleGated};
use domains::threading::{build_reply_tree, CommentNode};
use domains::{
    Account, Comment, CommentId, CommentRepository, ContentKind, DomainError, LikeRepository,
    LikeSummary, NewComment, PostId, PostRepository, Result,
};

use crate::validation;

#[derive(Clone)]
pub struct CommentService {
    posts: Arc<dyn PostRepository>,
    comments: Arc<dyn CommentRepository>,
    likes: Arc<dyn LikeRepository>,
}

impl CommentService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        comments: Arc<dyn CommentRepository>,
        likes: Arc<dyn LikeRepository>,
    ) -> Self {
        Self { posts, comments, likes }
    }

    async fn ensure_post(&self, post_id: PostId) -> Result<()> {
        match self.posts.find(post_id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::not_found("Post doesn't exist")),
        }
    }

    async fn get(&self, id: CommentId) -> Result<Comment> {
        self.comments
            .find(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Comment not found"))
    }

    /// Flat, oldest first.
    pub async fn list_for_post(&self, post_id: PostId) -> Result<Vec<Comment>> {
        self.ensure_post(post_id).await?;
        self.comments.list_for_post(post_id).await
    }

    pub async fn tree_for_post(&self, post_id: PostId) -> Result<Vec<CommentNode>> {
        Ok(build_reply_tree(self.list_for_post(post_id).await?))
    }

    /// A reply's parent must exist and sit on the same post.
    pub async fn create(&self, caller: &Account, comment: NewComment) -> Result<Comment> {
        authorize(caller, RoleGated::CreateComment)?;
        validation::body(&comment.content)?;
        self.ensure_post(comment.post_id).await?;

        if let Some(parent_id) = comment.parent_id {
            let parent = self
                .comments
                .find(parent_id)
                .await?
                .ok_or_else(|| DomainError::not_found("Parent comment not found"))?;
            if parent.post_id != comment.post_id {
                return Err(DomainError::validation("Parent comment belongs to another blog"));
            }
        }

        let comment = self.comments.create(caller.id, comment).await?;
        tracing::info!(comment_id = comment.id, post_id = comment.post_id, "comment created");
        Ok(comment)
    }

    pub async fn update(&self, caller: &Account, id: CommentId, content: String) -> Result<Comment> {
        let comment = authorize_owned(caller, OwnerGated::UpdateComment, self.comments.find(id).await?)?;
        validation::body(&content)?;
        self.comments.update_content(comment.id, content).await
    }

    /// Replies go with their parent.
    pub async fn delete(&self, caller: &Account, id: CommentId) -> Result<()> {
        let comment = authorize_owned(caller, OwnerGated::DeleteComment, self.comments.find(id).await?)?;
        if !self.comments.delete(comment.id).await? {
            return Err(DomainError::not_found("Comment not found"));
        }
        tracing::info!(comment_id = comment.id, by = caller.id, "comment deleted");
        Ok(())
    }

    pub async fn toggle_like(&self, caller: &Account, id: CommentId) -> Result<bool> {
        let comment = self.get(id).await?;
        self.likes.toggle(ContentKind::Comment, comment.id, caller.id).await
    }

    pub async fn likes(&self, id: CommentId) -> Result<LikeSummary> {
        let comment = self.get(id).await?;
        let user_ids = self.likes.likers(ContentKind::Comment, comment.id).await?;
        Ok(LikeSummary { content_id: comment.id, likes_count: user_ids.len(), user_ids })
    }
}
