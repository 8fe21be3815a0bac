//! Blog posts and their likes.

use std::sync::Arc;

use domains::policy::{authorize, authorize_owned, OwnerGated, RoleGated};
use domains::{
    Account, ContentKind, DomainError, LikeRepository, LikeSummary, NewPost, Post, PostChanges,
    PostId, PostRepository, Result,
};

use crate::validation;

fn post_missing() -> DomainError {
    DomainError::not_found("Blog doesn't exist")
}

#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    likes: Arc<dyn LikeRepository>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostRepository>, likes: Arc<dyn LikeRepository>) -> Self {
        Self { posts, likes }
    }

    pub async fn list(&self) -> Result<Vec<Post>> {
        self.posts.list().await
    }

    pub async fn get(&self, id: PostId) -> Result<Post> {
        self.posts.find(id).await?.ok_or_else(post_missing)
    }

    pub async fn create(&self, caller: &Account, post: NewPost) -> Result<Post> {
        authorize(caller, RoleGated::CreatePost)?;
        validation::title(&post.title)?;
        validation::body(&post.content)?;

        let post = self.posts.create(caller.id, post).await?;
        tracing::info!(post_id = post.id, owner_id = caller.id, "post created");
        Ok(post)
    }

    /// Owner only.
    pub async fn update(&self, caller: &Account, id: PostId, changes: PostChanges) -> Result<Post> {
        let post = authorize_owned(caller, OwnerGated::UpdatePost, self.posts.find(id).await?)?;
        if let Some(title) = &changes.title {
            validation::title(title)?;
        }
        if let Some(content) = &changes.content {
            validation::body(content)?;
        }
        self.posts.update(post.id, changes).await
    }

    /// Owner, admin or moderator.
    pub async fn delete(&self, caller: &Account, id: PostId) -> Result<()> {
        let post = authorize_owned(caller, OwnerGated::DeletePost, self.posts.find(id).await?)?;
        if !self.posts.delete(post.id).await? {
            return Err(post_missing());
        }
        tracing::info!(post_id = post.id, by = caller.id, "post deleted");
        Ok(())
    }

    /// Likes the post, or removes an existing like. Returns whether the
    /// caller now likes it.
    pub async fn toggle_like(&self, caller: &Account, id: PostId) -> Result<bool> {
        let post = self.get(id).await?;
        self.likes.toggle(ContentKind::Post, post.id, caller.id).await
    }

    pub async fn likes(&self, id: PostId) -> Result<LikeSummary> {
        let post = self.get(id).await?;
        let user_ids = self.likes.likers(ContentKind::Post, post.id).await?;
        Ok(LikeSummary { content_id: post.id, likes_count: user_ids.len(), user_ids })
    }
}
