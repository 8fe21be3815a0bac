use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domains::{
    AccountId, Comment, CommentId, CommentRepository, DomainError, NewComment, PostId, Result,
};

use super::{db_err, translate, SqliteStore};

const SELECT_COMMENT: &str =
    "SELECT id, content, created_at, updated_at, owner_id, blog_id, parent_id FROM comments";

#[derive(sqlx::FromRow)]
struct CommentRow {
    id: i64,
    content: String,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    owner_id: i64,
    blog_id: i64,
    parent_id: Option<i64>,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Comment {
            id: row.id,
            content: row.content,
            created_at: row.created_at,
            updated_at: row.updated_at,
            owner_id: row.owner_id,
            post_id: row.blog_id,
            parent_id: row.parent_id,
        }
    }
}

#[async_trait]
impl CommentRepository for SqliteStore {
    async fn list_for_post(&self, post_id: PostId) -> Result<Vec<Comment>> {
        let rows = sqlx::query_as::<_, CommentRow>(&format!(
            "{SELECT_COMMENT} WHERE blog_id = ? ORDER BY id"
        ))
        .bind(post_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.into_iter().map(Comment::from).collect())
    }

    async fn find(&self, id: CommentId) -> Result<Option<Comment>> {
        let row = sqlx::query_as::<_, CommentRow>(&format!("{SELECT_COMMENT} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(row.map(Comment::from))
    }

    async fn create(&self, owner: AccountId, comment: NewComment) -> Result<Comment> {
        let created_at = Utc::now();
        let id = sqlx::query(
            "INSERT INTO comments (content, created_at, owner_id, blog_id, parent_id) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&comment.content)
        .bind(created_at)
        .bind(owner)
        .bind(comment.post_id)
        .bind(comment.parent_id)
        .execute(&self.pool)
        .await
        .map_err(|e| translate(e, "Database integrity issue occured."))?
        .last_insert_rowid();

        Ok(Comment {
            id,
            content: comment.content,
            created_at,
            updated_at: None,
            owner_id: owner,
            post_id: comment.post_id,
            parent_id: comment.parent_id,
        })
    }

    async fn update_content(&self, id: CommentId, content: String) -> Result<Comment> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        let affected = sqlx::query("UPDATE comments SET content = ?, updated_at = ? WHERE id = ?")
            .bind(&content)
            .bind(Utc::now())
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?
            .rows_affected();
        if affected == 0 {
            return Err(DomainError::not_found("Comment not found"));
        }

        let row = sqlx::query_as::<_, CommentRow>(&format!("{SELECT_COMMENT} WHERE id = ?"))
            .bind(id)
            .fetch_one(&mut *tx)
            .await
            .map_err(db_err)?;
        tx.commit().await.map_err(db_err)?;
        Ok(row.into())
    }

    async fn delete(&self, id: CommentId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| translate(e, "Integrity error occured."))?;
        Ok(result.rows_affected() > 0)
    }
}
