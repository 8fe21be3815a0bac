use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domains::{AccountId, DomainError, NewPost, Post, PostChanges, PostId, PostRepository, Result};

use super::{db_err, translate, SqliteStore};

const SELECT_POST: &str =
    "SELECT id, title, content, main_image_url, created_at, updated_at, owner_id FROM blogs";

#[derive(sqlx::FromRow)]
struct PostRow {
    id: i64,
    title: String,
    content: String,
    main_image_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    owner_id: i64,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Post {
            id: row.id,
            title: row.title,
            content: row.content,
            main_image_url: row.main_image_url,
            created_at: row.created_at,
            updated_at: row.updated_at,
            owner_id: row.owner_id,
        }
    }
}

#[async_trait]
impl PostRepository for SqliteStore {
    async fn list(&self) -> Result<Vec<Post>> {
        let rows = sqlx::query_as::<_, PostRow>(&format!("{SELECT_POST} ORDER BY id"))
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Post::from).collect())
    }

    async fn find(&self, id: PostId) -> Result<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(&format!("{SELECT_POST} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(row.map(Post::from))
    }

    async fn create(&self, owner: AccountId, post: NewPost) -> Result<Post> {
        let created_at = Utc::now();
        let id = sqlx::query(
            "INSERT INTO blogs (title, content, main_image_url, created_at, owner_id) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&post.title)
        .bind(&post.content)
        .bind(&post.main_image_url)
        .bind(created_at)
        .bind(owner)
        .execute(&self.pool)
        .await
        .map_err(|e| translate(e, "Error occured while adding new blog"))?
        .last_insert_rowid();

        Ok(Post {
            id,
            title: post.title,
            content: post.content,
            main_image_url: post.main_image_url,
            created_at,
            updated_at: None,
            owner_id: owner,
        })
    }

    async fn update(&self, id: PostId, changes: PostChanges) -> Result<Post> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        let affected = sqlx::query(
            "UPDATE blogs SET title = COALESCE(?, title), content = COALESCE(?, content), \
             main_image_url = COALESCE(?, main_image_url), updated_at = ? WHERE id = ?",
        )
        .bind(&changes.title)
        .bind(&changes.content)
        .bind(&changes.main_image_url)
        .bind(Utc::now())
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| translate(e, "Could not update blog, an integrity error occurred"))?
        .rows_affected();
        if affected == 0 {
            return Err(DomainError::not_found("Blog not found"));
        }

        let row = sqlx::query_as::<_, PostRow>(&format!("{SELECT_POST} WHERE id = ?"))
            .bind(id)
            .fetch_one(&mut *tx)
            .await
            .map_err(db_err)?;
        tx.commit().await.map_err(db_err)?;
        Ok(row.into())
    }

    async fn delete(&self, id: PostId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM blogs WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| translate(e, "Could not delete blog, error occured."))?;
        Ok(result.rows_affected() > 0)
    }
}
