use async_trait::async_trait;
use domains::{PlatformStats, Result, StatsRepository};
use sqlx::Row;

use super::{db_err, SqliteStore};

#[async_trait]
impl StatsRepository for SqliteStore {
    async fn stats(&self) -> Result<PlatformStats> {
        let row = sqlx::query(
            "SELECT \
                (SELECT COUNT(*) FROM users)            AS total_users, \
                (SELECT COUNT(*) FROM blogs)            AS total_blog_posts, \
                (SELECT COUNT(*) FROM blog_likes)       AS total_blog_likes, \
                (SELECT COUNT(*) FROM comments)         AS total_comments, \
                (SELECT COUNT(*) FROM comment_likes)    AS total_comment_likes, \
                (SELECT COUNT(*) FROM flagged_blogs)    AS flagged_blogs, \
                (SELECT COUNT(*) FROM flagged_comments) AS flagged_comments, \
                (SELECT COUNT(*) FROM roles)            AS total_roles",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(PlatformStats {
            total_users: row.get("total_users"),
            total_blog_posts: row.get("total_blog_posts"),
            total_blog_likes: row.get("total_blog_likes"),
            total_comments: row.get("total_comments"),
            total_comment_likes: row.get("total_comment_likes"),
            flagged_blogs: row.get("flagged_blogs"),
            flagged_comments: row.get("flagged_comments"),
            total_roles: row.get("total_roles"),
        })
    }
}
