use async_trait::async_trait;
use chrono::Utc;
use domains::{AccountId, ContentKind, LikeRepository, Result};

use super::{db_err, tables, translate, SqliteStore};

#[async_trait]
impl LikeRepository for SqliteStore {
    async fn toggle(&self, kind: ContentKind, content_id: i64, account: AccountId) -> Result<bool> {
        let t = tables(kind);
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        let removed = sqlx::query(&format!("DELETE FROM {} WHERE user_id = ? AND {} = ?", t.likes, t.column))
            .bind(account)
            .bind(content_id)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?
            .rows_affected();

        if removed == 0 {
            sqlx::query(&format!("INSERT INTO {} (user_id, {}, created_at) VALUES (?, ?, ?)", t.likes, t.column))
                .bind(account)
                .bind(content_id)
                .bind(Utc::now())
                .execute(&mut *tx)
                .await
                .map_err(|e| translate(e, format!("{} no longer exists", kind.label())))?;
        }

        tx.commit().await.map_err(db_err)?;
        Ok(removed == 0)
    }

    async fn likers(&self, kind: ContentKind, content_id: i64) -> Result<Vec<AccountId>> {
        let t = tables(kind);
        sqlx::query_scalar(&format!("SELECT user_id FROM {} WHERE {} = ? ORDER BY user_id", t.likes, t.column))
            .bind(content_id)
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)
    }
}
