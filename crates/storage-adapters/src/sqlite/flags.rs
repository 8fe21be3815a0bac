use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domains::{AccountId, ContentKind, Flag, FlagId, FlagRepository, Result};
use sqlx::Row;

use super::{db_err, tables, translate, SqliteStore};

fn select_flags(kind: ContentKind) -> String {
    let t = tables(kind);
    format!("SELECT id, created_at, {} AS content_id, user_id FROM {}", t.column, t.flags)
}

fn flag_from_row(kind: ContentKind, row: &sqlx::sqlite::SqliteRow) -> Flag {
    Flag {
        id: row.get("id"),
        created_at: row.get::<DateTime<Utc>, _>("created_at"),
        kind,
        content_id: row.get("content_id"),
        account_id: row.get("user_id"),
    }
}

#[async_trait]
impl FlagRepository for SqliteStore {
    async fn create(&self, kind: ContentKind, content_id: i64, account: AccountId) -> Result<Flag> {
        let t = tables(kind);
        let created_at = Utc::now();
        let id = sqlx::query(&format!("INSERT INTO {} (created_at, {}, user_id) VALUES (?, ?, ?)", t.flags, t.column))
            .bind(created_at)
            .bind(content_id)
            .bind(account)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                translate(e, format!("You have already flagged this {}.", kind.label().to_lowercase()))
            })?
            .last_insert_rowid();

        Ok(Flag { id, created_at, kind, content_id, account_id: Some(account) })
    }

    async fn list(&self, kind: ContentKind) -> Result<Vec<Flag>> {
        let rows = sqlx::query(&format!("{} ORDER BY id", select_flags(kind)))
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(rows.iter().map(|row| flag_from_row(kind, row)).collect())
    }

    async fn list_for_content(&self, kind: ContentKind, content_id: i64) -> Result<Vec<Flag>> {
        let t = tables(kind);
        let rows = sqlx::query(&format!("{} WHERE {} = ? ORDER BY id", select_flags(kind), t.column))
            .bind(content_id)
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(rows.iter().map(|row| flag_from_row(kind, row)).collect())
    }

    async fn delete(&self, kind: ContentKind, id: FlagId) -> Result<bool> {
        let t = tables(kind);
        let result = sqlx::query(&format!("DELETE FROM {} WHERE id = ?", t.flags))
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domains::{
        AccountRepository, CommentRepository, DomainError, NewAccount, NewComment, NewPost,
        PostRepository,
    };

    struct Fixture {
        store: SqliteStore,
        owner: AccountId,
        flagger: AccountId,
        other: AccountId,
        post: i64,
    }

    async fn fixture() -> Fixture {
        let store = SqliteStore::in_memory().await.unwrap();
        let mut ids = Vec::new();
        for email in ["owner@example.com", "flagger@example.com", "other@example.com"] {
            let account = AccountRepository::create(
                &store,
                NewAccount { email: email.into(), password_hash: "h".into(), name: "n".into() },
            )
            .await
            .unwrap();
            ids.push(account.id);
        }
        let post = PostRepository::create(
            &store,
            ids[0],
            NewPost { title: "t".into(), content: "c".into(), main_image_url: None },
        )
        .await
        .unwrap();
        Fixture { store, owner: ids[0], flagger: ids[1], other: ids[2], post: post.id }
    }

    #[tokio::test]
    async fn test_one_flag_per_account_and_content() {
        let f = fixture().await;
        FlagRepository::create(&f.store, ContentKind::Post, f.post, f.flagger).await.unwrap();
        let err = FlagRepository::create(&f.store, ContentKind::Post, f.post, f.flagger)
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::Conflict("You have already flagged this blog.".into()));

        FlagRepository::create(&f.store, ContentKind::Post, f.post, f.other).await.unwrap();
        assert_eq!(f.store.list_for_content(ContentKind::Post, f.post).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_flagger_deletion_keeps_flag_with_null_author() {
        let f = fixture().await;
        let flag = FlagRepository::create(&f.store, ContentKind::Post, f.post, f.flagger).await.unwrap();

        AccountRepository::delete(&f.store, f.flagger).await.unwrap();

        let flags = FlagRepository::list(&f.store, ContentKind::Post).await.unwrap();
        assert_eq!(flags.len(), 1);
        assert_eq!(flags[0].id, flag.id);
        assert_eq!(flags[0].account_id, None);
    }

    #[tokio::test]
    async fn test_content_deletion_removes_flags() {
        let f = fixture().await;
        let comment = CommentRepository::create(
            &f.store,
            f.owner,
            NewComment { content: "c".into(), post_id: f.post, parent_id: None },
        )
        .await
        .unwrap();
        FlagRepository::create(&f.store, ContentKind::Post, f.post, f.flagger).await.unwrap();
        FlagRepository::create(&f.store, ContentKind::Comment, comment.id, f.flagger).await.unwrap();

        PostRepository::delete(&f.store, f.post).await.unwrap();

        assert!(FlagRepository::list(&f.store, ContentKind::Post).await.unwrap().is_empty());
        assert!(FlagRepository::list(&f.store, ContentKind::Comment).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_single_flag() {
        let f = fixture().await;
        let first = FlagRepository::create(&f.store, ContentKind::Post, f.post, f.flagger).await.unwrap();
        let second = FlagRepository::create(&f.store, ContentKind::Post, f.post, f.other).await.unwrap();

        assert!(FlagRepository::delete(&f.store, ContentKind::Post, first.id).await.unwrap());
        assert!(!FlagRepository::delete(&f.store, ContentKind::Comment, second.id).await.unwrap());

        let left = f.store.list_for_content(ContentKind::Post, f.post).await.unwrap();
        assert_eq!(left.iter().map(|f| f.id).collect::<Vec<_>>(), vec![second.id]);
    }
}
