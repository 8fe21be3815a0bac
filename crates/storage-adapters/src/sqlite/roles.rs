use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domains::{DomainError, Result, Role, RoleId, RoleRepository};

use super::{db_err, translate, SqliteStore};

#[derive(sqlx::FromRow)]
struct RoleRow {
    id: i64,
    role_name: String,
    created_at: DateTime<Utc>,
}

impl From<RoleRow> for Role {
    fn from(row: RoleRow) -> Self {
        Role { id: row.id, name: row.role_name, created_at: row.created_at }
    }
}

#[async_trait]
impl RoleRepository for SqliteStore {
    async fn list(&self) -> Result<Vec<Role>> {
        let rows = sqlx::query_as::<_, RoleRow>("SELECT id, role_name, created_at FROM roles ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Role::from).collect())
    }

    async fn find(&self, id: RoleId) -> Result<Option<Role>> {
        let row = sqlx::query_as::<_, RoleRow>("SELECT id, role_name, created_at FROM roles WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(row.map(Role::from))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Role>> {
        let row = sqlx::query_as::<_, RoleRow>(
            "SELECT id, role_name, created_at FROM roles WHERE role_name = ?",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(row.map(Role::from))
    }

    async fn create(&self, name: &str) -> Result<Role> {
        let created_at = Utc::now();
        let id = sqlx::query("INSERT INTO roles (role_name, created_at) VALUES (?, ?)")
            .bind(name)
            .bind(created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| translate(e, format!("Role '{name}' already exists.")))?
            .last_insert_rowid();

        Ok(Role { id, name: name.to_string(), created_at })
    }

    async fn rename(&self, id: RoleId, name: &str) -> Result<Role> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        let affected = sqlx::query("UPDATE roles SET role_name = ? WHERE id = ?")
            .bind(name)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| translate(e, format!("Role name '{name}' already exists.")))?
            .rows_affected();
        if affected == 0 {
            return Err(DomainError::not_found(format!("Role id: '{id}' doesn't exist.")));
        }

        let row = sqlx::query_as::<_, RoleRow>("SELECT id, role_name, created_at FROM roles WHERE id = ?")
            .bind(id)
            .fetch_one(&mut *tx)
            .await
            .map_err(db_err)?;
        tx.commit().await.map_err(db_err)?;
        Ok(row.into())
    }

    async fn delete(&self, id: RoleId) -> Result<bool> {
        const IN_USE: &str = "Role is assigned to users, cannot delete.";
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        let held: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE role_id = ?)")
            .bind(id)
            .fetch_one(&mut *tx)
            .await
            .map_err(db_err)?;
        if held {
            return Err(DomainError::conflict(IN_USE));
        }

        let result = sqlx::query("DELETE FROM roles WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| translate(e, IN_USE))?;
        tx.commit().await.map_err(db_err)?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domains::{AccountRepository, NewAccount};

    #[tokio::test]
    async fn test_create_and_rename() {
        let store = SqliteStore::in_memory().await.unwrap();
        let role = RoleRepository::create(&store, "editor").await.unwrap();
        assert_eq!(store.find_by_name("editor").await.unwrap(), Some(role.clone()));

        let renamed = store.rename(role.id, "copyeditor").await.unwrap();
        assert_eq!(renamed.name, "copyeditor");
        assert_eq!(renamed.id, role.id);
    }

    #[tokio::test]
    async fn test_duplicate_names_conflict() {
        let store = SqliteStore::in_memory().await.unwrap();
        assert!(matches!(
            RoleRepository::create(&store, "admin").await,
            Err(DomainError::Conflict(_))
        ));

        let editor = RoleRepository::create(&store, "editor").await.unwrap();
        assert!(matches!(store.rename(editor.id, "author").await, Err(DomainError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_delete_blocked_while_referenced() {
        let store = SqliteStore::in_memory().await.unwrap();
        let editor = RoleRepository::create(&store, "editor").await.unwrap();
        let account = AccountRepository::create(
            &store,
            NewAccount { email: "e@example.com".into(), password_hash: "h".into(), name: "ed".into() },
        )
        .await
        .unwrap();
        store.set_role(account.id, editor.id).await.unwrap();

        assert_eq!(
            RoleRepository::delete(&store, editor.id).await,
            Err(DomainError::Conflict("Role is assigned to users, cannot delete.".into()))
        );

        AccountRepository::delete(&store, account.id).await.unwrap();
        assert_eq!(RoleRepository::delete(&store, editor.id).await, Ok(true));
        assert_eq!(RoleRepository::find(&store, editor.id).await, Ok(None));
    }

    #[tokio::test]
    async fn test_overlong_name_is_a_validation_error() {
        let store = SqliteStore::in_memory().await.unwrap();
        let err = RoleRepository::create(&store, &"x".repeat(21)).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
