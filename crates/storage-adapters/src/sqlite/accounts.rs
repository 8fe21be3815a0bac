use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domains::{
    Account, AccountChanges, AccountId, AccountRepository, DomainError, NewAccount, Result, Role,
    RoleId, RoleKind,
};
use sqlx::{Sqlite, SqliteConnection};

use super::{db_err, translate, SqliteStore};

const SELECT_ACCOUNT: &str = "SELECT u.id, u.email, u.password, u.name, u.created_at, u.updated_at, \
     r.id AS role_id, r.role_name, r.created_at AS role_created_at \
     FROM users u JOIN roles r ON r.id = u.role_id";

#[derive(sqlx::FromRow)]
struct AccountRow {
    id: i64,
    email: String,
    password: String,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    role_id: i64,
    role_name: String,
    role_created_at: DateTime<Utc>,
}

impl From<AccountRow> for Account {
    fn from(row: AccountRow) -> Self {
        Account {
            id: row.id,
            email: row.email,
            password_hash: row.password,
            name: row.name,
            created_at: row.created_at,
            updated_at: row.updated_at,
            role: Role { id: row.role_id, name: row.role_name, created_at: row.role_created_at },
        }
    }
}

async fn fetch_by_id(conn: &mut SqliteConnection, id: AccountId) -> Result<Option<Account>> {
    let row = sqlx::query_as::<Sqlite, AccountRow>(&format!("{SELECT_ACCOUNT} WHERE u.id = ?"))
        .bind(id)
        .fetch_optional(conn)
        .await
        .map_err(db_err)?;
    Ok(row.map(Account::from))
}

fn account_missing() -> DomainError {
    DomainError::not_found("User doesn't exist.")
}

#[async_trait]
impl AccountRepository for SqliteStore {
    async fn create(&self, account: NewAccount) -> Result<Account> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        let role_id: Option<i64> = sqlx::query_scalar("SELECT id FROM roles WHERE role_name = ?")
            .bind(RoleKind::DEFAULT.as_str())
            .fetch_optional(&mut *tx)
            .await
            .map_err(db_err)?;
        let role_id = role_id.ok_or_else(|| DomainError::internal("default role is missing"))?;

        let id = sqlx::query(
            "INSERT INTO users (email, password, name, created_at, role_id) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(&account.name)
        .bind(Utc::now())
        .bind(role_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| translate(e, format!("Email {} is already registered.", account.email)))?
        .last_insert_rowid();

        let created = fetch_by_id(&mut tx, id).await?.ok_or_else(account_missing)?;
        tx.commit().await.map_err(db_err)?;
        Ok(created)
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>> {
        let mut conn = self.pool.acquire().await.map_err(db_err)?;
        fetch_by_id(&mut conn, id).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>> {
        let row = sqlx::query_as::<Sqlite, AccountRow>(&format!("{SELECT_ACCOUNT} WHERE u.email = ?"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(row.map(Account::from))
    }

    async fn update_profile(&self, id: AccountId, changes: AccountChanges) -> Result<Account> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        let affected = sqlx::query(
            "UPDATE users SET email = COALESCE(?, email), name = COALESCE(?, name), updated_at = ? WHERE id = ?",
        )
        .bind(&changes.email)
        .bind(&changes.name)
        .bind(Utc::now())
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| translate(e, "Email is already registered."))?
        .rows_affected();
        if affected == 0 {
            return Err(account_missing());
        }

        let updated = fetch_by_id(&mut tx, id).await?.ok_or_else(account_missing)?;
        tx.commit().await.map_err(db_err)?;
        Ok(updated)
    }

    async fn set_role(&self, id: AccountId, role_id: RoleId) -> Result<Account> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        let role_exists: Option<i64> = sqlx::query_scalar("SELECT id FROM roles WHERE id = ?")
            .bind(role_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(db_err)?;
        if role_exists.is_none() {
            return Err(DomainError::not_found("Role doesn't exist"));
        }

        let affected = sqlx::query("UPDATE users SET role_id = ?, updated_at = ? WHERE id = ?")
            .bind(role_id)
            .bind(Utc::now())
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?
            .rows_affected();
        if affected == 0 {
            return Err(account_missing());
        }

        let updated = fetch_by_id(&mut tx, id).await?.ok_or_else(account_missing)?;
        tx.commit().await.map_err(db_err)?;
        Ok(updated)
    }

    async fn delete(&self, id: AccountId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        tracing::debug!(account_id = id, removed = result.rows_affected(), "account delete");
        Ok(result.rows_affected() > 0)
    }
}
