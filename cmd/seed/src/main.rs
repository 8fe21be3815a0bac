//! Creates the first admin account, or promotes an existing one.
//!
//! Reads `SEED_ADMIN_EMAIL`, `SEED_ADMIN_PASSWORD` and `SEED_ADMIN_NAME`;
//! the database comes from the regular configuration.

use anyhow::{anyhow, Context};
use auth_adapters::ArgonHasher;
use configs::Settings;
use domains::{AccountRepository, NewAccount, PasswordHasher, RoleKind, RoleRepository};
use services::validation;
use storage_adapters::SqliteStore;

fn var(name: &str) -> anyhow::Result<String> {
    std::env::var(name).with_context(|| format!("{name} must be set"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("loading configuration")?;
    tracing_subscriber::fmt().with_env_filter(&settings.log.level).init();
    if settings.auth.uses_default_secret() {
        tracing::warn!("auth.secret_key is the built-in default; set SECRET_KEY before deploying");
    }

    let email = var("SEED_ADMIN_EMAIL")?;
    let name = std::env::var("SEED_ADMIN_NAME").unwrap_or_else(|_| "Administrator".to_string());

    let store = SqliteStore::connect(&settings.database.url, 1)
        .await
        .with_context(|| format!("opening database {}", settings.database.url))?;
    store.migrate().await.context("running migrations")?;

    let account = match store.find_by_email(&email).await? {
        Some(account) => {
            tracing::info!(account_id = account.id, "account exists, promoting");
            account
        }
        None => {
            let password = var("SEED_ADMIN_PASSWORD")?;
            validation::email(&email)?;
            validation::password(&password)?;
            validation::name(&name)?;

            let password_hash = ArgonHasher::new().hash(&password)?;
            let account = AccountRepository::create(&store, NewAccount { email, password_hash, name }).await?;
            tracing::info!(account_id = account.id, "account created");
            account
        }
    };

    let admin = store
        .find_by_name(RoleKind::Admin.as_str())
        .await?
        .ok_or_else(|| anyhow!("the admin role is missing; were migrations applied?"))?;
    let account = store.set_role(account.id, admin.id).await?;

    tracing::info!(account_id = account.id, email = %account.email, "admin account ready");
    Ok(())
}
