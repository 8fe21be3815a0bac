//! # blog-platform
//!
//! Assembles the adapters around the services and serves the HTTP API.

use std::sync::Arc;

use anyhow::Context;
use api_adapters::{router, AppState};
use auth_adapters::{ArgonHasher, JwtTokenService};
use configs::{LogFormat, LogSettings, Settings};
use services::{Ports, Services};
use storage_adapters::SqliteStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing(log: &LogSettings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));
    let registry = tracing_subscriber::registry().with(filter);
    match log.format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("loading configuration")?;
    init_tracing(&settings.log);
    tracing::info!("Configuration loaded successfully");
    if settings.auth.uses_default_secret() {
        tracing::warn!("auth.secret_key is the built-in default; set SECRET_KEY before deploying");
    }

    let store = SqliteStore::connect(&settings.database.url, settings.database.max_connections)
        .await
        .with_context(|| format!("opening database {}", settings.database.url))?;
    store.migrate().await.context("running migrations")?;
    tracing::info!(url = %settings.database.url, "database ready");

    let tokens = JwtTokenService::new(
        settings.auth.secret(),
        &settings.auth.algorithm,
        settings.auth.access_token_expires_minutes,
    )?;

    let store = Arc::new(store);
    let services = Services::new(Ports {
        accounts: store.clone(),
        roles: store.clone(),
        posts: store.clone(),
        comments: store.clone(),
        likes: store.clone(),
        flags: store.clone(),
        stats: store,
        hasher: Arc::new(ArgonHasher::new()),
        tokens: Arc::new(tokens),
    });
    let app = router(AppState::new(services, settings.auth.cookie_secure));

    let addr = settings.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!("Starting server on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
