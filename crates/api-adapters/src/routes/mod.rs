mod admin;
mod auth;
mod blogs;
mod comments;
mod moderation;
mod roles;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use crate::middleware::{cors_policy, trace_layer};
use crate::state::AppState;

/// The complete application, ready to serve.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .nest("/auth", auth::routes())
        .nest("/blogs", blogs::routes())
        .nest("/comments", comments::routes())
        .nest("/moderation", moderation::routes())
        .nest("/roles", roles::routes())
        .nest("/admin", admin::routes())
        .layer(cors_policy())
        .layer(trace_layer())
        .with_state(state)
}

async fn index() -> Json<Value> {
    Json(json!({ "message": "Welcome to the blog platform API" }))
}

async fn health() -> &'static str {
    "OK"
}
