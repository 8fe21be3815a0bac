use axum::{
    extract::{Path, State},
    routing::{delete, get},
    Json, Router,
};
use domains::{AccountId, PlatformStats};

use crate::dto::Message;
use crate::error::ApiResult;
use crate::extract::CurrentAccount;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/stats", get(stats))
        .route("/users/{user_id}", delete(remove_user))
}

async fn stats(
    State(state): State<AppState>,
    CurrentAccount(caller): CurrentAccount,
) -> ApiResult<Json<PlatformStats>> {
    Ok(Json(state.services.admin.stats(&caller).await?))
}

async fn remove_user(
    State(state): State<AppState>,
    CurrentAccount(caller): CurrentAccount,
    Path(user_id): Path<AccountId>,
) -> ApiResult<Json<Message>> {
    state.services.admin.remove_account(&caller, user_id).await?;
    Ok(Json(Message::new(format!("User {user_id} removed"))))
}
