use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch, post},
    Json, Router,
};
use domains::RoleId;

use crate::dto::{Message, RoleRead, RoleWrite, UserQuery, UserRead};
use crate::error::ApiResult;
use crate::extract::CurrentAccount;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_roles).post(create_role))
        .route("/{role_id}", patch(rename_role).delete(delete_role))
        .route("/{role_id}/assign", post(assign_role))
        .route("/{role_id}/revoke", post(revoke_role))
}

async fn list_roles(
    State(state): State<AppState>,
    CurrentAccount(caller): CurrentAccount,
) -> ApiResult<Json<Vec<RoleRead>>> {
    let roles = state.services.roles.list(&caller).await?;
    Ok(Json(roles.into_iter().map(RoleRead::from).collect()))
}

async fn create_role(
    State(state): State<AppState>,
    CurrentAccount(caller): CurrentAccount,
    Json(payload): Json<RoleWrite>,
) -> ApiResult<(StatusCode, Json<RoleRead>)> {
    let role = state.services.roles.create(&caller, &payload.role_name).await?;
    Ok((StatusCode::CREATED, Json(role.into())))
}

async fn rename_role(
    State(state): State<AppState>,
    CurrentAccount(caller): CurrentAccount,
    Path(role_id): Path<RoleId>,
    Json(payload): Json<RoleWrite>,
) -> ApiResult<Json<RoleRead>> {
    let role = state.services.roles.rename(&caller, role_id, &payload.role_name).await?;
    Ok(Json(role.into()))
}

async fn delete_role(
    State(state): State<AppState>,
    CurrentAccount(caller): CurrentAccount,
    Path(role_id): Path<RoleId>,
) -> ApiResult<Json<Message>> {
    state.services.roles.delete(&caller, role_id).await?;
    Ok(Json(Message::new(format!("Role: {role_id} successfully deleted"))))
}

async fn assign_role(
    State(state): State<AppState>,
    CurrentAccount(caller): CurrentAccount,
    Path(role_id): Path<RoleId>,
    Query(query): Query<UserQuery>,
) -> ApiResult<Json<UserRead>> {
    let account = state.services.roles.assign(&caller, role_id, query.user_id).await?;
    Ok(Json(account.into()))
}

async fn revoke_role(
    State(state): State<AppState>,
    CurrentAccount(caller): CurrentAccount,
    Path(role_id): Path<RoleId>,
    Query(query): Query<UserQuery>,
) -> ApiResult<Json<UserRead>> {
    let account = state.services.roles.revoke(&caller, role_id, query.user_id).await?;
    Ok(Json(account.into()))
}
