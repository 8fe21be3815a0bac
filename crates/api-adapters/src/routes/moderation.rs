use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use domains::{CommentId, ContentKind, PostId};

use crate::dto::{FlagRead, ReviewQuery, ReviewRead};
use crate::error::ApiResult;
use crate::extract::CurrentAccount;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/blogs", get(flagged_posts))
        .route("/comments", get(flagged_comments))
        .route("/blogs/{id}/review", post(review_post))
        .route("/comments/{id}/review", post(review_comment))
}

async fn flagged(state: &AppState, caller: &domains::Account, kind: ContentKind) -> ApiResult<Json<Vec<FlagRead>>> {
    let flags = state.services.moderation.list_flags(caller, kind).await?;
    Ok(Json(flags.into_iter().map(FlagRead::from).collect()))
}

async fn flagged_posts(
    State(state): State<AppState>,
    CurrentAccount(caller): CurrentAccount,
) -> ApiResult<Json<Vec<FlagRead>>> {
    flagged(&state, &caller, ContentKind::Post).await
}

async fn flagged_comments(
    State(state): State<AppState>,
    CurrentAccount(caller): CurrentAccount,
) -> ApiResult<Json<Vec<FlagRead>>> {
    flagged(&state, &caller, ContentKind::Comment).await
}

/// `?approved=true` keeps the post and drops one flag; `false` deletes it.
async fn review_post(
    State(state): State<AppState>,
    CurrentAccount(caller): CurrentAccount,
    Path(id): Path<PostId>,
    Query(query): Query<ReviewQuery>,
) -> ApiResult<Json<ReviewRead>> {
    let outcome = state
        .services
        .moderation
        .review_post(&caller, id, query.approved.into(), query.flag_id)
        .await?;
    Ok(Json(outcome.into()))
}

async fn review_comment(
    State(state): State<AppState>,
    CurrentAccount(caller): CurrentAccount,
    Path(id): Path<CommentId>,
    Query(query): Query<ReviewQuery>,
) -> ApiResult<Json<ReviewRead>> {
    let outcome = state
        .services
        .moderation
        .review_comment(&caller, id, query.approved.into(), query.flag_id)
        .await?;
    Ok(Json(outcome.into()))
}
