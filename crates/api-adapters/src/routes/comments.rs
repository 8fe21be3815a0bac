use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch, post},
    Json, Router,
};
use domains::{Comment, CommentId, ContentKind};

use crate::dto::{CommentUpdate, FlagRead, LikeToggled, LikesRead, Message};
use crate::error::ApiResult;
use crate::extract::CurrentAccount;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/{id}", patch(update_comment).delete(delete_comment))
        .route("/{id}/like", post(like_comment))
        .route("/{id}/likes", get(comment_likes))
        .route("/{id}/flag", post(flag_comment))
}

async fn update_comment(
    State(state): State<AppState>,
    CurrentAccount(caller): CurrentAccount,
    Path(id): Path<CommentId>,
    Json(payload): Json<CommentUpdate>,
) -> ApiResult<Json<Comment>> {
    Ok(Json(state.services.comments.update(&caller, id, payload.content).await?))
}

async fn delete_comment(
    State(state): State<AppState>,
    CurrentAccount(caller): CurrentAccount,
    Path(id): Path<CommentId>,
) -> ApiResult<Json<Message>> {
    state.services.comments.delete(&caller, id).await?;
    Ok(Json(Message::new(format!("Comment {id} deleted successfully"))))
}

async fn like_comment(
    State(state): State<AppState>,
    CurrentAccount(caller): CurrentAccount,
    Path(id): Path<CommentId>,
) -> ApiResult<Json<LikeToggled>> {
    let liked = state.services.comments.toggle_like(&caller, id).await?;
    Ok(Json(LikeToggled::new(ContentKind::Comment, liked)))
}

async fn comment_likes(
    State(state): State<AppState>,
    Path(id): Path<CommentId>,
) -> ApiResult<Json<LikesRead>> {
    let summary = state.services.comments.likes(id).await?;
    Ok(Json(LikesRead::new(ContentKind::Comment, summary)))
}

async fn flag_comment(
    State(state): State<AppState>,
    CurrentAccount(caller): CurrentAccount,
    Path(id): Path<CommentId>,
) -> ApiResult<(StatusCode, Json<FlagRead>)> {
    let flag = state.services.moderation.flag_comment(&caller, id).await?;
    Ok((StatusCode::CREATED, Json(flag.into())))
}
