use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use domains::threading::CommentNode;
use domains::{Comment, ContentKind, NewComment, NewPost, Post, PostChanges, PostId};

use crate::dto::{CommentCreate, FlagRead, LikeToggled, LikesRead, Message};
use crate::error::ApiResult;
use crate::extract::CurrentAccount;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_posts).post(create_post))
        .route("/{id}", get(get_post).patch(update_post).delete(delete_post))
        .route("/{id}/like", post(like_post))
        .route("/{id}/likes", get(post_likes))
        .route("/{id}/comments", get(list_comments).post(create_comment))
        .route("/{id}/comments/tree", get(comment_tree))
        .route("/{id}/flag", post(flag_post))
}

async fn list_posts(State(state): State<AppState>) -> ApiResult<Json<Vec<Post>>> {
    Ok(Json(state.services.posts.list().await?))
}

async fn get_post(State(state): State<AppState>, Path(id): Path<PostId>) -> ApiResult<Json<Post>> {
    Ok(Json(state.services.posts.get(id).await?))
}

async fn create_post(
    State(state): State<AppState>,
    CurrentAccount(caller): CurrentAccount,
    Json(post): Json<NewPost>,
) -> ApiResult<(StatusCode, Json<Post>)> {
    let post = state.services.posts.create(&caller, post).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

async fn update_post(
    State(state): State<AppState>,
    CurrentAccount(caller): CurrentAccount,
    Path(id): Path<PostId>,
    Json(changes): Json<PostChanges>,
) -> ApiResult<Json<Post>> {
    Ok(Json(state.services.posts.update(&caller, id, changes).await?))
}

async fn delete_post(
    State(state): State<AppState>,
    CurrentAccount(caller): CurrentAccount,
    Path(id): Path<PostId>,
) -> ApiResult<Json<Message>> {
    state.services.posts.delete(&caller, id).await?;
    Ok(Json(Message::new(format!("Blog {id} deleted successfully"))))
}

async fn like_post(
    State(state): State<AppState>,
    CurrentAccount(caller): CurrentAccount,
    Path(id): Path<PostId>,
) -> ApiResult<Json<LikeToggled>> {
    let liked = state.services.posts.toggle_like(&caller, id).await?;
    Ok(Json(LikeToggled::new(ContentKind::Post, liked)))
}

async fn post_likes(State(state): State<AppState>, Path(id): Path<PostId>) -> ApiResult<Json<LikesRead>> {
    let summary = state.services.posts.likes(id).await?;
    Ok(Json(LikesRead::new(ContentKind::Post, summary)))
}

async fn list_comments(
    State(state): State<AppState>,
    Path(id): Path<PostId>,
) -> ApiResult<Json<Vec<Comment>>> {
    Ok(Json(state.services.comments.list_for_post(id).await?))
}

async fn comment_tree(
    State(state): State<AppState>,
    Path(id): Path<PostId>,
) -> ApiResult<Json<Vec<CommentNode>>> {
    Ok(Json(state.services.comments.tree_for_post(id).await?))
}

async fn create_comment(
    State(state): State<AppState>,
    CurrentAccount(caller): CurrentAccount,
    Path(id): Path<PostId>,
    Json(payload): Json<CommentCreate>,
) -> ApiResult<(StatusCode, Json<Comment>)> {
    let comment = NewComment { content: payload.content, post_id: id, parent_id: payload.parent_id };
    let comment = state.services.comments.create(&caller, comment).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

async fn flag_post(
    State(state): State<AppState>,
    CurrentAccount(caller): CurrentAccount,
    Path(id): Path<PostId>,
) -> ApiResult<(StatusCode, Json<FlagRead>)> {
    let flag = state.services.moderation.flag_post(&caller, id).await?;
    Ok((StatusCode::CREATED, Json(flag.into())))
}
