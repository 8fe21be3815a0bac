mod common;

use axum::http::{Method, StatusCode};
use common::TestApp;
use domains::RoleKind;
use serde_json::json;

#[tokio::test]
async fn empty_listing_is_ok() {
    let app = TestApp::new().await;
    let response = app.get("/blogs", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!([]));
}

#[tokio::test]
async fn only_authors_create_posts() {
    let app = TestApp::new().await;
    let author = app.user("author@example.com", RoleKind::Author).await;
    let reader = app.user("reader@example.com", RoleKind::User).await;
    let admin = app.user("admin@example.com", RoleKind::Admin).await;

    let post_id = app.create_post(&author, "First").await;
    let fetched = app.get(&format!("/blogs/{post_id}"), None).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["owner_id"], author.id);

    for token in [&reader.token, &admin.token] {
        let refused = app
            .post("/blogs", Some(token), Some(json!({ "title": "Nope", "content": "body" })))
            .await;
        assert_eq!(refused.status, StatusCode::FORBIDDEN);
        assert_eq!(refused.body["error"]["message"], "Not enough permissions");
    }

    let anonymous = app.post("/blogs", None, Some(json!({ "title": "t", "content": "c" }))).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let listed = app.get("/blogs", None).await;
    assert_eq!(listed.body.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn title_is_validated() {
    let app = TestApp::new().await;
    let author = app.user("author@example.com", RoleKind::Author).await;

    let long_title = "t".repeat(121);
    let response = app
        .post("/blogs", Some(&author.token), Some(json!({ "title": long_title, "content": "c" })))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_is_owner_only_and_delete_admits_moderators() {
    let app = TestApp::new().await;
    let author = app.user("author@example.com", RoleKind::Author).await;
    let admin = app.user("admin@example.com", RoleKind::Admin).await;
    let moderator = app.user("mod@example.com", RoleKind::Moderator).await;
    let post_id = app.create_post(&author, "Original").await;
    let uri = format!("/blogs/{post_id}");

    let by_admin = app
        .request(Method::PATCH, &uri, Some(&admin.token), Some(json!({ "title": "Hijacked" })))
        .await;
    assert_eq!(by_admin.status, StatusCode::FORBIDDEN);

    let by_owner = app
        .request(Method::PATCH, &uri, Some(&author.token), Some(json!({ "title": "Edited" })))
        .await;
    assert_eq!(by_owner.status, StatusCode::OK);
    assert_eq!(by_owner.body["title"], "Edited");
    assert_eq!(by_owner.body["content"], "body");

    let deleted = app.request(Method::DELETE, &uri, Some(&moderator.token), None).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(app.get(&uri, None).await.status, StatusCode::NOT_FOUND);

    let again = app.request(Method::DELETE, &uri, Some(&moderator.token), None).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn likes_toggle() {
    let app = TestApp::new().await;
    let author = app.user("author@example.com", RoleKind::Author).await;
    let reader = app.user("reader@example.com", RoleKind::User).await;
    let post_id = app.create_post(&author, "Likeable").await;
    let like = format!("/blogs/{post_id}/like");
    let likes = format!("/blogs/{post_id}/likes");

    assert_eq!(app.post(&like, Some(&reader.token), None).await.body["liked"], true);
    assert_eq!(app.post(&like, Some(&author.token), None).await.body["liked"], true);
    let summary = app.get(&likes, None).await;
    assert_eq!(summary.body["blog_id"], post_id);
    assert_eq!(summary.body["likes_count"], 2);

    assert_eq!(app.post(&like, Some(&reader.token), None).await.body["liked"], false);
    let summary = app.get(&likes, None).await;
    assert_eq!(summary.body["user_ids"], json!([author.id]));

    let missing = app.post("/blogs/999/like", Some(&reader.token), None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn threaded_comments() {
    let app = TestApp::new().await;
    let author = app.user("author@example.com", RoleKind::Author).await;
    let reader = app.user("reader@example.com", RoleKind::User).await;
    let post_id = app.create_post(&author, "Discuss").await;
    let other_post = app.create_post(&author, "Elsewhere").await;

    let root = app.create_comment(&reader, post_id, None).await;
    let reply = app.create_comment(&author, post_id, Some(root)).await;
    let _nested = app.create_comment(&reader, post_id, Some(reply)).await;
    let second_root = app.create_comment(&author, post_id, None).await;

    let tree = app.get(&format!("/blogs/{post_id}/comments/tree"), None).await;
    assert_eq!(tree.status, StatusCode::OK);
    assert_eq!(tree.body[0]["id"], root);
    assert_eq!(tree.body[0]["replies"][0]["id"], reply);
    assert_eq!(tree.body[0]["replies"][0]["replies"].as_array().map(Vec::len), Some(1));
    assert_eq!(tree.body[1]["id"], second_root);

    let cross_post = app
        .post(
            &format!("/blogs/{other_post}/comments"),
            Some(&reader.token),
            Some(json!({ "content": "misplaced", "parent_id": root })),
        )
        .await;
    assert_eq!(cross_post.status, StatusCode::BAD_REQUEST);

    let orphan = app
        .post(
            &format!("/blogs/{post_id}/comments"),
            Some(&reader.token),
            Some(json!({ "content": "orphan", "parent_id": 999 })),
        )
        .await;
    assert_eq!(orphan.status, StatusCode::NOT_FOUND);

    // Deleting the root takes the whole reply chain with it.
    let deleted = app
        .request(Method::DELETE, &format!("/comments/{root}"), Some(&reader.token), None)
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
    let flat = app.get(&format!("/blogs/{post_id}/comments"), None).await;
    assert_eq!(flat.body.as_array().map(Vec::len), Some(1));
    assert_eq!(flat.body[0]["id"], second_root);
}

#[tokio::test]
async fn comment_edit_is_owner_only() {
    let app = TestApp::new().await;
    let author = app.user("author@example.com", RoleKind::Author).await;
    let reader = app.user("reader@example.com", RoleKind::User).await;
    let post_id = app.create_post(&author, "Post").await;
    let comment = app.create_comment(&reader, post_id, None).await;
    let uri = format!("/comments/{comment}");

    let by_author = app
        .request(Method::PATCH, &uri, Some(&author.token), Some(json!({ "content": "edited" })))
        .await;
    assert_eq!(by_author.status, StatusCode::FORBIDDEN);

    let by_owner = app
        .request(Method::PATCH, &uri, Some(&reader.token), Some(json!({ "content": "edited" })))
        .await;
    assert_eq!(by_owner.status, StatusCode::OK);
    assert_eq!(by_owner.body["content"], "edited");

    let likes = app.post(&format!("{uri}/like"), Some(&author.token), None).await;
    assert_eq!(likes.body["message"], "Comment liked successfully.");
    let summary = app.get(&format!("{uri}/likes"), None).await;
    assert_eq!(summary.body["comment_id"], comment);
    assert_eq!(summary.body["likes_count"], 1);
}
