//! Test harness: the real router over a private in-memory database.

#![allow(dead_code)]

use std::sync::Arc;

use api_adapters::{router, AppState};
use auth_adapters::{ArgonHasher, JwtTokenService};
use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use domains::{AccountId, AccountRepository, RoleKind, RoleRepository};
use serde_json::{json, Value};
use services::{Ports, Services};
use storage_adapters::SqliteStore;
use tower::ServiceExt;

pub const PASSWORD: &str = "s3cret-pass";

pub struct TestApp {
    pub router: Router,
    pub store: SqliteStore,
}

pub struct Response {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

/// A registered, logged-in account.
pub struct User {
    pub id: AccountId,
    pub token: String,
}

impl TestApp {
    pub async fn new() -> Self {
        let store = SqliteStore::in_memory().await.expect("in-memory store");
        let shared = Arc::new(store.clone());
        let services = Services::new(Ports {
            accounts: shared.clone(),
            roles: shared.clone(),
            posts: shared.clone(),
            comments: shared.clone(),
            likes: shared.clone(),
            flags: shared.clone(),
            stats: shared,
            hasher: Arc::new(ArgonHasher::with_params(1024, 1, 1).expect("argon params")),
            tokens: Arc::new(JwtTokenService::new("integration-secret", "HS256", 60).expect("jwt")),
        });
        TestApp { router: router(AppState::new(services, false)), store }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");
        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        let response = self.router.clone().oneshot(request).await.expect("router is infallible");
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.expect("body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into()))
        };
        Response { status, headers, body }
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> Response {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Option<Value>) -> Response {
        self.request(Method::POST, uri, token, body).await
    }

    pub async fn register(&self, email: &str) -> AccountId {
        let name = email.split('@').next().unwrap_or("someone");
        let response = self
            .post(
                "/auth/register",
                None,
                Some(json!({ "email": email, "password": PASSWORD, "name": format!("{name:_<3}") })),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.body["id"].as_i64().expect("id")
    }

    pub async fn login(&self, email: &str) -> String {
        let response = self
            .post("/auth/login", None, Some(json!({ "email": email, "password": PASSWORD })))
            .await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
        response.body["access_token"].as_str().expect("token").to_string()
    }

    /// Registers an account, gives it `kind`, and logs it in.
    pub async fn user(&self, email: &str, kind: RoleKind) -> User {
        let id = self.register(email).await;
        if kind != RoleKind::DEFAULT {
            let role = self
                .store
                .find_by_name(kind.as_str())
                .await
                .expect("lookup")
                .expect("built-in role");
            self.store.set_role(id, role.id).await.expect("set role");
        }
        User { id, token: self.login(email).await }
    }

    pub async fn create_post(&self, author: &User, title: &str) -> i64 {
        let response = self
            .post("/blogs", Some(&author.token), Some(json!({ "title": title, "content": "body" })))
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.body["id"].as_i64().expect("post id")
    }

    pub async fn create_comment(&self, user: &User, post_id: i64, parent_id: Option<i64>) -> i64 {
        let response = self
            .post(
                &format!("/blogs/{post_id}/comments"),
                Some(&user.token),
                Some(json!({ "content": "a comment", "parent_id": parent_id })),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.body["id"].as_i64().expect("comment id")
    }
}
