use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use domains::AccountChanges;
use services::Registration;

use crate::dto::{LoginRequest, LoginResponse, Message, UserRead};
use crate::error::ApiResult;
use crate::extract::CurrentAccount;
use crate::state::AppState;
use crate::ACCESS_TOKEN_COOKIE;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me).patch(update_me).delete(delete_me))
}

fn session_cookie(token: String, ttl_seconds: i64, secure: bool) -> Cookie<'static> {
    Cookie::build((ACCESS_TOKEN_COOKIE, token))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(ttl_seconds))
        .build()
}

/// Expired session cookie. Added outright rather than through
/// `CookieJar::remove`, which stays silent when the request carried no cookie.
fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build((ACCESS_TOKEN_COOKIE, "")).path("/").http_only(true).build();
    cookie.make_removal();
    cookie
}

async fn register(
    State(state): State<AppState>,
    Json(payload): Json<Registration>,
) -> ApiResult<(StatusCode, Json<UserRead>)> {
    let account = state.services.auth.register(payload).await?;
    Ok((StatusCode::CREATED, Json(account.into())))
}

async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<(CookieJar, Json<LoginResponse>)> {
    let session = state.services.auth.login(&payload.email, &payload.password).await?;

    let jar = jar.add(session_cookie(
        session.token.token.clone(),
        session.token.ttl_seconds,
        state.cookie_secure,
    ));
    Ok((
        jar,
        Json(LoginResponse {
            user: session.account.into(),
            message: "Successfully Logged In",
            access_token: session.token.token,
            token_type: "bearer",
        }),
    ))
}

async fn logout(CurrentAccount(_): CurrentAccount, jar: CookieJar) -> (CookieJar, Json<Message>) {
    (jar.add(removal_cookie()), Json(Message::new("Successfully Logged Out")))
}

async fn me(CurrentAccount(account): CurrentAccount) -> Json<UserRead> {
    Json(account.into())
}

async fn update_me(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Json(changes): Json<AccountChanges>,
) -> ApiResult<Json<UserRead>> {
    let account = state.services.auth.update_profile(&account, changes).await?;
    Ok(Json(account.into()))
}

async fn delete_me(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    jar: CookieJar,
) -> ApiResult<(CookieJar, Json<Message>)> {
    state.services.auth.delete_self(&account).await?;
    Ok((jar.add(removal_cookie()), Json(Message::new("Account deleted"))))
}
