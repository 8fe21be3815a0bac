//! The caller, resolved from the request's credentials.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use axum_extra::extract::cookie::CookieJar;
use domains::{Account, Credentials};

use crate::error::ApiError;
use crate::state::AppState;
use crate::ACCESS_TOKEN_COOKIE;

/// The authenticated account making the request. Rejects with 401 when no
/// valid token is present and 404 when its account no longer exists.
#[derive(Debug, Clone)]
pub struct CurrentAccount(pub Account);

impl FromRequestParts<AppState> for CurrentAccount {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let credentials = credentials(&parts.headers);
        let account = state.services.identity.resolve(&credentials).await?;
        Ok(CurrentAccount(account))
    }
}

pub fn credentials(headers: &HeaderMap) -> Credentials {
    let jar = CookieJar::from_headers(headers);
    Credentials {
        cookie_token: jar.get(ACCESS_TOKEN_COOKIE).map(|c| c.value().to_string()),
        bearer_token: bearer_token(headers),
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    scheme.eq_ignore_ascii_case("bearer").then(|| token.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_reads_cookie_and_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark; access_token=from-cookie"));
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer from-header"));

        let credentials = credentials(&headers);
        assert_eq!(credentials.cookie_token.as_deref(), Some("from-cookie"));
        assert_eq!(credentials.bearer_token.as_deref(), Some("from-header"));
        assert_eq!(credentials.token(), Some("from-cookie"));
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("bearer abc"));
        assert_eq!(bearer_token(&headers).as_deref(), Some("abc"));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwdw=="));
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn test_no_credentials() {
        assert_eq!(credentials(&HeaderMap::new()), Credentials::default());
    }
}
