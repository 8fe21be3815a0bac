//! # Identity Resolver
//!
//! Turns the credential material of a request into the calling [`Account`].

use std::sync::Arc;

use domains::{Account, AccountRepository, Credentials, DomainError, Result, TokenService};

#[derive(Clone)]
pub struct IdentityResolver {
    accounts: Arc<dyn AccountRepository>,
    tokens: Arc<dyn TokenService>,
}

impl IdentityResolver {
    pub fn new(accounts: Arc<dyn AccountRepository>, tokens: Arc<dyn TokenService>) -> Self {
        Self { accounts, tokens }
    }

    /// The cookie token wins over a bearer token when both are present.
    ///
    /// Fails with `Unauthenticated` when no usable token is supplied or it
    /// does not decode, and `NotFound` when its subject no longer exists.
    ///
    /// The account is looked up by the token's `sub`, never by its email, so
    /// a later email change (or a new account taking over the old address)
    /// cannot redirect an outstanding token.
    pub async fn resolve(&self, credentials: &Credentials) -> Result<Account> {
        let token = credentials
            .token()
            .ok_or_else(|| DomainError::Unauthenticated("Not authenticated".into()))?;

        let claims = self.tokens.decode(token)?;

        self.accounts
            .find_by_id(claims.sub)
            .await?
            .ok_or_else(|| {
                tracing::debug!(account_id = claims.sub, "token subject has no account");
                DomainError::not_found("No user found!")
            })
    }
}
