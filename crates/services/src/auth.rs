//! Registration, login and the caller's own profile.

use std::sync::Arc;

use domains::{
    Account, AccountChanges, AccountRepository, DomainError, IssuedToken, NewAccount,
    PasswordHasher, Result, TokenService,
};
use serde::Deserialize;

use crate::validation;

#[derive(Debug, Clone, Deserialize)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// A successful login: the account and the token issued for it.
#[derive(Debug, Clone)]
pub struct Session {
    pub account: Account,
    pub token: IssuedToken,
}

#[derive(Clone)]
pub struct AuthService {
    accounts: Arc<dyn AccountRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenService>,
}

impl AuthService {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self { accounts, hasher, tokens }
    }

    pub async fn register(&self, registration: Registration) -> Result<Account> {
        validation::email(&registration.email)?;
        validation::password(&registration.password)?;
        validation::name(&registration.name)?;

        let password_hash = self.hasher.hash(&registration.password)?;
        let account = self
            .accounts
            .create(NewAccount {
                email: registration.email,
                password_hash,
                name: registration.name,
            })
            .await?;

        tracing::info!(account_id = account.id, "account registered");
        Ok(account)
    }

    /// Both failure modes are `NotFound`, and neither issues a token.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        let account = self
            .accounts
            .find_by_email(email)
            .await?
            .ok_or_else(|| DomainError::not_found("Wrong email"))?;

        if !self.hasher.verify(password, &account.password_hash) {
            tracing::info!(account_id = account.id, "login refused");
            return Err(DomainError::not_found("Wrong password"));
        }

        let token = self.tokens.issue(account.id, &account.email, &account.role.name)?;
        tracing::info!(account_id = account.id, role = %account.role.name, "logged in");
        Ok(Session { account, token })
    }

    pub async fn update_profile(&self, caller: &Account, changes: AccountChanges) -> Result<Account> {
        if let Some(email) = &changes.email {
            validation::email(email)?;
        }
        if let Some(name) = &changes.name {
            validation::name(name)?;
        }
        self.accounts.update_profile(caller.id, changes).await
    }

    pub async fn delete_self(&self, caller: &Account) -> Result<()> {
        if !self.accounts.delete(caller.id).await? {
            return Err(DomainError::not_found("User doesn't exist."));
        }
        tracing::info!(account_id = caller.id, "account deleted by its owner");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::account;
    use domains::{MockAccountRepository, MockPasswordHasher, MockTokenService, RoleKind};
    use mockall::predicate::eq;

    fn service(
        accounts: MockAccountRepository,
        hasher: MockPasswordHasher,
        tokens: MockTokenService,
    ) -> AuthService {
        AuthService::new(Arc::new(accounts), Arc::new(hasher), Arc::new(tokens))
    }

    fn registration() -> Registration {
        Registration {
            email: "new@example.com".into(),
            password: "correct-horse".into(),
            name: "newbie".into(),
        }
    }

    #[tokio::test]
    async fn test_register_stores_the_hash_not_the_password() {
        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_hash()
            .with(eq("correct-horse"))
            .returning(|_| Ok("hashed".into()));
        let mut accounts = MockAccountRepository::new();
        accounts
            .expect_create()
            .withf(|new| new.password_hash == "hashed" && new.email == "new@example.com")
            .returning(|_| Ok(account(9, RoleKind::User)));

        let svc = service(accounts, hasher, MockTokenService::new());
        assert_eq!(svc.register(registration()).await.unwrap().id, 9);
    }

    #[tokio::test]
    async fn test_register_validates_before_hashing() {
        let mut hasher = MockPasswordHasher::new();
        hasher.expect_hash().never();
        let svc = service(MockAccountRepository::new(), hasher, MockTokenService::new());

        let short = Registration { password: "short".into(), ..registration() };
        assert!(matches!(svc.register(short).await, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn test_register_duplicate_email_is_conflict() {
        let mut hasher = MockPasswordHasher::new();
        hasher.expect_hash().returning(|_| Ok("hashed".into()));
        let mut accounts = MockAccountRepository::new();
        accounts
            .expect_create()
            .returning(|_| Err(DomainError::conflict("Email new@example.com is already registered.")));

        let svc = service(accounts, hasher, MockTokenService::new());
        assert!(matches!(svc.register(registration()).await, Err(DomainError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_login_wrong_email() {
        let mut accounts = MockAccountRepository::new();
        accounts.expect_find_by_email().returning(|_| Ok(None));
        let svc = service(accounts, MockPasswordHasher::new(), MockTokenService::new());

        let err = svc.login("nobody@example.com", "whatever1").await.unwrap_err();
        assert_eq!(err, DomainError::NotFound("Wrong email".into()));
    }

    #[tokio::test]
    async fn test_login_wrong_password_issues_no_token() {
        let mut accounts = MockAccountRepository::new();
        accounts
            .expect_find_by_email()
            .returning(|_| Ok(Some(account(1, RoleKind::User))));
        let mut hasher = MockPasswordHasher::new();
        hasher.expect_verify().returning(|_, _| false);
        let mut tokens = MockTokenService::new();
        tokens.expect_issue().never();

        let svc = service(accounts, hasher, tokens);
        let err = svc.login("user1@example.com", "bad-password").await.unwrap_err();
        assert_eq!(err, DomainError::NotFound("Wrong password".into()));
    }

    #[tokio::test]
    async fn test_login_embeds_account_id_email_and_role_name() {
        let mut accounts = MockAccountRepository::new();
        accounts
            .expect_find_by_email()
            .returning(|_| Ok(Some(account(1, RoleKind::Author))));
        let mut hasher = MockPasswordHasher::new();
        hasher.expect_verify().with(eq("good-password"), eq("stored-hash")).returning(|_, _| true);
        let mut tokens = MockTokenService::new();
        tokens
            .expect_issue()
            .with(eq(1), eq("user1@example.com"), eq("author"))
            .times(1)
            .returning(|_, _, _| Ok(IssuedToken { token: "signed".into(), ttl_seconds: 3600 }));

        let svc = service(accounts, hasher, tokens);
        let session = svc.login("user1@example.com", "good-password").await.unwrap();
        assert_eq!(session.token.token, "signed");
        assert_eq!(session.account.id, 1);
    }

    #[tokio::test]
    async fn test_update_profile_rejects_bad_email() {
        let mut accounts = MockAccountRepository::new();
        accounts.expect_update_profile().never();
        let svc = service(accounts, MockPasswordHasher::new(), MockTokenService::new());

        let changes = AccountChanges { email: Some("nope".into()), name: None };
        let caller = account(1, RoleKind::User);
        assert!(matches!(
            svc.update_profile(&caller, changes).await,
            Err(DomainError::Validation(_))
        ));
    }
}
