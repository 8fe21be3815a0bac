//! Role administration. Admin only throughout.

use std::sync::Arc;

use domains::policy::{authorize, RoleGated};
use domains::{Account, AccountId, AccountRepository, DomainError, Result, Role, RoleId, RoleKind, RoleRepository};

use crate::validation;

#[derive(Clone)]
pub struct RoleService {
    roles: Arc<dyn RoleRepository>,
    accounts: Arc<dyn AccountRepository>,
}

impl RoleService {
    pub fn new(roles: Arc<dyn RoleRepository>, accounts: Arc<dyn AccountRepository>) -> Self {
        Self { roles, accounts }
    }

    pub async fn list(&self, caller: &Account) -> Result<Vec<Role>> {
        authorize(caller, RoleGated::ManageRoles)?;
        self.roles.list().await
    }

    pub async fn create(&self, caller: &Account, name: &str) -> Result<Role> {
        authorize(caller, RoleGated::ManageRoles)?;
        let name = name.trim();
        validation::role_name(name)?;

        let role = self.roles.create(name).await?;
        tracing::info!(role_id = role.id, name = %role.name, "role created");
        Ok(role)
    }

    /// Built-in roles back the authorization policy and keep their names.
    pub async fn rename(&self, caller: &Account, id: RoleId, name: &str) -> Result<Role> {
        authorize(caller, RoleGated::ManageRoles)?;
        let role = self
            .roles
            .find(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Role id: '{id}' doesn't exist.")))?;
        if role.is_builtin() {
            return Err(DomainError::conflict(format!("Built-in role '{}' cannot be renamed.", role.name)));
        }
        let name = name.trim();
        validation::role_name(name)?;

        self.roles.rename(id, name).await
    }

    pub async fn delete(&self, caller: &Account, id: RoleId) -> Result<()> {
        authorize(caller, RoleGated::ManageRoles)?;
        let role = self
            .roles
            .find(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Role with the id: {id} doesn't exist.")))?;
        if role.is_builtin() {
            return Err(DomainError::conflict(format!("Built-in role '{}' cannot be deleted.", role.name)));
        }

        self.roles.delete(id).await?;
        tracing::info!(role_id = id, "role deleted");
        Ok(())
    }

    /// Loads the target account, refusing the caller's own.
    async fn target(&self, caller: &Account, user_id: AccountId, verb: &str) -> Result<Account> {
        let account = self
            .accounts
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User doesn't exist."))?;
        if account.id == caller.id {
            tracing::warn!(account_id = caller.id, "attempt to change own role");
            return Err(DomainError::forbidden(format!("You cannot {verb} yourself.")));
        }
        Ok(account)
    }

    async fn existing_role(&self, id: RoleId) -> Result<Role> {
        self.roles
            .find(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Role doesn't exist"))
    }

    pub async fn assign(&self, caller: &Account, role_id: RoleId, user_id: AccountId) -> Result<Account> {
        authorize(caller, RoleGated::ManageRoles)?;
        let account = self.target(caller, user_id, "assign role to").await?;
        let role = self.existing_role(role_id).await?;

        let account = self.accounts.set_role(account.id, role.id).await?;
        tracing::info!(account_id = account.id, role = %role.name, "role assigned");
        Ok(account)
    }

    /// Drops the account back to the default role if it holds `role_id`;
    /// otherwise leaves it untouched.
    pub async fn revoke(&self, caller: &Account, role_id: RoleId, user_id: AccountId) -> Result<Account> {
        authorize(caller, RoleGated::ManageRoles)?;
        let account = self.target(caller, user_id, "revoke a role from").await?;
        let role = self.existing_role(role_id).await?;
        if account.role.id != role.id {
            return Ok(account);
        }

        let fallback = self
            .roles
            .find_by_name(RoleKind::DEFAULT.as_str())
            .await?
            .ok_or_else(|| DomainError::internal("default role is missing"))?;
        let account = self.accounts.set_role(account.id, fallback.id).await?;
        tracing::info!(account_id = account.id, revoked = %role.name, "role revoked");
        Ok(account)
    }
}
