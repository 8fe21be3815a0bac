//! Platform statistics and account removal for admins.

use std::sync::Arc;

use domains::policy::{authorize, RoleGated};
use domains::{Account, AccountId, AccountRepository, DomainError, PlatformStats, Result, StatsRepository};

#[derive(Clone)]
pub struct AdminService {
    stats: Arc<dyn StatsRepository>,
    accounts: Arc<dyn AccountRepository>,
}

impl AdminService {
    pub fn new(stats: Arc<dyn StatsRepository>, accounts: Arc<dyn AccountRepository>) -> Self {
        Self { stats, accounts }
    }

    pub async fn stats(&self, caller: &Account) -> Result<PlatformStats> {
        authorize(caller, RoleGated::ViewStats)?;
        self.stats.stats().await
    }

    /// Removes another account with everything it owns. Flags it authored
    /// survive without an author.
    pub async fn remove_account(&self, caller: &Account, user_id: AccountId) -> Result<()> {
        authorize(caller, RoleGated::RemoveAccount)?;
        if caller.id == user_id {
            return Err(DomainError::forbidden("You cannot remove your own account here."));
        }
        if !self.accounts.delete(user_id).await? {
            return Err(DomainError::not_found("User doesn't exist."));
        }
        tracing::info!(account_id = user_id, by = caller.id, "account removed by admin");
        Ok(())
    }
}
