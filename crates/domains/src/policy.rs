//! # Access Control Guard
//!
//! Two pure decision functions and the static table saying which one every
//! protected action goes through:
//!
//! - [`role_gate`]: the caller's role must be one of the required kinds.
//! - [`owner_or_role_gate`]: the caller must own the resource, or hold one of
//!   the allowed kinds. A missing resource is `NotFound`, checked first.
//!
//! Roles are compared as [`RoleKind`] values, never as strings, so a role row
//! with an unknown name simply never matches.

use crate::errors::{DomainError, Result};
use crate::models::{Account, AccountId, Comment, Post, RoleKind};

use RoleKind::{Admin, Author, Moderator, User};

/// Actions gated purely on the caller's role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleGated {
    CreatePost,
    CreateComment,
    FlagContent,
    /// List flags and review them.
    ModerateContent,
    ManageRoles,
    ViewStats,
    RemoveAccount,
}

impl RoleGated {
    pub const fn required_roles(self) -> &'static [RoleKind] {
        match self {
            RoleGated::CreatePost => &[Author],
            RoleGated::CreateComment => &[Admin, Moderator, Author, User],
            RoleGated::FlagContent => &[Moderator, Author, User],
            RoleGated::ModerateContent => &[Admin, Moderator],
            RoleGated::ManageRoles | RoleGated::ViewStats | RoleGated::RemoveAccount => &[Admin],
        }
    }
}

/// Mutations on owned content: the owner may always act, these roles may act
/// on anyone's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerGated {
    UpdatePost,
    DeletePost,
    UpdateComment,
    DeleteComment,
}

impl OwnerGated {
    pub const fn allowed_roles(self) -> &'static [RoleKind] {
        match self {
            OwnerGated::UpdatePost | OwnerGated::UpdateComment => &[],
            OwnerGated::DeletePost | OwnerGated::DeleteComment => &[Admin, Moderator],
        }
    }
}

/// Anything with a single owning account.
pub trait Owned {
    /// Human-readable noun used in `NotFound` messages.
    const LABEL: &'static str;

    fn owner_id(&self) -> AccountId;
}

impl Owned for Post {
    const LABEL: &'static str = "Blog";

    fn owner_id(&self) -> AccountId {
        self.owner_id
    }
}

impl Owned for Comment {
    const LABEL: &'static str = "Comment";

    fn owner_id(&self) -> AccountId {
        self.owner_id
    }
}

fn holds_any(caller: &Account, roles: &[RoleKind]) -> bool {
    caller.role_kind().is_some_and(|kind| roles.contains(&kind))
}

/// Permits `caller` iff its role is one of `required`.
pub fn role_gate(caller: &Account, required: &[RoleKind]) -> Result<()> {
    if holds_any(caller, required) {
        Ok(())
    } else {
        Err(DomainError::forbidden("Not enough permissions"))
    }
}

/// Permits `caller` iff it owns `resource` or holds one of `allowed`.
/// Hands the resource back so the caller can act on it.
pub fn owner_or_role_gate<R: Owned>(
    caller: &Account,
    resource: Option<R>,
    allowed: &[RoleKind],
) -> Result<R> {
    let resource = resource.ok_or_else(|| DomainError::not_found(format!("{} not found", R::LABEL)))?;

    if resource.owner_id() == caller.id || holds_any(caller, allowed) {
        Ok(resource)
    } else {
        Err(DomainError::forbidden("Not authorized to perform the action."))
    }
}

pub fn authorize(caller: &Account, action: RoleGated) -> Result<()> {
    role_gate(caller, action.required_roles())
}

pub fn authorize_owned<R: Owned>(caller: &Account, action: OwnerGated, resource: Option<R>) -> Result<R> {
    owner_or_role_gate(caller, resource, action.allowed_roles())
}
