//! # Moderation state machine
//!
//! Each post or comment moves independently through:
//!
//! ```text
//!   Clean --flag--> Flagged{n} --flag--> Flagged{n+1}
//!   Flagged{n} --approve--> Flagged{n-1} | Clean
//!   Flagged{n} --reject---> Removed
//! ```
//!
//! Review targets a single flag record: approving clears that one flag and
//! leaves flags from other accounts in place.

use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, Result};
use crate::models::{Account, AccountId, ContentKind, Flag, FlagId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum ModerationState {
    Clean,
    Flagged { open_flags: usize },
    /// Terminal: the content and all of its flags are gone.
    Removed,
}

impl ModerationState {
    pub fn from_open_flags(open_flags: usize) -> Self {
        if open_flags == 0 {
            ModerationState::Clean
        } else {
            ModerationState::Flagged { open_flags }
        }
    }

    pub fn is_pending_review(&self) -> bool {
        matches!(self, ModerationState::Flagged { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewDecision {
    /// Content stays; the reviewed flag is dropped.
    Approve,
    /// Content is deleted along with every flag on it.
    Reject,
}

impl From<bool> for ReviewDecision {
    fn from(approved: bool) -> Self {
        if approved {
            ReviewDecision::Approve
        } else {
            ReviewDecision::Reject
        }
    }
}

impl ReviewDecision {
    /// State after applying this decision to content holding `open_flags`.
    pub fn apply(self, open_flags: usize) -> ModerationState {
        match self {
            ReviewDecision::Approve => ModerationState::from_open_flags(open_flags.saturating_sub(1)),
            ReviewDecision::Reject => ModerationState::Removed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewOutcome {
    pub decision: ReviewDecision,
    pub flag: Flag,
    pub state: ModerationState,
}

/// Self-flagging is refused whatever the caller's role.
pub fn ensure_not_self_flag(flagger: &Account, owner: AccountId, kind: ContentKind) -> Result<()> {
    if flagger.id == owner {
        let noun = match kind {
            ContentKind::Post => "blog post",
            ContentKind::Comment => "comment",
        };
        return Err(DomainError::forbidden(format!("You cannot flag your own {noun}.")));
    }
    Ok(())
}

/// Picks the flag a review acts on: the requested one, or the oldest.
/// `flags` must be the content's flags, oldest first.
pub fn select_review_target(
    flags: &[Flag],
    requested: Option<FlagId>,
    kind: ContentKind,
) -> Result<Flag> {
    if flags.is_empty() {
        return Err(DomainError::not_found(format!("{} is not flagged", kind.label())));
    }
    match requested {
        Some(id) => flags
            .iter()
            .find(|flag| flag.id == id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(format!("Flag {id} not found on this {}", kind.label().to_lowercase()))),
        None => Ok(flags[0].clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use chrono::Utc;

    fn flag(id: FlagId, account_id: Option<AccountId>) -> Flag {
        Flag { id, created_at: Utc::now(), kind: ContentKind::Post, content_id: 1, account_id }
    }

    fn account(id: AccountId) -> Account {
        Account {
            id,
            email: "a@example.com".into(),
            password_hash: String::new(),
            name: "alice".into(),
            created_at: Utc::now(),
            updated_at: None,
            role: Role { id: 4, name: "moderator".into(), created_at: Utc::now() },
        }
    }

    #[test]
    fn approve_steps_down_one_flag_at_a_time() {
        assert_eq!(ReviewDecision::Approve.apply(3), ModerationState::Flagged { open_flags: 2 });
        assert_eq!(ReviewDecision::Approve.apply(1), ModerationState::Clean);
    }

    #[test]
    fn reject_is_terminal() {
        assert_eq!(ReviewDecision::Reject.apply(5), ModerationState::Removed);
        assert!(!ModerationState::Removed.is_pending_review());
    }

    #[test]
    fn self_flag_is_forbidden_even_for_moderators() {
        let err = ensure_not_self_flag(&account(9), 9, ContentKind::Comment).unwrap_err();
        assert_eq!(err, DomainError::Forbidden("You cannot flag your own comment.".into()));
        assert!(ensure_not_self_flag(&account(9), 10, ContentKind::Comment).is_ok());
    }

    #[test]
    fn review_defaults_to_oldest_flag() {
        let flags = vec![flag(4, Some(2)), flag(9, Some(3))];
        assert_eq!(select_review_target(&flags, None, ContentKind::Post).unwrap().id, 4);
        assert_eq!(select_review_target(&flags, Some(9), ContentKind::Post).unwrap().id, 9);
    }

    #[test]
    fn review_of_unflagged_or_foreign_flag_is_not_found() {
        assert_eq!(
            select_review_target(&[], None, ContentKind::Post),
            Err(DomainError::NotFound("Blog is not flagged".into()))
        );
        let flags = vec![flag(4, None)];
        assert!(matches!(
            select_review_target(&flags, Some(5), ContentKind::Post),
            Err(DomainError::NotFound(_))
        ));
    }

    #[test]
    fn state_serializes_with_tag() {
        let json = serde_json::to_value(ModerationState::Flagged { open_flags: 2 }).unwrap();
        assert_eq!(json, serde_json::json!({ "state": "flagged", "open_flags": 2 }));
    }
}
