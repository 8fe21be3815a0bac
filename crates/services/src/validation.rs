//! Field rules applied before anything reaches a repository.

use domains::{DomainError, Result};
use validator::ValidateEmail;

const EMAIL_MAX: usize = 50;
const PASSWORD_LEN: (usize, usize) = (8, 20);
const NAME_LEN: (usize, usize) = (3, 35);
const TITLE_MAX: usize = 120;
const ROLE_NAME_LEN: (usize, usize) = (1, 20);

fn length_between(field: &str, value: &str, (min, max): (usize, usize)) -> Result<()> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(DomainError::validation(format!(
            "{field} must be between {min} and {max} characters"
        )));
    }
    Ok(())
}

pub fn email(value: &str) -> Result<()> {
    if value.chars().count() > EMAIL_MAX {
        return Err(DomainError::validation(format!("email must be at most {EMAIL_MAX} characters")));
    }
    if !value.validate_email() {
        return Err(DomainError::validation("email is not a valid address"));
    }
    Ok(())
}

pub fn password(value: &str) -> Result<()> {
    length_between("password", value, PASSWORD_LEN)
}

pub fn name(value: &str) -> Result<()> {
    length_between("name", value, NAME_LEN)
}

pub fn title(value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DomainError::validation("title cannot be empty"));
    }
    if value.chars().count() > TITLE_MAX {
        return Err(DomainError::validation(format!("title must be at most {TITLE_MAX} characters")));
    }
    Ok(())
}

/// Post and comment bodies.
pub fn body(value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DomainError::validation("content cannot be empty"));
    }
    Ok(())
}

pub fn role_name(value: &str) -> Result<()> {
    length_between("role name", value.trim(), ROLE_NAME_LEN)
}
