//! User domain models.

use chrono::NaiveDateTime;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::errors::{Error, Result, ValidationError};

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

/// Validates and normalizes an email address (trimmed, lowercased).
pub fn validate_email(email: &str) -> Result<String> {
    let re = EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex is valid")
    });
    let normalized = email.trim().to_lowercase();
    if !re.is_match(&normalized) {
        return Err(Error::Validation(ValidationError::InvalidInput(format!(
            "'{email}' is not a valid email address"
        ))));
    }
    Ok(normalized)
}

/// Domain model representing a registered user.
///
/// The password hash never leaves the service layer; use [`UserProfile`]
/// for anything that crosses the API boundary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_verified: bool,
    pub last_login_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl User {
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
        }
    }
}

/// Input model for creating a new user
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub password_hash: String,
}

/// Public view of a user, safe to embed in API responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::validate_email;

    #[test]
    fn normalizes_case_and_whitespace() {
        assert_eq!(
            validate_email("  Alice@Example.COM ").unwrap(),
            "alice@example.com"
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("a@b").is_err());
        assert!(validate_email("").is_err());
    }
}
