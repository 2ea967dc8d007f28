//! User model
//!
//! An account holder able to log in. Only the Argon2 PHC hash of the
//! password is ever stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::UserId;

/// A registered user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,

    /// Login name, unique across users
    pub username: String,

    /// Argon2id hash in PHC string format
    pub password_hash: String,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub first_name: Option<String>,

    #[serde(default)]
    pub last_name: Option<String>,

    /// Inactive users cannot log in
    #[serde(default = "default_active")]
    pub active: bool,

    pub created_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

impl User {
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            id: UserId::new(),
            username: username.into(),
            password_hash: password_hash.into(),
            email: None,
            first_name: None,
            last_name: None,
            active: true,
            created_at: Utc::now(),
        }
    }

    /// "First Last" when either part is known, otherwise the username
    pub fn display_name(&self) -> String {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|p| !p.trim().is_empty())
            .collect();

        if parts.is_empty() {
            self.username.clone()
        } else {
            parts.join(" ")
        }
    }

    pub fn validate(&self) -> Result<(), UserValidationError> {
        if self.username.trim().is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }

        if self.username.len() > 50 {
            return Err(UserValidationError::UsernameTooLong(self.username.len()));
        }

        if let Some(email) = &self.email {
            if !email.contains('@') {
                return Err(UserValidationError::InvalidEmail(email.clone()));
            }
        }

        Ok(())
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.username)
    }
}

/// Validation errors for users
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyUsername,
    UsernameTooLong(usize),
    InvalidEmail(String),
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "Username cannot be empty"),
            Self::UsernameTooLong(len) => {
                write!(f, "Username too long ({} chars, max 50)", len)
            }
            Self::InvalidEmail(email) => write!(f, "Invalid email address: {}", email),
        }
    }
}

impl std::error::Error for UserValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_is_active() {
        let user = User::new("ana", "$argon2id$...");
        assert!(user.active);
        assert!(user.email.is_none());
    }

    #[test]
    fn test_display_name() {
        let mut user = User::new("ana", "hash");
        assert_eq!(user.display_name(), "ana");

        user.first_name = Some("Ana".into());
        user.last_name = Some("Pérez".into());
        assert_eq!(user.display_name(), "Ana Pérez");
    }

    #[test]
    fn test_validation() {
        let mut user = User::new("  ", "hash");
        assert_eq!(user.validate(), Err(UserValidationError::EmptyUsername));

        user.username = "ana".into();
        user.email = Some("not-an-email".into());
        assert!(matches!(
            user.validate(),
            Err(UserValidationError::InvalidEmail(_))
        ));

        user.email = Some("ana@example.com".into());
        assert!(user.validate().is_ok());
    }

    #[test]
    fn test_deserialize_without_optional_fields() {
        let json = r#"{
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "username": "ana",
            "password_hash": "hash",
            "created_at": "2024-03-01T10:00:00Z"
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert!(user.active);
        assert!(user.first_name.is_none());
    }
}
