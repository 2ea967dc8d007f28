//! User collection (users.json)

use std::cmp::Ordering;

use crate::error::ExpenseError;
use crate::models::{User, UserId};

use super::collection::{Collection, Record};

impl Record for User {
    type Id = UserId;
    const ENTITY: &'static str = "User";

    fn id(&self) -> UserId {
        self.id
    }

    fn compare(&self, other: &Self) -> Ordering {
        self.username.cmp(&other.username)
    }
}

impl Collection<User> {
    /// Find a user by username (case-insensitive)
    pub fn get_by_username(&self, username: &str) -> Result<Option<User>, ExpenseError> {
        let wanted = username.trim().to_lowercase();
        Ok(self
            .filter(|u| u.username.to_lowercase() == wanted)?
            .into_iter()
            .next())
    }

    /// Whether a username is taken
    pub fn username_exists(&self, username: &str) -> Result<bool, ExpenseError> {
        let wanted = username.trim().to_lowercase();
        self.any(|u| u.username.to_lowercase() == wanted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_get_by_username_case_insensitive() {
        let temp_dir = TempDir::new().unwrap();
        let users: Collection<User> = Collection::new(temp_dir.path().join("users.json"));
        users.upsert(User::new("Ana", "hash")).unwrap();

        assert!(users.get_by_username("ana").unwrap().is_some());
        assert!(users.username_exists(" ANA ").unwrap());
        assert!(!users.username_exists("bob").unwrap());
    }
}
