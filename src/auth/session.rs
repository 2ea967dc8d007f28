//! Logged-in session
//!
//! The active session lives in `current_user.json` between invocations. It
//! is handed explicitly to every operation that acts on behalf of a user.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::paths::ExpensePaths;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::UserId;
use crate::storage::file_io::{read_json_optional, remove_if_exists, write_json_atomic};
use crate::storage::CURRENT_USER;

use super::token::TokenService;

/// The authenticated actor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: UserId,
    pub username: String,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Persists the current session
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(paths: &ExpensePaths) -> Self {
        Self {
            path: paths.collection_file(CURRENT_USER),
        }
    }

    /// The stored session, without checking its token
    pub fn load(&self) -> ExpenseResult<Option<Session>> {
        read_json_optional(&self.path)
    }

    pub fn save(&self, session: &Session) -> ExpenseResult<()> {
        write_json_atomic(&self.path, session)?;
        info!(user = %session.username, "session stored");
        Ok(())
    }

    /// Forget the stored session. Returns whether there was one.
    pub fn clear(&self) -> ExpenseResult<bool> {
        remove_if_exists(&self.path)
    }

    /// The stored session, after re-validating its token.
    ///
    /// No session, an expired token, or a token for a different user is an
    /// `Authentication` error.
    pub fn current(&self, tokens: &TokenService) -> ExpenseResult<Session> {
        let session = self
            .load()?
            .ok_or_else(|| {
                ExpenseError::Authentication("Not logged in. Run 'expense login' first".into())
            })?;

        let claims = tokens.validate(&session.token).map_err(|e| {
            debug!(error = %e, "stored session token rejected");
            ExpenseError::Authentication("Session expired, please log in again".into())
        })?;

        if claims.user_id()? != session.user_id {
            return Err(ExpenseError::Authentication(
                "Session does not match its token".into(),
            ));
        }

        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthSettings;
    use crate::models::User;
    use chrono::Duration;
    use tempfile::TempDir;

    fn tokens() -> TokenService {
        TokenService::new(&AuthSettings {
            secret: "session-test-secret".into(),
            ..AuthSettings::default()
        })
        .unwrap()
    }

    fn session_for(user: &User, tokens: &TokenService, issued: DateTime<Utc>) -> Session {
        let issued = tokens.issue_at(user, issued).unwrap();
        Session {
            user_id: user.id,
            username: user.username.clone(),
            token: issued.token,
            expires_at: issued.expires_at,
        }
    }

    #[test]
    fn test_save_load_clear() {
        let temp_dir = TempDir::new().unwrap();
        let store = SessionStore::new(&ExpensePaths::with_base_dir(temp_dir.path().to_path_buf()));
        let tokens = tokens();
        let user = User::new("ana", "hash");

        assert!(store.load().unwrap().is_none());

        let session = session_for(&user, &tokens, Utc::now());
        store.save(&session).unwrap();
        assert_eq!(store.load().unwrap(), Some(session.clone()));
        assert_eq!(store.current(&tokens).unwrap(), session);

        assert!(store.clear().unwrap());
        assert!(!store.clear().unwrap());
        assert!(store.current(&tokens).unwrap_err().is_authentication());
    }

    #[test]
    fn test_expired_session_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let store = SessionStore::new(&ExpensePaths::with_base_dir(temp_dir.path().to_path_buf()));
        let tokens = tokens();
        let user = User::new("ana", "hash");

        let session = session_for(&user, &tokens, Utc::now() - Duration::hours(30));
        assert!(session.is_expired_at(Utc::now()));
        store.save(&session).unwrap();

        assert!(store.current(&tokens).unwrap_err().is_authentication());
    }

    #[test]
    fn test_tampered_user_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let store = SessionStore::new(&ExpensePaths::with_base_dir(temp_dir.path().to_path_buf()));
        let tokens = tokens();
        let user = User::new("ana", "hash");

        let mut session = session_for(&user, &tokens, Utc::now());
        session.user_id = UserId::new();
        store.save(&session).unwrap();

        assert!(store.current(&tokens).unwrap_err().is_authentication());
    }
}
