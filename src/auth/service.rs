//! Login, registration and session lifecycle

use tracing::{info, warn};

use crate::config::Settings;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::User;
use crate::services::non_empty;
use crate::storage::Storage;

use super::password::PasswordService;
use super::session::{Session, SessionStore};
use super::token::{IssuedToken, TokenService};

/// Message for every failed login, whatever the reason
pub const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Message for a registration whose username is taken
pub const USERNAME_TAKEN: &str = "Username is not available";

/// Result of a login attempt
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub success: bool,
    pub token: Option<IssuedToken>,
    pub user: Option<User>,
    pub message: String,
}

impl LoginOutcome {
    fn failed() -> Self {
        Self {
            success: false,
            token: None,
            user: None,
            message: INVALID_CREDENTIALS.to_string(),
        }
    }
}

/// Data for a new user
#[derive(Debug, Clone, Default)]
pub struct RegisterInput {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Result of a registration attempt
#[derive(Debug, Clone)]
pub struct RegisterOutcome {
    pub success: bool,
    pub message: String,
}

/// Authentication gateway over the user collection
pub struct AuthService<'a> {
    storage: &'a Storage,
    passwords: PasswordService,
    tokens: TokenService,
    sessions: SessionStore,
}

impl<'a> AuthService<'a> {
    pub fn new(storage: &'a Storage, settings: &Settings) -> ExpenseResult<Self> {
        Ok(Self {
            storage,
            passwords: PasswordService::new(settings.password.clone()),
            tokens: TokenService::new(&settings.auth)?,
            sessions: SessionStore::new(storage.paths()),
        })
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Create a user account.
    ///
    /// A taken username gives an unsuccessful outcome and leaves the existing
    /// user untouched. Empty username or password is a validation error.
    pub fn register(&self, input: RegisterInput) -> ExpenseResult<RegisterOutcome> {
        let username = input.username.trim();
        if username.is_empty() {
            return Err(ExpenseError::Validation("Username cannot be empty".into()));
        }
        if input.password.is_empty() {
            return Err(ExpenseError::Validation("Password cannot be empty".into()));
        }

        if self.storage.users.username_exists(username)? {
            warn!("registration refused for taken username");
            return Ok(RegisterOutcome {
                success: false,
                message: USERNAME_TAKEN.to_string(),
            });
        }

        let mut user = User::new(username, String::new());
        user.email = non_empty(input.email.as_deref());
        user.first_name = non_empty(input.first_name.as_deref());
        user.last_name = non_empty(input.last_name.as_deref());
        user.validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        user.password_hash = self.passwords.hash_password(&input.password)?;

        self.storage.users.upsert(user.clone())?;
        self.storage.users.save()?;

        info!(user = %user.username, "user registered");
        Ok(RegisterOutcome {
            success: true,
            message: "User registered successfully".to_string(),
        })
    }

    /// Check credentials and issue a token. Nothing is persisted.
    pub fn login(&self, username: &str, password: &str) -> ExpenseResult<LoginOutcome> {
        let user = match self.storage.users.get_by_username(username)? {
            Some(user) if user.active => user,
            _ => {
                warn!("login failed");
                return Ok(LoginOutcome::failed());
            }
        };

        if !self.passwords.verify_password(password, &user.password_hash) {
            warn!("login failed");
            return Ok(LoginOutcome::failed());
        }

        let token = self.tokens.issue(&user)?;
        info!(user = %user.username, "login succeeded");

        Ok(LoginOutcome {
            success: true,
            token: Some(token),
            user: Some(user),
            message: "Login successful".to_string(),
        })
    }

    /// Log in and remember the session for later commands
    pub fn start_session(&self, username: &str, password: &str) -> ExpenseResult<Session> {
        let outcome = self.login(username, password)?;

        let (user, token) = match (outcome.user, outcome.token) {
            (Some(user), Some(token)) if outcome.success => (user, token),
            _ => return Err(ExpenseError::Authentication(outcome.message)),
        };

        let session = Session {
            user_id: user.id,
            username: user.username,
            token: token.token,
            expires_at: token.expires_at,
        };
        self.sessions.save(&session)?;
        Ok(session)
    }

    /// Forget the current session. Returns whether one existed.
    pub fn logout(&self) -> ExpenseResult<bool> {
        let cleared = self.sessions.clear()?;
        if cleared {
            info!("logged out");
        }
        Ok(cleared)
    }

    /// The current, still-valid session
    pub fn current_session(&self) -> ExpenseResult<Session> {
        let session = self.sessions.current(&self.tokens)?;

        match self.storage.users.get(session.user_id)? {
            Some(user) if user.active => Ok(session),
            _ => Err(ExpenseError::Authentication(
                "The logged-in user no longer exists".into(),
            )),
        }
    }

    /// The user behind the current session
    pub fn current_user(&self) -> ExpenseResult<User> {
        let session = self.current_session()?;
        self.storage
            .users
            .get(session.user_id)?
            .ok_or_else(|| ExpenseError::user_not_found(session.username))
    }
}
