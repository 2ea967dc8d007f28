//! Authentication gateway
//!
//! - Argon2id password hashing
//! - HS256 bearer tokens
//! - The persisted current session

pub mod password;
pub mod service;
pub mod session;
pub mod token;

pub use password::PasswordService;
pub use service::{AuthService, LoginOutcome, RegisterInput, RegisterOutcome};
pub use session::{Session, SessionStore};
pub use token::{IssuedToken, TokenClaims, TokenService};
