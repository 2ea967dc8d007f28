//! Configuration module for expense-control
//!
//! - Data directory resolution
//! - User settings persistence (currency, token and password hashing parameters)

pub mod paths;
pub mod settings;

pub use paths::ExpensePaths;
pub use settings::{AuthSettings, PasswordSettings, Settings};
