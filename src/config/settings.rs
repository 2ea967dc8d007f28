//! User settings for expense-control
//!
//! Display preferences plus the parameters of the authentication gateway:
//! token issuer/audience/lifetime/secret and Argon2 cost parameters.

use argon2::password_hash::{rand_core::OsRng, SaltString};
use serde::{Deserialize, Serialize};

use super::paths::ExpensePaths;
use crate::error::ExpenseError;

/// Environment variable that overrides the stored token signing secret
pub const JWT_SECRET_ENV: &str = "EXPENSE_CONTROL_JWT_SECRET";

/// Bearer token settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSettings {
    #[serde(default = "default_issuer")]
    pub issuer: String,

    #[serde(default = "default_audience")]
    pub audience: String,

    /// Token lifetime in hours
    #[serde(default = "default_expiration_hours")]
    pub expiration_hours: u32,

    /// HMAC signing secret. Generated on first `init`.
    #[serde(default)]
    pub secret: String,
}

fn default_issuer() -> String {
    "ExpenseControl".to_string()
}

fn default_audience() -> String {
    "ExpenseControlUsers".to_string()
}

fn default_expiration_hours() -> u32 {
    24
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            issuer: default_issuer(),
            audience: default_audience(),
            expiration_hours: default_expiration_hours(),
            secret: String::new(),
        }
    }
}

impl AuthSettings {
    /// The effective signing secret, preferring the environment override
    pub fn effective_secret(&self) -> Result<String, ExpenseError> {
        if let Ok(secret) = std::env::var(JWT_SECRET_ENV) {
            if !secret.is_empty() {
                return Ok(secret);
            }
        }

        if self.secret.is_empty() {
            return Err(ExpenseError::Config(format!(
                "No token secret configured. Run 'expense init' or set {}",
                JWT_SECRET_ENV
            )));
        }

        Ok(self.secret.clone())
    }
}

/// Argon2id cost parameters for password hashing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordSettings {
    /// Memory cost in KiB
    pub memory_cost: u32,
    /// Iterations
    pub time_cost: u32,
    pub parallelism: u32,
}

impl Default for PasswordSettings {
    fn default() -> Self {
        // argon2 crate defaults (OWASP minimum for Argon2id)
        Self {
            memory_cost: 19456,
            time_cost: 2,
            parallelism: 1,
        }
    }
}

/// User settings for expense-control
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    #[serde(default)]
    pub auth: AuthSettings,

    #[serde(default)]
    pub password: PasswordSettings,
}

fn default_schema_version() -> u32 {
    1
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            auth: AuthSettings::default(),
            password: PasswordSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &ExpensePaths) -> Result<Self, ExpenseError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| ExpenseError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| ExpenseError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ExpensePaths) -> Result<(), ExpenseError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ExpenseError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| ExpenseError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Generate a signing secret if none is stored. Returns true if one was created.
    pub fn ensure_secret(&mut self) -> bool {
        if !self.auth.secret.is_empty() {
            return false;
        }

        let first = SaltString::generate(&mut OsRng);
        let second = SaltString::generate(&mut OsRng);
        self.auth.secret = format!("{}{}", first.as_str(), second.as_str());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.schema_version, 1);
        assert_eq!(settings.auth.expiration_hours, 24);
        assert_eq!(settings.auth.issuer, "ExpenseControl");
        assert!(settings.auth.secret.is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.auth.expiration_hours = 8;
        settings.password.time_cost = 3;
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.auth.expiration_hours, 8);
        assert_eq!(loaded.password.time_cost, 3);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        // keys this version no longer reads are ignored
        let settings: Settings =
            serde_json::from_str(r#"{"currency_symbol": "S/", "auth": {"expiration_hours": 2}}"#)
                .unwrap();
        assert_eq!(settings.auth.expiration_hours, 2);
        assert_eq!(settings.auth.audience, "ExpenseControlUsers");
        assert_eq!(settings.password.time_cost, 2);
    }

    #[test]
    fn test_ensure_secret_only_once() {
        let mut settings = Settings::default();
        assert!(settings.ensure_secret());
        let secret = settings.auth.secret.clone();
        assert!(secret.len() >= 32);

        assert!(!settings.ensure_secret());
        assert_eq!(settings.auth.secret, secret);
    }
}
