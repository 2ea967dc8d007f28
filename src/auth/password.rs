//! Password hashing with Argon2id
//!
//! Hashes are PHC strings, so the salt and cost parameters travel with the
//! hash and verification works even after the configured costs change.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use zeroize::Zeroizing;

use crate::config::PasswordSettings;
use crate::error::{ExpenseError, ExpenseResult};

/// Hashes and verifies user passwords
#[derive(Debug, Clone)]
pub struct PasswordService {
    settings: PasswordSettings,
}

impl PasswordService {
    pub fn new(settings: PasswordSettings) -> Self {
        Self { settings }
    }

    fn argon2(&self) -> ExpenseResult<Argon2<'static>> {
        let params = Params::new(
            self.settings.memory_cost,
            self.settings.time_cost,
            self.settings.parallelism,
            None,
        )
        .map_err(|e| ExpenseError::Config(format!("Invalid Argon2 parameters: {}", e)))?;

        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }

    /// Hash a password into a PHC string
    pub fn hash_password(&self, password: &str) -> ExpenseResult<String> {
        if password.is_empty() {
            return Err(ExpenseError::Validation("Password cannot be empty".into()));
        }

        let password = Zeroizing::new(password.as_bytes().to_vec());
        let salt = SaltString::generate(&mut OsRng);

        self.argon2()?
            .hash_password(&password, &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| ExpenseError::Authentication(format!("Failed to hash password: {}", e)))
    }

    /// Check a password against a stored hash in constant time.
    ///
    /// A malformed stored hash counts as a mismatch.
    pub fn verify_password(&self, password: &str, hash: &str) -> bool {
        let parsed = match PasswordHash::new(hash) {
            Ok(parsed) => parsed,
            Err(_) => return false,
        };

        let password = Zeroizing::new(password.as_bytes().to_vec());
        Argon2::default()
            .verify_password(&password, &parsed)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_settings() -> PasswordSettings {
        PasswordSettings {
            memory_cost: 256,
            time_cost: 1,
            parallelism: 1,
        }
    }

    #[test]
    fn test_hash_and_verify() {
        let service = PasswordService::new(fast_settings());
        let hash = service.hash_password("s3cret!").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(service.verify_password("s3cret!", &hash));
        assert!(!service.verify_password("S3cret!", &hash));
    }

    #[test]
    fn test_same_password_different_salt() {
        let service = PasswordService::new(fast_settings());
        let a = service.hash_password("hunter2").unwrap();
        let b = service.hash_password("hunter2").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_empty_password_rejected() {
        let service = PasswordService::new(fast_settings());
        assert!(service.hash_password("").unwrap_err().is_validation());
    }

    #[test]
    fn test_malformed_hash_is_mismatch() {
        let service = PasswordService::new(fast_settings());
        assert!(!service.verify_password("anything", "not-a-phc-string"));
    }

    #[test]
    fn test_invalid_params_are_config_error() {
        let service = PasswordService::new(PasswordSettings {
            memory_cost: 1,
            time_cost: 0,
            parallelism: 1,
        });
        let err = service.hash_password("pw").unwrap_err();
        assert!(matches!(err, ExpenseError::Config(_)));
    }
}
