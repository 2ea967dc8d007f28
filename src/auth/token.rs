//! Bearer tokens (HS256 JWT)
//!
//! Claims carry the user id in `sub`, the username and optional email, the
//! configured issuer and audience, and a random `jti`. Validation checks
//! the signature, issuer, audience and expiry with no leeway.

use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AuthSettings;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{EntityId, User, UserId};

/// Claims embedded in every token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub iss: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

impl TokenClaims {
    pub fn user_id(&self) -> ExpenseResult<UserId> {
        UserId::parse(&self.sub)
            .map_err(|_| ExpenseError::Authentication("Invalid token subject".into()))
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.exp, 0)
            .single()
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

/// A freshly issued token
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Issues and validates tokens
#[derive(Clone)]
pub struct TokenService {
    issuer: String,
    audience: String,
    lifetime: Duration,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenService {
    pub fn new(settings: &AuthSettings) -> ExpenseResult<Self> {
        let secret = settings.effective_secret()?;

        Ok(Self {
            issuer: settings.issuer.clone(),
            audience: settings.audience.clone(),
            lifetime: Duration::hours(i64::from(settings.expiration_hours)),
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        })
    }

    /// Issue a token for a user, valid from now
    pub fn issue(&self, user: &User) -> ExpenseResult<IssuedToken> {
        self.issue_at(user, Utc::now())
    }

    pub(crate) fn issue_at(&self, user: &User, now: DateTime<Utc>) -> ExpenseResult<IssuedToken> {
        let expires_at = now + self.lifetime;
        let claims = TokenClaims {
            sub: user.id.as_uuid().to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| ExpenseError::Token(format!("Failed to encode token: {}", e)))?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Validate a token and return its claims
    pub fn validate(&self, token: &str) -> ExpenseResult<TokenClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);

        decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| ExpenseError::Authentication(format!("Invalid token: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(secret: &str) -> AuthSettings {
        AuthSettings {
            secret: secret.to_string(),
            ..AuthSettings::default()
        }
    }

    fn user() -> User {
        let mut user = User::new("ana", "hash");
        user.email = Some("ana@example.com".into());
        user
    }

    #[test]
    fn test_issue_and_validate() {
        let service = TokenService::new(&settings("test-secret")).unwrap();
        let user = user();

        let issued = service.issue(&user).unwrap();
        let claims = service.validate(&issued.token).unwrap();

        assert_eq!(claims.user_id().unwrap(), user.id);
        assert_eq!(claims.username, "ana");
        assert_eq!(claims.email.as_deref(), Some("ana@example.com"));
        assert_eq!(claims.iss, "ExpenseControl");
        assert_eq!(claims.aud, "ExpenseControlUsers");
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
        assert_eq!(claims.expires_at().timestamp(), issued.expires_at.timestamp());
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = TokenService::new(&settings("test-secret")).unwrap();
        let long_ago = Utc::now() - Duration::hours(48);

        let issued = service.issue_at(&user(), long_ago).unwrap();
        assert!(service.validate(&issued.token).unwrap_err().is_authentication());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issuer = TokenService::new(&settings("secret-one")).unwrap();
        let verifier = TokenService::new(&settings("secret-two")).unwrap();

        let issued = issuer.issue(&user()).unwrap();
        assert!(verifier.validate(&issued.token).is_err());
    }

    #[test]
    fn test_wrong_issuer_rejected() {
        let mut other = settings("shared");
        other.issuer = "SomeoneElse".into();

        let foreign = TokenService::new(&other).unwrap();
        let ours = TokenService::new(&settings("shared")).unwrap();

        let issued = foreign.issue(&user()).unwrap();
        assert!(ours.validate(&issued.token).is_err());
    }

    #[test]
    fn test_missing_secret_is_config_error() {
        if std::env::var(crate::config::settings::JWT_SECRET_ENV).is_ok() {
            return;
        }
        let result = TokenService::new(&AuthSettings::default());
        assert!(matches!(result, Err(ExpenseError::Config(_))));
    }
}
