//! JWT session gate implementation.
//!
//! There is no session table: the gate compares login credentials against
//! the one fixed administrator identity and issues a signed, time-limited
//! token. Validity is a pure function of the token value and its embedded
//! expiry, so revocation before expiry relies on the client discarding the
//! token at logout.

use chrono::{TimeDelta, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use quill_core::ports::{AuthError, SessionClaims, SessionGate};

/// Session gate configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub admin_username: String,
    pub admin_password: String,
    pub secret: String,
    pub ttl_hours: i64,
    pub issuer: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            admin_username: "admin".to_string(),
            admin_password: "password".to_string(),
            secret: "change-me-in-production".to_string(),
            // Matches the 7-day cookie lifetime of the admin UI.
            ttl_hours: 168,
            issuer: "quill-api".to_string(),
        }
    }
}

/// Internal JWT claims structure for serialization.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: i64, // expiration timestamp
    iat: i64, // issued at
    iss: String, // issuer
}

/// JWT-based session gate.
pub struct JwtSessionGate {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: SessionConfig,
}

impl JwtSessionGate {
    pub fn new(config: SessionConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            encoding_key,
            decoding_key,
            config,
        }
    }

    pub fn from_env() -> Self {
        let defaults = SessionConfig::default();

        let secret = std::env::var("SESSION_SECRET").unwrap_or_else(|_| defaults.secret.clone());
        let admin_password =
            std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| defaults.admin_password.clone());

        // Warn if running with development secrets in production
        if secret == defaults.secret || admin_password == defaults.admin_password {
            let is_production = std::env::var("RUST_ENV")
                .map(|v| v == "production" || v == "prod")
                .unwrap_or(false);

            if is_production {
                tracing::error!(
                    "SECURITY: Using default session secret or admin password in production! \
                     Set SESSION_SECRET and ADMIN_PASSWORD environment variables."
                );
            } else {
                tracing::warn!(
                    "Using default session credentials. Set SESSION_SECRET and ADMIN_PASSWORD for production use."
                );
            }
        }

        let ttl_hours = match std::env::var("SESSION_TTL_HOURS")
            .ok()
            .and_then(|s| s.parse::<i64>().ok())
        {
            Some(hours) if hours > 0 => hours,
            Some(hours) => {
                tracing::warn!(
                    "Ignoring non-positive SESSION_TTL_HOURS ({}), using {} hours",
                    hours,
                    defaults.ttl_hours
                );
                defaults.ttl_hours
            }
            None => defaults.ttl_hours,
        };

        let config = SessionConfig {
            admin_username: std::env::var("ADMIN_USERNAME")
                .unwrap_or_else(|_| defaults.admin_username.clone()),
            admin_password,
            secret,
            ttl_hours,
            issuer: std::env::var("SESSION_ISSUER").unwrap_or_else(|_| defaults.issuer.clone()),
        };
        Self::new(config)
    }
}

impl SessionGate for JwtSessionGate {
    fn login(&self, username: &str, password: &str) -> Result<String, AuthError> {
        if username != self.config.admin_username || password != self.config.admin_password {
            return Err(AuthError::InvalidCredentials);
        }

        let now = Utc::now();
        let exp = now + TimeDelta::hours(self.config.ttl_hours);

        let claims = Claims {
            sub: self.config.admin_username.clone(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }

    fn validate(&self, token: &str) -> Result<SessionClaims, AuthError> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.config.issuer]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            }
        })?;

        Ok(SessionClaims {
            subject: token_data.claims.sub,
            exp: token_data.claims.exp,
        })
    }

    fn expiration_seconds(&self) -> i64 {
        self.config.ttl_hours * 3600
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SessionConfig {
        SessionConfig {
            admin_username: "admin".to_string(),
            admin_password: "password".to_string(),
            secret: "test-secret-key".to_string(),
            ttl_hours: 1,
            issuer: "test-issuer".to_string(),
        }
    }

    #[test]
    fn test_login_success() {
        let gate = JwtSessionGate::new(test_config());

        let token = gate.login("admin", "password").unwrap();
        assert!(!token.is_empty());

        let claims = gate.validate(&token).unwrap();
        assert_eq!(claims.subject, "admin");
    }

    #[test]
    fn test_login_wrong_password() {
        let gate = JwtSessionGate::new(test_config());

        let result = gate.login("admin", "wrong");
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[test]
    fn test_login_wrong_username() {
        let gate = JwtSessionGate::new(test_config());

        let result = gate.login("root", "password");
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[test]
    fn test_validate_garbage_token() {
        let gate = JwtSessionGate::new(test_config());

        let result = gate.validate("not-a-token");
        assert!(matches!(result, Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn test_validate_foreign_secret_token() {
        let gate1 = JwtSessionGate::new(test_config());
        let gate2 = JwtSessionGate::new(SessionConfig {
            secret: "other-secret".to_string(),
            ..test_config()
        });

        let token = gate1.login("admin", "password").unwrap();
        assert!(gate2.validate(&token).is_err());
    }

    #[test]
    fn test_validate_expired_token() {
        // Issue a token that expired two hours ago, well past the
        // decoder's default leeway.
        let gate = JwtSessionGate::new(SessionConfig {
            ttl_hours: -2,
            ..test_config()
        });

        let token = gate.login("admin", "password").unwrap();
        let result = gate.validate(&token);
        assert!(matches!(result, Err(AuthError::TokenExpired)));
    }

    #[test]
    fn test_validate_wrong_issuer_token() {
        let gate1 = JwtSessionGate::new(SessionConfig {
            issuer: "issuer1".to_string(),
            ..test_config()
        });
        let gate2 = JwtSessionGate::new(SessionConfig {
            issuer: "issuer2".to_string(),
            ..test_config()
        });

        let token = gate1.login("admin", "password").unwrap();
        assert!(gate2.validate(&token).is_err());
    }

    #[test]
    fn test_expiry_measured_from_issuance() {
        let gate = JwtSessionGate::new(test_config());
        let issued = Utc::now().timestamp();

        let token = gate.login("admin", "password").unwrap();
        let claims = gate.validate(&token).unwrap();

        let expected = issued + gate.expiration_seconds();
        assert!((claims.exp - expected).abs() <= 1);
    }

    #[test]
    fn test_from_env_ignores_non_positive_ttl() {
        unsafe {
            std::env::set_var("SESSION_TTL_HOURS", "-2");
        }
        let gate = JwtSessionGate::from_env();
        unsafe {
            std::env::remove_var("SESSION_TTL_HOURS");
        }

        assert_eq!(
            gate.expiration_seconds(),
            SessionConfig::default().ttl_hours * 3600
        );
    }

    #[test]
    fn test_expiration_seconds() {
        let gate = JwtSessionGate::new(SessionConfig {
            ttl_hours: 168,
            ..test_config()
        });

        assert_eq!(gate.expiration_seconds(), 604800);
    }
}
