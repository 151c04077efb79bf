//! JWT session-token generation and validation.
//!
//! Tokens are HS256-signed JWTs containing a [`Claims`] payload. They are
//! valid for exactly [`TOKEN_LIFETIME_HOURS`] from issuance with no clock
//! leeway, and there is no server-side revocation before expiry.

use cardb_core::roles::Role;
use cardb_core::types::Timestamp;
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fixed session-token lifetime.
pub const TOKEN_LIFETIME_HOURS: i64 = 2;

const DEFAULT_ISSUER: &str = "cardb-api";
const DEFAULT_AUDIENCE: &str = "cardb-client";

/// JWT claims embedded in every session token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    /// Subject -- the account's username.
    pub sub: String,
    pub role: Role,
    pub iss: String,
    pub aud: String,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Expiration time (UTC Unix timestamp). The token is valid up to and including this second.
    pub exp: i64,
    /// Unique token identifier (UUID v4).
    pub jti: String,
}

/// Signing key and the issuer/audience pair every token must carry.
///
/// Loaded once at startup and handed to the credential service; never mutated.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    pub issuer: String,
    pub audience: String,
}

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var        | Required | Default        |
    /// |----------------|----------|----------------|
    /// | `JWT_SECRET`   | **yes**  | --             |
    /// | `JWT_ISSUER`   | no       | `cardb-api`    |
    /// | `JWT_AUDIENCE` | no       | `cardb-client` |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let issuer = std::env::var("JWT_ISSUER").unwrap_or_else(|_| DEFAULT_ISSUER.into());
        let audience = std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| DEFAULT_AUDIENCE.into());

        Self {
            secret,
            issuer,
            audience,
        }
    }
}

/// A freshly signed token together with its expiry.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: Claims,
}

/// Generate a session token for `username` issued now.
pub fn generate_token(
    username: &str,
    role: Role,
    config: &JwtConfig,
) -> Result<IssuedToken, jsonwebtoken::errors::Error> {
    generate_token_at(username, role, config, Utc::now())
}

/// Generate a session token as if issued at `now`.
pub fn generate_token_at(
    username: &str,
    role: Role,
    config: &JwtConfig,
    now: Timestamp,
) -> Result<IssuedToken, jsonwebtoken::errors::Error> {
    let iat = now.timestamp();
    let claims = Claims {
        sub: username.to_string(),
        role,
        iss: config.issuer.clone(),
        aud: config.audience.clone(),
        iat,
        exp: iat + TOKEN_LIFETIME_HOURS * 3600,
        jti: Uuid::new_v4().to_string(),
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )?;
    Ok(IssuedToken { token, claims })
}

/// Validate a token against the current time.
///
/// Returns `None` on any failure: malformed input, bad signature, wrong
/// issuer or audience, unknown role, or expiry.
pub fn validate_token(token: &str, config: &JwtConfig) -> Option<Claims> {
    validate_token_at(token, config, Utc::now())
}

/// Validate a token against the instant `now`.
///
/// Expiry is checked here rather than by `jsonwebtoken` so the boundary is
/// exact: valid while `now <= exp`, invalid one second later.
pub fn validate_token_at(token: &str, config: &JwtConfig, now: Timestamp) -> Option<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.validate_exp = false;
    validation.validate_nbf = false;
    validation.set_issuer(&[&config.issuer]);
    validation.set_audience(&[&config.audience]);
    validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .ok()?;

    if now.timestamp() > data.claims.exp {
        return None;
    }
    Some(data.claims)
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    /// Helper to build a test config with a known secret.
    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            issuer: DEFAULT_ISSUER.to_string(),
            audience: DEFAULT_AUDIENCE.to_string(),
        }
    }

    fn issued_at() -> Timestamp {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_generate_and_validate_token() {
        let config = test_config();
        let issued = generate_token("alice", Role::Admin, &config).expect("token generation");

        let claims = validate_token(&issued.token, &config).expect("token should validate");
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.role, Role::Admin);
        assert_eq!(claims.exp - claims.iat, TOKEN_LIFETIME_HOURS * 3600);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn test_token_valid_through_last_second() {
        let config = test_config();
        let issued = generate_token_at("alice", Role::User, &config, issued_at()).unwrap();

        let at_expiry = issued_at() + Duration::hours(TOKEN_LIFETIME_HOURS);
        assert!(validate_token_at(&issued.token, &config, issued_at()).is_some());
        assert!(validate_token_at(&issued.token, &config, at_expiry).is_some());
    }

    #[test]
    fn test_token_invalid_one_second_past_expiry() {
        let config = test_config();
        let issued = generate_token_at("alice", Role::User, &config, issued_at()).unwrap();

        let past = issued_at() + Duration::hours(TOKEN_LIFETIME_HOURS) + Duration::seconds(1);
        assert!(validate_token_at(&issued.token, &config, past).is_none());
    }

    #[test]
    fn test_expired_token_fails_against_wall_clock() {
        let config = test_config();
        let long_ago = Utc::now() - Duration::hours(TOKEN_LIFETIME_HOURS) - Duration::seconds(5);
        let issued = generate_token_at("alice", Role::User, &config, long_ago).unwrap();

        assert!(validate_token(&issued.token, &config).is_none());
    }

    #[test]
    fn test_different_secrets_fail() {
        let config_a = test_config();
        let config_b = JwtConfig {
            secret: "secret-bravo".to_string(),
            ..test_config()
        };

        let issued = generate_token("alice", Role::User, &config_a).unwrap();
        assert!(validate_token(&issued.token, &config_b).is_none());
    }

    #[test]
    fn test_wrong_issuer_or_audience_fails() {
        let config = test_config();
        let issued = generate_token("alice", Role::User, &config).unwrap();

        let other_issuer = JwtConfig {
            issuer: "someone-else".to_string(),
            ..test_config()
        };
        let other_audience = JwtConfig {
            audience: "someone-else".to_string(),
            ..test_config()
        };
        assert!(validate_token(&issued.token, &other_issuer).is_none());
        assert!(validate_token(&issued.token, &other_audience).is_none());
    }

    #[test]
    fn test_malformed_token_is_none() {
        let config = test_config();
        assert!(validate_token("", &config).is_none());
        assert!(validate_token("not.a.jwt", &config).is_none());
    }

    #[test]
    fn test_unique_jti_per_token() {
        let config = test_config();
        let a = generate_token_at("alice", Role::User, &config, issued_at()).unwrap();
        let b = generate_token_at("alice", Role::User, &config, issued_at()).unwrap();
        assert_ne!(a.claims.jti, b.claims.jti);
        assert_ne!(a.token, b.token);
    }
}
