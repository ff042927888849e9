use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::utils::{AppError, TokenError};

const TOKEN_TTL_HOURS: i64 = 24;

// Registered claims the service sets itself; never taken from the client.
const RESERVED_CLAIMS: [&str; 6] = ["iat", "exp", "jti", "nbf", "aud", "iss"];

/// Identity submitted to `POST /api/set-token`. Anything besides `email` and
/// `name` is carried through into the token untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

// JWT Claims
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub iat: usize,            // issued at
    pub exp: usize,            // expiration
    pub jti: String,           // JWT ID
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

/// Signs and checks HS256 bearer tokens with the server secret.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::hours(TOKEN_TTL_HOURS),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.access_secret)
    }

    pub fn issue(&self, identity: Identity) -> Result<String, AppError> {
        self.issue_with_ttl(identity, self.ttl)
    }

    fn issue_with_ttl(&self, identity: Identity, ttl: Duration) -> Result<String, AppError> {
        let now = Utc::now();
        let mut profile = identity.profile;
        for key in RESERVED_CLAIMS {
            profile.remove(key);
        }

        let claims = Claims {
            email: identity.email,
            name: identity.name,
            iat: now.timestamp().max(0) as usize,
            exp: (now + ttl).timestamp().max(0) as usize,
            jti: Uuid::new_v4().to_string(),
            profile,
        };

        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn identity(value: Value) -> Identity {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn issued_token_verifies_to_original_claims() {
        let service = TokenService::new("secret");
        let token = service
            .issue(identity(json!({
                "email": "a@x.com",
                "name": "An",
                "photoURL": "https://img"
            })))
            .unwrap();

        let claims = service.verify(&token).unwrap();
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.name.as_deref(), Some("An"));
        assert_eq!(claims.profile.get("photoURL"), Some(&json!("https://img")));
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }

    #[test]
    fn expired_token_is_rejected_as_expired() {
        let service = TokenService::new("secret");
        let token = service
            .issue_with_ttl(identity(json!({ "email": "a@x.com" })), Duration::hours(-1))
            .unwrap();

        assert_eq!(service.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn token_signed_with_other_secret_is_invalid() {
        let token = TokenService::new("one")
            .issue(identity(json!({ "email": "a@x.com" })))
            .unwrap();

        assert_eq!(TokenService::new("two").verify(&token), Err(TokenError::Invalid));
        assert_eq!(TokenService::new("one").verify("garbage"), Err(TokenError::Invalid));
    }

    #[test]
    fn client_cannot_choose_its_own_expiry() {
        let service = TokenService::new("secret");
        let token = service
            .issue(identity(json!({
                "email": "a@x.com",
                "exp": 9_999_999_999_u64,
                "aud": "elsewhere"
            })))
            .unwrap();

        let claims = service.verify(&token).unwrap();
        assert!(claims.exp < 9_999_999_999);
        assert!(!claims.profile.contains_key("aud"));
    }

    #[test]
    fn identity_requires_email() {
        assert!(serde_json::from_value::<Identity>(json!({ "name": "x" })).is_err());
    }
}
