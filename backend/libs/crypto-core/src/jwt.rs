//! RS256 bearer tokens.
//!
//! Keys live in process-wide cells and are set once during startup. Services
//! that only authenticate requests call [`initialize_jwt_validation_only`]
//! and never see the private key.
use anyhow::{anyhow, Context, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, Algorithm, DecodingKey, EncodingKey, Header, TokenData, Validation,
};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const ACCESS_TOKEN_EXPIRY_MINUTES: i64 = 60;

const JWT_ALGORITHM: Algorithm = Algorithm::RS256;

/// Environment variable holding the PEM text of the public key.
pub const PUBLIC_KEY_ENV: &str = "JWT_PUBLIC_KEY_PEM";
/// Environment variable holding a path to the PEM file, used when
/// [`PUBLIC_KEY_ENV`] is unset.
pub const PUBLIC_KEY_FILE_ENV: &str = "JWT_PUBLIC_KEY_FILE";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Acting user id
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    /// Always "access" for tokens accepted by the API
    pub token_type: String,
    #[serde(default)]
    pub username: String,
}

static JWT_ENCODING_KEY: OnceCell<EncodingKey> = OnceCell::new();
static JWT_DECODING_KEY: OnceCell<DecodingKey> = OnceCell::new();

/// Install both halves of the key pair. Fails if either is already set.
pub fn initialize_jwt_keys(private_key_pem: &str, public_key_pem: &str) -> Result<()> {
    let encoding_key = EncodingKey::from_rsa_pem(private_key_pem.as_bytes())
        .map_err(|e| anyhow!("Failed to parse RSA private key: {e}"))?;

    JWT_ENCODING_KEY
        .set(encoding_key)
        .map_err(|_| anyhow!("JWT encoding key already initialized"))?;

    initialize_jwt_validation_only(public_key_pem)
}

pub fn initialize_jwt_validation_only(public_key_pem: &str) -> Result<()> {
    let decoding_key = DecodingKey::from_rsa_pem(public_key_pem.as_bytes())
        .map_err(|e| anyhow!("Failed to parse RSA public key: {e}"))?;

    JWT_DECODING_KEY
        .set(decoding_key)
        .map_err(|_| anyhow!("JWT decoding key already initialized"))?;

    tracing::debug!("JWT validation key installed");
    Ok(())
}

/// Read the public key PEM from `JWT_PUBLIC_KEY_PEM`, falling back to the
/// file named by `JWT_PUBLIC_KEY_FILE`.
pub fn load_validation_key() -> Result<String> {
    if let Ok(pem) = std::env::var(PUBLIC_KEY_ENV) {
        if !pem.trim().is_empty() {
            return Ok(pem);
        }
    }

    let path = std::env::var(PUBLIC_KEY_FILE_ENV)
        .map_err(|_| anyhow!("neither {PUBLIC_KEY_ENV} nor {PUBLIC_KEY_FILE_ENV} is set"))?;

    std::fs::read_to_string(&path).with_context(|| format!("reading JWT public key from {path}"))
}

fn encoding_key() -> Result<&'static EncodingKey> {
    JWT_ENCODING_KEY
        .get()
        .ok_or_else(|| anyhow!("JWT signing key not initialized"))
}

fn decoding_key() -> Result<&'static DecodingKey> {
    JWT_DECODING_KEY
        .get()
        .ok_or_else(|| anyhow!("JWT validation key not initialized"))
}

/// Sign a one-hour access token for `user_id`.
pub fn generate_access_token(user_id: Uuid, username: &str) -> Result<String> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::minutes(ACCESS_TOKEN_EXPIRY_MINUTES)).timestamp(),
        token_type: "access".to_string(),
        username: username.to_string(),
    };

    encode(&Header::new(JWT_ALGORITHM), &claims, encoding_key()?)
        .map_err(|e| anyhow!("Failed to generate access token: {e}"))
}

/// Verify signature and expiry. Only access tokens are accepted.
pub fn validate_token(token: &str) -> Result<TokenData<Claims>> {
    let mut validation = Validation::new(JWT_ALGORITHM);
    validation.validate_exp = true;

    let data = decode::<Claims>(token, decoding_key()?, &validation)
        .map_err(|e| anyhow!("Token validation failed: {e}"))?;

    if data.claims.token_type != "access" {
        return Err(anyhow!("unexpected token type {}", data.claims.token_type));
    }

    Ok(data)
}

pub fn get_user_id_from_token(token: &str) -> Result<Uuid> {
    let data = validate_token(token)?;
    Uuid::parse_str(&data.claims.sub).map_err(|e| anyhow!("Invalid user ID format in token: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_keys::{PRIVATE_KEY_PEM, PUBLIC_KEY_PEM};

    fn init_test_keys() {
        static INIT: std::sync::Once = std::sync::Once::new();
        INIT.call_once(|| {
            initialize_jwt_keys(PRIVATE_KEY_PEM, PUBLIC_KEY_PEM)
                .expect("Failed to initialize test keys");
        });
    }

    #[test]
    fn issued_token_round_trips_user_id() {
        init_test_keys();
        let user_id = Uuid::new_v4();

        let token = generate_access_token(user_id, "alice").unwrap();
        assert_eq!(token.matches('.').count(), 2);

        let data = validate_token(&token).unwrap();
        assert_eq!(data.claims.sub, user_id.to_string());
        assert_eq!(data.claims.username, "alice");
        assert_eq!(get_user_id_from_token(&token).unwrap(), user_id);
    }

    #[test]
    fn rejects_garbage_and_tampered_tokens() {
        init_test_keys();
        assert!(validate_token("not.a.token").is_err());

        let token = generate_access_token(Uuid::new_v4(), "bob").unwrap();
        let mut tampered = token.clone();
        tampered.push('x');
        assert!(validate_token(&tampered).is_err());
    }

    #[test]
    fn rejects_expired_token() {
        init_test_keys();
        let now = Utc::now();
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            iat: (now - Duration::hours(3)).timestamp(),
            exp: (now - Duration::hours(2)).timestamp(),
            token_type: "access".to_string(),
            username: "late".to_string(),
        };
        let token = encode(&Header::new(JWT_ALGORITHM), &claims, encoding_key().unwrap()).unwrap();

        assert!(validate_token(&token).is_err());
    }

    #[test]
    fn rejects_non_access_token_type() {
        init_test_keys();
        let now = Utc::now();
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(1)).timestamp(),
            token_type: "refresh".to_string(),
            username: String::new(),
        };
        let token = encode(&Header::new(JWT_ALGORITHM), &claims, encoding_key().unwrap()).unwrap();

        assert!(validate_token(&token).is_err());
    }

    #[test]
    fn rejects_malformed_pem() {
        assert!(DecodingKey::from_rsa_pem(b"-----BEGIN PUBLIC KEY-----\nnope\n").is_err());
    }
}
