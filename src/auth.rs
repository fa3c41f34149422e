//! Password hashing and bearer-token sessions.

use std::sync::Arc;

use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use password_hash::{PasswordHash, SaltString};
use rand::rngs::OsRng;
use poem::Request;
use poem_openapi::SecurityScheme;
use poem_openapi::auth::Bearer;
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::entities::user;
use crate::error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: i64,
    pub username: String,
    pub is_staff: bool,
    pub exp: u64,
}

pub fn hash_password(password: &str) -> Result<String, password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string())
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

pub fn issue_token(
    config: &AppConfig,
    user: &user::Model,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims {
        sub: user.id,
        username: user.username.clone(),
        is_staff: user.is_staff,
        exp: chrono::Utc::now().timestamp() as u64 + config.token_ttl_secs,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret_key.as_bytes()),
    )
}

pub fn decode_token(secret: &str, token: &str) -> Option<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .ok()
    .map(|data| data.claims)
}

/// Bearer session established at signup or token issuance. A missing or
/// invalid token rejects the request with 401 before the handler runs.
#[derive(SecurityScheme)]
#[oai(ty = "bearer", checker = "session_checker")]
pub struct SessionAuth(pub Claims);

async fn session_checker(req: &Request, bearer: Bearer) -> Option<Claims> {
    let config = req.data::<Arc<AppConfig>>()?;
    decode_token(&config.secret_key, &bearer.token)
}

/// Content authoring requires the staff capability on top of a valid session.
pub fn require_staff(claims: &Claims) -> poem::Result<()> {
    if claims.is_staff {
        Ok(())
    } else {
        Err(error::forbidden("staff capability required"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_round_trip() {
        let hash = hash_password("correct horse").expect("hash");
        assert!(verify_password("correct horse", &hash));
        assert!(!verify_password("wrong horse", &hash));
    }

    #[test]
    fn token_round_trip() {
        let config = AppConfig {
            secret_key: "test-secret".into(),
            debug: false,
            allowed_hosts: vec![],
            database_url: String::new(),
            bind_addr: String::new(),
            language_code: "en".into(),
            time_zone: "UTC".into(),
            media_root: "media".into(),
            static_root: "static".into(),
            token_ttl_secs: 60,
        };
        let user = user::Model {
            id: 7,
            username: "alice".into(),
            email: "a@example.com".into(),
            password_hash: String::new(),
            is_staff: true,
            created_at: chrono::Utc::now(),
        };
        let token = issue_token(&config, &user).expect("issue");
        let claims = decode_token("test-secret", &token).expect("decode");
        assert_eq!(claims.sub, 7);
        assert!(claims.is_staff);
        assert!(decode_token("other-secret", &token).is_none());
    }
}
