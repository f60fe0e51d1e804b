use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

pub const ADMIN_SUBJECT: &str = "admin";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
}

/// Issue an admin session token after a successful PIN check.
pub fn create_admin_token(secret: &str, expire_hours: i64) -> Result<String, jsonwebtoken::errors::Error> {
    let expiration = Utc::now() + Duration::hours(expire_hours);
    let claims = Claims {
        sub: ADMIN_SUBJECT.to_string(),
        exp: expiration.timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// True when `token` is an unexpired admin token signed with `secret`.
pub fn is_admin_token(token: &str, secret: &str) -> bool {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims.sub == ADMIN_SUBJECT)
    .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_round_trip() {
        let token = create_admin_token("secret", 1).unwrap();
        assert!(is_admin_token(&token, "secret"));
        assert!(!is_admin_token(&token, "other-secret"));
        assert!(!is_admin_token("not-a-token", "secret"));
    }

    #[test]
    fn test_expired_token_rejected() {
        let token = create_admin_token("secret", -2).unwrap();
        assert!(!is_admin_token(&token, "secret"));
    }
}
