use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use crate::app_error::{AppError, AppResult};

/// Login sessions and password-reset tokens share one signing secret, so
/// every token carries a purpose claim and verification insists on it. A
/// session token can never be replayed as a reset token.
pub const PURPOSE_SESSION: &str = "session";
pub const PURPOSE_PASSWORD_RESET: &str = "password_reset";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub purpose: String,
    pub exp: i64,
    pub iat: i64,
}

pub fn issue(
    user_id: Uuid,
    purpose: &str,
    secret: &secrecy::SecretString,
    ttl: Duration,
) -> AppResult<String> {
    let now = OffsetDateTime::now_utc().unix_timestamp();
    let exp = now + ttl.whole_seconds();
    let claims = Claims {
        sub: user_id.to_string(),
        purpose: purpose.to_string(),
        iat: now,
        exp,
    };
    let header = Header::new(Algorithm::HS256);
    encode(
        &header,
        &claims,
        &EncodingKey::from_secret(secret.expose_secret().as_bytes()),
    )
    .map_err(|e| AppError::Internal(e.to_string()))
}

pub fn verify(
    token: &str,
    expected_purpose: &str,
    secret: &secrecy::SecretString,
) -> AppResult<Claims> {
    let validation = Validation::new(Algorithm::HS256);
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.expose_secret().as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::InvalidCredentials)?;

    if claims.purpose != expected_purpose {
        return Err(AppError::InvalidCredentials);
    }
    Ok(claims)
}
