// Organizer tokens
// HS256 bearer tokens whose subject is the organizer's user id

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Lifetime of tokens minted by [`create_token`]
pub const TOKEN_TTL_HOURS: i64 = 8;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Token could not be signed: {0}")]
    Encode(#[source] jsonwebtoken::errors::Error),
    #[error("Token rejected: {0}")]
    Invalid(#[source] jsonwebtoken::errors::Error),
}

/// JWT claims carried by organizer tokens
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Organizer id, recorded as the group's creator
    pub sub: Uuid,
    /// Expiry timestamp (seconds since epoch)
    pub exp: usize,
}

/// Signs a token for an organizer
///
/// Used by operator tooling and tests; production tokens come from the
/// identity service sharing `JWT_SECRET`.
///
/// # Example
/// ```
/// use matchup_api::auth::jwt::{create_token, verify_token};
/// use uuid::Uuid;
///
/// let organizer = Uuid::new_v4();
/// let token = create_token(organizer, "secret").unwrap();
/// assert_eq!(verify_token(&token, "secret").unwrap().sub, organizer);
/// ```
pub fn create_token(organizer_id: Uuid, secret: &str) -> Result<String, TokenError> {
    let expiry = Utc::now() + Duration::hours(TOKEN_TTL_HOURS);
    let claims = Claims {
        sub: organizer_id,
        exp: expiry.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
    .map_err(TokenError::Encode)
}

/// Verifies signature and expiry and returns the claims
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, TokenError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(TokenError::Invalid)
}
