use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::state::AppState;
use crate::auth::jwt::verify_token;

/// Bearer token extractor yielding the organizer id
///
/// Usage:
/// ```rust,ignore
/// async fn protected_handler(
///     JwtAuth(organizer_id): JwtAuth,
/// ) -> Result<String, ApiError> {
///     Ok(format!("Hello organizer {}", organizer_id))
/// }
/// ```
pub struct JwtAuth(pub Uuid);

#[async_trait]
impl FromRequestParts<AppState> for JwtAuth {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::unauthorized("Missing authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::unauthorized("Invalid authorization format. Use: Bearer <token>"))?;

        let claims = verify_token(token, &state.config.jwt_secret).map_err(|e| {
            tracing::debug!(error = %e, "rejected bearer token");
            ApiError::unauthorized(e.to_string())
        })?;

        Ok(JwtAuth(claims.sub))
    }
}
