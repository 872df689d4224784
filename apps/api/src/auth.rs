//! Bearer-token authentication for protected routes.
//!
//! Tokens are issued by the external credential service and signed with the shared
//! `JWT_SECRET` (HS256). This side only verifies them and exposes the caller id.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(test, derive(serde::Serialize))]
pub struct Claims {
    /// Caller id assigned by the credential service.
    pub id: String,
    pub exp: usize,
}

#[derive(Clone)]
pub struct JwtVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    pub fn new(secret: &str) -> Self {
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Verifies signature and expiry and returns the claims.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let claims = decode::<Claims>(token, &self.key, &self.validation)
            .map_err(|e| AppError::Unauthorized(format!("token failed: {e}")))?
            .claims;

        if claims.id.trim().is_empty() {
            return Err(AppError::Unauthorized("token has no caller id".to_string()));
        }
        Ok(claims)
    }
}

/// The authenticated caller, extracted from `Authorization: Bearer <token>`.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: String,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::Unauthorized("no token".to_string()))?;

        let claims = state.jwt.verify(token)?;
        Ok(AuthUser { id: claims.id })
    }
}

#[cfg(test)]
pub(crate) fn issue_test_token(secret: &str, id: &str, ttl_secs: i64) -> String {
    use jsonwebtoken::{encode, EncodingKey, Header};

    let now = jsonwebtoken::get_current_timestamp() as i64;
    let claims = Claims {
        id: id.to_string(),
        exp: (now + ttl_secs) as usize,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}
