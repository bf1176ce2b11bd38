// src/utils/bearer.rs

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::error::AppError;

/// The caller's `Authorization: Bearer <token>`, forwarded opaquely to the
/// platform. The token is never inspected here.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

/// Pulls the token out of an `Authorization` header value.
pub fn parse_bearer(header_value: &str) -> Option<&str> {
    header_value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_bearer)
            .map(|token| BearerToken(token.to_string()))
            .ok_or_else(|| AppError::AuthError("Missing bearer token".to_string()))
    }
}
