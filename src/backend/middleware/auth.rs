/**
 * Bearer Token Extraction
 *
 * Pulls the bearer token out of the `Authorization` header and hands it to
 * the handler as a plain value. Nothing is verified here; the handler
 * passes the token into the auth gateway, which decides what it means.
 * A missing header, or one that is not `Bearer <token>`, yields `None`.
 */

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use std::convert::Infallible;

/// Token presented with the request, if any
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BearerToken(pub Option<String>);

impl BearerToken {
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

/// Extract the bearer token from request headers
///
/// The scheme is matched case-insensitively; surrounding whitespace is
/// ignored and an empty token counts as absent.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?.trim();
    let (scheme, token) = value.split_once(' ')?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        tracing::debug!("Ignoring Authorization header with scheme {}", scheme);
        return None;
    }

    let token = token.trim();
    if token.is_empty() {
        return None;
    }

    Some(token.to_owned())
}

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(BearerToken(extract_bearer_token(&parts.headers)))
    }
}
