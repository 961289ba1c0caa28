use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};

use super::{claims::Claims, jwt::JwtKeys};
use crate::error::AppError;

/// Verified bearer-token claims of the caller.
///
/// Rejects with `AppError::Unauthenticated` (401) when no token is sent and
/// `AppError::Forbidden` (403) when the token does not verify.
pub struct AuthUser(pub Claims);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);
        // A header with non-ASCII bytes is still a presented (invalid) token.
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned());

        keys.authenticate(header.as_deref()).map(AuthUser)
    }
}
