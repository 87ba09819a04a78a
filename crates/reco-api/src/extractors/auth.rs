//! Authentication extractor
//!
//! Extracts and verifies the session token from the request cookie jar.
//! A missing cookie is Unauthorized; a present but invalid or expired token
//! is Forbidden. No session store is consulted - the signature and embedded
//! expiry decide.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::CookieJar;
use reco_common::Claims;

use crate::response::ApiError;
use crate::state::AppState;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "token";

/// Verified identity extracted from the session cookie
#[derive(Debug, Clone)]
pub struct AuthIdentity(pub Claims);

impl AuthIdentity {
    /// Email of the verified identity, when the token carried one
    pub fn email(&self) -> Option<&str> {
        self.0.email.as_deref()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthIdentity
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        let cookie = jar
            .get(SESSION_COOKIE)
            .ok_or(ApiError::App(reco_common::AppError::MissingAuth))?;

        let app_state = AppState::from_ref(state);

        let claims = app_state.jwt_service().verify(cookie.value()).map_err(|e| {
            tracing::warn!(error = %e, "Rejected session token");
            ApiError::App(e)
        })?;

        Ok(AuthIdentity(claims))
    }
}
