//! Session handlers
//!
//! Issue and clear the session cookie. The cookie carries the signed
//! identity token; its `Secure`/`SameSite` attributes depend on the
//! deployment environment, and the clearing call must branch identically or
//! browsers will not drop the cookie.

use axum::{extract::State, Json};
use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::CookieJar;
use reco_service::{SessionResponse, SessionService};
use serde_json::{Map, Value};

use crate::extractors::SESSION_COOKIE;
use crate::response::ApiResult;
use crate::state::AppState;

/// Build the session cookie with environment-dependent attributes.
///
/// Production serves the frontend from another origin, so the cookie must be
/// `Secure` and `SameSite=None`; everywhere else it stays same-site strict
/// over plain HTTP.
fn session_cookie(token: String, production: bool) -> Cookie<'static> {
    let builder = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true);

    let builder = if production {
        builder.secure(true).same_site(SameSite::None)
    } else {
        builder.secure(false).same_site(SameSite::Strict)
    };

    builder.build()
}

/// Build the clearing cookie, mirroring the issue-time attributes exactly
fn removal_cookie(production: bool) -> Cookie<'static> {
    let builder = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .removal();

    let builder = if production {
        builder.secure(true).same_site(SameSite::None)
    } else {
        builder.secure(false).same_site(SameSite::Strict)
    };

    builder.build()
}

/// Issue a session cookie for the supplied identity
///
/// POST /jwt
pub async fn issue(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(identity): Json<Map<String, Value>>,
) -> ApiResult<(CookieJar, Json<SessionResponse>)> {
    let service = SessionService::new(state.service_context());
    let token = service.issue(&identity)?;

    let jar = jar.add(session_cookie(token.clone(), state.is_production()));

    Ok((jar, Json(SessionResponse::issued(token))))
}

/// Clear the session cookie
///
/// POST /logout
pub async fn revoke(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<SessionResponse>) {
    let jar = jar.remove(removal_cookie(state.is_production()));

    (jar, Json(SessionResponse::revoked()))
}
