//! Session service
//!
//! Issues session tokens for caller-claimed identities. There is no
//! credential check and no session store: the signed token is the whole
//! session, and revocation is purely a matter of clearing the cookie.

use serde_json::{Map, Value};
use tracing::{info, instrument};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Session service
pub struct SessionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SessionService<'a> {
    /// Create a new SessionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Sign the supplied identity payload into a session token
    #[instrument(skip(self, identity))]
    pub fn issue(&self, identity: &Map<String, Value>) -> ServiceResult<String> {
        let token = self.ctx.jwt_service().sign(identity)?;

        info!(
            email = identity.get("email").and_then(serde_json::Value::as_str).unwrap_or("<none>"),
            "Session token issued"
        );

        Ok(token)
    }
}
