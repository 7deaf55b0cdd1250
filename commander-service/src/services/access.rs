//! Access control for entity-mutating operations.
//!
//! Three pieces compose here: credential resolution (API key -> caller
//! context), the override-token policy for admin-gated mutations, and the
//! ownership guard that sequences existence, ownership and override checks.

use serde::Serialize;
use service_core::error::AppError;
use service_core::utils::constant_time_eq;
use thiserror::Error;

use super::directory::IdentityDirectory;

/// Why an access check failed. All variants are terminal, caller-fixable
/// failures; nothing here is retried internally.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccessError {
    #[error("Missing X-API-Key header")]
    MissingCredential,

    /// Covers both malformed and unknown keys.
    #[error("Invalid API key")]
    InvalidCredential,

    #[error("Not authorized")]
    Forbidden,

    /// The caller owns the resource (or is allowed in principle) but did not
    /// supply the extra grant required for non-admins.
    #[error("Override token required for non-admin users")]
    OverrideRequired,

    #[error("{0} not found")]
    NotFound(&'static str),
}

impl From<AccessError> for AppError {
    fn from(err: AccessError) -> Self {
        let cause = anyhow::anyhow!("{}", err);
        match err {
            AccessError::MissingCredential | AccessError::InvalidCredential => {
                AppError::Unauthorized(cause)
            }
            AccessError::Forbidden | AccessError::OverrideRequired => AppError::Forbidden(cause),
            AccessError::NotFound(_) => AppError::NotFound(cause),
        }
    }
}

/// Per-request caller identity derived from the presented API key. Built
/// fresh by the auth middleware and discarded after the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthContext {
    pub email: String,
    pub is_admin: bool,
    pub api_key: String,
}

/// Stateless access-control component over the identity directory and the
/// process-wide secrets. Cheap to clone; shared via application state.
#[derive(Clone)]
pub struct AccessControl {
    directory: IdentityDirectory,
    creator_email: String,
    creator_api_key: String,
    override_token: String,
}

impl AccessControl {
    pub fn new(
        directory: IdentityDirectory,
        creator_email: String,
        creator_api_key: String,
        override_token: String,
    ) -> Self {
        Self {
            directory,
            creator_email,
            creator_api_key,
            override_token,
        }
    }

    /// Resolve a presented API key into an [`AuthContext`].
    ///
    /// The creator key is compared first in constant time; since the creator
    /// identity is also present in the directory index, this is a fast path
    /// of the general lookup, not separate data.
    pub fn resolve(&self, api_key: Option<&str>) -> Result<AuthContext, AccessError> {
        let api_key = match api_key {
            Some(key) if !key.is_empty() => key,
            _ => return Err(AccessError::MissingCredential),
        };

        if constant_time_eq(api_key, &self.creator_api_key) {
            return Ok(AuthContext {
                email: self.creator_email.clone(),
                is_admin: true,
                api_key: api_key.to_string(),
            });
        }

        match self.directory.find_by_api_key(api_key) {
            Some(identity) => Ok(AuthContext {
                email: identity.email,
                is_admin: identity.is_admin,
                api_key: api_key.to_string(),
            }),
            None => Err(AccessError::InvalidCredential),
        }
    }

    /// Admins always pass and the supplied token is ignored; non-admins must
    /// present the process-wide override secret. Stateless and replayable.
    pub fn check_override(&self, ctx: &AuthContext, supplied: Option<&str>) -> bool {
        if ctx.is_admin {
            return true;
        }
        supplied
            .map(|token| constant_time_eq(token, &self.override_token))
            .unwrap_or(false)
    }

    /// Admission sequence for an operation on an owned resource:
    /// existence, then ownership, then (for sensitive actions) the override
    /// grant. Ownership failures are reported before the override token is
    /// ever consulted.
    pub fn guard(
        &self,
        ctx: &AuthContext,
        resource: &'static str,
        owner: Option<&str>,
        sensitive: bool,
        override_token: Option<&str>,
    ) -> Result<(), AccessError> {
        let owner = owner.ok_or(AccessError::NotFound(resource))?;

        if owner != ctx.email && !ctx.is_admin {
            return Err(AccessError::Forbidden);
        }

        if sensitive && !ctx.is_admin && !self.check_override(ctx, override_token) {
            return Err(AccessError::OverrideRequired);
        }

        Ok(())
    }

    /// Visibility rule for list endpoints: owners see their own resources,
    /// admins see everything.
    pub fn can_view(&self, ctx: &AuthContext, owner: &str) -> bool {
        ctx.is_admin || ctx.email == owner
    }
}
