use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use service_core::error::AppError;

use crate::services::{AccessError, AuthContext};
use crate::startup::AppState;

pub const API_KEY_HEADER: &str = "X-API-Key";

/// Middleware to resolve the `X-API-Key` header into an [`AuthContext`]
/// stored in request extensions.
pub async fn api_key_auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // A header that is present but not valid UTF-8 is a malformed
    // credential, not an absent one.
    let api_key = match req.headers().get(API_KEY_HEADER) {
        Some(value) => Some(
            value
                .to_str()
                .map_err(|_| AccessError::InvalidCredential)?,
        ),
        None => None,
    };

    let ctx = state.access.resolve(api_key)?;

    req.extensions_mut().insert(ctx);
    Ok(next.run(req).await)
}

/// Extractor to easily get the auth context in handlers.
pub struct ApiKeyAuth(pub AuthContext);

#[axum::async_trait]
impl<S> FromRequestParts<S> for ApiKeyAuth
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ctx = parts.extensions.get::<AuthContext>().ok_or_else(|| {
            AppError::InternalError(anyhow::anyhow!(
                "Auth context missing from request extensions"
            ))
        })?;

        Ok(ApiKeyAuth(ctx.clone()))
    }
}
