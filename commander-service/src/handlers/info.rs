use axum::{extract::State, Json};
use serde::Serialize;

use crate::middleware::ApiKeyAuth;
use crate::startup::AppState;

#[derive(Debug, Serialize)]
pub struct SystemInfoResponse {
    pub user: String,
    pub is_admin: bool,
    pub codegen_enabled: bool,
    /// Whether this caller must supply the override token for sensitive
    /// mutations.
    pub override_token_required: bool,
    pub total_bots: usize,
    pub total_codes: usize,
    pub total_tasks: usize,
}

/// Authenticated system information for the calling identity.
#[tracing::instrument(skip(state, auth))]
pub async fn system_info(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
) -> Json<SystemInfoResponse> {
    let ApiKeyAuth(ctx) = auth;

    Json(SystemInfoResponse {
        override_token_required: !ctx.is_admin,
        user: ctx.email,
        is_admin: ctx.is_admin,
        codegen_enabled: state.generator.enabled(),
        total_bots: state.bots.count(),
        total_codes: state.codes.count(),
        total_tasks: state.tasks.count(),
    })
}
