use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::bots::OverrideBody;
use crate::middleware::ApiKeyAuth;
use crate::models::GeneratedCode;
use crate::services::fallback_code;
use crate::startup::AppState;
use crate::utils::truncate_chars;
use service_core::error::AppError;

const PREVIEW_CHARS: usize = 200;
const FULL_CODE_CHARS: usize = 1000;

#[derive(Debug, Deserialize, Validate)]
pub struct GenerateCodeRequest {
    #[validate(length(min = 1, message = "Description cannot be empty"))]
    pub description: String,
    #[serde(default = "default_bot_name")]
    pub bot_name: String,
}

fn default_bot_name() -> String {
    "GeneratedBot".to_string()
}

#[derive(Debug, Serialize)]
pub struct GenerateCodeResponse {
    pub success: bool,
    pub code_id: String,
    pub name: String,
    pub code_preview: String,
    pub full_code: String,
    pub generator_used: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct GetCodeResponse {
    pub success: bool,
    pub code: GeneratedCode,
}

#[derive(Debug, Serialize)]
pub struct ApproveCodeResponse {
    pub success: bool,
    pub message: String,
    pub code_id: String,
    pub approved: bool,
}

/// Generate a code snippet via the provider, falling back to the template
/// when the provider is disabled or fails.
#[tracing::instrument(skip(state, auth, request))]
pub async fn generate_code(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    Json(request): Json<GenerateCodeRequest>,
) -> Result<(StatusCode, Json<GenerateCodeResponse>), AppError> {
    request.validate()?;
    let ApiKeyAuth(ctx) = auth;

    let (code, generator_used) = match state
        .generator
        .generate(&request.description, &request.bot_name)
        .await
    {
        Ok(code) => (code, true),
        Err(err) => {
            tracing::warn!(error = %err, "code generation failed, using fallback template");
            (fallback_code(&request.bot_name), false)
        }
    };

    let record = GeneratedCode::new(
        request.bot_name,
        request.description,
        code,
        ctx.email,
        generator_used,
    );
    state.codes.insert(record.clone());

    tracing::info!(code_id = %record.id, owner = %record.owner, generator_used, "code generated");

    Ok((
        StatusCode::CREATED,
        Json(GenerateCodeResponse {
            success: true,
            code_id: record.id,
            name: record.name,
            code_preview: truncate_chars(&record.code, PREVIEW_CHARS),
            full_code: truncate_chars(&record.code, FULL_CODE_CHARS),
            generator_used,
            message: "Code generated successfully".to_string(),
        }),
    ))
}

/// Fetch a generated code record. Non-sensitive: ownership or admin only.
pub async fn get_code(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    Path(code_id): Path<String>,
) -> Result<Json<GetCodeResponse>, AppError> {
    let ApiKeyAuth(ctx) = auth;

    let record = state.codes.get(&code_id);
    state
        .access
        .guard(&ctx, "Code", record.as_ref().map(|c| c.owner.as_str()), false, None)?;

    let code = record.ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Code not found")))?;

    Ok(Json(GetCodeResponse {
        success: true,
        code,
    }))
}

/// Approve a generated snippet. Sensitive: non-admin owners must supply the
/// override token.
#[tracing::instrument(skip(state, auth, body))]
pub async fn approve_code(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    Path(code_id): Path<String>,
    body: Option<Json<OverrideBody>>,
) -> Result<Json<ApproveCodeResponse>, AppError> {
    let ApiKeyAuth(ctx) = auth;
    let override_token = body.and_then(|Json(b)| b.override_token);

    let record = state.codes.get(&code_id);
    state.access.guard(
        &ctx,
        "Code",
        record.as_ref().map(|c| c.owner.as_str()),
        true,
        override_token.as_deref(),
    )?;

    let approved = state
        .codes
        .approve(&code_id, &ctx.email)
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Code not found")))?;

    tracing::info!(code_id = %code_id, approved_by = %ctx.email, "code approved");

    Ok(Json(ApproveCodeResponse {
        success: true,
        message: format!("Code '{}' approved", approved.name),
        code_id,
        approved: true,
    }))
}
