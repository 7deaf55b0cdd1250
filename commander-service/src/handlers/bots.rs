use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::middleware::ApiKeyAuth;
use crate::models::Bot;
use crate::startup::AppState;
use service_core::error::AppError;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateBotRequest {
    #[validate(length(min = 1, message = "Bot name cannot be empty"))]
    pub name: String,
    #[serde(default = "default_skills")]
    pub skills: Vec<String>,
    pub description: Option<String>,
}

fn default_skills() -> Vec<String> {
    vec!["general".to_string()]
}

#[derive(Debug, Serialize)]
pub struct CreateBotResponse {
    pub success: bool,
    pub bot: Bot,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ListBotsResponse {
    pub count: usize,
    pub bots: Vec<Bot>,
}

/// Body carrying the optional override token for sensitive mutations.
/// Absent or malformed bodies are treated as "no token supplied".
#[derive(Debug, Default, Deserialize)]
pub struct OverrideBody {
    pub override_token: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DeleteBotResponse {
    pub success: bool,
    pub message: String,
    pub bot_id: String,
}

/// Create a new bot. The caller becomes its owner.
#[tracing::instrument(skip(state, auth, request))]
pub async fn create_bot(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    Json(request): Json<CreateBotRequest>,
) -> Result<(StatusCode, Json<CreateBotResponse>), AppError> {
    request.validate()?;
    let ApiKeyAuth(ctx) = auth;

    let bot = Bot::new(request.name, request.skills, request.description, ctx.email);
    state.bots.insert(bot.clone());

    tracing::info!(bot_id = %bot.id, owner = %bot.owner, "bot created");

    Ok((
        StatusCode::CREATED,
        Json(CreateBotResponse {
            success: true,
            message: format!("Bot '{}' created successfully", bot.name),
            bot,
        }),
    ))
}

/// List the bots visible to the caller (own bots; admins see all).
pub async fn list_bots(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
) -> Json<ListBotsResponse> {
    let ApiKeyAuth(ctx) = auth;
    let bots = state.bots.visible_to(&ctx.email, ctx.is_admin);

    Json(ListBotsResponse {
        count: bots.len(),
        bots,
    })
}

/// Delete a bot. Sensitive: non-admin owners must supply the override
/// token. Pending tasks for the bot are cancelled.
#[tracing::instrument(skip(state, auth, body))]
pub async fn delete_bot(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    Path(bot_id): Path<String>,
    body: Option<Json<OverrideBody>>,
) -> Result<Json<DeleteBotResponse>, AppError> {
    let ApiKeyAuth(ctx) = auth;
    let override_token = body.and_then(|Json(b)| b.override_token);

    let owner = state.bots.owner_of(&bot_id);
    state
        .access
        .guard(&ctx, "Bot", owner.as_deref(), true, override_token.as_deref())?;

    let bot = state
        .bots
        .remove(&bot_id)
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Bot not found")))?;

    for task_id in state.tasks.cancel_for_bot(&bot_id) {
        state.scheduler.cancel(&task_id);
    }

    tracing::info!(bot_id = %bot_id, deleted_by = %ctx.email, "bot deleted");

    Ok(Json(DeleteBotResponse {
        success: true,
        message: format!("Bot '{}' deleted", bot.name),
        bot_id,
    }))
}
