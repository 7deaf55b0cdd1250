use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::middleware::ApiKeyAuth;
use crate::models::{Task, TaskStatus};
use crate::startup::AppState;
use service_core::error::AppError;

#[derive(Debug, Deserialize, Validate)]
pub struct AssignTaskRequest {
    #[validate(length(min = 1, message = "Bot id cannot be empty"))]
    pub bot_id: String,
    #[validate(length(min = 1, message = "Task cannot be empty"))]
    pub task: String,
    pub timeout: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct AssignTaskResponse {
    pub success: bool,
    pub task_id: String,
    pub bot: String,
    pub status: TaskStatus,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ListTasksResponse {
    pub count: usize,
    pub tasks: Vec<Task>,
}

/// Assign a task to a bot the caller owns (or any bot, for admins) and
/// schedule its simulated completion.
#[tracing::instrument(skip(state, auth, request))]
pub async fn assign_task(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    Json(request): Json<AssignTaskRequest>,
) -> Result<(StatusCode, Json<AssignTaskResponse>), AppError> {
    request.validate()?;
    let ApiKeyAuth(ctx) = auth;

    let bot = state.bots.get(&request.bot_id);
    state
        .access
        .guard(&ctx, "Bot", bot.as_ref().map(|b| b.owner.as_str()), false, None)?;

    let bot = bot.ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Bot not found")))?;

    let timeout = request
        .timeout
        .unwrap_or(state.config.task.default_timeout_secs);
    let task = Task::new(&bot, request.task, ctx.email.clone(), timeout);
    state.tasks.insert(task.clone());

    state
        .scheduler
        .schedule_completion(task.id.clone(), state.tasks.clone(), state.bots.clone());

    tracing::info!(task_id = %task.id, bot_id = %bot.id, assigned_by = %ctx.email, "task assigned");

    Ok((
        StatusCode::ACCEPTED,
        Json(AssignTaskResponse {
            success: true,
            task_id: task.id,
            bot: bot.name.clone(),
            status: task.status,
            message: format!("Task assigned to {}", bot.name),
        }),
    ))
}

/// List tasks whose bot is visible to the caller.
pub async fn list_tasks(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
) -> Json<ListTasksResponse> {
    let ApiKeyAuth(ctx) = auth;
    let tasks = state.tasks.visible_to(&state.bots, &ctx.email, ctx.is_admin);

    Json(ListTasksResponse {
        count: tasks.len(),
        tasks,
    })
}
