use axum::{extract::State, Json};
use serde_json::json;

use crate::startup::AppState;

/// Root endpoint with service metadata and an endpoint map.
pub async fn service_info(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "service": "commander-service",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "operational",
        "endpoints": {
            "health": "/health",
            "api": {
                "bots": "/api/bots",
                "generate": "/api/code/generate",
                "tasks": "/api/tasks"
            }
        },
        "codegen_enabled": state.generator.enabled(),
        "creator_email": state.config.creator.email,
    }))
}

/// Health check endpoint for liveness probes and monitoring.
pub async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "service": "commander-service",
        "database": "in-memory",
        "codegen": if state.generator.enabled() { "enabled" } else { "disabled" },
        "bots_count": state.bots.count(),
        "codes_count": state.codes.count(),
        "tasks_count": state.tasks.count(),
    }))
}
