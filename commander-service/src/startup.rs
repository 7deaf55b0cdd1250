//! Application startup and lifecycle management.

use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::CommanderConfig;
use crate::handlers;
use crate::middleware::api_key_auth_middleware;
use crate::models::Identity;
use crate::services::providers::openai::OpenAiCodeGenerator;
use crate::services::{
    AccessControl, BotStore, CodeGenerator, CodeStore, IdentityDirectory, TaskScheduler, TaskStore,
};
use service_core::error::AppError;
use service_core::middleware::security_headers::security_headers_middleware;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: CommanderConfig,
    pub directory: IdentityDirectory,
    pub access: AccessControl,
    pub bots: BotStore,
    pub codes: CodeStore,
    pub tasks: TaskStore,
    pub generator: Arc<dyn CodeGenerator>,
    pub scheduler: TaskScheduler,
}

/// Build the router: public probes at the root, authenticated API under
/// `/api` behind the API-key middleware.
pub fn api_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/info", get(handlers::info::system_info))
        .route(
            "/bots",
            post(handlers::bots::create_bot).get(handlers::bots::list_bots),
        )
        .route("/bots/:bot_id", delete(handlers::bots::delete_bot))
        .route("/code/generate", post(handlers::code::generate_code))
        .route("/code/:code_id", get(handlers::code::get_code))
        .route("/code/:code_id/approve", post(handlers::code::approve_code))
        .route("/tasks/assign", post(handlers::tasks::assign_task))
        .route("/tasks", get(handlers::tasks::list_tasks))
        .route_layer(from_fn_with_state(state.clone(), api_key_auth_middleware));

    Router::new()
        .route("/", get(handlers::health::service_info))
        .route("/health", get(handlers::health::health_check))
        .nest("/api", api_routes)
        .layer(from_fn(security_headers_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration. Binds the
    /// listener (port 0 = random port for testing) and seeds the identity
    /// directory with the creator.
    pub async fn build(config: CommanderConfig) -> Result<Self, AppError> {
        let directory = IdentityDirectory::new();
        let creator = Identity::new(
            config.creator.email.clone(),
            config.creator.password.clone(),
            config.creator.api_key.clone(),
            true,
        );
        directory
            .insert(creator)
            .map_err(|e| AppError::ConfigError(anyhow::Error::new(e)))?;

        let access = AccessControl::new(
            directory.clone(),
            config.creator.email.clone(),
            config.creator.api_key.clone(),
            config.security.override_token.clone(),
        );

        let generator: Arc<dyn CodeGenerator> = Arc::new(OpenAiCodeGenerator::new(
            config.openai.api_key.clone(),
            config.openai.model.clone(),
            config.openai.base_url.clone(),
        ));
        tracing::info!(
            enabled = generator.enabled(),
            model = %config.openai.model,
            "initialized code generation provider"
        );

        let scheduler = TaskScheduler::new(Duration::from_millis(config.task.completion_delay_ms));

        let state = AppState {
            directory,
            access,
            bots: BotStore::new(),
            codes: CodeStore::new(),
            tasks: TaskStore::new(),
            generator,
            scheduler,
            config: config.clone(),
        };

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(creator = %config.creator.email, port, "commander service built");

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Get a handle to the shared application state.
    pub fn state(&self) -> AppState {
        self.state.clone()
    }

    /// Run the application until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = api_router(self.state);
        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
