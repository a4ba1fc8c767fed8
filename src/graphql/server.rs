use std::sync::Arc;
use std::time::{Duration, Instant};

use async_graphql::http::GraphiQLSource;
use async_graphql::{Response, ServerError};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::telemetry::{RequestStats, execute_timed};
use super::DirectorySchema;
use crate::config::ServerSettings;
use crate::error::Result;
use crate::storage::DirectoryStore;

pub const GRAPHQL_PATH: &str = "/api/graphql";

/// Message that replaces every error in production responses.
pub const GENERIC_ERROR: &str = "Internal server error";

#[derive(Clone)]
pub struct ServerState {
    schema: DirectorySchema,
    store: Arc<dyn DirectoryStore>,
    stats: Arc<RequestStats>,
    settings: Arc<ServerSettings>,
}

impl ServerState {
    pub fn new(
        schema: DirectorySchema,
        store: Arc<dyn DirectoryStore>,
        settings: ServerSettings,
    ) -> Self {
        Self {
            schema,
            store,
            stats: Arc::new(RequestStats::new()),
            settings: Arc::new(settings),
        }
    }

    pub fn stats(&self) -> &RequestStats {
        &self.stats
    }
}

/// Log every error in a response.
pub fn log_errors(response: &Response) {
    for error in &response.errors {
        tracing::warn!(message = %error.message, path = ?error.path, "GraphQL error");
    }
}

/// Replace error details with a generic message.
pub fn mask_errors(response: &mut Response) {
    for error in &mut response.errors {
        error.message = GENERIC_ERROR.to_string();
        error.extensions = None;
    }
}

/// Warn when acquiring the connection took longer than `threshold`.
/// Returns whether it did.
fn check_connection_time(elapsed: Duration, threshold: Duration) -> bool {
    let slow = elapsed > threshold;
    if slow {
        tracing::warn!(
            elapsed_ms = elapsed.as_secs_f64() * 1000.0,
            "Slow MongoDB connection"
        );
    }
    slow
}

async fn graphql_handler(
    State(state): State<ServerState>,
    request: GraphQLRequest,
) -> GraphQLResponse {
    let started = Instant::now();
    let slow_threshold = state.settings.slow_threshold();

    let mut response = match state.store.ensure_connected().await {
        Ok(()) => {
            check_connection_time(started.elapsed(), slow_threshold);
            execute_timed(&state.schema, request.into_inner(), &state.stats, slow_threshold)
                .await
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to connect to MongoDB");
            Response::from_errors(vec![ServerError::new(
                "Failed to connect to database",
                None,
            )])
        }
    };

    log_errors(&response);
    if state.settings.production {
        mask_errors(&mut response);
    }
    response.into()
}

async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish())
}

async fn health(State(state): State<ServerState>) -> impl IntoResponse {
    let database = state.store.health_check().await;
    let (status, label) = if database {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
    };
    (
        status,
        Json(serde_json::json!({ "status": label, "database": database })),
    )
}

pub fn router(state: ServerState) -> Router {
    // no in-browser IDE in production
    let graphql = if state.settings.production {
        post(graphql_handler)
    } else {
        get(graphiql).post(graphql_handler)
    };

    Router::new()
        .route(GRAPHQL_PATH, graphql)
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve until SIGINT/SIGTERM, then close the store.
pub async fn run_server(
    schema: DirectorySchema,
    store: Arc<dyn DirectoryStore>,
    settings: ServerSettings,
) -> Result<()> {
    let addr = format!("{}:{}", settings.host, settings.port);
    let state = ServerState::new(schema, store.clone(), settings);
    let app = router(state.clone());

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, path = GRAPHQL_PATH, "GraphQL server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    state.stats().log_summary();
    store.close().await;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received SIGINT, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
