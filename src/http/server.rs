//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router for the chat surface
//! - Wire up middleware (tracing, request timeout)
//! - Hand each chat message to the shared agent
//! - Report node reachability for health checks

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use uuid::Uuid;

use crate::config::ServerConfig;
use crate::pipeline::{Agent, FailureKind, PipelineRun};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub agent: Arc<Agent>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatResponse {
    pub run_id: Uuid,
    /// Status line for the user.
    pub reply: String,
    /// `succeeded` or `failed`.
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
}

impl From<&PipelineRun> for ChatResponse {
    fn from(run: &PipelineRun) -> Self {
        Self {
            run_id: run.run_id,
            reply: run.reply(),
            status: if run.result.is_ok() { "succeeded" } else { "failed" }.to_string(),
            tx_hash: run.tx_hash().map(|hash| hash.to_string()),
            failure: run.error().map(|err| err.kind().as_str().to_string()),
        }
    }
}

/// HTTP server exposing the agent.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    pub fn new(agent: Arc<Agent>, config: &ServerConfig) -> Self {
        let state = AppState { agent };
        Self {
            router: Self::build_router(config, state),
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServerConfig, state: AppState) -> Router {
        Router::new()
            .route("/chat", post(chat_handler))
            .route("/health", get(health_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout_secs)))
            .layer(TraceLayer::new_for_http())
    }

    /// Serve on `listener` until `shutdown` resolves.
    ///
    /// In-flight requests are allowed to finish before this returns.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

fn status_for(kind: FailureKind) -> StatusCode {
    match kind {
        FailureKind::ModelDeclaredInvalid
        | FailureKind::ParseFailed
        | FailureKind::InvalidAddress => StatusCode::UNPROCESSABLE_ENTITY,
        FailureKind::ExtractionFailed | FailureKind::NetworkError => StatusCode::BAD_GATEWAY,
        FailureKind::SigningFailed => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

async fn chat_handler(State(state): State<AppState>, Json(request): Json<ChatRequest>) -> Response {
    if request.message.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "message must not be empty" })),
        )
            .into_response();
    }

    // The run must finish even if this handler is dropped by the request
    // timeout or a closed connection: the transfer may already be broadcast.
    let agent = state.agent.clone();
    let message = request.message;
    let run = match tokio::spawn(async move { agent.submit(&message).await }).await {
        Ok(run) => run,
        Err(e) => {
            tracing::error!(error = %e, "Pipeline task failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": "pipeline task failed" })),
            )
                .into_response();
        }
    };
    let status = run
        .error()
        .map(|err| status_for(err.kind()))
        .unwrap_or(StatusCode::OK);

    (status, Json(ChatResponse::from(&run))).into_response()
}

async fn health_handler(State(state): State<AppState>) -> Response {
    let agent = &state.agent;
    match agent.node_block_number().await {
        Ok(block_number) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "status": "ok",
                "sender": agent.sender().to_checksum(None),
                "chain_id": agent.chain_id(),
                "block_number": block_number,
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({
                    "status": "unavailable",
                    "error": e.detail(),
                })),
            )
                .into_response()
        }
    }
}
