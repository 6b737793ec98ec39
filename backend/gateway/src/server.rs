//! Invocation HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tokio::net::TcpListener;
use tracing::{error, info};
use uuid::Uuid;

use evidex_extractor::ExtractionHandler;

use crate::envelope::{InvocationRequest, InvocationResponse};

/// Route the host posts blob invocations to; matches the function directory
/// name in `EvidenceExtract/function.json`.
pub const FUNCTION_ROUTE: &str = "/EvidenceExtract";

/// Application state shared across routes.
#[derive(Clone)]
pub struct GatewayState {
    pub handler: Arc<ExtractionHandler>,
}

pub fn build_router(state: GatewayState) -> Router {
    Router::new()
        .route(FUNCTION_ROUTE, post(handle_invocation))
        .route("/api/health", get(|| async { "OK" }))
        .with_state(state)
}

/// Serve invocations until the host shuts the process down.
pub async fn start_server(addr: SocketAddr, state: GatewayState) -> Result<()> {
    let app = build_router(state);
    info!("Custom handler listening on {}", addr);
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn handle_invocation(
    State(state): State<GatewayState>,
    Json(request): Json<InvocationRequest>,
) -> impl IntoResponse {
    let invocation_id = Uuid::new_v4();

    let event = match request.blob_event() {
        Ok(event) => event,
        Err(err) => {
            error!("[{}] Rejected invocation: {}", invocation_id, err);
            return (StatusCode::BAD_REQUEST, err.to_string()).into_response();
        }
    };

    match state.handler.handle(&event).await {
        Ok(outcome) => {
            let logs = vec![format!(
                "wrote {} ({} chars)",
                outcome.artifact_name, outcome.chars
            )];
            Json(InvocationResponse::success(logs)).into_response()
        }
        Err(err) => {
            error!(
                "[{}] Invocation failed (retryable={}): {}",
                invocation_id,
                err.retryable(),
                err
            );
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
        }
    }
}
