use std::sync::Arc;

use ai_llm_service::health_service::HealthStatus;
use axum::{extract::State, http::StatusCode, response::Response};
use serde::Serialize;
use tracing::instrument;

use crate::core::{
    app_state::{AppState, RewriteBackend},
    http::response_envelope::ApiResponse,
};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub rewrite: RewriteHealth,
}

#[derive(Debug, Serialize)]
pub struct RewriteHealth {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend: Option<HealthStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Engine liveness plus a probe of the rewrite backend when one is configured.
///
/// Always 200: an unhealthy backend only degrades rewrites to drafts.
#[instrument(name = "health_route", skip(state))]
pub async fn health_route(State(state): State<Arc<AppState>>) -> Response {
    let rewrite = match &state.rewrite {
        RewriteBackend::Disabled => RewriteHealth {
            enabled: false,
            backend: None,
            note: None,
        },
        RewriteBackend::Misconfigured(reason) => RewriteHealth {
            enabled: true,
            backend: None,
            note: Some(reason.clone()),
        },
        RewriteBackend::Ready(svc) => RewriteHealth {
            enabled: true,
            backend: Some(svc.health().await),
            note: None,
        },
    };

    ApiResponse::success(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        rewrite,
    })
    .into_response_with_status(StatusCode::OK)
}
