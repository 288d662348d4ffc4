//! HTTP surface of the justification backend.
//!
//! - `GET  /health` engine liveness and rewrite-backend probe
//! - `GET  /required_columns` header the sheet must carry
//! - `POST /justify` table in, table with `Risk Justification` out

use std::{env, net::SocketAddr, sync::Arc};

mod core;
mod error_handler;
mod middleware_layer;
mod routes;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
};
use tokio::signal;
use tracing::{error, info};

pub use crate::core::app_state::{AppState, RewriteBackend};
pub use crate::error_handler::{AppError, AppResult};
use crate::{
    middleware_layer::json_extractor::json_error_mapper,
    routes::{
        health_route::health_route, justify::justify_route::justify_route,
        required_columns_route::required_columns_route,
    },
};

const DEFAULT_ADDRESS: &str = "0.0.0.0:8080";

/// Routes bound to `state`.
pub fn router(state: AppState) -> Router {
    let body_limit = state.max_body_bytes;
    Router::new()
        .route("/health", get(health_route))
        .route("/required_columns", get(required_columns_route))
        .route("/justify", post(justify_route))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn(json_error_mapper))
        .with_state(Arc::new(state))
}

/// Binds `API_ADDRESS` and serves until Ctrl+C.
pub async fn start() -> AppResult<()> {
    let address = env::var("API_ADDRESS").unwrap_or_else(|_| DEFAULT_ADDRESS.to_string());
    let addr: SocketAddr = address
        .parse()
        .map_err(|_| AppError::InvalidAddress(address.clone()))?;

    let app = router(AppState::from_env());

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(AppError::Bind)?;
    info!(%addr, "justification API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!("server stopped");
    Ok(())
}

/// Resolves on Ctrl+C. If the handler cannot be installed the server keeps running.
async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(e) => {
            error!(error = %e, "failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
