use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::Response,
};
use justification_engine::{justify_table, polish_table};
use tracing::{info, instrument, warn};

use crate::{
    core::{
        app_state::{AppState, RewriteBackend},
        http::response_envelope::ApiResponse,
    },
    error_handler::AppResult,
    routes::justify::{justify_request::JustifyRequest, justify_response::JustifyResponse},
};

/// Adds a `Risk Justification` paragraph to every row of the posted table.
///
/// A missing required column is rejected with `SCHEMA_ERROR` before any row
/// is processed. With `polish = true` each draft goes through the rewrite
/// backend; rows whose rewrite fails or drifts keep their draft.
#[instrument(
    name = "justify_route",
    skip(state, body),
    fields(rows = body.table.len(), polish = body.polish)
)]
pub async fn justify_route(
    State(state): State<Arc<AppState>>,
    Json(body): Json<JustifyRequest>,
) -> AppResult<Response> {
    let rows = body.table.len();

    let response = if !body.polish {
        JustifyResponse {
            table: justify_table(&body.table)?,
            rows,
            rewritten: 0,
            fallback: 0,
            warnings: Vec::new(),
        }
    } else {
        match &state.rewrite {
            RewriteBackend::Ready(svc) => {
                let polished = polish_table(&body.table, svc.as_ref(), &state.retry).await?;
                let mut warnings = Vec::new();
                if polished.fallback > 0 {
                    warnings.push(format!(
                        "{} of {rows} rows kept the deterministic draft",
                        polished.fallback
                    ));
                }
                JustifyResponse {
                    table: polished.table,
                    rows,
                    rewritten: polished.rewritten,
                    fallback: polished.fallback,
                    warnings,
                }
            }
            RewriteBackend::Disabled => drafts_with_warning(
                &body,
                "rewrite requested but REWRITE_ENABLED is off; returning deterministic drafts".into(),
            )?,
            RewriteBackend::Misconfigured(reason) => drafts_with_warning(
                &body,
                format!("rewrite backend unavailable ({reason}); returning deterministic drafts"),
            )?,
        }
    };

    info!(
        rows = response.rows,
        rewritten = response.rewritten,
        fallback = response.fallback,
        "justification done"
    );
    Ok(ApiResponse::success(response).into_response_with_status(StatusCode::OK))
}

fn drafts_with_warning(body: &JustifyRequest, warning: String) -> AppResult<JustifyResponse> {
    let table = justify_table(&body.table)?;
    warn!(%warning, "polish skipped");
    let rows = table.len();
    Ok(JustifyResponse {
        table,
        rows,
        rewritten: 0,
        fallback: rows,
        warnings: vec![warning],
    })
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use justification_engine::{Table, model::schema::REQUIRED_COLUMNS};
    use serde_json::{Value, json};

    use super::*;

    fn table(columns: &[&str], rows: Vec<Vec<Value>>) -> Table {
        Table::new(columns.iter().map(|c| c.to_string()).collect(), rows)
    }

    fn full_row() -> Vec<Value> {
        vec![
            json!("V-1"), json!("LOW"), json!(5), json!(0.01), json!(0.02), json!(4),
            json!("D"), json!("E"), json!("E"), json!("Water"), json!("Water"),
            json!("Liquid"), json!("No"), json!(10), json!(2),
        ]
    }

    async fn call(state: AppState, body: JustifyRequest) -> (StatusCode, Value) {
        let res = match justify_route(State(Arc::new(state)), Json(body)).await {
            Ok(r) => r,
            Err(e) => axum::response::IntoResponse::into_response(e),
        };
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn drafts_are_appended() {
        let body = JustifyRequest {
            table: table(&REQUIRED_COLUMNS, vec![full_row()]),
            polish: false,
        };
        let (status, v) = call(AppState::drafts_only(), body).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(v["data"]["rows"], 1);
        let text = v["data"]["table"]["rows"][0][15].as_str().unwrap();
        assert!(text.starts_with("The risk is LOW,"));
        assert!(v["data"].get("warnings").is_none());
    }

    #[tokio::test]
    async fn polish_without_backend_warns_and_returns_drafts() {
        let body = JustifyRequest {
            table: table(&REQUIRED_COLUMNS, vec![full_row(), full_row()]),
            polish: true,
        };
        let (status, v) = call(AppState::drafts_only(), body).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(v["data"]["fallback"], 2);
        assert_eq!(v["data"]["warnings"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn missing_columns_are_listed() {
        let body = JustifyRequest {
            table: table(&REQUIRED_COLUMNS[..13], vec![]),
            polish: false,
        };
        let (status, v) = call(AppState::drafts_only(), body).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(v["success"], false);
        assert_eq!(v["error"]["code"], "SCHEMA_ERROR");
        assert_eq!(v["error"]["details"].as_array().unwrap().len(), 2);
    }
}
