use axum::{
    body::{Body, Bytes},
    http::{HeaderValue, Request, StatusCode, header},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use tracing::debug;

use crate::core::http::response_envelope::{ApiErrorDetail, ApiResponse};

/// Largest rejection body read back for rewriting.
const MAX_REJECTION_BYTES: usize = 64 * 1024;

async fn take_body(res: Response) -> (axum::http::response::Parts, Bytes) {
    let (parts, body) = res.into_parts();
    let bytes = axum::body::to_bytes(body, MAX_REJECTION_BYTES)
        .await
        .unwrap_or_default();
    (parts, bytes)
}

fn guess_path_from_serde_msg(msg: &str) -> Option<String> {
    for key in ["columns", "rows", "table", "polish"] {
        if msg.contains(key) {
            return Some(key.to_string());
        }
    }
    None
}

fn hint_from_serde_msg(msg: &str) -> Option<String> {
    if msg.contains("missing field `table`") {
        Some("Send a body like { \"table\": { \"columns\": [...], \"rows\": [[...]] } }.".into())
    } else if msg.contains("expected a sequence") {
        Some("Expected an array for this field (e.g. [\"Component\", \"Risk Category\"]).".into())
    } else if msg.contains("expected a map") || msg.contains("expected struct") {
        Some("Expected a JSON object here (e.g. { \"columns\": [], \"rows\": [] }).".into())
    } else if msg.contains("length limit exceeded") {
        Some(
            "The request body exceeds API_MAX_BODY_BYTES; split the sheet or raise the limit."
                .into(),
        )
    } else if msg.contains("expected a boolean") {
        Some("`polish` must be true or false.".into())
    } else {
        None
    }
}

fn ensure_request_id(parts: &mut axum::http::response::Parts) -> String {
    if let Some(v) = parts.headers.get("X-Request-Id").and_then(|h| h.to_str().ok()) {
        if !v.trim().is_empty() {
            return v.to_string();
        }
    }
    let nanos = Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_else(|| Utc::now().timestamp_micros() * 1000);
    let id = format!("req-{nanos}");
    if let Ok(value) = HeaderValue::from_str(&id) {
        parts.headers.insert("X-Request-Id", value);
    }
    id
}

fn is_json(parts: &axum::http::response::Parts) -> bool {
    parts
        .headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"))
}

/// Wraps plain-text extractor rejections (400/413/415/422) in [`ApiResponse`].
///
/// Responses that are already JSON pass through untouched.
pub async fn json_error_mapper(req: Request<Body>, next: Next) -> Response {
    let res = next.run(req).await;
    let status = res.status();

    let code = match status {
        StatusCode::BAD_REQUEST => "BAD_REQUEST",
        StatusCode::PAYLOAD_TOO_LARGE => "PAYLOAD_TOO_LARGE",
        StatusCode::UNSUPPORTED_MEDIA_TYPE => "UNSUPPORTED_MEDIA_TYPE",
        StatusCode::UNPROCESSABLE_ENTITY => "UNPROCESSABLE_ENTITY",
        _ => return res,
    };

    let (mut parts, bytes) = take_body(res).await;
    if is_json(&parts) {
        return Response::from_parts(parts, Body::from(bytes));
    }

    let original = String::from_utf8_lossy(&bytes);
    let req_id = ensure_request_id(&mut parts);
    debug!(%req_id, %status, "request body rejected");

    let detail = ApiErrorDetail {
        path: guess_path_from_serde_msg(&original),
        hint: hint_from_serde_msg(&original),
    };
    let envelope = ApiResponse::<()>::error(code, original.trim(), vec![detail]);

    let body = match serde_json::to_vec(&envelope) {
        Ok(v) => v,
        Err(_) => bytes.to_vec(),
    };

    parts.headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    parts.headers.remove(header::CONTENT_LENGTH);

    Response::from_parts(parts, Body::from(body))
}
