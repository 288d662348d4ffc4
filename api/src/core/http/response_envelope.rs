use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Envelope shared by success and error responses.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    /// Stable, machine-readable error code (e.g. "SCHEMA_ERROR").
    pub code: &'static str,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<ApiErrorDetail>,
}

#[derive(Debug, Serialize)]
pub struct ApiErrorDetail {
    /// Field path like `table.rows` or a column name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Hint to help the client fix the request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(
        code: &'static str,
        message: impl Into<String>,
        details: Vec<ApiErrorDetail>,
    ) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiError {
                code,
                message: message.into(),
                details,
            }),
        }
    }

    pub fn into_response_with_status(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn success_omits_error() {
        let v = serde_json::to_value(ApiResponse::success(json!({"rows": 2}))).unwrap();
        assert_eq!(v, json!({"success": true, "data": {"rows": 2}}));
    }

    #[test]
    fn error_omits_empty_fields() {
        let v = serde_json::to_value(ApiResponse::<()>::error(
            "SCHEMA_ERROR",
            "missing columns",
            vec![ApiErrorDetail {
                path: Some("Inventory".into()),
                hint: None,
            }],
        ))
        .unwrap();
        assert_eq!(
            v,
            json!({
                "success": false,
                "error": {
                    "code": "SCHEMA_ERROR",
                    "message": "missing columns",
                    "details": [{"path": "Inventory"}]
                }
            })
        );
    }
}
