use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use justification_engine::EngineError;
use thiserror::Error;

use crate::core::http::response_envelope::{ApiErrorDetail, ApiResponse};

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot ---
    #[error("invalid API_ADDRESS `{0}`")]
    InvalidAddress(String),

    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request ---
    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Engine(EngineError::Schema { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Engine(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InvalidAddress(_) | AppError::Bind(_) | AppError::Server(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidAddress(_) => "CONFIG_ERROR",
            AppError::Bind(_) => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::Engine(EngineError::Schema { .. }) => "SCHEMA_ERROR",
            AppError::Engine(_) => "ENGINE_ERROR",
        }
    }

    fn details(&self) -> Vec<ApiErrorDetail> {
        match self {
            AppError::Engine(EngineError::Schema { missing }) => missing
                .iter()
                .map(|column| ApiErrorDetail {
                    path: Some(format!("table.columns[{column}]")),
                    hint: Some(format!("Add a `{column}` column to the sheet header.")),
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        ApiResponse::<()>::error(self.error_code(), self.to_string(), self.details())
            .into_response_with_status(status)
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_error_maps_to_422_with_one_detail_per_column() {
        let err = AppError::from(EngineError::Schema {
            missing: vec!["Toxic Fluid", "Inventory"],
        });
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.error_code(), "SCHEMA_ERROR");

        let details = err.details();
        assert_eq!(details.len(), 2);
        assert_eq!(details[1].path.as_deref(), Some("table.columns[Inventory]"));
    }

    #[test]
    fn boot_errors_are_server_side() {
        let err = AppError::InvalidAddress("nowhere".into());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.details().is_empty());
    }
}
