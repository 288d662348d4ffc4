use axum::{http::StatusCode, response::Response};
use justification_engine::{
    JUSTIFICATION_COLUMN,
    model::schema::{OPTIONAL_COLUMNS, REQUIRED_COLUMNS},
};
use serde::Serialize;

use crate::core::http::response_envelope::ApiResponse;

#[derive(Debug, Serialize)]
pub struct RequiredColumnsResponse {
    /// Must all be present in the header, spelled exactly.
    pub required: Vec<&'static str>,
    /// Controlling corrosion rate: preferred column first, then the legacy alias.
    pub optional: Vec<&'static str>,
    /// Column appended to the returned table.
    pub output: &'static str,
}

pub async fn required_columns_route() -> Response {
    ApiResponse::success(RequiredColumnsResponse {
        required: REQUIRED_COLUMNS.to_vec(),
        optional: OPTIONAL_COLUMNS.to_vec(),
        output: JUSTIFICATION_COLUMN,
    })
    .into_response_with_status(StatusCode::OK)
}
