use justification_engine::Table;
use serde::Serialize;

/// Response body of `POST /justify`.
#[derive(Debug, Serialize)]
pub struct JustifyResponse {
    /// Input table plus the `Risk Justification` column.
    pub table: Table,
    pub rows: usize,
    /// Rows carrying a validated rewrite.
    pub rewritten: usize,
    /// Rows where a requested rewrite fell back to the draft.
    pub fallback: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}
