use justification_engine::Table;
use serde::Deserialize;

/// Request body for `POST /justify`.
#[derive(Debug, Deserialize)]
pub struct JustifyRequest {
    /// Sheet with the required columns.
    pub table: Table,
    /// Send drafts through the rewrite backend.
    #[serde(default)]
    pub polish: bool,
}
