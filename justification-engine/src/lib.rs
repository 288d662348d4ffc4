//! Risk-justification engine for Risk-Based Inspection studies.
//!
//! One paragraph per component row explains the risk category, the PoF band
//! and the governing CoF category:
//!
//! 1) **Ingestion**: check the header against the required columns and parse
//!    every row once into a typed [`ComponentRecord`].
//! 2) **Dataset statistics**: three-sigma bands for Inventory and Flammable
//!    Affected Area, mean/std of the controlling corrosion rate. Computed once
//!    per batch, shared read-only by every row.
//! 3) **Per-row assessment**: qualitative levels, corrosion severity and CoF
//!    governance.
//! 4) **Composition**: a deterministic, ordered list of sentences.
//! 5) **Optional polish**: a [`RewriteService`] rephrases the draft; the
//!    fact-preservation gate keeps the draft whenever a fact drifts.
//!
//! Steps 1–4 are synchronous and pure. Only step 5 performs I/O, and every
//! failure there degrades to the deterministic draft.

pub mod builder;
pub mod compose;
pub mod errors;
pub mod model;
pub mod rewrite;
pub mod rules;
pub mod validate;

use tracing::info;

pub use builder::{Assessment, DatasetStats, JustificationBatch, build_all_justifications};
pub use compose::paragraph::Justification;
pub use errors::{EngineError, EngineResult};
pub use model::{record::ComponentRecord, schema::JUSTIFICATION_COLUMN, table::Table};
pub use rewrite::{
    RewriteError, RewriteService,
    polish::{PolishOutcome, RetryPolicy, TextSource},
};

/// Returns `table` with a `Risk Justification` column holding the
/// deterministic paragraph of each row.
///
/// # Errors
/// [`EngineError::Schema`] when a required column is missing; no row is
/// processed in that case.
pub fn justify_table(table: &Table) -> EngineResult<Table> {
    let batch = JustificationBatch::from_table(table)?;
    Ok(table.clone().with_column(JUSTIFICATION_COLUMN, batch.drafts()))
}

/// Output of [`polish_table`].
#[derive(Debug, Clone)]
pub struct PolishedTable {
    pub table: Table,
    /// Rows whose text is a validated rewrite.
    pub rewritten: usize,
    /// Rows that kept the deterministic draft.
    pub fallback: usize,
}

/// Like [`justify_table`], then sends each draft through `service` and keeps
/// only rewrites that preserve every fact.
///
/// # Errors
/// Only schema errors; rewrite failures never surface.
pub async fn polish_table<R>(
    table: &Table,
    service: &R,
    policy: &RetryPolicy,
) -> EngineResult<PolishedTable>
where
    R: RewriteService + Sync,
{
    let batch = JustificationBatch::from_table(table)?;
    let outcomes = batch.polish(service, policy).await;

    let rewritten = outcomes.iter().filter(|o| o.is_rewritten()).count();
    let fallback = outcomes.len() - rewritten;
    info!(rows = outcomes.len(), rewritten, fallback, "polish finished");

    let texts = outcomes.into_iter().map(|o| o.text).collect();
    Ok(PolishedTable {
        table: table.clone().with_column(JUSTIFICATION_COLUMN, texts),
        rewritten,
        fallback,
    })
}
