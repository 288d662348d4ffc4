//! Crate-wide error type.
//!
//! Only schema problems are errors. Row-level gaps degrade to documented
//! defaults and rewrite failures fall back to the draft, so neither appears here.

use thiserror::Error;

/// Convenient alias for crate-wide results.
pub type EngineResult<T> = Result<T, EngineError>;

#[non_exhaustive]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// The input header lacks one or more required columns.
    #[error("missing required columns: {}", .missing.join(", "))]
    Schema { missing: Vec<&'static str> },
}
