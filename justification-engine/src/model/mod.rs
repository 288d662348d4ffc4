//! Ingestion boundary: the loosely-typed table and its typed per-row view.

pub mod cell;
pub mod record;
pub mod schema;
pub mod table;
