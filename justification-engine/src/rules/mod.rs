//! Deterministic classifiers. No I/O, no logging.

pub mod category;
pub mod corrosion;
pub mod governance;
pub mod stats;
