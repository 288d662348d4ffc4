//! Sentence composition. Deterministic: the same record and assessment always
//! render the same paragraph.

pub mod opener;
pub mod paragraph;
pub mod phrases;
