//! Fact-preservation gate for rewritten paragraphs.
//!
//! Pure string checks: no logging, no retries, no partial repair.

use std::fmt;

use crate::{compose::phrases::rate_literal, rewrite::payload::RewritePayload};

/// First fact that a candidate failed to reproduce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissingFact {
    Pof(String),
    GoverningCategory(String),
    RiskCategory(String),
    CategoryLetter(String),
    CorrosionRate(String),
}

impl fmt::Display for MissingFact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingFact::Pof(s) => write!(f, "missing PoF literal `{s}`"),
            MissingFact::GoverningCategory(s) => write!(f, "missing governing category `{s}`"),
            MissingFact::RiskCategory(s) => write!(f, "missing risk category `{s}`"),
            MissingFact::CategoryLetter(s) => write!(f, "missing category letter `{s}`"),
            MissingFact::CorrosionRate(s) => write!(f, "missing corrosion rate `{s}`"),
        }
    }
}

fn require(
    candidate: &str,
    literal: String,
    fact: fn(String) -> MissingFact,
) -> Result<(), MissingFact> {
    if candidate.contains(&literal) {
        Ok(())
    } else {
        Err(fact(literal))
    }
}

/// Checks that `candidate` contains, verbatim, every fact of `payload`.
///
/// # Errors
/// The first [`MissingFact`] found, in the order PoF, governing category,
/// risk category, raw letters, corrosion rates.
pub fn check_facts(candidate: &str, payload: &RewritePayload) -> Result<(), MissingFact> {
    if let Some(pof) = payload.pof {
        require(candidate, format!("PoF = {pof}"), MissingFact::Pof)?;
    }
    if let Some(letter) = &payload.governing_cof {
        require(candidate, format!("Category {letter}"), MissingFact::GoverningCategory)?;
    }
    require(candidate, payload.risk_category.clone(), MissingFact::RiskCategory)?;
    for letter in payload.category_letters() {
        require(candidate, letter.to_string(), MissingFact::CategoryLetter)?;
    }
    for rate in payload.rates() {
        require(candidate, rate_literal(rate), MissingFact::CorrosionRate)?;
    }
    Ok(())
}

/// `candidate` when every fact survived, otherwise `draft`.
pub fn keep_or_fallback(candidate: &str, payload: &RewritePayload, draft: &str) -> String {
    match check_facts(candidate, payload) {
        Ok(()) => candidate.to_string(),
        Err(_) => draft.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::stats::Level;

    fn payload() -> RewritePayload {
        RewritePayload {
            component: None,
            risk_category: "MEDIUM".into(),
            pof: Some(4),
            int_corr_rate: Some(0.12),
            ext_corr_rate: Some(0.04),
            inspection_priority: None,
            flamm_cat: "B".into(),
            tox_cat: "C".into(),
            prod_cat: "D".into(),
            governing_cof: Some("B".into()),
            governing_sources: vec!["flammable"],
            inventory_level: Level::Medium,
            flamm_area_level: Level::Medium,
            fluid_type: None,
            fluid: None,
            phase: None,
            toxic: None,
        }
    }

    const DRAFT: &str = "The risk is MEDIUM. Rates 0.12/0.04. Flam/Tox/Prod = B/C/D. \
                         With PoF = 4 and CoF governed by Category B, the profile remains MEDIUM.";

    #[test]
    fn draft_passes_its_own_gate() {
        assert_eq!(check_facts(DRAFT, &payload()), Ok(()));
        assert_eq!(keep_or_fallback(DRAFT, &payload(), DRAFT), DRAFT);
    }

    #[test]
    fn omitted_rate_falls_back() {
        let candidate = DRAFT.replace("/0.04", "");
        assert_eq!(
            check_facts(&candidate, &payload()),
            Err(MissingFact::CorrosionRate("0.04".into()))
        );
        assert_eq!(keep_or_fallback(&candidate, &payload(), DRAFT), DRAFT);
    }

    #[test]
    fn reworded_pof_falls_back() {
        let candidate = DRAFT.replace("PoF = 4", "a PoF of 4");
        assert_eq!(
            check_facts(&candidate, &payload()),
            Err(MissingFact::Pof("PoF = 4".into()))
        );
    }

    #[test]
    fn changed_risk_category_falls_back() {
        let candidate = DRAFT.replace("MEDIUM", "LOW");
        assert_eq!(
            check_facts(&candidate, &payload()),
            Err(MissingFact::RiskCategory("MEDIUM".into()))
        );
    }

    #[test]
    fn absent_facts_are_not_required() {
        let mut p = payload();
        p.pof = None;
        p.governing_cof = None;
        p.flamm_cat = "N/A".into();
        p.tox_cat = "N/A".into();
        p.prod_cat = "N/A".into();
        p.int_corr_rate = None;
        p.ext_corr_rate = None;
        assert_eq!(check_facts("It stays MEDIUM.", &p), Ok(()));
    }
}
