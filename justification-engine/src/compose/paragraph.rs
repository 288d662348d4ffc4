//! Deterministic paragraph assembly.

use crate::builder::Assessment;
use crate::compose::{opener::opener_clause, phrases};
use crate::model::record::ComponentRecord;
use crate::rules::governance::{Driver, Governance};

/// Ordered sentences of one row's justification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Justification {
    pub sentences: Vec<String>,
}

impl Justification {
    /// Sentences joined by a single space.
    pub fn text(&self) -> String {
        self.sentences.join(" ")
    }
}

/// Builds the paragraph for one record.
///
/// Every letter and number is copied from `record` or from `assessment`;
/// absent values are written as `N/A` or leave their clause out.
pub fn compose(record: &ComponentRecord, assessment: &Assessment) -> Justification {
    let risk = record.risk_label();
    let mut sentences = Vec::with_capacity(6);

    sentences.push(format!(
        "The risk is {risk}, {}.",
        opener_clause(record, assessment)
    ));

    sentences.push(format!(
        "{}; {}{}; {}.",
        phrases::pof_band(record.driving_pof),
        phrases::ccr_stance(assessment.ccr),
        phrases::corrosion_rates(record.int_corr_rate, record.ext_corr_rate),
        phrases::inspection_cadence(risk),
    ));

    sentences.push(format!(
        "Flam/Tox/Prod = {}/{}/{}; {}.",
        raw_letter(record.flammable_cat.as_deref()),
        raw_letter(record.toxic_cat.as_deref()),
        raw_letter(record.production_cat.as_deref()),
        governance_prose(&assessment.governance),
    ));

    if let Some(service) = service_description(record) {
        sentences.push(service);
    }

    sentences.push(format!(
        "Inventory level is {} and flammable affected area level is {} relative to the dataset.",
        assessment.inventory_level.as_str(),
        assessment.flamm_area_level.as_str(),
    ));

    sentences.push(closing(record, &assessment.governance));

    Justification { sentences }
}

fn raw_letter(raw: Option<&str>) -> &str {
    raw.unwrap_or(phrases::NOT_RECORDED)
}

fn driver_noun(driver: Driver) -> &'static str {
    match driver {
        Driver::Flammable => "flammable",
        Driver::Toxic => "toxic",
        Driver::Production => "lost-production",
    }
}

fn governance_prose(governance: &Governance) -> String {
    let Some(letter) = governance.letter else {
        return "the governing CoF category could not be determined".to_string();
    };
    let nouns: Vec<&str> = governance.drivers.iter().map(|d| driver_noun(*d)).collect();

    match nouns.as_slice() {
        [one] => format!("CoF is governed by {one} Category {letter}"),
        [a, b] => format!("CoF is jointly governed by {a} and {b} Category {letter}"),
        _ => format!(
            "flammable, toxic and lost-production consequences collectively govern CoF at Category {letter}"
        ),
    }
}

/// `Service: C3-C4, Propane, gas phase, toxic H2S.`; `None` without any part.
fn service_description(record: &ComponentRecord) -> Option<String> {
    let mut parts: Vec<String> = Vec::new();
    if let Some(fluid_type) = record.fluid_type.as_deref() {
        parts.push(fluid_type.to_string());
    }
    if let Some(fluid) = record.representative_fluid.as_deref() {
        if record.fluid_type.as_deref() != Some(fluid) {
            parts.push(fluid.to_string());
        }
    }
    if let Some(phase) = record.fluid_phase.as_deref() {
        parts.push(format!("{} phase", phase.to_lowercase()));
    }
    if let Some(toxic) = record.toxic_substance() {
        parts.push(format!("toxic {toxic}"));
    }

    (!parts.is_empty()).then(|| format!("Service: {}.", parts.join(", ")))
}

fn closing(record: &ComponentRecord, governance: &Governance) -> String {
    let pof = match record.driving_pof {
        Some(p) => format!("PoF = {p}"),
        None => "PoF not recorded".to_string(),
    };
    let cof = match governance.letter {
        Some(letter) => format!("CoF governed by Category {letter}"),
        None => "no governing CoF category".to_string(),
    };
    format!("With {pof} and {cof}, the profile remains {}.", record.risk_label())
}
