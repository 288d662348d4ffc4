//! Fact payload sent next to each draft.

use serde::Serialize;

use crate::builder::Assessment;
use crate::compose::phrases::{NOT_RECORDED, round_rate};
use crate::model::record::ComponentRecord;
use crate::rules::stats::Level;

/// Flat fact sheet of one row. Keys are part of the prompt contract.
///
/// Category letters are always strings; an absent letter reads `N/A`, as in
/// the draft.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RewritePayload {
    pub component: Option<String>,
    pub risk_category: String,
    pub pof: Option<u8>,
    pub int_corr_rate: Option<f64>,
    pub ext_corr_rate: Option<f64>,
    pub inspection_priority: Option<i64>,
    pub flamm_cat: String,
    pub tox_cat: String,
    pub prod_cat: String,
    pub governing_cof: Option<String>,
    pub governing_sources: Vec<&'static str>,
    pub inventory_level: Level,
    pub flamm_area_level: Level,
    pub fluid_type: Option<String>,
    pub fluid: Option<String>,
    pub phase: Option<String>,
    pub toxic: Option<String>,
}

impl RewritePayload {
    pub fn new(record: &ComponentRecord, assessment: &Assessment) -> Self {
        Self {
            component: record.component.clone(),
            risk_category: record.risk_label().to_string(),
            pof: record.driving_pof,
            int_corr_rate: record.int_corr_rate.map(round_rate),
            ext_corr_rate: record.ext_corr_rate.map(round_rate),
            inspection_priority: record.inspection_priority_number(),
            flamm_cat: letter_or_na(&record.flammable_cat),
            tox_cat: letter_or_na(&record.toxic_cat),
            prod_cat: letter_or_na(&record.production_cat),
            governing_cof: assessment.governance.letter.map(|c| c.as_str().to_string()),
            governing_sources: assessment
                .governance
                .drivers
                .iter()
                .map(|d| d.as_str())
                .collect(),
            inventory_level: assessment.inventory_level,
            flamm_area_level: assessment.flamm_area_level,
            fluid_type: record.fluid_type.clone(),
            fluid: record.representative_fluid.clone(),
            phase: record.fluid_phase.clone(),
            toxic: record.toxic_fluid.clone(),
        }
    }

    /// Raw category letters that are recorded, in flammable/toxic/production order.
    pub fn category_letters(&self) -> impl Iterator<Item = &str> {
        [&self.flamm_cat, &self.tox_cat, &self.prod_cat]
            .into_iter()
            .map(String::as_str)
            .filter(|c| *c != NOT_RECORDED)
    }

    /// Corrosion rates that are present, internal first.
    pub fn rates(&self) -> impl Iterator<Item = f64> {
        [self.int_corr_rate, self.ext_corr_rate].into_iter().flatten()
    }
}

fn letter_or_na(raw: &Option<String>) -> String {
    raw.clone().unwrap_or_else(|| NOT_RECORDED.to_string())
}
