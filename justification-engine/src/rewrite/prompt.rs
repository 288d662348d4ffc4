//! Prompt sent to the rewrite backend.

use crate::rewrite::{RewriteError, payload::RewritePayload};

const EDITOR_INSTRUCTIONS: &str = "You are a technical editor. Rewrite the justification to improve flow, \
sentence variety, and readability. Rules: Do not invent facts. Do not change numbers, category letters, \
or the risk category. Keep all factual details (PoF number, corrosion rates, category letters, risk category). \
You may change wording, sentence order, and phrasing, but not the facts.";

/// Instructions, the payload as compact JSON, then the draft.
pub fn build_prompt(payload: &RewritePayload, draft: &str) -> Result<String, RewriteError> {
    let data = serde_json::to_string(payload)?;
    Ok(format!(
        "{EDITOR_INSTRUCTIONS}\n\nData JSON:\n{data}\n\nDraft paragraph:\n{draft}\n\n\
         Rewrite now. Keep all facts and categories unchanged."
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Assessment;
    use crate::model::record::ComponentRecord;
    use crate::rules::{corrosion::CorrosionSeverity, stats::Level};

    #[test]
    fn prompt_carries_data_and_draft() {
        let record = ComponentRecord {
            risk_category: Some("LOW".into()),
            driving_pof: Some(5),
            ..ComponentRecord::default()
        };
        let assessment = Assessment {
            governance: Default::default(),
            ccr_value: None,
            ccr: CorrosionSeverity::Unknown,
            inventory_level: Level::Low,
            flamm_area_level: Level::Medium,
        };
        let payload = RewritePayload::new(&record, &assessment);
        let prompt = build_prompt(&payload, "The risk is LOW.").unwrap();

        assert!(prompt.starts_with("You are a technical editor."));
        assert!(
            prompt.contains("Data JSON:\n{\"component\":null,\"risk_category\":\"LOW\",\"pof\":5,")
        );
        assert!(prompt.contains("Draft paragraph:\nThe risk is LOW.\n\n"));
        assert!(prompt.ends_with("Rewrite now. Keep all facts and categories unchanged."));
    }
}
