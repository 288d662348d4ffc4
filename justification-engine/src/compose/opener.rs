//! First sentence: which side of the risk matrix drives the category, and why.

use crate::builder::Assessment;
use crate::compose::phrases::affected_area;
use crate::model::record::ComponentRecord;
use crate::rules::{category::CofCategory, governance::Driver};

/// Attribution of the risk category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribution {
    Both,
    PofDriven,
    CofDriven,
}

/// Compares PoF severity (1 worst … 5, 3 if absent) with CoF severity
/// (grade rank, 3 if ungoverned).
///
/// - equal severities, or PoF ≥ 4 with a high/severe CCR → both
/// - PoF worse by at least one rank → PoF-driven
/// - otherwise → CoF-driven
pub fn attribution(record: &ComponentRecord, assessment: &Assessment) -> Attribution {
    let pof_sev = record.driving_pof.unwrap_or(3);
    let cof_sev = assessment.governance.severity();

    let corrosion_backed = pof_sev >= 4 && assessment.ccr.is_elevated();
    if corrosion_backed || pof_sev == cof_sev {
        Attribution::Both
    } else if pof_sev < cof_sev {
        Attribution::PofDriven
    } else {
        Attribution::CofDriven
    }
}

/// Fluid and phase, e.g. `Propane gas`.
fn service_phrase(record: &ComponentRecord) -> Option<String> {
    let phase = record.fluid_phase.as_deref().map(str::to_lowercase);
    match (record.service_fluid(), phase) {
        (Some(f), Some(p)) => Some(format!("{f} {p}")),
        (Some(f), None) => Some(f.to_string()),
        (None, Some(p)) => Some(p),
        (None, None) => None,
    }
}

/// Service phrase plus toxic substance; the stated reason of the opener.
fn reason(record: &ComponentRecord) -> String {
    let mut bits: Vec<String> = service_phrase(record).into_iter().collect();
    if let Some(t) = record.toxic_substance() {
        bits.push(format!("with toxic {t}"));
    }
    if bits.is_empty() {
        "the handled service".to_string()
    } else {
        bits.join(" ")
    }
}

/// Opener clause, without the leading `The risk is X,`.
pub fn opener_clause(record: &ComponentRecord, assessment: &Assessment) -> String {
    let reason = reason(record);

    match attribution(record, assessment) {
        Attribution::Both => format!(
            "resulting from both PoF and CoF, because {reason} is material while likelihood remains non-negligible"
        ),
        Attribution::PofDriven if assessment.ccr.is_elevated() => format!(
            "driven mainly by PoF, as elevated likelihood is reinforced by a {} CCR in {}",
            assessment.ccr.as_str(),
            service_phrase(record).unwrap_or_else(|| "service".to_string())
        ),
        Attribution::PofDriven => {
            "driven mainly by PoF, with likelihood outweighing consequence effects".to_string()
        }
        Attribution::CofDriven => cof_clause(assessment, &reason),
    }
}

fn cof_clause(assessment: &Assessment, reason: &str) -> String {
    let area = affected_area(assessment.flamm_area_level);
    let Some(letter) = assessment.governance.letter else {
        return "driven by CoF".to_string();
    };
    let drivers: Vec<Driver> = assessment.governance.drivers.iter().copied().collect();

    match drivers.as_slice() {
        [single] => single_driver(*single, letter, reason, area),
        [a, b] => tied_pair(*a, *b, letter, reason, area),
        _ => format!(
            "consequence-led, with flammable, toxic, and production all at Category {letter}, collectively dominating due to {reason} and the {area}"
        ),
    }
}

fn single_driver(driver: Driver, letter: CofCategory, reason: &str, area: &str) -> String {
    match driver {
        Driver::Flammable => format!(
            "driven by CoF, dominated by flammable Category {letter}, because {reason} and the {area} elevate ignition potential"
        ),
        Driver::Toxic => format!(
            "driven by CoF, dominated by toxic Category {letter}, because {reason} increases exposure potential"
        ),
        Driver::Production => format!(
            "driven by CoF, dominated by lost-production Category {letter}, because outage sensitivity is substantial"
        ),
    }
}

fn tied_pair(a: Driver, b: Driver, letter: CofCategory, reason: &str, area: &str) -> String {
    match (a, b) {
        (Driver::Flammable, Driver::Toxic) => format!(
            "consequence-led and jointly governed by flammable and toxic Category {letter}, because {reason} presents ignition and exposure hazards and the {area} amplifies reach"
        ),
        (Driver::Flammable, Driver::Production) => format!(
            "consequence-led and jointly governed by flammable and production Category {letter}, since {reason} raises fire potential and the service is throughput-critical"
        ),
        (Driver::Toxic, Driver::Production) => format!(
            "consequence-led and jointly governed by toxic and production Category {letter}, as exposure concerns and outage sensitivity together dominate"
        ),
        _ => format!("consequence-led and jointly governed by Category {letter}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{corrosion::CorrosionSeverity, governance::governing_cof, stats::Level};

    fn record(pof: Option<u8>) -> ComponentRecord {
        ComponentRecord {
            component: Some("V-101".into()),
            risk_category: Some("Medium High".into()),
            driving_pof: pof,
            fluid_type: Some("C3-C4".into()),
            representative_fluid: Some("Propane".into()),
            fluid_phase: Some("Gas".into()),
            ..ComponentRecord::default()
        }
    }

    fn assessment(cats: [Option<&str>; 3], ccr: CorrosionSeverity) -> Assessment {
        Assessment {
            governance: governing_cof(cats[0], cats[1], cats[2]),
            ccr_value: None,
            ccr,
            inventory_level: Level::Medium,
            flamm_area_level: Level::High,
        }
    }

    #[test]
    fn best_pof_against_worst_cof_is_consequence_led() {
        let r = record(Some(5));
        let a = assessment([Some("A"), Some("C"), Some("D")], CorrosionSeverity::Low);
        assert_eq!(attribution(&r, &a), Attribution::CofDriven);
        assert_eq!(
            opener_clause(&r, &a),
            "driven by CoF, dominated by flammable Category A, because Propane gas and the broad affected area elevate ignition potential"
        );
    }

    #[test]
    fn equal_severities_are_shared() {
        let r = record(Some(3));
        let a = assessment([Some("C"), None, None], CorrosionSeverity::Moderate);
        assert_eq!(attribution(&r, &a), Attribution::Both);
        assert!(
            opener_clause(&r, &a)
                .starts_with("resulting from both PoF and CoF, because Propane gas")
        );
    }

    #[test]
    fn low_pof_with_high_corrosion_is_shared() {
        let r = record(Some(4));
        let a = assessment([Some("A"), None, None], CorrosionSeverity::High);
        assert_eq!(attribution(&r, &a), Attribution::Both);
    }

    #[test]
    fn worse_pof_names_corrosion_when_elevated() {
        let r = record(Some(1));
        let a = assessment([Some("D"), None, None], CorrosionSeverity::Severe);
        assert_eq!(
            opener_clause(&r, &a),
            "driven mainly by PoF, as elevated likelihood is reinforced by a severe CCR in Propane gas"
        );

        let calm = assessment([Some("D"), None, None], CorrosionSeverity::Low);
        assert_eq!(
            opener_clause(&r, &calm),
            "driven mainly by PoF, with likelihood outweighing consequence effects"
        );
    }

    #[test]
    fn ties_and_missing_service() {
        let mut r = record(Some(5));
        r.fluid_type = None;
        r.representative_fluid = None;
        r.fluid_phase = None;

        let pair = assessment([None, Some("B"), Some("B")], CorrosionSeverity::Unknown);
        assert_eq!(
            opener_clause(&r, &pair),
            "consequence-led and jointly governed by toxic and production Category B, as exposure concerns and outage sensitivity together dominate"
        );

        let all = assessment([Some("B"), Some("B"), Some("B")], CorrosionSeverity::Unknown);
        assert!(
            opener_clause(&r, &all)
                .ends_with("due to the handled service and the broad affected area")
        );

        let none = assessment([None, None, None], CorrosionSeverity::Unknown);
        assert_eq!(attribution(&r, &none), Attribution::CofDriven);
        assert_eq!(opener_clause(&r, &none), "driven by CoF");
    }

    #[test]
    fn toxic_substance_joins_the_reason() {
        let mut r = record(Some(5));
        r.toxic_fluid = Some("H2S".into());
        let a = assessment([None, Some("A"), None], CorrosionSeverity::Unknown);
        assert_eq!(
            opener_clause(&r, &a),
            "driven by CoF, dominated by toxic Category A, because Propane gas with toxic H2S increases exposure potential"
        );
    }
}
