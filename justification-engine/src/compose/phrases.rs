//! Fixed phrase tables.

use crate::rules::{corrosion::CorrosionSeverity, stats::Level};

/// Written in place of a category letter the sheet does not carry.
pub const NOT_RECORDED: &str = "N/A";

/// Two-decimal literal used for corrosion rates everywhere (draft, payload, gate).
pub fn rate_literal(rate: f64) -> String {
    format!("{rate:.2}")
}

/// `rate` rounded to the precision of [`rate_literal`].
pub fn round_rate(rate: f64) -> f64 {
    rate_literal(rate).parse().unwrap_or(rate)
}

pub fn pof_band(pof: Option<u8>) -> &'static str {
    match pof {
        Some(1) => "PoF is very high (1)",
        Some(2) => "PoF is high (2)",
        Some(3) => "PoF is moderate (3)",
        Some(4) => "PoF is low (4)",
        Some(5) => "PoF is very low (5)",
        _ => "PoF is assessed from available indicators",
    }
}

pub fn ccr_stance(severity: CorrosionSeverity) -> &'static str {
    match severity {
        CorrosionSeverity::Severe => "CCR is severe",
        CorrosionSeverity::High => "CCR is high",
        CorrosionSeverity::Moderate => "CCR is moderate",
        CorrosionSeverity::Low => "CCR is low",
        CorrosionSeverity::Negligible => "CCR is negligible",
        CorrosionSeverity::Unknown => "CCR indicators are noted",
    }
}

/// Parenthetical with the measured rates; empty when neither is present.
pub fn corrosion_rates(internal: Option<f64>, external: Option<f64>) -> String {
    match (internal, external) {
        (Some(i), Some(e)) => format!(
            " (internal/external corrosion rates {}/{})",
            rate_literal(i),
            rate_literal(e)
        ),
        (Some(i), None) => format!(" (internal corrosion rate {})", rate_literal(i)),
        (None, Some(e)) => format!(" (external corrosion rate {})", rate_literal(e)),
        (None, None) => String::new(),
    }
}

/// Inspection cadence keyed by the risk category (case-insensitive).
pub fn inspection_cadence(risk: &str) -> &'static str {
    match risk.trim().to_ascii_uppercase().as_str() {
        "HIGH" => "inspection requires reduced intervals",
        "MEDIUM HIGH" => "inspection needs shorter-than-routine intervals",
        "MEDIUM" => "inspection is on routine intervals",
        "LOW" => "inspection can follow extended intervals",
        _ => "inspection priority is recorded",
    }
}

pub fn affected_area(level: Level) -> &'static str {
    match level {
        Level::High => "broad affected area",
        Level::Low => "limited affected area",
        Level::Medium => "moderate affected area",
    }
}
