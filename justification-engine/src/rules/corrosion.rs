//! Controlling-corrosion-rate severity.

use serde::Serialize;

use crate::rules::stats::Spread;

/// Ordinal severity of a corrosion rate; `Unknown` when no rate is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrosionSeverity {
    Unknown,
    Negligible,
    Low,
    Moderate,
    High,
    Severe,
}

impl CorrosionSeverity {
    pub fn as_str(self) -> &'static str {
        match self {
            CorrosionSeverity::Unknown => "unknown",
            CorrosionSeverity::Negligible => "negligible",
            CorrosionSeverity::Low => "low",
            CorrosionSeverity::Moderate => "moderate",
            CorrosionSeverity::High => "high",
            CorrosionSeverity::Severe => "severe",
        }
    }

    /// High or severe.
    pub fn is_elevated(self) -> bool {
        matches!(self, CorrosionSeverity::High | CorrosionSeverity::Severe)
    }

    /// One band worse, saturating at `Severe`. `Unknown` stays unknown.
    fn escalated(self) -> Self {
        match self {
            CorrosionSeverity::Unknown => CorrosionSeverity::Unknown,
            CorrosionSeverity::Negligible => CorrosionSeverity::Low,
            CorrosionSeverity::Low => CorrosionSeverity::Moderate,
            CorrosionSeverity::Moderate => CorrosionSeverity::High,
            CorrosionSeverity::High | CorrosionSeverity::Severe => CorrosionSeverity::Severe,
        }
    }
}

/// Upper (exclusive) edges of the absolute bands, in rate units of the sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CcrBands {
    pub negligible: f64,
    pub low: f64,
    pub moderate: f64,
    pub high: f64,
}

impl Default for CcrBands {
    fn default() -> Self {
        Self {
            negligible: 0.05,
            low: 0.10,
            moderate: 0.20,
            high: 0.50,
        }
    }
}

impl CcrBands {
    /// Absolute band of `value`, without dataset escalation.
    pub fn label(&self, value: Option<f64>) -> CorrosionSeverity {
        match value {
            Some(v) if v.is_finite() => {
                if v < self.negligible {
                    CorrosionSeverity::Negligible
                } else if v < self.low {
                    CorrosionSeverity::Low
                } else if v < self.moderate {
                    CorrosionSeverity::Moderate
                } else if v < self.high {
                    CorrosionSeverity::High
                } else {
                    CorrosionSeverity::Severe
                }
            }
            _ => CorrosionSeverity::Unknown,
        }
    }
}

/// Severity with the default bands. See [`classify_ccr_with`].
pub fn classify_ccr(value: Option<f64>, dataset: Option<Spread>) -> CorrosionSeverity {
    classify_ccr_with(value, dataset, &CcrBands::default())
}

/// Absolute band, bumped one band up when the rate is a spike in its batch
/// (`value > mean + 2σ`). Never lowered, never beyond `Severe`.
pub fn classify_ccr_with(
    value: Option<f64>,
    dataset: Option<Spread>,
    bands: &CcrBands,
) -> CorrosionSeverity {
    let base = bands.label(value);
    let (Some(v), Some(spread)) = (value, dataset) else {
        return base;
    };
    if matches!(base, CorrosionSeverity::Unknown | CorrosionSeverity::Severe) {
        return base;
    }
    if v > spread.mean + 2.0 * spread.std {
        base.escalated()
    } else {
        base
    }
}
