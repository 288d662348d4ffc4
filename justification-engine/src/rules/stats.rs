//! Batch statistics and the three-sigma classifier.

use serde::Serialize;

/// Population mean and standard deviation (denominator `N`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spread {
    pub mean: f64,
    pub std: f64,
}

impl Spread {
    /// `None` for an empty sequence.
    pub fn of(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        Some(Self {
            mean,
            std: var.sqrt(),
        })
    }
}

/// `[mean − 3σ, mean + 3σ]` band of one column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SigmaBand {
    pub mean: f64,
    pub std: f64,
    pub low: f64,
    pub high: f64,
}

impl SigmaBand {
    pub fn classify(&self, value: Option<f64>) -> Level {
        classify(value, self.low, self.high)
    }
}

/// Three-sigma thresholds over `values`; `None` when nothing is present.
pub fn three_sigma_levels(values: &[f64]) -> Option<SigmaBand> {
    let Spread { mean, std } = Spread::of(values)?;
    Some(SigmaBand {
        mean,
        std,
        low: mean - 3.0 * std,
        high: mean + 3.0 * std,
    })
}

/// Qualitative level of a value inside its batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Low,
    Medium,
    High,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Low => "low",
            Level::Medium => "medium",
            Level::High => "high",
        }
    }
}

/// Below `low` is low, above `high` is high; everything else, including a
/// missing value, is medium.
pub fn classify(value: Option<f64>, low: f64, high: f64) -> Level {
    match value {
        Some(v) if v < low => Level::Low,
        Some(v) if v > high => Level::High,
        _ => Level::Medium,
    }
}
