//! CoF governance: the worst of the three consequence grades wins, and every
//! category at that grade is named.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::rules::category::CofCategory;

/// Consequence category that can govern overall CoF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Driver {
    Flammable,
    Toxic,
    Production,
}

impl Driver {
    pub fn as_str(self) -> &'static str {
        match self {
            Driver::Flammable => "flammable",
            Driver::Toxic => "toxic",
            Driver::Production => "production",
        }
    }
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Governing grade and the categories tied at it.
///
/// `letter` is `None` exactly when `drivers` is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Governance {
    pub letter: Option<CofCategory>,
    pub drivers: BTreeSet<Driver>,
}

impl Governance {
    /// CoF severity rank for comparison with PoF; 3 when ungoverned.
    pub fn severity(&self) -> u8 {
        self.letter.map_or(3, CofCategory::rank)
    }
}

/// Resolves the governing grade from the three raw category cells.
///
/// Unrecognized or missing grades are ignored.
pub fn governing_cof(
    flammable: Option<&str>,
    toxic: Option<&str>,
    production: Option<&str>,
) -> Governance {
    let graded: Vec<(Driver, CofCategory)> = [
        (Driver::Flammable, flammable),
        (Driver::Toxic, toxic),
        (Driver::Production, production),
    ]
    .into_iter()
    .filter_map(|(d, raw)| raw.and_then(CofCategory::parse).map(|c| (d, c)))
    .collect();

    let Some(worst) = graded.iter().map(|&(_, c)| c).min() else {
        return Governance::default();
    };

    Governance {
        letter: Some(worst),
        drivers: graded
            .into_iter()
            .filter(|&(_, c)| c == worst)
            .map(|(d, _)| d)
            .collect(),
    }
}
