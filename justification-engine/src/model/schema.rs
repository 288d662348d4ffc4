//! Column names of the input sheet.

use crate::model::table::Table;

pub const COMPONENT: &str = "Component";
pub const RISK_CATEGORY: &str = "Risk Category";
pub const DRIVING_POF: &str = "Driving PoF";
pub const INT_CORR_RATE: &str = "Int Corr Rate";
pub const EXT_CORR_RATE: &str = "Ext Corr Rate";
pub const INSPECTION_PRIORITY: &str = "Inspection Priority";
pub const FLAMM_CONSEQ_CAT: &str = "Flamm Conseq Categ";
pub const TOXIC_CONSEQ_CAT: &str = "Toxic Conseq Cat";
pub const LOST_PRODUCTION_CAT: &str = "Lost Production Category";
pub const REPRESENTATIVE_FLUID: &str = "Representative Fluid";
pub const FLUID_TYPE: &str = "Fluid Type";
pub const INITIAL_FLUID_PHASE: &str = "Initial Fluid Phase";
pub const TOXIC_FLUID: &str = "Toxic Fluid";
pub const INVENTORY: &str = "Inventory";
pub const FLAMMABLE_AFFECTED_AREA: &str = "Flammable Affected Area";

/// Preferred controlling-corrosion-rate column.
pub const PREFERRED_CCR: &str = "Int Controlling Corrosion Rate";
/// Legacy alias still found in older sheets.
pub const LEGACY_CCR: &str = "Controlling Corr Rate";

/// Column added to the output table.
pub const JUSTIFICATION_COLUMN: &str = "Risk Justification";

pub const REQUIRED_COLUMNS: [&str; 15] = [
    COMPONENT,
    RISK_CATEGORY,
    DRIVING_POF,
    INT_CORR_RATE,
    EXT_CORR_RATE,
    INSPECTION_PRIORITY,
    FLAMM_CONSEQ_CAT,
    TOXIC_CONSEQ_CAT,
    LOST_PRODUCTION_CAT,
    REPRESENTATIVE_FLUID,
    FLUID_TYPE,
    INITIAL_FLUID_PHASE,
    TOXIC_FLUID,
    INVENTORY,
    FLAMMABLE_AFFECTED_AREA,
];

pub const OPTIONAL_COLUMNS: [&str; 2] = [PREFERRED_CCR, LEGACY_CCR];

/// Required columns absent from `table`, in declaration order.
pub fn missing_columns(table: &Table) -> Vec<&'static str> {
    REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|name| table.column_index(name).is_none())
        .collect()
}
