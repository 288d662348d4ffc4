//! Typed view of one component row.

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use crate::errors::{EngineError, EngineResult};
use crate::model::{
    cell,
    schema::{self, missing_columns},
    table::Table,
};

/// One equipment component of the RBI study.
///
/// Every field is optional: a missing or unparseable cell is `None`, which is
/// distinct from a present zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentRecord {
    pub component: Option<String>,
    pub risk_category: Option<String>,
    /// Driving PoF, 1 (most likely to fail) to 5.
    pub driving_pof: Option<u8>,
    pub int_corr_rate: Option<f64>,
    pub ext_corr_rate: Option<f64>,
    pub preferred_ccr: Option<f64>,
    pub legacy_ccr: Option<f64>,
    pub inspection_priority: Option<String>,
    pub flammable_cat: Option<String>,
    pub toxic_cat: Option<String>,
    pub production_cat: Option<String>,
    pub representative_fluid: Option<String>,
    pub fluid_type: Option<String>,
    pub fluid_phase: Option<String>,
    pub toxic_fluid: Option<String>,
    pub inventory: Option<f64>,
    pub flammable_area: Option<f64>,
}

impl ComponentRecord {
    /// Reads row `row` of `table` through a resolved column map.
    pub fn from_row(table: &Table, columns: &ColumnMap, row: usize) -> Self {
        let get = |name: &str| columns.cell(table, row, name);

        Self {
            component: cell::text(get(schema::COMPONENT)),
            risk_category: cell::text(get(schema::RISK_CATEGORY)),
            driving_pof: cell::integer(get(schema::DRIVING_POF))
                .filter(|p| (1..=5).contains(p))
                .map(|p| p as u8),
            int_corr_rate: cell::number(get(schema::INT_CORR_RATE)),
            ext_corr_rate: cell::number(get(schema::EXT_CORR_RATE)),
            preferred_ccr: cell::number(get(schema::PREFERRED_CCR)),
            legacy_ccr: cell::number(get(schema::LEGACY_CCR)),
            inspection_priority: cell::text(get(schema::INSPECTION_PRIORITY)),
            flammable_cat: cell::text(get(schema::FLAMM_CONSEQ_CAT)),
            toxic_cat: cell::text(get(schema::TOXIC_CONSEQ_CAT)),
            production_cat: cell::text(get(schema::LOST_PRODUCTION_CAT)),
            representative_fluid: cell::text(get(schema::REPRESENTATIVE_FLUID)),
            fluid_type: cell::text(get(schema::FLUID_TYPE)),
            fluid_phase: cell::text(get(schema::INITIAL_FLUID_PHASE)),
            toxic_fluid: cell::text(get(schema::TOXIC_FLUID)),
            inventory: cell::number(get(schema::INVENTORY)),
            flammable_area: cell::number(get(schema::FLAMMABLE_AFFECTED_AREA)),
        }
    }

    /// Controlling corrosion rate by precedence: preferred column, legacy
    /// alias, then the larger of the internal and external rates.
    pub fn controlling_corrosion_rate(&self) -> Option<f64> {
        self.preferred_ccr
            .or(self.legacy_ccr)
            .or(match (self.int_corr_rate, self.ext_corr_rate) {
                (Some(i), Some(e)) => Some(i.max(e)),
                (i, e) => i.or(e),
            })
    }

    /// Risk category exactly as given, or `N/A`.
    pub fn risk_label(&self) -> &str {
        self.risk_category.as_deref().unwrap_or("N/A")
    }

    /// Representative fluid, falling back to the fluid type.
    pub fn service_fluid(&self) -> Option<&str> {
        self.representative_fluid
            .as_deref()
            .or(self.fluid_type.as_deref())
    }

    /// Toxic substance name; `No`/`None` mean the service is not toxic.
    pub fn toxic_substance(&self) -> Option<&str> {
        self.toxic_fluid
            .as_deref()
            .filter(|t| !t.eq_ignore_ascii_case("no") && !t.eq_ignore_ascii_case("none"))
    }

    /// Numeric inspection priority when the sheet carries an integer.
    pub fn inspection_priority_number(&self) -> Option<i64> {
        self.inspection_priority
            .as_deref()
            .and_then(|p| cell::integer(&Value::String(p.to_string())))
    }
}

/// Header positions resolved once per table.
#[derive(Debug, Clone)]
pub struct ColumnMap {
    positions: HashMap<&'static str, usize>,
}

impl ColumnMap {
    /// Resolves required and optional columns.
    ///
    /// # Errors
    /// [`EngineError::Schema`] listing every missing required column.
    pub fn resolve(table: &Table) -> EngineResult<Self> {
        let missing = missing_columns(table);
        if !missing.is_empty() {
            return Err(EngineError::Schema { missing });
        }

        let positions = schema::REQUIRED_COLUMNS
            .iter()
            .chain(schema::OPTIONAL_COLUMNS.iter())
            .filter_map(|&name| table.column_index(name).map(|i| (name, i)))
            .collect();
        Ok(Self { positions })
    }

    fn cell<'t>(&self, table: &'t Table, row: usize, name: &str) -> &'t Value {
        static NULL: Value = Value::Null;
        match self.positions.get(name) {
            Some(&col) => table.cell(row, col),
            None => &NULL,
        }
    }
}

/// Parses every row of `table`, in order.
///
/// # Errors
/// [`EngineError::Schema`] before any row is read.
pub fn ingest(table: &Table) -> EngineResult<Vec<ComponentRecord>> {
    let columns = ColumnMap::resolve(table)?;
    let records: Vec<ComponentRecord> = (0..table.len())
        .map(|row| ComponentRecord::from_row(table, &columns, row))
        .collect();
    debug!(rows = records.len(), "table ingested");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::model::schema::REQUIRED_COLUMNS;

    fn header(extra: &[&str]) -> Vec<String> {
        REQUIRED_COLUMNS
            .iter()
            .chain(extra.iter())
            .map(|c| c.to_string())
            .collect()
    }

    fn row(values: &[(&str, Value)], columns: &[String]) -> Vec<Value> {
        columns
            .iter()
            .map(|c| {
                values
                    .iter()
                    .find(|(k, _)| k == c)
                    .map(|(_, v)| v.clone())
                    .unwrap_or(Value::Null)
            })
            .collect()
    }

    #[test]
    fn schema_error_lists_missing_columns() {
        let t = Table::new(vec!["Component".into()], vec![vec![json!("V-1")]]);
        match ingest(&t) {
            Err(EngineError::Schema { missing }) => {
                assert_eq!(missing.len(), REQUIRED_COLUMNS.len() - 1);
                assert!(!missing.contains(&"Component"));
            }
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn parses_typed_fields() {
        let columns = header(&[]);
        let t = Table::new(
            columns.clone(),
            vec![row(
                &[
                    ("Component", json!("V-101")),
                    ("Risk Category", json!(" MEDIUM ")),
                    ("Driving PoF", json!(4)),
                    ("Int Corr Rate", json!("0.12")),
                    ("Ext Corr Rate", json!(0.04)),
                    ("Inspection Priority", json!(3)),
                    ("Flamm Conseq Categ", json!("B")),
                    ("Toxic Fluid", json!("H2S")),
                ],
                &columns,
            )],
        );
        let recs = ingest(&t).expect("ingest");
        let r = &recs[0];
        assert_eq!(r.risk_label(), "MEDIUM");
        assert_eq!(r.driving_pof, Some(4));
        assert_eq!(r.int_corr_rate, Some(0.12));
        assert_eq!(r.inspection_priority_number(), Some(3));
        assert_eq!(r.flammable_cat.as_deref(), Some("B"));
        assert_eq!(r.toxic_substance(), Some("H2S"));
        assert_eq!(r.inventory, None);
    }

    #[test]
    fn pof_outside_scale_is_absent() {
        let columns = header(&[]);
        let t = Table::new(
            columns.clone(),
            vec![
                row(&[("Driving PoF", json!(7))], &columns),
                row(&[("Driving PoF", json!("high"))], &columns),
                row(&[("Driving PoF", json!(2.5))], &columns),
            ],
        );
        let recs = ingest(&t).expect("ingest");
        assert!(recs.iter().all(|r| r.driving_pof.is_none()));
    }

    #[test]
    fn ccr_precedence() {
        let mut r = ComponentRecord {
            int_corr_rate: Some(0.1),
            ext_corr_rate: Some(0.3),
            ..Default::default()
        };
        assert_eq!(r.controlling_corrosion_rate(), Some(0.3));

        r.legacy_ccr = Some(0.2);
        assert_eq!(r.controlling_corrosion_rate(), Some(0.2));

        r.preferred_ccr = Some(0.05);
        assert_eq!(r.controlling_corrosion_rate(), Some(0.05));

        let only_ext = ComponentRecord {
            ext_corr_rate: Some(0.07),
            ..Default::default()
        };
        assert_eq!(only_ext.controlling_corrosion_rate(), Some(0.07));
        assert_eq!(ComponentRecord::default().controlling_corrosion_rate(), None);
    }

    #[test]
    fn optional_ccr_columns_are_read_when_present() {
        let columns = header(&["Int Controlling Corrosion Rate", "Controlling Corr Rate"]);
        let t = Table::new(
            columns.clone(),
            vec![row(
                &[
                    ("Int Controlling Corrosion Rate", json!("oops")),
                    ("Controlling Corr Rate", json!(0.25)),
                    ("Int Corr Rate", json!(0.4)),
                ],
                &columns,
            )],
        );
        let recs = ingest(&t).expect("ingest");
        assert_eq!(recs[0].preferred_ccr, None);
        assert_eq!(recs[0].controlling_corrosion_rate(), Some(0.25));
    }

    #[test]
    fn service_fluid_falls_back_to_type() {
        let r = ComponentRecord {
            fluid_type: Some("Hydrocarbon".into()),
            toxic_fluid: Some("No".into()),
            ..Default::default()
        };
        assert_eq!(r.service_fluid(), Some("Hydrocarbon"));
        assert_eq!(r.toxic_substance(), None);
    }
}
