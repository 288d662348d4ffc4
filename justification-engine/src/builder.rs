//! Batch orchestration: statistics once, then one paragraph per row.

use tracing::{debug, info};

use crate::{
    compose::paragraph::{Justification, compose},
    errors::EngineResult,
    model::{
        record::{ComponentRecord, ingest},
        table::Table,
    },
    rewrite::{
        RewriteService,
        payload::RewritePayload,
        polish::{PolishOutcome, RetryPolicy, polish_all},
    },
    rules::{
        corrosion::{CorrosionSeverity, classify_ccr},
        governance::{Governance, governing_cof},
        stats::{Level, SigmaBand, Spread, three_sigma_levels},
    },
};

/// Immutable batch-wide statistics shared by every row.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DatasetStats {
    pub inventory: Option<SigmaBand>,
    pub flammable_area: Option<SigmaBand>,
    pub ccr: Option<Spread>,
}

impl DatasetStats {
    /// Uses only the values present in each column.
    pub fn compute(records: &[ComponentRecord]) -> Self {
        let column = |f: fn(&ComponentRecord) -> Option<f64>| -> Vec<f64> {
            records.iter().filter_map(f).collect()
        };

        Self {
            inventory: three_sigma_levels(&column(|r| r.inventory)),
            flammable_area: three_sigma_levels(&column(|r| r.flammable_area)),
            ccr: Spread::of(&column(ComponentRecord::controlling_corrosion_rate)),
        }
    }

    fn level(band: Option<SigmaBand>, value: Option<f64>) -> Level {
        band.map_or(Level::Medium, |b| b.classify(value))
    }
}

/// Classified facts of one row.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub governance: Governance,
    pub ccr_value: Option<f64>,
    pub ccr: CorrosionSeverity,
    pub inventory_level: Level,
    pub flamm_area_level: Level,
}

impl Assessment {
    pub fn of(record: &ComponentRecord, stats: &DatasetStats) -> Self {
        let ccr_value = record.controlling_corrosion_rate();
        Self {
            governance: governing_cof(
                record.flammable_cat.as_deref(),
                record.toxic_cat.as_deref(),
                record.production_cat.as_deref(),
            ),
            ccr_value,
            ccr: classify_ccr(ccr_value, stats.ccr),
            inventory_level: DatasetStats::level(stats.inventory, record.inventory),
            flamm_area_level: DatasetStats::level(stats.flammable_area, record.flammable_area),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct JustifiedRow {
    pub assessment: Assessment,
    pub draft: Justification,
}

/// Records, their statistics and the deterministic paragraphs, in input order.
#[derive(Debug, Clone)]
pub struct JustificationBatch {
    records: Vec<ComponentRecord>,
    stats: DatasetStats,
    rows: Vec<JustifiedRow>,
}

impl JustificationBatch {
    /// Ingests `table` and drafts every row.
    ///
    /// # Errors
    /// Schema errors only; malformed cells degrade per field.
    pub fn from_table(table: &Table) -> EngineResult<Self> {
        Ok(Self::from_records(ingest(table)?))
    }

    pub fn from_records(records: Vec<ComponentRecord>) -> Self {
        let stats = DatasetStats::compute(&records);
        let rows: Vec<JustifiedRow> = records
            .iter()
            .map(|record| {
                let assessment = Assessment::of(record, &stats);
                let draft = compose(record, &assessment);
                debug!(
                    component = ?record.component,
                    ccr = assessment.ccr.as_str(),
                    governing = ?assessment.governance.letter,
                    "row drafted"
                );
                JustifiedRow { assessment, draft }
            })
            .collect();

        info!(rows = rows.len(), "justification batch drafted");
        Self {
            records,
            stats,
            rows,
        }
    }

    pub fn records(&self) -> &[ComponentRecord] {
        &self.records
    }

    pub fn rows(&self) -> &[JustifiedRow] {
        &self.rows
    }

    pub fn stats(&self) -> &DatasetStats {
        &self.stats
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Paragraph text per row.
    pub fn drafts(&self) -> Vec<String> {
        self.rows.iter().map(|r| r.draft.text()).collect()
    }

    /// Rewrite payload of row `index`, or `None` past the end.
    pub fn payload(&self, index: usize) -> Option<RewritePayload> {
        let record = self.records.get(index)?;
        let row = self.rows.get(index)?;
        Some(RewritePayload::new(record, &row.assessment))
    }

    /// Sends every draft through `service`; one outcome per row, in order.
    pub async fn polish<R>(&self, service: &R, policy: &RetryPolicy) -> Vec<PolishOutcome>
    where
        R: RewriteService + Sync,
    {
        let payloads: Vec<RewritePayload> = self
            .records
            .iter()
            .zip(&self.rows)
            .map(|(record, row)| RewritePayload::new(record, &row.assessment))
            .collect();
        let drafts = self.drafts();

        polish_all(
            service,
            payloads.iter().zip(drafts.iter().map(String::as_str)),
            policy,
        )
        .await
    }
}

/// Drafts for already-ingested records.
pub fn build_all_justifications(records: &[ComponentRecord]) -> Vec<Justification> {
    let stats = DatasetStats::compute(records);
    records
        .iter()
        .map(|record| compose(record, &Assessment::of(record, &stats)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_inventory(values: &[Option<f64>]) -> Vec<ComponentRecord> {
        values
            .iter()
            .map(|&inventory| ComponentRecord {
                inventory,
                ..ComponentRecord::default()
            })
            .collect()
    }

    #[test]
    fn outlier_stays_inside_population_band() {
        let records =
            with_inventory(&[Some(10.0), Some(10.0), Some(10.0), Some(10.0), Some(100.0)]);
        let stats = DatasetStats::compute(&records);
        let band = stats.inventory.unwrap();

        assert!((band.mean - 28.0).abs() < 1e-9);
        assert!((band.std - 36.0).abs() < 1e-9);
        assert!((band.low - -80.0).abs() < 1e-9);
        assert!((band.high - 136.0).abs() < 1e-9);
        assert_eq!(Assessment::of(&records[4], &stats).inventory_level, Level::Medium);
    }

    #[test]
    fn missing_values_are_excluded_from_stats() {
        let records = with_inventory(&[Some(1.0), None, Some(3.0)]);
        let stats = DatasetStats::compute(&records);
        assert_eq!(stats.inventory.map(|b| b.mean), Some(2.0));
        assert_eq!(stats.flammable_area, None);
        assert_eq!(stats.ccr, None);
        assert_eq!(Assessment::of(&records[1], &stats).inventory_level, Level::Medium);
    }

    #[test]
    fn ccr_spike_escalates_against_batch() {
        let mut records: Vec<ComponentRecord> = (0..9)
            .map(|_| ComponentRecord {
                preferred_ccr: Some(0.01),
                ..ComponentRecord::default()
            })
            .collect();
        records.push(ComponentRecord {
            int_corr_rate: Some(0.15),
            ext_corr_rate: Some(0.02),
            ..ComponentRecord::default()
        });

        let batch = JustificationBatch::from_records(records);
        let spike = &batch.rows()[9].assessment;
        assert_eq!(spike.ccr_value, Some(0.15));
        assert_eq!(spike.ccr, CorrosionSeverity::High);
        assert_eq!(batch.rows()[0].assessment.ccr, CorrosionSeverity::Negligible);
    }

    #[test]
    fn drafts_follow_input_order() {
        let records: Vec<ComponentRecord> = ["LOW", "HIGH", "MEDIUM"]
            .iter()
            .map(|risk| ComponentRecord {
                risk_category: Some(risk.to_string()),
                ..ComponentRecord::default()
            })
            .collect();

        let batch = JustificationBatch::from_records(records.clone());
        let drafts = batch.drafts();
        assert_eq!(batch.len(), 3);
        assert!(drafts[0].starts_with("The risk is LOW,"));
        assert!(drafts[1].starts_with("The risk is HIGH,"));
        assert!(drafts[2].starts_with("The risk is MEDIUM,"));

        let direct: Vec<String> = build_all_justifications(&records)
            .iter()
            .map(Justification::text)
            .collect();
        assert_eq!(direct, drafts);
        assert!(batch.payload(3).is_none());
    }

    #[test]
    fn empty_batch() {
        let batch = JustificationBatch::from_records(Vec::new());
        assert!(batch.is_empty());
        assert_eq!(batch.stats(), &DatasetStats::default());
    }
}
