use std::fmt;
use std::sync::Arc;

use log::info;

use crate::config::ReportConfig;
use crate::data::filter::filtered_indices;
use crate::data::{Dataset, DatasetView};
use crate::error::{Error, Result};
use crate::evaluate::{CvScores, compare_models};
use crate::nest::{GroupFit, fit_by_group};
use crate::resample::{ResampleCollection, generate_splits, kfold_splits};

// ---------------------------------------------------------------------------
// Report – everything a batch run computes, independent of printing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Report {
    pub rows: usize,
    pub splits: usize,
    pub comparisons: Vec<CvScores>,
    /// Per-group fits when `group_by` is configured.
    pub groups: Vec<GroupFit>,
    pub group_column: Option<String>,
}

impl Report {
    /// Resample `dataset`, cross-validate every candidate, and fit groups.
    pub fn run(dataset: Arc<Dataset>, config: &ReportConfig) -> Result<Self> {
        let dataset = select_rows(dataset, config)?;
        let collection = build_collection(&dataset, config)?;
        info!(
            "comparing {} models over {} splits of {} rows",
            config.candidates.len(),
            collection.len(),
            dataset.len()
        );
        let comparisons = compare_models(
            &collection,
            &config.candidate_specs(),
            &config.formula,
            config.metric,
        )?;

        let groups = match (&config.group_by, config.candidates.first()) {
            (Some(column), Some(first)) => {
                fit_by_group(&dataset, column, &first.model, &config.formula)?
            }
            _ => Vec::new(),
        };

        Ok(Report {
            rows: dataset.len(),
            splits: collection.len(),
            comparisons,
            groups,
            group_column: config.group_by.clone(),
        })
    }

    /// Name of the candidate with the best mean score.
    pub fn best(&self) -> Option<&CvScores> {
        self.comparisons
            .iter()
            .filter_map(|cv| cv.summary().map(|s| (cv, s.mean)))
            .min_by(|(a, ma), (_, mb)| {
                if a.metric.lower_is_better() {
                    ma.total_cmp(mb)
                } else {
                    mb.total_cmp(ma)
                }
            })
            .map(|(cv, _)| cv)
    }
}

/// Plain-text tables for the terminal.
impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let metric = self
            .comparisons
            .first()
            .map(|c| c.metric.to_string())
            .unwrap_or_default();

        writeln!(f, "{} rows, {} splits, metric: {metric}", self.rows, self.splits)?;
        writeln!(
            f,
            "{:<16} {:>10} {:>10} {:>10} {:>10}",
            "model", "mean", "sd", "min", "max"
        )?;
        writeln!(f, "{}", "-".repeat(60))?;
        for cv in &self.comparisons {
            if let Some(s) = cv.summary() {
                writeln!(
                    f,
                    "{:<16} {:>10.4} {:>10.4} {:>10.4} {:>10.4}",
                    cv.name, s.mean, s.sd, s.min, s.max
                )?;
            }
        }

        if let Some(column) = &self.group_column {
            writeln!(f)?;
            writeln!(f, "{:<16} {:>8} {:>12}", column, "rows", "rmse")?;
            writeln!(f, "{}", "-".repeat(38))?;
            for g in &self.groups {
                writeln!(
                    f,
                    "{:<16} {:>8} {:>12.4}",
                    g.level.to_string(),
                    g.rows,
                    g.in_sample_rmse
                )?;
            }
        }
        Ok(())
    }
}

/// Apply the configured row filter, copying the kept rows into a new table.
fn select_rows(dataset: Arc<Dataset>, config: &ReportConfig) -> Result<Arc<Dataset>> {
    if config.filter.is_empty() {
        return Ok(dataset);
    }
    let filter = config.row_filter();
    for column in filter.keys() {
        if !dataset.has_column(column) {
            return Err(Error::MissingColumn(column.clone()));
        }
    }
    let kept = filtered_indices(&dataset, &filter);
    info!("filter kept {} of {} rows", kept.len(), dataset.len());
    let view = DatasetView::new(dataset, kept)?;
    Ok(Arc::new(view.materialize()))
}

fn build_collection(dataset: &Arc<Dataset>, config: &ReportConfig) -> Result<ResampleCollection> {
    match config.kfold {
        Some(k) => kfold_splits(dataset, k, config.seed),
        None => generate_splits(dataset, config.splits, config.holdout, config.seed),
    }
}
