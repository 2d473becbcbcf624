use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::data::filter::Filter;
use crate::data::model::guess_value_type;
use crate::metrics::Metric;
use crate::model::{Formula, ModelSpec};
use crate::resample::HoldOut;

// ---------------------------------------------------------------------------
// Report configuration
// ---------------------------------------------------------------------------

/// A named candidate model, e.g. `{"name": "wiggly", "kind": "smooth", "span": 0.05}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Candidate {
    pub name: String,
    #[serde(flatten)]
    pub model: ModelSpec,
}

impl Candidate {
    pub fn new(name: &str, model: ModelSpec) -> Self {
        Self {
            name: name.to_string(),
            model,
        }
    }
}

/// Settings for a batch comparison run. Every field has a default, so an
/// empty JSON object `{}` is a valid config.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// `"response ~ predictor"`.
    pub formula: Formula,
    /// Number of random splits.
    pub splits: usize,
    /// Rows held out per split: a count (`20`) or fraction (`0.2`).
    pub holdout: HoldOut,
    pub seed: u64,
    pub metric: Metric,
    /// Use k-fold splitting instead of repeated random hold-out.
    pub kfold: Option<usize>,
    pub candidates: Vec<Candidate>,
    /// Also fit the first candidate once per level of this column.
    pub group_by: Option<String>,
    /// Keep only rows whose column value is one of the listed values,
    /// e.g. `{"site": ["a", "b"]}`. Applied before resampling.
    pub filter: BTreeMap<String, Vec<String>>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            formula: Formula::new("y", "x"),
            splits: 100,
            holdout: HoldOut::default(),
            seed: 42,
            metric: Metric::default(),
            kfold: None,
            candidates: vec![
                Candidate::new("linear", ModelSpec::Linear),
                Candidate::new("smooth", ModelSpec::Smooth { span: 0.75 }),
                Candidate::new("wiggly", ModelSpec::Smooth { span: 0.05 }),
            ],
            group_by: None,
            filter: BTreeMap::new(),
        }
    }
}

impl ReportConfig {
    /// Read a JSON config file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: ReportConfig = serde_json::from_str(text)?;
        if config.candidates.is_empty() {
            anyhow::bail!("config lists no candidate models");
        }
        Ok(config)
    }

    /// The configured filter with each listed value typed like a loaded cell.
    pub fn row_filter(&self) -> Filter {
        self.filter
            .iter()
            .map(|(column, values)| {
                let selected = values.iter().map(|v| guess_value_type(v)).collect();
                (column.clone(), selected)
            })
            .collect()
    }

    /// Candidates as `(name, spec)` pairs.
    pub fn candidate_specs(&self) -> Vec<(String, ModelSpec)> {
        self.candidates
            .iter()
            .map(|c| (c.name.clone(), c.model))
            .collect()
    }
}
