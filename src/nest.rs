//! One model per level of a grouping column.

use std::sync::Arc;

use log::debug;

use crate::data::filter::group_indices;
use crate::data::{Dataset, DatasetView, Value};
use crate::error::Result;
use crate::metrics::{Metric, score_view};
use crate::model::{Fitted, Formula, ModelSpec};

#[derive(Debug, Clone)]
pub struct GroupFit {
    pub level: Value,
    pub rows: usize,
    pub fitted: Fitted,
    pub in_sample_rmse: f64,
}

/// Fit `model` separately on the rows of each distinct `group_column` value.
///
/// Groups are visited in ascending value order. A group too small or too
/// degenerate to fit fails the whole call.
pub fn fit_by_group(
    dataset: &Arc<Dataset>,
    group_column: &str,
    model: &ModelSpec,
    formula: &Formula,
) -> Result<Vec<GroupFit>> {
    group_indices(dataset, group_column)?
        .into_iter()
        .map(|(level, indices)| {
            let view = DatasetView::new(dataset.clone(), indices)?;
            let fitted = model.fit(&view, formula)?;
            let in_sample_rmse = score_view(&fitted, &view, formula, Metric::Rmse)?;
            debug!("{group_column}={level}: {} rows, rmse {in_sample_rmse:.4}", view.len());
            Ok(GroupFit {
                level,
                rows: view.len(),
                fitted,
                in_sample_rmse,
            })
        })
        .collect()
}
