//! Cross-validation: fit on every train view, score on the matching test view.

use log::{debug, info};

use crate::error::Result;
use crate::metrics::{Metric, ScoreSummary, score_view};
use crate::model::{Formula, ModelSpec};
use crate::resample::ResampleCollection;

/// Per-split scores of one model over a resample collection.
#[derive(Debug, Clone)]
pub struct CvScores {
    pub name: String,
    pub model: ModelSpec,
    pub metric: Metric,
    /// One score per split, in split order.
    pub scores: Vec<f64>,
}

impl CvScores {
    pub fn summary(&self) -> Option<ScoreSummary> {
        ScoreSummary::from_scores(&self.scores)
    }
}

/// Fit `model` on each split's train rows and score it on the held-out rows.
///
/// The first fit or scoring failure is returned unchanged.
pub fn cross_validate(
    collection: &ResampleCollection,
    model: &ModelSpec,
    formula: &Formula,
    metric: Metric,
) -> Result<CvScores> {
    let mut scores = Vec::with_capacity(collection.len());

    for (i, (train, test)) in collection.iter().enumerate() {
        let fitted = model.fit(&train, formula)?;
        let score = score_view(&fitted, &test, formula, metric)?;
        debug!("{model} split {i}: {metric} = {score:.4}");
        scores.push(score);
    }

    Ok(CvScores {
        name: model.to_string(),
        model: *model,
        metric,
        scores,
    })
}

/// Cross-validate several named candidates over the same splits.
pub fn compare_models(
    collection: &ResampleCollection,
    candidates: &[(String, ModelSpec)],
    formula: &Formula,
    metric: Metric,
) -> Result<Vec<CvScores>> {
    candidates
        .iter()
        .map(|(name, model)| {
            let mut result = cross_validate(collection, model, formula, metric)?;
            result.name = name.clone();
            if let Some(s) = result.summary() {
                info!("{name}: mean {metric} {:.4} (sd {:.4})", s.mean, s.sd);
            }
            Ok(result)
        })
        .collect()
}
