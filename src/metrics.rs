//! Held-out error metrics and summaries of score distributions.

use std::fmt;

use serde::Deserialize;

use crate::data::DatasetView;
use crate::error::{Error, Result};
use crate::model::{Formula, Predict};

/// Scalar comparison of predictions against observed responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Root-mean-square error.
    #[default]
    Rmse,
    /// Mean absolute error.
    Mae,
    /// Coefficient of determination, `1 - SS_res / SS_tot`.
    RSquared,
}

impl Metric {
    pub fn score(self, predicted: &[f64], actual: &[f64]) -> Result<f64> {
        if predicted.len() != actual.len() {
            return Err(Error::InvalidParameter(format!(
                "{} predictions for {} observations",
                predicted.len(),
                actual.len()
            )));
        }
        if actual.is_empty() {
            return Err(Error::InvalidParameter("cannot score zero rows".into()));
        }
        let n = actual.len() as f64;
        let residuals = predicted.iter().zip(actual).map(|(p, a)| a - p);

        let score = match self {
            Metric::Rmse => (residuals.map(|r| r * r).sum::<f64>() / n).sqrt(),
            Metric::Mae => residuals.map(f64::abs).sum::<f64>() / n,
            Metric::RSquared => {
                let mean = actual.iter().sum::<f64>() / n;
                let ss_tot: f64 = actual.iter().map(|a| (a - mean).powi(2)).sum();
                let ss_res: f64 = residuals.map(|r| r * r).sum();
                if ss_tot == 0.0 {
                    return Err(Error::InvalidParameter(
                        "R² is undefined for a constant response".into(),
                    ));
                }
                1.0 - ss_res / ss_tot
            }
        };
        Ok(score)
    }

    /// Whether smaller scores are better.
    pub fn lower_is_better(self) -> bool {
        !matches!(self, Metric::RSquared)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Rmse => write!(f, "rmse"),
            Metric::Mae => write!(f, "mae"),
            Metric::RSquared => write!(f, "r_squared"),
        }
    }
}

/// Predict every row of `view` and score against its actual response.
pub fn score_view<P: Predict + ?Sized>(
    fitted: &P,
    view: &DatasetView,
    formula: &Formula,
    metric: Metric,
) -> Result<f64> {
    let (x, y) = formula.columns(view)?;
    metric.score(&fitted.predict_all(&x), &y)
}

// ---------------------------------------------------------------------------
// ScoreSummary
// ---------------------------------------------------------------------------

/// Location and spread of a set of scores.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreSummary {
    pub n: usize,
    pub mean: f64,
    /// Sample standard deviation (`n - 1` denominator); 0 for one score.
    pub sd: f64,
    pub min: f64,
    pub max: f64,
}

impl ScoreSummary {
    /// `None` when `scores` is empty.
    pub fn from_scores(scores: &[f64]) -> Option<Self> {
        if scores.is_empty() {
            return None;
        }
        let n = scores.len();
        let mean = scores.iter().sum::<f64>() / n as f64;
        let sd = if n > 1 {
            let ss: f64 = scores.iter().map(|s| (s - mean).powi(2)).sum();
            (ss / (n - 1) as f64).sqrt()
        } else {
            0.0
        };
        Some(ScoreSummary {
            n,
            mean,
            sd,
            min: scores.iter().copied().fold(f64::INFINITY, f64::min),
            max: scores.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rmse_and_mae() {
        let predicted = [1.0, 2.0, 3.0, 4.0];
        let actual = [2.0, 2.0, 1.0, 4.0];
        let rmse = Metric::Rmse.score(&predicted, &actual).unwrap();
        let mae = Metric::Mae.score(&predicted, &actual).unwrap();
        assert!((rmse - (5.0f64 / 4.0).sqrt()).abs() < 1e-12);
        assert!((mae - 0.75).abs() < 1e-12);
    }

    #[test]
    fn r_squared_of_perfect_fit_is_one() {
        let actual = [1.0, 2.0, 4.0];
        assert!((Metric::RSquared.score(&actual, &actual).unwrap() - 1.0).abs() < 1e-12);
        assert!(Metric::RSquared.score(&[1.0, 1.0], &[2.0, 2.0]).is_err());
    }

    #[test]
    fn length_mismatch_and_empty_are_invalid() {
        assert!(Metric::Rmse.score(&[1.0], &[1.0, 2.0]).is_err());
        assert!(Metric::Mae.score(&[], &[]).is_err());
    }

    #[test]
    fn summary_statistics() {
        let s = ScoreSummary::from_scores(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_eq!(s.n, 8);
        assert!((s.mean - 5.0).abs() < 1e-12);
        assert!((s.sd - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
        assert_eq!(s.min, 2.0);
        assert_eq!(s.max, 9.0);

        assert_eq!(ScoreSummary::from_scores(&[3.0]).unwrap().sd, 0.0);
        assert!(ScoreSummary::from_scores(&[]).is_none());
    }

    #[test]
    fn metric_names_deserialize() {
        let m: Metric = serde_json::from_str("\"r_squared\"").unwrap();
        assert_eq!(m, Metric::RSquared);
        assert_eq!(Metric::default(), Metric::Rmse);
    }
}
