use lowess::prelude::{Batch, Lowess};

use super::Predict;
use crate::error::{Error, Result};

/// LOWESS curve (local linear, tricube weights, no robustness passes).
///
/// The curve is evaluated at the training predictor values; predictions
/// between them are linear interpolations, clamped to the end values outside
/// the training range. A small span tracks noise closely.
#[derive(Debug, Clone)]
pub struct SmoothFit {
    /// Sorted predictor values of the fitted curve.
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl SmoothFit {
    pub fn fit(x: &[f64], y: &[f64], span: f64) -> Result<Self> {
        if !(span > 0.0 && span <= 1.0) {
            return Err(Error::InvalidParameter(format!(
                "span must be in (0, 1], got {span}"
            )));
        }
        let n = x.len();
        if n != y.len() {
            return Err(Error::Fit(format!(
                "x has {n} values but y has {}",
                y.len()
            )));
        }
        if n < 2 {
            return Err(Error::Fit(format!("need at least 2 rows, got {n}")));
        }

        // A single distinct predictor value has no local slope: the curve is the mean.
        if x.iter().all(|&v| v == x[0]) {
            let mean = y.iter().sum::<f64>() / n as f64;
            return Ok(SmoothFit {
                xs: vec![x[0]],
                ys: vec![mean],
            });
        }

        let model = Lowess::new()
            .fraction(span)
            .iterations(0)
            .adapter(Batch)
            .build()
            .map_err(|e| Error::Fit(e.to_string()))?;
        let curve = model.fit(x, y).map_err(|e| Error::Fit(e.to_string()))?;

        Ok(SmoothFit {
            xs: curve.x,
            ys: curve.y,
        })
    }

    /// The fitted curve as `(x, smoothed y)` pairs, ascending in `x`.
    pub fn curve(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.xs.iter().copied().zip(self.ys.iter().copied())
    }
}

impl Predict for SmoothFit {
    fn predict(&self, x0: f64) -> f64 {
        let last = self.xs.len() - 1;
        // First curve point at or beyond x0.
        let hi = self.xs.partition_point(|&v| v < x0);
        if hi == 0 {
            return self.ys[0];
        }
        if hi > last {
            return self.ys[last];
        }
        let lo = hi - 1;
        let t = (x0 - self.xs[lo]) / (self.xs[hi] - self.xs[lo]);
        self.ys[lo] + t * (self.ys[hi] - self.ys[lo])
    }
}
