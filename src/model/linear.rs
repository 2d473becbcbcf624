use super::Predict;
use crate::error::{Error, Result};

/// Ordinary least squares line `y = intercept + slope * x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub intercept: f64,
    pub slope: f64,
}

impl LinearFit {
    /// Closed-form simple regression of `y` on `x`.
    pub fn fit(x: &[f64], y: &[f64]) -> Result<Self> {
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

        let mean_x = x.iter().sum::<f64>() / n as f64;
        let mean_y = y.iter().sum::<f64>() / n as f64;
        let (sxx, sxy) = x.iter().zip(y).fold((0.0, 0.0), |(sxx, sxy), (&xi, &yi)| {
            let dx = xi - mean_x;
            (sxx + dx * dx, sxy + dx * (yi - mean_y))
        });

        // Zero variance relative to the magnitude of x.
        let scale: f64 = x.iter().map(|v| v * v).sum();
        if !(sxx > f64::EPSILON * scale) {
            return Err(Error::Fit("predictor has zero variance".into()));
        }

        let slope = sxy / sxx;
        Ok(LinearFit {
            intercept: mean_y - slope * mean_x,
            slope,
        })
    }
}

impl Predict for LinearFit {
    fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}
