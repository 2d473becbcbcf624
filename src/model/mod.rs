//! Model fitting: a formula naming the variables, a specification naming the
//! fitter, and the [`Predict`] seam every fitted model implements.

mod linear;
mod smooth;

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

pub use linear::LinearFit;
pub use smooth::SmoothFit;

use crate::data::DatasetView;
use crate::error::{Error, Result};

/// A fitted model that maps a predictor value to a predicted response.
pub trait Predict {
    fn predict(&self, x: f64) -> f64;

    fn predict_all(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.predict(x)).collect()
    }
}

// ---------------------------------------------------------------------------
// Formula – `response ~ predictor`
// ---------------------------------------------------------------------------

/// Response and single predictor column, written `"y ~ x"`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct Formula {
    pub response: String,
    pub predictor: String,
}

impl Formula {
    pub fn new(response: impl Into<String>, predictor: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            predictor: predictor.into(),
        }
    }

    /// Gather `(x, y)` from a view, failing on missing or non-numeric cells.
    pub fn columns(&self, view: &DatasetView) -> Result<(Vec<f64>, Vec<f64>)> {
        let x = view.numeric_column(&self.predictor)?;
        let y = view.numeric_column(&self.response)?;
        Ok((x, y))
    }
}

impl FromStr for Formula {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (lhs, rhs) = s
            .split_once('~')
            .ok_or_else(|| Error::InvalidParameter(format!("formula '{s}' has no '~'")))?;
        let (response, predictor) = (lhs.trim(), rhs.trim());
        let valid = |name: &str| {
            !name.is_empty() && !name.contains(|c: char| c.is_whitespace() || "~+*:".contains(c))
        };
        if !valid(response) || !valid(predictor) {
            return Err(Error::InvalidParameter(format!(
                "formula '{s}' must name one response and one predictor"
            )));
        }
        Ok(Formula::new(response, predictor))
    }
}

impl TryFrom<String> for Formula {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ~ {}", self.response, self.predictor)
    }
}

// ---------------------------------------------------------------------------
// ModelSpec – which fitter to run
// ---------------------------------------------------------------------------

/// A model specification, deserialized as `{"kind": "linear"}` or
/// `{"kind": "smooth", "span": 0.75}`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelSpec {
    Linear,
    Smooth { span: f64 },
}

impl ModelSpec {
    /// Fit on the rows of `train`.
    pub fn fit(&self, train: &DatasetView, formula: &Formula) -> Result<Fitted> {
        let (x, y) = formula.columns(train)?;
        self.fit_xy(&x, &y)
    }

    pub fn fit_xy(&self, x: &[f64], y: &[f64]) -> Result<Fitted> {
        match *self {
            ModelSpec::Linear => LinearFit::fit(x, y).map(Fitted::Linear),
            ModelSpec::Smooth { span } => SmoothFit::fit(x, y, span).map(Fitted::Smooth),
        }
    }
}

impl fmt::Display for ModelSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelSpec::Linear => write!(f, "linear"),
            ModelSpec::Smooth { span } => write!(f, "smooth(span={span})"),
        }
    }
}

/// Output of [`ModelSpec::fit`].
#[derive(Debug, Clone)]
pub enum Fitted {
    Linear(LinearFit),
    Smooth(SmoothFit),
}

impl Predict for Fitted {
    fn predict(&self, x: f64) -> f64 {
        match self {
            Fitted::Linear(m) => m.predict(x),
            Fitted::Smooth(m) => m.predict(x),
        }
    }
}
