use std::sync::Arc;

use serde::Deserialize;

use crate::data::{Dataset, DatasetView};
use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// HoldOut – how many rows each split keeps back for testing
// ---------------------------------------------------------------------------

/// Test-set size: an absolute row count or a fraction of the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum HoldOut {
    Count(usize),
    Fraction(f64),
}

impl HoldOut {
    /// Number of test rows for a dataset of `n` rows.
    ///
    /// Must leave at least one row on each side of the split.
    pub fn resolve(self, n: usize) -> Result<usize> {
        if n == 0 {
            return Err(Error::InvalidParameter("dataset is empty".into()));
        }
        let n_test = match self {
            HoldOut::Count(count) => count,
            HoldOut::Fraction(f) => {
                if !(f > 0.0 && f < 1.0) {
                    return Err(Error::InvalidParameter(format!(
                        "hold-out fraction must be in (0, 1), got {f}"
                    )));
                }
                (n as f64 * f).round() as usize
            }
        };
        if n_test == 0 || n_test >= n {
            return Err(Error::InvalidParameter(format!(
                "hold-out of {n_test} rows must be between 1 and {} for a dataset of {n} rows",
                n - 1
            )));
        }
        Ok(n_test)
    }
}

impl Default for HoldOut {
    fn default() -> Self {
        HoldOut::Fraction(0.2)
    }
}

// ---------------------------------------------------------------------------
// Split – one train/test partition of row indices
// ---------------------------------------------------------------------------

/// Disjoint train and test row indices, both sorted ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    train: Vec<usize>,
    test: Vec<usize>,
}

impl Split {
    /// Build a split from test indices; every other row in `0..n` trains.
    pub(crate) fn from_test(n: usize, mut test: Vec<usize>) -> Self {
        test.sort_unstable();
        let mut held = vec![false; n];
        for &i in &test {
            held[i] = true;
        }
        let train = (0..n).filter(|&i| !held[i]).collect();
        Split { train, test }
    }

    pub fn train(&self) -> &[usize] {
        &self.train
    }

    pub fn test(&self) -> &[usize] {
        &self.test
    }
}

// ---------------------------------------------------------------------------
// ResampleCollection – k splits over one shared dataset
// ---------------------------------------------------------------------------

/// An ordered batch of splits that all index the same immutable dataset.
#[derive(Debug, Clone)]
pub struct ResampleCollection {
    dataset: Arc<Dataset>,
    splits: Vec<Split>,
}

impl ResampleCollection {
    pub(crate) fn new(dataset: Arc<Dataset>, splits: Vec<Split>) -> Self {
        Self { dataset, splits }
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    pub fn splits(&self) -> &[Split] {
        &self.splits
    }

    pub fn len(&self) -> usize {
        self.splits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.splits.is_empty()
    }

    /// Training view of split `i`.
    pub fn train(&self, i: usize) -> Option<DatasetView> {
        self.splits.get(i).map(|s| self.view(s.train()))
    }

    /// Held-out view of split `i`.
    pub fn test(&self, i: usize) -> Option<DatasetView> {
        self.splits.get(i).map(|s| self.view(s.test()))
    }

    /// `(train, test)` view pairs in split order.
    pub fn iter(&self) -> impl Iterator<Item = (DatasetView, DatasetView)> + '_ {
        self.splits
            .iter()
            .map(|s| (self.view(s.train()), self.view(s.test())))
    }

    fn view(&self, indices: &[usize]) -> DatasetView {
        // Split indices are drawn from 0..dataset.len().
        DatasetView::from_parts(self.dataset.clone(), indices.into())
    }
}
