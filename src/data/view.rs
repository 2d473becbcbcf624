use std::sync::Arc;

use super::model::{Dataset, Row, Value};
use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// DatasetView – index-based window over a shared dataset
// ---------------------------------------------------------------------------

/// A set of row indices into a shared, immutable [`Dataset`].
///
/// Views never copy row data. Call [`DatasetView::materialize`] when a
/// standalone table is needed.
#[derive(Debug, Clone)]
pub struct DatasetView {
    dataset: Arc<Dataset>,
    indices: Arc<[usize]>,
}

impl DatasetView {
    /// Create a view, checking that every index is in range.
    pub fn new(dataset: Arc<Dataset>, indices: impl Into<Arc<[usize]>>) -> Result<Self> {
        let indices = indices.into();
        if let Some(&bad) = indices.iter().find(|&&i| i >= dataset.len()) {
            return Err(Error::InvalidParameter(format!(
                "row index {bad} out of range for dataset of {} rows",
                dataset.len()
            )));
        }
        Ok(Self { dataset, indices })
    }

    /// Caller guarantees every index is below `dataset.len()`.
    pub(crate) fn from_parts(dataset: Arc<Dataset>, indices: Arc<[usize]>) -> Self {
        debug_assert!(indices.iter().all(|&i| i < dataset.len()));
        Self { dataset, indices }
    }

    /// A view covering every row in order.
    pub fn full(dataset: Arc<Dataset>) -> Self {
        let indices: Arc<[usize]> = (0..dataset.len()).collect();
        Self { dataset, indices }
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The `i`-th row of the view (not the `i`-th row of the dataset).
    pub fn row(&self, i: usize) -> Option<&Row> {
        self.indices.get(i).and_then(|&r| self.dataset.row(r))
    }

    pub fn rows(&self) -> impl Iterator<Item = &Row> + '_ {
        self.indices.iter().filter_map(|&r| self.dataset.row(r))
    }

    pub fn value(&self, i: usize, column: &str) -> Option<&Value> {
        self.indices
            .get(i)
            .and_then(|&r| self.dataset.value(r, column))
    }

    /// Gather a numeric column over the view's rows.
    pub fn numeric_column(&self, column: &str) -> Result<Vec<f64>> {
        self.dataset.numeric_at(column, &self.indices)
    }

    /// Copy the referenced rows into a standalone dataset.
    pub fn materialize(&self) -> Dataset {
        let rows = self.rows().cloned().collect();
        Dataset::from_rows(rows, self.dataset.column_names().to_vec())
    }
}
