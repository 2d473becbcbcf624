use std::sync::Arc;

use log::debug;
use rand::rngs::StdRng;
use rand::seq::index;
use rand::SeedableRng;

use super::split::{HoldOut, ResampleCollection, Split};
use crate::data::Dataset;
use crate::error::{Error, Result};

/// Draw `num_splits` independent random train/test partitions.
///
/// Each split holds out a fresh sample of rows, drawn without replacement,
/// as its test set; the remaining rows train. Draws are independent across
/// splits, so a row may be held out any number of times. The same `seed`
/// reproduces the same sequence of splits.
///
/// # Errors
///
/// [`Error::InvalidParameter`] when `num_splits` is zero, the dataset is
/// empty, or `holdout` does not leave at least one row on each side.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use resample_cv::data::Dataset;
/// use resample_cv::resample::{generate_splits, HoldOut};
///
/// let x: Vec<f64> = (0..100).map(f64::from).collect();
/// let ds = Arc::new(Dataset::from_columns(&[("x", &x)]).unwrap());
/// let splits = generate_splits(&ds, 5, HoldOut::Count(20), 42).unwrap();
/// assert_eq!(splits.len(), 5);
/// assert!(splits.splits().iter().all(|s| s.train().len() == 80));
/// ```
pub fn generate_splits(
    dataset: &Arc<Dataset>,
    num_splits: usize,
    holdout: HoldOut,
    seed: u64,
) -> Result<ResampleCollection> {
    if num_splits == 0 {
        return Err(Error::InvalidParameter(
            "num_splits must be at least 1".into(),
        ));
    }
    let n = dataset.len();
    let n_test = holdout.resolve(n)?;

    let mut rng = StdRng::seed_from_u64(seed);
    let splits: Vec<Split> = (0..num_splits)
        .map(|_| Split::from_test(n, index::sample(&mut rng, n, n_test).into_vec()))
        .collect();

    debug!(
        "generated {num_splits} splits over {n} rows ({} train / {n_test} test)",
        n - n_test
    );
    Ok(ResampleCollection::new(dataset.clone(), splits))
}
