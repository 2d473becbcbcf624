use std::sync::Arc;

use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::split::{ResampleCollection, Split};
use crate::data::Dataset;
use crate::error::{Error, Result};

/// Partition shuffled rows into `k` folds; each fold is the test set once.
///
/// The first `n % k` folds receive one extra row. Every row appears in
/// exactly one test set.
pub fn kfold_splits(dataset: &Arc<Dataset>, k: usize, seed: u64) -> Result<ResampleCollection> {
    let n = dataset.len();
    if n == 0 {
        return Err(Error::InvalidParameter("dataset is empty".into()));
    }
    if k < 2 || k > n {
        return Err(Error::InvalidParameter(format!(
            "k must be between 2 and {n}, got {k}"
        )));
    }

    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let fold_size = n / k;
    let remainder = n % k;
    let mut splits = Vec::with_capacity(k);
    let mut start = 0;
    for fold in 0..k {
        let size = fold_size + usize::from(fold < remainder);
        let test = indices[start..start + size].to_vec();
        splits.push(Split::from_test(n, test));
        start += size;
    }

    debug!("generated {k} folds over {n} rows");
    Ok(ResampleCollection::new(dataset.clone(), splits))
}
