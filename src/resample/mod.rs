//! Repeated train/test resampling over a shared dataset.
//!
//! Splits store row indices only; [`ResampleCollection`] hands out
//! [`DatasetView`](crate::data::DatasetView)s that borrow the one
//! `Arc<Dataset>` every split was drawn from.

mod kfold;
mod monte_carlo;
mod split;

pub use kfold::kfold_splits;
pub use monte_carlo::generate_splits;
pub use split::{HoldOut, ResampleCollection, Split};
