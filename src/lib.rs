//! Repeated train/test resampling and cross-validated comparison of simple
//! regression models over tabular data.
//!
//! ```text
//!   loader ──► Dataset ──Arc──► resample ──► (train, test) views
//!                                                 │
//!                               model::fit ◄──────┘
//!                                   │
//!                               metrics::score_view ──► evaluate / report
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod evaluate;
pub mod metrics;
pub mod model;
pub mod nest;
pub mod report;
pub mod resample;

pub use error::{Error, Result};
