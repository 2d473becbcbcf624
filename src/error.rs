use thiserror::Error;

/// Errors raised by resampling, fitting and scoring.
#[derive(Debug, Error)]
pub enum Error {
    /// A malformed split, model or scoring configuration.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    /// A requested model variable is absent from the table.
    #[error("missing column '{0}'")]
    MissingColumn(String),
    #[error("column '{column}' is not numeric at row {row}")]
    NonNumeric { column: String, row: usize },
    /// The fitter could not produce a model (e.g. a degenerate design).
    #[error("model fit failed: {0}")]
    Fit(String),
}

pub type Result<T> = std::result::Result<T, Error>;
