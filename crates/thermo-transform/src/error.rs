//! Error types for transformation operations.

use thermo_model::ThermoError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransformError {
    /// Caller passed an unusable bin size or period rule.
    #[error(transparent)]
    Config(#[from] ThermoError),

    /// Failed to build an output DataFrame.
    #[error("DataFrame operation failed: {message}")]
    Frame { message: String },
}

impl From<polars::prelude::PolarsError> for TransformError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::Frame {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TransformError>;
