use thiserror::Error;

/// Configuration errors shared by the workspace crates.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ThermoError {
    #[error("invalid bin size {bin_size}: must be a positive integer")]
    InvalidBinSize { bin_size: i64 },
    #[error("invalid period rule: {reason}")]
    InvalidPeriodRule { reason: String },
}

pub type Result<T> = std::result::Result<T, ThermoError>;
