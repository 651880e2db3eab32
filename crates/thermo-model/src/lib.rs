//! Data model for body-temperature time series.
//!
//! Wide tables come from the ingest crate, long and binned records are
//! produced by the transform crate. Every type here is an immutable value.

pub mod attributes;
pub mod cell;
pub mod error;
pub mod options;
pub mod record;
pub mod table;

pub use attributes::{Category, DerivationRules, DerivedAttributes, MINUTES_PER_DAY};
pub use cell::{CellOutcome, SkipReason, SkippedCell};
pub use error::{Result, ThermoError};
pub use options::{PipelineOptions, ReshapeOptions};
pub use record::{BinSize, BinnedRecord, LongRecord};
pub use table::WideTable;
