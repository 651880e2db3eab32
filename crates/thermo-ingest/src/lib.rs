//! Source loading for body-temperature time series.
//!
//! Reads the wide-format CSV (one column per subject, one row per time step)
//! into a [`thermo_model::WideTable`] and fingerprints the file contents.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use thermo_ingest::load_source;
//!
//! let source = load_source(Path::new("data/mouse_temperatures.csv"))?;
//! println!("{} subjects", source.table.headers.len());
//! ```

mod csv_table;
mod error;
mod fingerprint;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use csv_table::{SourceFile, load_source, parse_wide_table, read_wide_table};

// === Provenance ===
pub use fingerprint::sha256_hex;
