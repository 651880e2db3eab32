use std::num::NonZeroU64;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ThermoError};

/// One observation in long format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongRecord {
    pub subject_id: String,
    /// Row index of the producing wide row.
    pub time: u64,
    pub value: f64,
}

impl LongRecord {
    pub fn new(subject_id: impl Into<String>, time: u64, value: f64) -> Self {
        Self {
            subject_id: subject_id.into(),
            time,
            value,
        }
    }
}

/// Mean of all long records sharing a subject and a time bin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinnedRecord {
    pub subject_id: String,
    pub bin_index: u64,
    /// `bin_index * bin_size`, used as the representative time of the bin.
    pub bin_start: u64,
    pub mean_value: f64,
    pub sample_count: usize,
}

/// Width of a time bin, always at least one time step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u64")]
pub struct BinSize(NonZeroU64);

impl BinSize {
    /// Validate a caller-provided bin width.
    ///
    /// # Errors
    ///
    /// Returns [`ThermoError::InvalidBinSize`] for zero or negative widths.
    pub fn new(bin_size: i64) -> Result<Self> {
        u64::try_from(bin_size)
            .ok()
            .and_then(NonZeroU64::new)
            .map(Self)
            .ok_or(ThermoError::InvalidBinSize { bin_size })
    }

    /// Bin width from an unsigned step count, such as a period length.
    pub fn from_steps(steps: u64) -> Result<Self> {
        NonZeroU64::new(steps)
            .map(Self)
            .ok_or(ThermoError::InvalidBinSize { bin_size: 0 })
    }

    pub fn get(self) -> u64 {
        self.0.get()
    }

    pub fn bin_index(self, time: u64) -> u64 {
        time / self.get()
    }

    pub fn bin_start(self, bin_index: u64) -> u64 {
        bin_index.saturating_mul(self.get())
    }
}

impl TryFrom<i64> for BinSize {
    type Error = ThermoError;

    fn try_from(value: i64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<BinSize> for u64 {
    fn from(value: BinSize) -> Self {
        value.get()
    }
}

impl std::fmt::Display for BinSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.get())
    }
}
