use serde::{Deserialize, Serialize};

/// Why a wide-format cell produced no long record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The row ends before this column.
    Missing,
    /// Blank after trimming.
    Empty,
    NonNumeric,
    /// Parses, but to NaN or an infinity.
    NonFinite,
}

impl SkipReason {
    pub const ALL: [SkipReason; 4] = [
        SkipReason::Missing,
        SkipReason::Empty,
        SkipReason::NonNumeric,
        SkipReason::NonFinite,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SkipReason::Missing => "missing",
            SkipReason::Empty => "empty",
            SkipReason::NonNumeric => "non_numeric",
            SkipReason::NonFinite => "non_finite",
        }
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-cell parse outcome.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CellOutcome {
    Parsed(f64),
    Skipped(SkipReason),
}

impl CellOutcome {
    pub fn value(self) -> Option<f64> {
        match self {
            CellOutcome::Parsed(value) => Some(value),
            CellOutcome::Skipped(_) => None,
        }
    }
}

/// A cell that was dropped during reshaping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedCell {
    pub subject_id: String,
    pub time: u64,
    pub reason: SkipReason,
}
