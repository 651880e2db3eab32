//! Configuration options for the reshape and binning pipeline.

use serde::{Deserialize, Serialize};

use crate::attributes::DerivationRules;

/// Options for wide-to-long reshaping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReshapeOptions {
    /// Column holding an explicit time index. It is excluded from the
    /// subject columns; time is still the row position.
    pub index_column: Option<String>,
}

impl ReshapeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_index_column(mut self, column: Option<String>) -> Self {
        self.index_column = column;
        self
    }
}

/// Options controlling a full load-reshape-derive run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineOptions {
    pub reshape: ReshapeOptions,
    pub derivation: DerivationRules,
}

impl PipelineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_reshape(mut self, reshape: ReshapeOptions) -> Self {
        self.reshape = reshape;
        self
    }

    #[must_use]
    pub fn with_derivation(mut self, derivation: DerivationRules) -> Self {
        self.derivation = derivation;
        self
    }
}
