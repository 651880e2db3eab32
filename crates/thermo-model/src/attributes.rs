use serde::{Deserialize, Serialize};

use crate::error::{Result, ThermoError};

/// Binary subject classification inferred from the subject ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    A,
    B,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::A => f.write_str("A"),
            Category::B => f.write_str("B"),
        }
    }
}

/// Attributes derived from a subject ID and a representative time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedAttributes {
    pub category: Category,
    pub period_index: u64,
    pub is_special_period: bool,
}

/// Rules for deriving [`DerivedAttributes`].
///
/// The defaults encode the mouse dataset conventions: IDs starting with `f`
/// are category A, a period is one day of minutes, and every fourth day
/// (phase 2) of a category A subject is flagged. The cadence is an
/// unverified convention, so every part of it is configurable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivationRules {
    /// Subject IDs starting with this prefix (case-insensitive) are category A.
    pub category_prefix: String,
    /// Time steps per period.
    pub period_length: u64,
    /// Number of periods in one special-period cycle.
    pub special_cycle: u64,
    /// Position within the cycle that is flagged.
    pub special_phase: u64,
}

pub const MINUTES_PER_DAY: u64 = 1440;

impl Default for DerivationRules {
    fn default() -> Self {
        Self {
            category_prefix: "f".to_string(),
            period_length: MINUTES_PER_DAY,
            special_cycle: 4,
            special_phase: 2,
        }
    }
}

impl DerivationRules {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_category_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.category_prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn with_period_length(mut self, period_length: u64) -> Self {
        self.period_length = period_length;
        self
    }

    #[must_use]
    pub fn with_special_cadence(mut self, cycle: u64, phase: u64) -> Self {
        self.special_cycle = cycle;
        self.special_phase = phase;
        self
    }

    /// Check that the rules can be applied without dividing by zero.
    ///
    /// # Errors
    ///
    /// Returns [`ThermoError::InvalidPeriodRule`] when the period length or
    /// the cycle is zero, or the phase does not fall inside the cycle.
    pub fn validate(&self) -> Result<()> {
        if self.period_length == 0 {
            return Err(ThermoError::InvalidPeriodRule {
                reason: "period length must be positive".to_string(),
            });
        }
        if self.special_cycle == 0 {
            return Err(ThermoError::InvalidPeriodRule {
                reason: "special-period cycle must be positive".to_string(),
            });
        }
        if self.special_phase >= self.special_cycle {
            return Err(ThermoError::InvalidPeriodRule {
                reason: format!(
                    "special-period phase {} is outside a cycle of {}",
                    self.special_phase, self.special_cycle
                ),
            });
        }
        Ok(())
    }
}
