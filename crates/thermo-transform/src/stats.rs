//! Per-subject descriptive statistics for the summary table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use thermo_model::{Category, DerivationRules};

use crate::derive::category_of;
use crate::reshape::Reshaped;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectStats {
    pub subject_id: String,
    pub category: Category,
    pub samples: usize,
    pub skipped: usize,
    pub min: Option<f64>,
    pub mean: Option<f64>,
    pub max: Option<f64>,
}

/// One row per subject column, in header order. Subjects without any valid
/// reading report `None` statistics.
pub fn subject_stats(reshaped: &Reshaped, rules: &DerivationRules) -> Vec<SubjectStats> {
    #[derive(Default)]
    struct Acc {
        samples: usize,
        skipped: usize,
        sum: f64,
        min: Option<f64>,
        max: Option<f64>,
    }

    let mut accs: BTreeMap<&str, Acc> = BTreeMap::new();
    for record in &reshaped.records {
        let acc = accs.entry(record.subject_id.as_str()).or_default();
        acc.samples += 1;
        acc.sum += record.value;
        acc.min = Some(acc.min.map_or(record.value, |m| m.min(record.value)));
        acc.max = Some(acc.max.map_or(record.value, |m| m.max(record.value)));
    }
    for cell in &reshaped.skipped {
        accs.entry(cell.subject_id.as_str()).or_default().skipped += 1;
    }

    reshaped
        .subjects
        .iter()
        .map(|subject| {
            let acc = accs.remove(subject.as_str()).unwrap_or_default();
            let mean = match (acc.samples, acc.min, acc.max) {
                (0, _, _) => None,
                (n, Some(min), Some(max)) => Some((acc.sum / n as f64).clamp(min, max)),
                _ => None,
            };
            SubjectStats {
                subject_id: subject.clone(),
                category: category_of(subject, rules),
                samples: acc.samples,
                skipped: acc.skipped,
                min: acc.min,
                mean,
                max: acc.max,
            }
        })
        .collect()
}
