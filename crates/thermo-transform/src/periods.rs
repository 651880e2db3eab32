//! Bar-chart feed: per-subject mean for every period (day by default).

use serde::{Deserialize, Serialize};

use thermo_model::{BinSize, Category, DerivationRules, LongRecord};

use crate::aggregate::aggregate_bins;
use crate::derive::derive_attributes;
use crate::error::Result;
use crate::selection::SubjectSelection;
use crate::series::RenderPlan;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodBar {
    pub subject_id: String,
    pub period_index: u64,
    pub period_start: u64,
    pub mean_value: f64,
    pub sample_count: usize,
    pub category: Category,
    pub is_special_period: bool,
}

/// Mean value per subject and period, flagged with the derived attributes.
///
/// # Errors
///
/// Fails when `rules` do not validate.
pub fn period_bars(
    records: &[LongRecord],
    rules: &DerivationRules,
    selection: &SubjectSelection,
) -> Result<Vec<PeriodBar>> {
    rules.validate()?;
    let bin_size = BinSize::from_steps(rules.period_length)?;
    let selected: Vec<LongRecord> = selection.filter(records).cloned().collect();
    Ok(aggregate_bins(&selected, bin_size)
        .into_iter()
        .map(|bin| {
            let attributes = derive_attributes(&bin.subject_id, bin.bin_start, rules);
            PeriodBar {
                subject_id: bin.subject_id,
                period_index: attributes.period_index,
                period_start: bin.bin_start,
                mean_value: bin.mean_value,
                sample_count: bin.sample_count,
                category: attributes.category,
                is_special_period: attributes.is_special_period,
            }
        })
        .collect())
}

/// Payload of a period bar chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodChart {
    pub bars: Vec<PeriodBar>,
}

/// [`period_bars`] as a render plan: a placeholder when no bar survives.
///
/// # Errors
///
/// Fails when `rules` do not validate.
pub fn period_plan(
    records: &[LongRecord],
    rules: &DerivationRules,
    selection: &SubjectSelection,
) -> Result<RenderPlan<PeriodChart>> {
    let bars = period_bars(records, rules, selection)?;
    Ok(if bars.is_empty() {
        RenderPlan::empty_selection(selection)
    } else {
        RenderPlan::Chart(PeriodChart { bars })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_bars_daily() {
        let rules = DerivationRules::default().with_period_length(10);
        let records: Vec<LongRecord> = (0..30)
            .map(|t| LongRecord::new("f1", t, if t < 10 { 36.0 } else { 38.0 }))
            .chain((0..10).map(|t| LongRecord::new("m1", t, 37.0)))
            .collect();
        let bars = period_bars(&records, &rules, &SubjectSelection::All).unwrap();

        assert_eq!(bars.len(), 4);
        assert_eq!(bars[0].subject_id, "f1");
        assert_eq!(bars[0].mean_value, 36.0);
        assert_eq!(bars[1].subject_id, "m1");
        assert_eq!(bars[1].category, Category::B);
        let third = &bars[3];
        assert_eq!(third.period_index, 2);
        assert_eq!(third.period_start, 20);
        assert!(third.is_special_period);
        assert_eq!(third.sample_count, 10);
    }

    #[test]
    fn test_period_plan_placeholder() {
        let rules = DerivationRules::default();
        let records = vec![LongRecord::new("f1", 0, 37.0)];
        let plan = period_plan(&records, &rules, &SubjectSelection::only(["m9"])).unwrap();
        assert_eq!(
            plan,
            RenderPlan::Placeholder {
                message: crate::series::NO_DATA_FOR_SELECTION.to_string()
            }
        );
        let plan = period_plan(&records, &rules, &SubjectSelection::All).unwrap();
        assert_eq!(plan.chart().map(|chart| chart.bars.len()), Some(1));
    }
}
