//! Secondary attributes: category, period index and the special-period flag.

use serde::{Deserialize, Serialize};

use thermo_model::{BinnedRecord, Category, DerivationRules, DerivedAttributes, LongRecord};

use crate::error::Result;

/// Category of a subject, from its ID prefix (ASCII case-insensitive).
pub fn category_of(subject_id: &str, rules: &DerivationRules) -> Category {
    let prefix = rules.category_prefix.as_str();
    let matches = subject_id
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix));
    if matches { Category::A } else { Category::B }
}

/// Derive attributes for a subject at a representative time.
///
/// Zero period lengths or cycles yield period 0 and no flag; callers that
/// accept user rules run [`DerivationRules::validate`] first.
pub fn derive_attributes(subject_id: &str, time: u64, rules: &DerivationRules) -> DerivedAttributes {
    let category = category_of(subject_id, rules);
    let period_index = time.checked_div(rules.period_length).unwrap_or(0);
    let is_special_period = category == Category::A
        && period_index.checked_rem(rules.special_cycle) == Some(rules.special_phase);
    DerivedAttributes {
        category,
        period_index,
        is_special_period,
    }
}

/// A long record with its derived attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedRecord {
    #[serde(flatten)]
    pub record: LongRecord,
    #[serde(flatten)]
    pub attributes: DerivedAttributes,
}

/// A binned record with attributes derived from its bin start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedBin {
    #[serde(flatten)]
    pub record: BinnedRecord,
    #[serde(flatten)]
    pub attributes: DerivedAttributes,
}

/// Attach attributes to long records.
pub fn annotate_records(
    records: &[LongRecord],
    rules: &DerivationRules,
) -> Result<Vec<AnnotatedRecord>> {
    rules.validate()?;
    Ok(records
        .iter()
        .map(|record| AnnotatedRecord {
            attributes: derive_attributes(&record.subject_id, record.time, rules),
            record: record.clone(),
        })
        .collect())
}

/// Attach attributes to binned records.
///
/// The representative time is the bin start, not the mean time of the
/// contributing samples.
pub fn annotate(binned: &[BinnedRecord], rules: &DerivationRules) -> Result<Vec<AnnotatedBin>> {
    rules.validate()?;
    Ok(binned
        .iter()
        .map(|record| AnnotatedBin {
            attributes: derive_attributes(&record.subject_id, record.bin_start, rules),
            record: record.clone(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_prefix() {
        let rules = DerivationRules::default();
        assert_eq!(category_of("f1", &rules), Category::A);
        assert_eq!(category_of("F12", &rules), Category::A);
        assert_eq!(category_of("m3", &rules), Category::B);
        assert_eq!(category_of("", &rules), Category::B);
        assert_eq!(category_of("é1", &rules.clone().with_category_prefix("ab")), Category::B);
    }

    #[test]
    fn test_special_period_cadence() {
        let rules = DerivationRules::default();
        let day = 1440;
        assert!(!derive_attributes("f1", day, &rules).is_special_period);
        let third_day = derive_attributes("f1", 2 * day + 5, &rules);
        assert_eq!(third_day.period_index, 2);
        assert!(third_day.is_special_period);
        assert!(derive_attributes("f1", 6 * day, &rules).is_special_period);
        assert!(!derive_attributes("m1", 2 * day, &rules).is_special_period);
    }

    #[test]
    fn test_annotate_uses_bin_start() {
        let binned = vec![BinnedRecord {
            subject_id: "f2".to_string(),
            bin_index: 2,
            bin_start: 2880,
            mean_value: 37.4,
            sample_count: 1440,
        }];
        let annotated = annotate(&binned, &DerivationRules::default()).unwrap();
        assert_eq!(annotated[0].attributes.period_index, 2);
        assert!(annotated[0].attributes.is_special_period);
    }

    #[test]
    fn test_annotate_rejects_invalid_rules() {
        let rules = DerivationRules::default().with_period_length(0);
        assert!(annotate_records(&[LongRecord::new("f1", 0, 37.0)], &rules).is_err());
    }
}
