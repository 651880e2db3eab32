//! Subject filtering (the checkbox state of the charts).

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Anything tied to a subject and a point in time.
pub trait TimedValue {
    fn subject_id(&self) -> &str;
    /// Time used on the chart x axis.
    fn time(&self) -> u64;
    fn value(&self) -> f64;
}

impl TimedValue for thermo_model::LongRecord {
    fn subject_id(&self) -> &str {
        &self.subject_id
    }

    fn time(&self) -> u64 {
        self.time
    }

    fn value(&self) -> f64 {
        self.value
    }
}

impl TimedValue for thermo_model::BinnedRecord {
    fn subject_id(&self) -> &str {
        &self.subject_id
    }

    fn time(&self) -> u64 {
        self.bin_start
    }

    fn value(&self) -> f64 {
        self.mean_value
    }
}

/// The set of subjects to show. Every subject is selected by default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "subjects", rename_all = "snake_case")]
pub enum SubjectSelection {
    #[default]
    All,
    Only(BTreeSet<String>),
}

impl SubjectSelection {
    pub fn only<I, S>(subjects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Only(subjects.into_iter().map(Into::into).collect())
    }

    /// An empty CLI list means nothing was narrowed, so everything is shown.
    pub fn from_list(subjects: &[String]) -> Self {
        if subjects.is_empty() {
            Self::All
        } else {
            Self::only(subjects.iter().cloned())
        }
    }

    pub fn contains(&self, subject_id: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(subjects) => subjects.contains(subject_id),
        }
    }

    /// True when every checkbox is cleared.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Only(subjects) if subjects.is_empty())
    }

    pub fn filter<'a, T: TimedValue>(&'a self, items: &'a [T]) -> impl Iterator<Item = &'a T> + 'a {
        items
            .iter()
            .filter(move |item| self.contains(item.subject_id()))
    }
}

/// Distinct subjects in first-seen order.
pub fn distinct_subjects<T: TimedValue>(items: &[T]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut subjects = Vec::new();
    for item in items {
        if seen.insert(item.subject_id()) {
            subjects.push(item.subject_id().to_string());
        }
    }
    subjects
}

#[cfg(test)]
mod tests {
    use super::*;
    use thermo_model::LongRecord;

    #[test]
    fn test_selection_filters() {
        let records = vec![
            LongRecord::new("f1", 0, 37.0),
            LongRecord::new("m1", 0, 36.0),
            LongRecord::new("f1", 1, 37.5),
        ];
        let selection = SubjectSelection::only(["f1"]);
        assert_eq!(selection.filter(&records).count(), 2);
        assert_eq!(SubjectSelection::All.filter(&records).count(), 3);
        assert!(SubjectSelection::only(Vec::<String>::new()).is_empty());
        assert!(!SubjectSelection::All.is_empty());
        assert_eq!(SubjectSelection::from_list(&[]), SubjectSelection::All);
    }

    #[test]
    fn test_distinct_subjects_first_seen() {
        let records = vec![
            LongRecord::new("m1", 0, 36.0),
            LongRecord::new("f1", 0, 37.0),
            LongRecord::new("m1", 1, 36.1),
        ];
        assert_eq!(distinct_subjects(&records), vec!["m1", "f1"]);
    }
}
