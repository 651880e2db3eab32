//! Polars DataFrame views of records, used for tabular output.

use polars::prelude::{Column, DataFrame, NamedFrom, Series};

use thermo_model::{BinnedRecord, DerivedAttributes, LongRecord};

use crate::derive::{AnnotatedBin, AnnotatedRecord};
use crate::error::Result;

fn column<T: ?Sized, V>(name: &str, values: V) -> Column
where
    Series: NamedFrom<V, T>,
{
    Series::new(name.into(), values).into()
}

fn attribute_columns<'a, I>(attributes: I) -> Vec<Column>
where
    I: Iterator<Item = &'a DerivedAttributes> + Clone,
{
    vec![
        column(
            "category",
            attributes
                .clone()
                .map(|a| a.category.to_string())
                .collect::<Vec<_>>(),
        ),
        column(
            "period_index",
            attributes.clone().map(|a| a.period_index).collect::<Vec<_>>(),
        ),
        column(
            "is_special_period",
            attributes.map(|a| a.is_special_period).collect::<Vec<_>>(),
        ),
    ]
}

fn long_columns<'a, I>(records: I) -> Vec<Column>
where
    I: Iterator<Item = &'a LongRecord> + Clone,
{
    vec![
        column(
            "subject_id",
            records
                .clone()
                .map(|r| r.subject_id.clone())
                .collect::<Vec<_>>(),
        ),
        column("time", records.clone().map(|r| r.time).collect::<Vec<_>>()),
        column("value", records.map(|r| r.value).collect::<Vec<_>>()),
    ]
}

fn binned_columns<'a, I>(records: I) -> Vec<Column>
where
    I: Iterator<Item = &'a BinnedRecord> + Clone,
{
    vec![
        column(
            "subject_id",
            records
                .clone()
                .map(|r| r.subject_id.clone())
                .collect::<Vec<_>>(),
        ),
        column(
            "bin_index",
            records.clone().map(|r| r.bin_index).collect::<Vec<_>>(),
        ),
        column(
            "bin_start",
            records.clone().map(|r| r.bin_start).collect::<Vec<_>>(),
        ),
        column(
            "mean_value",
            records.clone().map(|r| r.mean_value).collect::<Vec<_>>(),
        ),
        column(
            "sample_count",
            records.map(|r| r.sample_count as u64).collect::<Vec<_>>(),
        ),
    ]
}

/// Columns: `subject_id`, `time`, `value`.
pub fn long_frame(records: &[LongRecord]) -> Result<DataFrame> {
    Ok(DataFrame::new(long_columns(records.iter()))?)
}

/// Columns: `subject_id`, `bin_index`, `bin_start`, `mean_value`, `sample_count`.
pub fn binned_frame(records: &[BinnedRecord]) -> Result<DataFrame> {
    Ok(DataFrame::new(binned_columns(records.iter()))?)
}

/// [`long_frame`] followed by `category`, `period_index`, `is_special_period`.
pub fn annotated_long_frame(records: &[AnnotatedRecord]) -> Result<DataFrame> {
    let mut columns = long_columns(records.iter().map(|r| &r.record));
    columns.extend(attribute_columns(records.iter().map(|r| &r.attributes)));
    Ok(DataFrame::new(columns)?)
}

/// [`binned_frame`] followed by the derived attribute columns.
pub fn annotated_binned_frame(records: &[AnnotatedBin]) -> Result<DataFrame> {
    let mut columns = binned_columns(records.iter().map(|r| &r.record));
    columns.extend(attribute_columns(records.iter().map(|r| &r.attributes)));
    Ok(DataFrame::new(columns)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use thermo_model::DerivationRules;

    use crate::derive::annotate_records;

    #[test]
    fn test_long_frame_shape() {
        let records = vec![LongRecord::new("f1", 0, 37.0), LongRecord::new("m1", 0, 36.5)];
        let df = long_frame(&records).unwrap();
        assert_eq!(df.height(), 2);
        let names: Vec<&str> = df.get_column_names().iter().map(|n| n.as_str()).collect();
        assert_eq!(names, vec!["subject_id", "time", "value"]);
        let values = df.column("value").unwrap().f64().unwrap();
        assert_eq!(values.get(1), Some(36.5));
    }

    #[test]
    fn test_annotated_frame_columns() {
        let records = vec![LongRecord::new("f1", 2880, 37.0)];
        let annotated = annotate_records(&records, &DerivationRules::default()).unwrap();
        let df = annotated_long_frame(&annotated).unwrap();
        assert_eq!(df.width(), 6);
        let flags = df.column("is_special_period").unwrap().bool().unwrap();
        assert_eq!(flags.get(0), Some(true));
    }

    #[test]
    fn test_empty_frames() {
        assert_eq!(long_frame(&[]).unwrap().height(), 0);
        assert_eq!(binned_frame(&[]).unwrap().width(), 5);
    }
}
