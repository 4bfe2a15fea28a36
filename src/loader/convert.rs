//! Parquet value to BSON conversion.
//!
//! Column names and values pass through as-is; only the physical
//! representation changes. Datetimes become BSON dates at millisecond
//! precision, which is all MongoDB stores.

use crate::error::Result;
use crate::models::Record;
use mongodb::bson::{self, Bson};
use polars::prelude::*;

/// Index columns pandas writes alongside the data; not part of a record
pub const PANDAS_INDEX_PREFIX: &str = "__index_level_";

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Convert a single cell
pub fn any_value_to_bson(value: AnyValue<'_>) -> Bson {
    match value {
        AnyValue::Null => Bson::Null,
        AnyValue::Boolean(b) => Bson::Boolean(b),
        AnyValue::String(s) => Bson::String(s.to_string()),
        AnyValue::StringOwned(s) => Bson::String(s.to_string()),
        AnyValue::Int8(v) => Bson::Int32(v.into()),
        AnyValue::Int16(v) => Bson::Int32(v.into()),
        AnyValue::Int32(v) => Bson::Int32(v),
        AnyValue::Int64(v) => Bson::Int64(v),
        AnyValue::UInt8(v) => Bson::Int32(v.into()),
        AnyValue::UInt16(v) => Bson::Int32(v.into()),
        AnyValue::UInt32(v) => Bson::Int64(v.into()),
        AnyValue::UInt64(v) => match i64::try_from(v) {
            Ok(v) => Bson::Int64(v),
            Err(_) => Bson::Double(v as f64),
        },
        AnyValue::Float32(v) => Bson::Double(v.into()),
        AnyValue::Float64(v) => Bson::Double(v),
        AnyValue::Date(days) => Bson::DateTime(bson::DateTime::from_millis(
            i64::from(days) * MILLIS_PER_DAY,
        )),
        AnyValue::Datetime(v, unit, _) | AnyValue::DatetimeOwned(v, unit, _) => {
            Bson::DateTime(bson::DateTime::from_millis(datetime_to_millis(v, unit)))
        }
        other => Bson::String(other.to_string()),
    }
}

/// Datetime values are stored as UTC ticks in `unit`
fn datetime_to_millis(value: i64, unit: TimeUnit) -> i64 {
    match unit {
        TimeUnit::Nanoseconds => value.div_euclid(1_000_000),
        TimeUnit::Microseconds => value.div_euclid(1_000),
        TimeUnit::Milliseconds => value,
    }
}

/// One record per row, fields in column order
pub fn dataframe_to_records(df: &DataFrame) -> Result<Vec<Record>> {
    let columns: Vec<&Column> = df
        .get_columns()
        .iter()
        .filter(|column| !column.name().as_str().starts_with(PANDAS_INDEX_PREFIX))
        .collect();

    let mut records = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        let mut record = Record::new();
        for column in &columns {
            record.insert(column.name().as_str(), any_value_to_bson(column.get(row)?));
        }
        records.push(record);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_conversion() {
        assert_eq!(any_value_to_bson(AnyValue::Null), Bson::Null);
        assert_eq!(any_value_to_bson(AnyValue::Boolean(true)), Bson::Boolean(true));
        assert_eq!(any_value_to_bson(AnyValue::Int16(-4)), Bson::Int32(-4));
        assert_eq!(any_value_to_bson(AnyValue::Int64(1 << 40)), Bson::Int64(1 << 40));
        assert_eq!(any_value_to_bson(AnyValue::UInt32(7)), Bson::Int64(7));
        assert_eq!(any_value_to_bson(AnyValue::Float64(0.5)), Bson::Double(0.5));
        assert_eq!(
            any_value_to_bson(AnyValue::String("nominal")),
            Bson::String("nominal".to_string())
        );
    }

    #[test]
    fn test_datetime_units() {
        let millis = 1_717_200_000_123_i64;
        let expected = Bson::DateTime(bson::DateTime::from_millis(millis));

        assert_eq!(
            any_value_to_bson(AnyValue::Datetime(millis * 1_000_000, TimeUnit::Nanoseconds, None)),
            expected
        );
        assert_eq!(
            any_value_to_bson(AnyValue::Datetime(millis * 1_000, TimeUnit::Microseconds, None)),
            expected
        );
        assert_eq!(
            any_value_to_bson(AnyValue::Datetime(millis, TimeUnit::Milliseconds, None)),
            expected
        );
    }

    #[test]
    fn test_pre_epoch_rounds_down() {
        assert_eq!(datetime_to_millis(-1, TimeUnit::Nanoseconds), -1);
        assert_eq!(datetime_to_millis(-1_000_000, TimeUnit::Nanoseconds), -1);
    }

    #[test]
    fn test_date_becomes_midnight() {
        assert_eq!(
            any_value_to_bson(AnyValue::Date(1)),
            Bson::DateTime(bson::DateTime::from_millis(MILLIS_PER_DAY))
        );
    }

    #[test]
    fn test_dataframe_rows_preserve_columns() {
        let df = df!(
            "station" => ["a", "b"],
            "reading" => [1.5, 2.5],
            "__index_level_0__" => [0i64, 1],
        )
        .unwrap();

        let records = dataframe_to_records(&df).unwrap();
        assert_eq!(records.len(), 2);
        let keys: Vec<&String> = records[1].keys().collect();
        assert_eq!(keys, vec!["station", "reading"]);
        assert_eq!(records[1].get_str("station").unwrap(), "b");
        assert_eq!(records[1].get_f64("reading").unwrap(), 2.5);
    }
}
