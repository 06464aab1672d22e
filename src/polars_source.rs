#![cfg(feature = "polars")]

use crate::data_types::{CellValue, ColumnKind, TableSource};
use chrono::{DateTime, NaiveDate};
use polars::prelude::{AnyValue, DataFrame, DataType, TimeUnit};

/// Days from 0001-01-01 (CE) to the unix epoch.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Table backed by a polars `DataFrame`.
pub struct PolarsTable {
    df: DataFrame,
}

impl PolarsTable {
    pub fn new(mut df: DataFrame) -> Self {
        // Single chunk per column keeps per-cell reads O(1).
        df.rechunk_mut();
        Self { df }
    }

    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }
}

impl TableSource for PolarsTable {
    fn len(&self) -> usize {
        self.df.height()
    }

    fn column_names(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect()
    }

    fn column_kind(&self, column: &str) -> Option<ColumnKind> {
        let column = self.df.column(column).ok()?;
        Some(kind_of(column.dtype()))
    }

    fn cell(&self, row: usize, column: &str) -> Option<CellValue> {
        if row >= self.df.height() {
            return None;
        }
        let column = self.df.column(column).ok()?;
        let value = column.get(row).ok()?;
        Some(to_cell(value))
    }
}

fn kind_of(dtype: &DataType) -> ColumnKind {
    match dtype {
        DataType::Boolean => ColumnKind::Boolean,
        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32
        | DataType::UInt64 => ColumnKind::Integer,
        DataType::Float32 | DataType::Float64 => ColumnKind::Float,
        DataType::String => ColumnKind::String,
        DataType::Date | DataType::Datetime(_, _) | DataType::Time | DataType::Duration(_) => {
            ColumnKind::Temporal
        }
        _ => ColumnKind::Other,
    }
}

fn to_cell(value: AnyValue<'_>) -> CellValue {
    match value {
        AnyValue::Null => CellValue::Null,
        AnyValue::Boolean(b) => CellValue::Boolean(b),
        AnyValue::Int8(v) => CellValue::Integer(v as i64),
        AnyValue::Int16(v) => CellValue::Integer(v as i64),
        AnyValue::Int32(v) => CellValue::Integer(v as i64),
        AnyValue::Int64(v) => CellValue::Integer(v),
        AnyValue::UInt8(v) => CellValue::Integer(v as i64),
        AnyValue::UInt16(v) => CellValue::Integer(v as i64),
        AnyValue::UInt32(v) => CellValue::Integer(v as i64),
        AnyValue::UInt64(v) => match i64::try_from(v) {
            Ok(v) => CellValue::Integer(v),
            Err(_) => CellValue::Float(v as f64),
        },
        AnyValue::Float32(v) => CellValue::Float(v as f64),
        AnyValue::Float64(v) => CellValue::Float(v),
        AnyValue::String(s) => CellValue::String(s.to_string()),
        AnyValue::StringOwned(s) => CellValue::String(s.to_string()),
        AnyValue::Date(days) => days
            .checked_add(UNIX_EPOCH_DAYS_FROM_CE)
            .and_then(NaiveDate::from_num_days_from_ce_opt)
            .map_or(CellValue::Null, CellValue::Date),
        AnyValue::Datetime(v, unit, _) => {
            let dt = match unit {
                TimeUnit::Milliseconds => DateTime::from_timestamp_millis(v),
                TimeUnit::Microseconds => DateTime::from_timestamp_micros(v),
                TimeUnit::Nanoseconds => Some(DateTime::from_timestamp_nanos(v)),
            };
            dt.map_or(CellValue::Null, |d| CellValue::DateTime(d.naive_utc()))
        }
        other => CellValue::String(other.str_value().into_owned()),
    }
}
