//! Series index to group value, for charts split by a categorical column.

use crate::data_types::{CellValue, ChartView, ColumnKind, TableSource};
use crate::error::ConfigurationError;
use crate::theme::DEFAULT_TEXT_COLOR;
use serde::Serialize;
use std::fmt;
use tracing::info;

/// A group value typed after the grouping column.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum GroupValue {
    Boolean(bool),
    Integer(i64),
    /// Fallback for every other column kind; compared by text.
    Text(String),
}

impl GroupValue {
    /// Reads a series label as a value of a column of the given kind.
    /// Returns `None` when an integer column gets a non-integer label.
    pub fn coerce(label: &str, kind: ColumnKind) -> Option<Self> {
        match kind {
            ColumnKind::Boolean => Some(Self::Boolean(label_to_bool(label))),
            ColumnKind::Integer => label.trim().parse().ok().map(Self::Integer),
            _ => Some(Self::Text(label.to_string())),
        }
    }

    pub fn matches(&self, cell: &CellValue) -> bool {
        match (self, cell) {
            (Self::Boolean(g), CellValue::Boolean(c)) => g == c,
            (Self::Integer(g), CellValue::Integer(c)) => g == c,
            (Self::Text(g), CellValue::String(c)) => g == c,
            (Self::Text(g), other) => *g == other.to_string(),
            _ => false,
        }
    }
}

impl fmt::Display for GroupValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Charting hosts stringify booleans in several ways.
fn label_to_bool(label: &str) -> bool {
    matches!(
        label.trim().to_ascii_lowercase().as_str(),
        "yes" | "true" | "t" | "1"
    )
}

/// Read-only map from series index to its group value and marker color.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CurveGroupMap {
    column: Option<String>,
    groups: Vec<GroupValue>,
    colors: Vec<String>,
}

impl CurveGroupMap {
    /// Map for a chart that plots the whole dataset as one series.
    pub fn ungrouped() -> Self {
        Self::default()
    }

    /// Builds the map for `chart`. Charts with at most one series are
    /// ungrouped; more series require `group_column`.
    pub fn build(
        chart: &ChartView,
        table: &dyn TableSource,
        group_column: Option<&str>,
    ) -> Result<Self, ConfigurationError> {
        if !chart.is_grouped() {
            return Ok(Self::ungrouped());
        }
        let column = group_column
            .filter(|c| !c.is_empty())
            .ok_or(ConfigurationError::AmbiguousSeries {
                series: chart.series_count(),
            })?;
        let kind = table
            .column_kind(column)
            .ok_or_else(|| ConfigurationError::UnknownColumn {
                column: column.to_string(),
            })?;

        let groups = chart
            .series
            .iter()
            .map(|s| {
                GroupValue::coerce(&s.label, kind).ok_or_else(|| {
                    ConfigurationError::InvalidGroupLabel {
                        label: s.label.clone(),
                        column: column.to_string(),
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        info!(column, series = groups.len(), ?kind, "series grouping resolved");
        Ok(Self {
            column: Some(column.to_string()),
            groups,
            colors: chart.series.iter().map(|s| s.color.clone()).collect(),
        })
    }

    pub fn is_grouped(&self) -> bool {
        self.column.is_some()
    }

    pub fn column(&self) -> Option<&str> {
        self.column.as_deref()
    }

    pub fn group(&self, series: usize) -> Option<&GroupValue> {
        self.groups.get(series)
    }

    /// Number of grouped series; zero when ungrouped.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Marker color of a series; ungrouped charts use the default text color.
    pub fn series_color(&self, series: usize) -> &str {
        self.colors
            .get(series)
            .map_or(DEFAULT_TEXT_COLOR, String::as_str)
    }
}
