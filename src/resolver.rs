//! Hover (series, point) to source row.

use crate::data_types::TableSource;
use crate::error::ResolutionError;
use crate::grouping::CurveGroupMap;
use serde::Serialize;

/// A source row together with the styling context of the series it was
/// plotted in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResolvedRow {
    /// Absolute position in the table.
    pub index: usize,
    pub series: usize,
    pub color: String,
}

/// Maps in-series point indices back to table rows.
///
/// Grouped series are assumed to hold the rows whose group cell equals the
/// series' group value, in table order. A charting layer that reorders,
/// deduplicates or drops rows while splitting breaks that assumption and
/// cannot be detected here.
pub struct RowResolver<'a> {
    table: &'a dyn TableSource,
    groups: &'a CurveGroupMap,
}

impl<'a> RowResolver<'a> {
    pub fn new(table: &'a dyn TableSource, groups: &'a CurveGroupMap) -> Self {
        Self { table, groups }
    }

    pub fn resolve(&self, series: usize, point: usize) -> Result<ResolvedRow, ResolutionError> {
        let index = if self.groups.is_grouped() {
            self.resolve_grouped(series, point)?
        } else {
            if series != 0 {
                return Err(ResolutionError::UnknownSeries { series });
            }
            let len = self.table.len();
            if point >= len {
                return Err(ResolutionError::PointOutOfRange { series, point, len });
            }
            point
        };
        Ok(ResolvedRow {
            index,
            series,
            color: self.groups.series_color(series).to_string(),
        })
    }

    /// Absolute row indices plotted in `series`, in plotting order.
    pub fn series_rows(&self, series: usize) -> Result<Vec<usize>, ResolutionError> {
        let Some(column) = self.groups.column() else {
            return match series {
                0 => Ok((0..self.table.len()).collect()),
                _ => Err(ResolutionError::UnknownSeries { series }),
            };
        };
        let group = self
            .groups
            .group(series)
            .ok_or(ResolutionError::UnknownSeries { series })?;
        Ok((0..self.table.len())
            .filter(|&row| {
                self.table
                    .cell(row, column)
                    .is_some_and(|cell| group.matches(&cell))
            })
            .collect())
    }

    /// Linear scan; stops at the `point`-th matching row.
    fn resolve_grouped(&self, series: usize, point: usize) -> Result<usize, ResolutionError> {
        let group = self
            .groups
            .group(series)
            .ok_or(ResolutionError::UnknownSeries { series })?;
        let Some(column) = self.groups.column() else {
            return Err(ResolutionError::UnknownSeries { series });
        };

        let mut seen = 0;
        for row in 0..self.table.len() {
            let matched = self
                .table
                .cell(row, column)
                .is_some_and(|cell| group.matches(&cell));
            if matched {
                if seen == point {
                    return Ok(row);
                }
                seen += 1;
            }
        }
        Err(ResolutionError::PointOutOfRange {
            series,
            point,
            len: seen,
        })
    }
}
