//! Eagerly rendered structure images, one per (row, structure column).

use crate::data_types::{CellValue, TableSource};
use crate::error::{ConfigurationError, DecodeError};
use crate::structure::{ImagePayload, StructureRenderer};
use rayon::prelude::*;
use std::collections::HashMap;
use tracing::{info, warn};

/// Read-only image index, fully populated before any hover is served.
#[derive(Debug, Default)]
pub struct ImageIndex {
    /// Per column, one slot per row; `None` where decoding failed.
    columns: HashMap<String, Vec<Option<ImagePayload>>>,
    failures: HashMap<String, usize>,
}

impl ImageIndex {
    /// Renders every cell of every structure column.
    ///
    /// A cell that does not decode leaves its slot empty and is logged; it
    /// never aborts the build. Unknown columns are a configuration error.
    pub fn build(
        table: &dyn TableSource,
        structure_columns: &[String],
        canvas_size: u32,
        renderer: &dyn StructureRenderer,
    ) -> Result<Self, ConfigurationError> {
        if let Some(missing) = structure_columns.iter().find(|c| !table.has_column(c)) {
            return Err(ConfigurationError::UnknownColumn {
                column: missing.clone(),
            });
        }

        let mut index = Self::default();
        for column in structure_columns {
            if index.columns.contains_key(column) {
                continue;
            }
            let rendered: Vec<Result<ImagePayload, DecodeError>> = (0..table.len())
                .into_par_iter()
                .map(|row| render_cell(table, row, column, canvas_size, renderer))
                .collect();

            let mut slots = Vec::with_capacity(rendered.len());
            let mut failed = 0;
            for (row, result) in rendered.into_iter().enumerate() {
                match result {
                    Ok(image) => slots.push(Some(image)),
                    Err(error) => {
                        warn!(row, column = column.as_str(), %error, "structure not rendered");
                        failed += 1;
                        slots.push(None);
                    }
                }
            }
            info!(
                column = column.as_str(),
                rows = slots.len(),
                failed,
                "structure images cached"
            );
            index.failures.insert(column.clone(), failed);
            index.columns.insert(column.clone(), slots);
        }
        Ok(index)
    }

    pub fn lookup(&self, row: usize, column: &str) -> Option<&ImagePayload> {
        self.columns.get(column)?.get(row)?.as_ref()
    }

    /// Number of cells in `column` that could not be rendered.
    pub fn failures(&self, column: &str) -> usize {
        self.failures.get(column).copied().unwrap_or(0)
    }

    /// Number of cached images across all columns.
    pub fn len(&self) -> usize {
        self.columns
            .values()
            .map(|slots| slots.iter().filter(|s| s.is_some()).count())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn render_cell(
    table: &dyn TableSource,
    row: usize,
    column: &str,
    canvas_size: u32,
    renderer: &dyn StructureRenderer,
) -> Result<ImagePayload, DecodeError> {
    match table.cell(row, column) {
        Some(CellValue::String(encoding)) => renderer.render(row, &encoding, canvas_size),
        _ => Err(DecodeError::MissingValue),
    }
}
