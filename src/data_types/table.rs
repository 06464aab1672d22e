use super::cell::{CellValue, ColumnKind};

/// Row-indexed table the tooltips are resolved against.
///
/// Row positions are 0-based and stable: they are the index space the chart
/// used when it plotted the ungrouped dataset.
pub trait TableSource: Send + Sync {
    /// Total number of rows
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn column_names(&self) -> Vec<String>;

    /// Declared type of a column, `None` if the column does not exist.
    fn column_kind(&self, column: &str) -> Option<ColumnKind>;

    fn has_column(&self, column: &str) -> bool {
        self.column_kind(column).is_some()
    }

    /// Reads one cell. `None` when the column or row does not exist,
    /// `Some(CellValue::Null)` for a missing value.
    fn cell(&self, row: usize, column: &str) -> Option<CellValue>;
}

struct VecColumn {
    name: String,
    kind: ColumnKind,
    values: Vec<CellValue>,
}

/// Column-major in-memory table.
///
/// The row count is the length of the first column; shorter columns read as
/// null past their end.
#[derive(Default)]
pub struct VecTable {
    columns: Vec<VecColumn>,
}

impl VecTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a column whose kind is inferred from its first non-null value.
    pub fn with_column<V: Into<CellValue>>(
        self,
        name: &str,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        let values: Vec<CellValue> = values.into_iter().map(Into::into).collect();
        let kind = values
            .iter()
            .find_map(CellValue::kind)
            .unwrap_or(ColumnKind::Other);
        self.push_column(name, kind, values)
    }

    pub fn with_typed_column<V: Into<CellValue>>(
        self,
        name: &str,
        kind: ColumnKind,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        let values = values.into_iter().map(Into::into).collect();
        self.push_column(name, kind, values)
    }

    fn push_column(mut self, name: &str, kind: ColumnKind, values: Vec<CellValue>) -> Self {
        // Replacing keeps column names unique.
        self.columns.retain(|c| c.name != name);
        self.columns.push(VecColumn {
            name: name.to_string(),
            kind,
            values,
        });
        self
    }

    fn find(&self, column: &str) -> Option<&VecColumn> {
        self.columns.iter().find(|c| c.name == column)
    }
}

impl TableSource for VecTable {
    fn len(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }

    fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    fn column_kind(&self, column: &str) -> Option<ColumnKind> {
        self.find(column).map(|c| c.kind)
    }

    fn cell(&self, row: usize, column: &str) -> Option<CellValue> {
        if row >= self.len() {
            return None;
        }
        let col = self.find(column)?;
        Some(col.values.get(row).cloned().unwrap_or_default())
    }
}
