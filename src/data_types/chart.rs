use serde::{Deserialize, Serialize};

/// One plotted series as the charting layer reports it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesDescriptor {
    /// Group value as stringified by the charting layer.
    pub label: String,
    /// Marker color, any CSS color string.
    pub color: String,
}

impl SeriesDescriptor {
    pub fn new(label: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            color: color.into(),
        }
    }
}

/// The subset of chart properties the tooltip pipeline reads.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartView {
    pub series: Vec<SeriesDescriptor>,
    /// Axis title texts, which name the columns mapped to the axes.
    pub x_title: String,
    pub y_title: String,
}

impl ChartView {
    pub fn new(x_title: impl Into<String>, y_title: impl Into<String>) -> Self {
        Self {
            series: Vec::new(),
            x_title: x_title.into(),
            y_title: y_title.into(),
        }
    }

    pub fn with_series(mut self, label: impl Into<String>, color: impl Into<String>) -> Self {
        self.series.push(SeriesDescriptor::new(label, color));
        self
    }

    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    /// More than one series means rows were split by a grouping column.
    pub fn is_grouped(&self) -> bool {
        self.series.len() > 1
    }
}
