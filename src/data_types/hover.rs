use super::cell::CellValue;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Screen-space box the tooltip is anchored to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnchorBox {
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
}

impl AnchorBox {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, x1, y0, y1 }
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }
}

/// The point under the cursor.
///
/// Field names follow the hover payload of web charting hosts so a point can
/// be deserialized as sent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HoverEvent {
    #[serde(rename = "curveNumber")]
    pub series: usize,
    #[serde(rename = "pointNumber")]
    pub point: usize,
    #[serde(rename = "bbox", default)]
    pub anchor: AnchorBox,
    #[serde(default)]
    pub x: CellValue,
    #[serde(default)]
    pub y: CellValue,
}

impl HoverEvent {
    pub fn new(series: usize, point: usize) -> Self {
        Self {
            series,
            point,
            anchor: AnchorBox::default(),
            x: CellValue::Null,
            y: CellValue::Null,
        }
    }

    pub fn with_anchor(mut self, anchor: AnchorBox) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn with_values(mut self, x: impl Into<CellValue>, y: impl Into<CellValue>) -> Self {
        self.x = x.into();
        self.y = y.into();
        self
    }

    /// Reads the first hovered point of a `{"points": [...]}` payload.
    /// A null payload or an empty point list means nothing is hovered.
    pub fn from_hover_payload(payload: &Value) -> Option<Self> {
        let point = payload.get("points")?.as_array()?.first()?;
        serde_json::from_value(point.clone()).ok()
    }
}

/// Which structure columns the user currently wants to see.
///
/// Hosts send either one column name or a list; `null` (no selection menu)
/// means every configured column.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActiveSelection {
    #[default]
    All,
    Single(String),
    Many(Vec<String>),
}

impl ActiveSelection {
    pub fn none() -> Self {
        Self::Many(Vec::new())
    }

    pub fn is_active(&self, column: &str) -> bool {
        match self {
            Self::All => true,
            Self::Single(name) => name == column,
            Self::Many(names) => names.iter().any(|n| n == column),
        }
    }
}

impl From<&str> for ActiveSelection {
    fn from(column: &str) -> Self {
        Self::Single(column.to_string())
    }
}

impl From<Vec<String>> for ActiveSelection {
    fn from(columns: Vec<String>) -> Self {
        Self::Many(columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_first_point() {
        let payload = json!({
            "points": [
                {"curveNumber": 1, "pointNumber": 4, "x": 2.5, "y": "high",
                 "bbox": {"x0": 10.0, "x1": 12.0, "y0": 30.0, "y1": 32.0}},
                {"curveNumber": 0, "pointNumber": 0}
            ]
        });
        let event = HoverEvent::from_hover_payload(&payload).unwrap();
        assert_eq!(event.series, 1);
        assert_eq!(event.point, 4);
        assert_eq!(event.x, CellValue::Float(2.5));
        assert_eq!(event.y, CellValue::from("high"));
        assert_eq!(event.anchor.width(), 2.0);
    }

    #[test]
    fn test_empty_payload() {
        assert!(HoverEvent::from_hover_payload(&Value::Null).is_none());
        assert!(HoverEvent::from_hover_payload(&json!({"points": []})).is_none());
    }

    #[test]
    fn test_selection_forms() {
        let all: ActiveSelection = serde_json::from_str("null").unwrap();
        assert!(all.is_active("SMILES"));

        let single: ActiveSelection = serde_json::from_str("\"SMILES\"").unwrap();
        assert!(single.is_active("SMILES"));
        assert!(!single.is_active("Product"));

        let many: ActiveSelection = serde_json::from_str("[\"Product\"]").unwrap();
        assert!(many.is_active("Product"));
        assert!(!many.is_active("SMILES"));

        assert!(!ActiveSelection::none().is_active("SMILES"));
    }
}
