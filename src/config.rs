//! Overlay configuration, supplied once at setup.

use crate::data_types::CellValue;
use crate::error::ConfigurationError;
use crate::theme::TooltipTheme;
use eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Formats one field value; its output replaces the raw value verbatim.
pub type ValueTransform = Arc<dyn Fn(&CellValue) -> String + Send + Sync>;

/// Per-column value formatters, keyed by column name (or axis title).
#[derive(Clone, Default)]
pub struct ValueTransforms {
    inner: HashMap<String, ValueTransform>,
}

impl ValueTransforms {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<F>(mut self, column: &str, transform: F) -> Self
    where
        F: Fn(&CellValue) -> String + Send + Sync + 'static,
    {
        self.insert(column, transform);
        self
    }

    pub fn insert<F>(&mut self, column: &str, transform: F)
    where
        F: Fn(&CellValue) -> String + Send + Sync + 'static,
    {
        self.inner.insert(column.to_string(), Arc::new(transform));
    }

    pub fn contains(&self, column: &str) -> bool {
        self.inner.contains_key(column)
    }

    /// Applies the transform registered for `column`, if any.
    pub fn apply(&self, column: &str, value: &CellValue) -> Option<String> {
        self.inner.get(column).map(|f| f(value))
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl fmt::Debug for ValueTransforms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<_> = self.inner.keys().collect();
        keys.sort();
        f.debug_set().entries(keys).finish()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Columns holding structure encodings, in display order.
    pub structure_columns: Vec<String>,
    pub show_image: bool,
    /// Square image size in pixels
    pub canvas_size: u32,
    pub title_column: Option<String>,
    pub show_axis_captions: bool,
    pub caption_columns: Vec<String>,
    /// Required when the chart has more than one series.
    pub group_column: Option<String>,
    pub wrap: bool,
    pub wrap_width: usize,
    pub theme: TooltipTheme,
    #[serde(skip)]
    pub transforms: ValueTransforms,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            structure_columns: vec!["SMILES".to_string()],
            show_image: true,
            canvas_size: 200,
            title_column: None,
            show_axis_captions: true,
            caption_columns: Vec::new(),
            group_column: None,
            wrap: true,
            wrap_width: 20,
            theme: TooltipTheme::default(),
            transforms: ValueTransforms::default(),
        }
    }
}

impl OverlayConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).wrap_err("failed to parse overlay configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read {}", path.display()))?;
        Self::from_json_str(&json).wrap_err_with(|| format!("in {}", path.display()))
    }

    pub fn with_structure_columns<S: Into<String>>(
        mut self,
        columns: impl IntoIterator<Item = S>,
    ) -> Self {
        self.structure_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_title_column(mut self, column: &str) -> Self {
        self.title_column = Some(column.to_string());
        self
    }

    pub fn with_caption_columns<S: Into<String>>(
        mut self,
        columns: impl IntoIterator<Item = S>,
    ) -> Self {
        self.caption_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_group_column(mut self, column: &str) -> Self {
        self.group_column = Some(column.to_string());
        self
    }

    pub fn with_transforms(mut self, transforms: ValueTransforms) -> Self {
        self.transforms = transforms;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.structure_columns.is_empty() {
            return Err(ConfigurationError::Invalid {
                field: "structure_columns",
                message: "at least one structure column is required".to_string(),
            });
        }
        if self.canvas_size == 0 {
            return Err(ConfigurationError::Invalid {
                field: "canvas_size",
                message: "must be positive".to_string(),
            });
        }
        if self.wrap_width == 0 {
            return Err(ConfigurationError::Invalid {
                field: "wrap_width",
                message: "must be positive".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_defaults() {
        let config = OverlayConfig::from_json_str(
            r#"{"title_column": "Name", "caption_columns": ["MW"], "theme": {"font_size": 10}}"#,
        )
        .unwrap();
        assert_eq!(config.structure_columns, vec!["SMILES".to_string()]);
        assert_eq!(config.title_column.as_deref(), Some("Name"));
        assert_eq!(config.caption_columns, vec!["MW".to_string()]);
        assert_eq!(config.theme.font_size, 10);
        assert_eq!(config.theme.font_family, "Arial");
        assert_eq!(config.wrap_width, 20);
        assert!(config.transforms.is_empty());
    }

    #[test]
    fn test_rejects_empty_structure_columns() {
        let err = OverlayConfig::from_json_str(r#"{"structure_columns": []}"#).unwrap_err();
        assert!(format!("{err:?}").contains("structure_columns"));
    }

    #[test]
    fn test_transform_apply() {
        let transforms =
            ValueTransforms::new().with("MW", |v| format!("{:.1} g/mol", v.as_f64().unwrap_or(0.0)));
        assert_eq!(
            transforms.apply("MW", &CellValue::Float(180.159)).as_deref(),
            Some("180.2 g/mol")
        );
        assert!(transforms.apply("logP", &CellValue::Float(1.0)).is_none());
    }
}
