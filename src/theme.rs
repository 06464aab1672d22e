use serde::{Deserialize, Serialize};

/// Color of ungrouped series and of caption text.
pub const DEFAULT_TEXT_COLOR: &str = "black";

/// Presentational options, handed to the host untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipTheme {
    /// Tooltip width in pixels
    pub width: u32,
    pub font_family: String,
    /// Caption font size; the title is two points larger.
    pub font_size: u32,
    pub background_alpha: f32,
    pub image_alpha: f32,
}

impl Default for TooltipTheme {
    fn default() -> Self {
        Self {
            width: 150,
            font_family: "Arial".to_string(),
            font_size: 12,
            background_alpha: 0.75,
            image_alpha: 0.7,
        }
    }
}

impl TooltipTheme {
    pub fn title_font_size(&self) -> u32 {
        self.font_size + 2
    }

    pub fn background_color(&self) -> String {
        format!("rgba(255,255,255,{})", self.background_alpha)
    }

    pub fn image_background(&self) -> String {
        format!("rgba(255,255,255,{})", self.image_alpha)
    }
}
