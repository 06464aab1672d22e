//! Tooltip content: ordered blocks built from a resolved row.

use crate::config::OverlayConfig;
use crate::data_types::{ActiveSelection, CellValue, ChartView, HoverEvent, TableSource};
use crate::image_cache::ImageIndex;
use crate::resolver::ResolvedRow;
use crate::structure::ImagePayload;
use crate::text::fit_title;
use crate::theme::DEFAULT_TEXT_COLOR;
use serde::Serialize;

/// Visual context shared by every block of one tooltip.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BlockStyle {
    pub color: String,
    /// Color of the series the row was plotted in.
    pub accent: String,
    pub font_family: String,
    pub font_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentBlock {
    Image {
        column: String,
        src: ImagePayload,
        style: BlockStyle,
    },
    Title {
        text: String,
        style: BlockStyle,
    },
    Caption {
        label: String,
        value: String,
        style: BlockStyle,
    },
}

impl ContentBlock {
    /// Display text: the title, `label : value` for captions, nothing for images.
    pub fn text(&self) -> Option<String> {
        match self {
            Self::Image { .. } => None,
            Self::Title { text, .. } => Some(text.clone()),
            Self::Caption { label, value, .. } => Some(format!("{label} : {value}")),
        }
    }

    pub fn style(&self) -> &BlockStyle {
        match self {
            Self::Image { style, .. } | Self::Title { style, .. } | Self::Caption { style, .. } => {
                style
            }
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self, Self::Image { .. })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TooltipContent {
    pub blocks: Vec<ContentBlock>,
    /// Container width in pixels
    pub width: u32,
    pub background: String,
    /// CSS `white-space` of the container; wrapped titles keep their breaks.
    pub white_space: &'static str,
}

impl TooltipContent {
    pub fn images(&self) -> impl Iterator<Item = &ContentBlock> {
        self.blocks.iter().filter(|b| b.is_image())
    }

    pub fn title(&self) -> Option<&str> {
        self.blocks.iter().find_map(|b| match b {
            ContentBlock::Title { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Caption texts in display order.
    pub fn captions(&self) -> Vec<String> {
        self.blocks
            .iter()
            .filter(|b| matches!(b, ContentBlock::Caption { .. }))
            .filter_map(ContentBlock::text)
            .collect()
    }
}

/// Composes tooltip content from read-only setup state.
pub struct TooltipAssembler<'a> {
    pub config: &'a OverlayConfig,
    pub chart: &'a ChartView,
    pub images: &'a ImageIndex,
    pub table: &'a dyn TableSource,
}

impl TooltipAssembler<'_> {
    /// Block order: images, title, axis captions (x then y), extra captions.
    pub fn assemble(
        &self,
        row: &ResolvedRow,
        hover: &HoverEvent,
        active: &ActiveSelection,
    ) -> TooltipContent {
        let theme = &self.config.theme;
        let caption_style = BlockStyle {
            color: DEFAULT_TEXT_COLOR.to_string(),
            accent: row.color.clone(),
            font_family: theme.font_family.clone(),
            font_size: theme.font_size,
            background: None,
        };
        let mut blocks = Vec::new();

        if self.config.show_image {
            for column in &self.config.structure_columns {
                if !active.is_active(column) {
                    continue;
                }
                if let Some(image) = self.images.lookup(row.index, column) {
                    blocks.push(ContentBlock::Image {
                        column: column.clone(),
                        src: image.clone(),
                        style: BlockStyle {
                            background: Some(theme.image_background()),
                            ..caption_style.clone()
                        },
                    });
                }
            }
        }

        if let Some(title_column) = &self.config.title_column {
            let raw = self.cell(row.index, title_column).to_string();
            blocks.push(ContentBlock::Title {
                text: fit_title(&raw, self.config.wrap_width, self.config.wrap),
                style: BlockStyle {
                    color: row.color.clone(),
                    font_size: theme.title_font_size(),
                    ..caption_style.clone()
                },
            });
        }

        if self.config.show_axis_captions {
            for (label, value) in [
                (&self.chart.x_title, &hover.x),
                (&self.chart.y_title, &hover.y),
            ] {
                blocks.push(self.caption(label, value, &caption_style));
            }
        }

        for column in &self.config.caption_columns {
            let value = self.cell(row.index, column);
            blocks.push(self.caption(column, &value, &caption_style));
        }

        TooltipContent {
            blocks,
            width: theme.width,
            background: theme.background_color(),
            white_space: "normal",
        }
    }

    fn cell(&self, row: usize, column: &str) -> CellValue {
        self.table.cell(row, column).unwrap_or_default()
    }

    /// The registered transform fully owns formatting of its field.
    fn caption(&self, label: &str, value: &CellValue, style: &BlockStyle) -> ContentBlock {
        let value = self
            .config
            .transforms
            .apply(label, value)
            .unwrap_or_else(|| value.to_string());
        ContentBlock::Caption {
            label: label.to_string(),
            value,
            style: style.clone(),
        }
    }
}
