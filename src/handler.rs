//! Hover event handling: the entry point the host's event wiring calls.

use crate::config::OverlayConfig;
use crate::data_types::{ActiveSelection, AnchorBox, ChartView, HoverEvent, TableSource};
use crate::error::ConfigurationError;
use crate::grouping::CurveGroupMap;
use crate::image_cache::ImageIndex;
use crate::resolver::{ResolvedRow, RowResolver};
use crate::structure::StructureRenderer;
use crate::tooltip::{TooltipAssembler, TooltipContent};
use serde::{Serialize, Serializer};
use std::sync::Arc;
use tracing::{debug, info};

/// Result of one hover or selection-change event.
///
/// Serializes as `{"visible": bool, "anchor": ..., "content": ...}`, with
/// `null` anchor and content when hidden.
#[derive(Clone, Debug, PartialEq)]
pub enum TooltipUpdate {
    /// Hide the tooltip, leave anchor and content as they were.
    Hide,
    Show {
        anchor: AnchorBox,
        content: TooltipContent,
    },
}

impl TooltipUpdate {
    pub fn is_visible(&self) -> bool {
        matches!(self, Self::Show { .. })
    }

    pub fn content(&self) -> Option<&TooltipContent> {
        match self {
            Self::Show { content, .. } => Some(content),
            Self::Hide => None,
        }
    }

    /// `(visible, anchor, content)`, `None` meaning "no update".
    pub fn into_parts(self) -> (bool, Option<AnchorBox>, Option<TooltipContent>) {
        match self {
            Self::Hide => (false, None, None),
            Self::Show { anchor, content } => (true, Some(anchor), Some(content)),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[derive(Serialize)]
struct UpdateRecord<'a> {
    visible: bool,
    anchor: Option<&'a AnchorBox>,
    content: Option<&'a TooltipContent>,
}

impl Serialize for TooltipUpdate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let record = match self {
            Self::Hide => UpdateRecord {
                visible: false,
                anchor: None,
                content: None,
            },
            Self::Show { anchor, content } => UpdateRecord {
                visible: true,
                anchor: Some(anchor),
                content: Some(content),
            },
        };
        record.serialize(serializer)
    }
}

/// Stateless hover handler over read-only setup state.
///
/// Cheap to share: everything it reads lives behind `Arc`s and is never
/// mutated after [`HoverHandler::build`].
#[derive(Clone)]
pub struct HoverHandler {
    table: Arc<dyn TableSource>,
    chart: Arc<ChartView>,
    config: Arc<OverlayConfig>,
    images: Arc<ImageIndex>,
    groups: Arc<CurveGroupMap>,
}

impl HoverHandler {
    /// Validates the configuration and eagerly builds the image index and
    /// the series grouping. Fails before any hover can be served.
    pub fn build(
        chart: ChartView,
        table: Arc<dyn TableSource>,
        config: OverlayConfig,
        renderer: &dyn StructureRenderer,
    ) -> Result<Self, ConfigurationError> {
        config.validate()?;
        let groups = CurveGroupMap::build(&chart, table.as_ref(), config.group_column.as_deref())?;
        for column in config.title_column.iter().chain(&config.caption_columns) {
            if !table.has_column(column) {
                return Err(ConfigurationError::UnknownColumn {
                    column: column.clone(),
                });
            }
        }
        let images = ImageIndex::build(
            table.as_ref(),
            &config.structure_columns,
            config.canvas_size,
            renderer,
        )?;
        info!(
            rows = table.len(),
            series = chart.series_count(),
            images = images.len(),
            "hover handler ready"
        );
        Ok(Self::from_parts(chart, table, config, images, groups))
    }

    /// Assembles a handler from already built parts.
    pub fn from_parts(
        chart: ChartView,
        table: Arc<dyn TableSource>,
        config: OverlayConfig,
        images: ImageIndex,
        groups: CurveGroupMap,
    ) -> Self {
        Self {
            table,
            chart: Arc::new(chart),
            config: Arc::new(config),
            images: Arc::new(images),
            groups: Arc::new(groups),
        }
    }

    pub fn images(&self) -> &ImageIndex {
        &self.images
    }

    pub fn groups(&self) -> &CurveGroupMap {
        &self.groups
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    pub fn resolver(&self) -> RowResolver<'_> {
        RowResolver::new(self.table.as_ref(), &self.groups)
    }

    /// Called on every hover and selection change. `None` means the cursor is
    /// not over a point. Stale or out-of-range events hide the tooltip.
    pub fn assemble_tooltip(
        &self,
        hover: Option<&HoverEvent>,
        active: &ActiveSelection,
    ) -> TooltipUpdate {
        let Some(hover) = hover else {
            return TooltipUpdate::Hide;
        };
        let row = match self.resolver().resolve(hover.series, hover.point) {
            Ok(row) => row,
            Err(error) => {
                debug!(%error, "hover ignored");
                return TooltipUpdate::Hide;
            }
        };
        TooltipUpdate::Show {
            anchor: hover.anchor,
            content: self.assemble(&row, hover, active),
        }
    }

    fn assemble(
        &self,
        row: &ResolvedRow,
        hover: &HoverEvent,
        active: &ActiveSelection,
    ) -> TooltipContent {
        TooltipAssembler {
            config: &self.config,
            chart: &self.chart,
            images: &self.images,
            table: self.table.as_ref(),
        }
        .assemble(row, hover, active)
    }
}
