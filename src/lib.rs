//! molhover: structure-aware hover tooltips for scatter charts over tabular data

pub mod config;
pub mod data_types;
pub mod error;
pub mod grouping;
pub mod handler;
pub mod image_cache;
pub mod polars_source;
pub mod resolver;
pub mod session;
pub mod structure;
pub mod text;
pub mod theme;
pub mod tooltip;

pub use config::{OverlayConfig, ValueTransforms};
pub use data_types::{
    ActiveSelection, AnchorBox, CellValue, ChartView, HoverEvent, TableSource, VecTable,
};
pub use error::{ConfigurationError, DecodeError, ResolutionError};
pub use handler::{HoverHandler, TooltipUpdate};
pub use session::{HoverSession, TooltipState};
pub use structure::{ImagePayload, SmilesRenderer, StructureRenderer};
pub use tooltip::{ContentBlock, TooltipContent};
