//! Structure depiction: SMILES parsing, 2D layout and SVG drawing.

pub mod layout;
pub mod smiles;
pub mod svg;

use crate::error::DecodeError;
use base64::Engine as _;
use serde::{Serialize, Serializer};
use std::sync::Arc;

const SVG_DATA_URI_PREFIX: &str = "data:image/svg+xml;base64,";

/// An encoded image, embeddable inline as a data URI.
///
/// Cheap to clone: the encoded text is shared.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ImagePayload {
    data_uri: Arc<str>,
}

impl ImagePayload {
    pub fn from_svg(svg: &str) -> Self {
        let encoded = base64::engine::general_purpose::STANDARD.encode(svg.as_bytes());
        Self {
            data_uri: format!("{SVG_DATA_URI_PREFIX}{encoded}").into(),
        }
    }

    pub fn as_data_uri(&self) -> &str {
        &self.data_uri
    }

    /// Decodes the payload back to the SVG document.
    pub fn svg(&self) -> Option<String> {
        let encoded = self.data_uri.strip_prefix(SVG_DATA_URI_PREFIX)?;
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .ok()?;
        String::from_utf8(bytes).ok()
    }
}

impl Serialize for ImagePayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.data_uri)
    }
}

/// Turns a structure encoding into an image. Must be pure: the image cache
/// calls it from several threads at once.
pub trait StructureRenderer: Send + Sync {
    fn render(&self, row: usize, encoding: &str, canvas_size: u32)
        -> Result<ImagePayload, DecodeError>;
}

/// Default renderer: SMILES to a 2D skeletal SVG.
#[derive(Clone, Copy, Debug, Default)]
pub struct SmilesRenderer;

impl StructureRenderer for SmilesRenderer {
    fn render(
        &self,
        _row: usize,
        encoding: &str,
        canvas_size: u32,
    ) -> Result<ImagePayload, DecodeError> {
        let mol = smiles::parse(encoding)?;
        let positions = layout::compute(&mol);
        Ok(ImagePayload::from_svg(&svg::draw(&mol, &positions, canvas_size)))
    }
}
