//! # Canvas Compositing Engine
//!
//! Owns the scene graph of one composition session: an ordered sequence of
//! image and text layers where sequence order **is** z-order (index 0 =
//! back-most). Exposes selection-scoped editing operations and a flattened
//! PNG export at the session's exact pixel dimensions.
//!
//! Lifecycle: [`CanvasSession::open`] builds the deterministic initial scene
//! graph (background template, auto-placed user image); mutations keep the
//! session open; [`CanvasSession::close`] consumes it. There is no way back
//! from closed to open — regeneration opens a fresh session and intentionally
//! discards prior manual edits.
//!
//! The session holds no reference to the campaign record; the orchestrator
//! passes decoded images in at open time and stores the export result back.

mod composite;
pub mod layer;
mod text;

pub use layer::{ImageLayer, Layer, LayerId, TextLayer, parse_color};

use image::DynamicImage;

use crate::campaign::Dimensions;
use crate::error::VitrinaError;

/// Default typography for newly added text layers.
const DEFAULT_FONT_SIZE: u32 = 24;
const DEFAULT_TEXT_POSITION: (f32, f32) = (50.0, 50.0);
/// Font size adjustment step and floor.
const FONT_SIZE_STEP: u32 = 2;
const MIN_FONT_SIZE: u32 = 8;
/// Fraction of the canvas the auto-placed user image may occupy per axis.
const USER_IMAGE_FRACTION: f32 = 0.4;
/// Auto-placement origin as a fraction of the canvas size.
const USER_IMAGE_ORIGIN: f32 = 0.3;

/// Where [`CanvasSession::reorder`] moves a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reorder {
    ToFront,
    ToBack,
}

/// One open composition session.
pub struct CanvasSession {
    dimensions: Dimensions,
    layers: Vec<Layer>,
    selected: Option<LayerId>,
}

impl CanvasSession {
    /// Open a session sized to `dimensions`.
    ///
    /// If `template` is given it becomes layer 0, stretched to exactly fill
    /// the canvas (independent per-axis scale). If `user_image` is given it is
    /// placed above it, scaled **uniformly** so it occupies at most 40% of
    /// either canvas dimension, at (0.3·W, 0.3·H). The placement is a pure
    /// function of the inputs, so a given image/template/dimension triple
    /// always opens to the same composition.
    pub fn open(
        template: Option<&DynamicImage>,
        user_image: Option<&DynamicImage>,
        dimensions: Dimensions,
    ) -> Result<Self, VitrinaError> {
        dimensions.validate()?;
        let mut session = Self {
            dimensions,
            layers: Vec::new(),
            selected: None,
        };

        if let Some(img) = template {
            let source = img.to_rgba8();
            let scale = (
                dimensions.width as f32 / source.width() as f32,
                dimensions.height as f32 / source.height() as f32,
            );
            session.layers.push(Layer::Image(ImageLayer {
                id: LayerId::generate(),
                source,
                position: (0.0, 0.0),
                scale,
                rotation: 0.0,
            }));
        }

        if let Some(img) = user_image {
            let source = img.to_rgba8();
            let scale = f32::min(
                USER_IMAGE_FRACTION * dimensions.width as f32 / source.width() as f32,
                USER_IMAGE_FRACTION * dimensions.height as f32 / source.height() as f32,
            );
            session.layers.push(Layer::Image(ImageLayer {
                id: LayerId::generate(),
                source,
                position: (
                    USER_IMAGE_ORIGIN * dimensions.width as f32,
                    USER_IMAGE_ORIGIN * dimensions.height as f32,
                ),
                scale: (scale, scale),
                rotation: 0.0,
            }));
        }

        Ok(session)
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Layers in z-order (index 0 = back-most).
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Currently selected layer, if any.
    pub fn selected(&self) -> Option<LayerId> {
        self.selected
    }

    fn index_of(&self, id: LayerId) -> Result<usize, VitrinaError> {
        self.layers
            .iter()
            .position(|layer| layer.id() == id)
            .ok_or_else(|| VitrinaError::NotFound(format!("layer {:?}", id)))
    }

    /// Append a text layer with default typography and select it.
    ///
    /// Content that is empty after trimming is a no-op (`None`).
    pub fn add_text(&mut self, content: &str) -> Option<LayerId> {
        let content = content.trim();
        if content.is_empty() {
            return None;
        }
        let id = LayerId::generate();
        self.layers.push(Layer::Text(TextLayer {
            id,
            content: content.to_string(),
            position: DEFAULT_TEXT_POSITION,
            font_size: DEFAULT_FONT_SIZE,
            color: image::Rgba([0, 0, 0, 255]),
        }));
        self.selected = Some(id);
        Some(id)
    }

    /// Select a layer. Unknown ids are a `NotFound` error.
    pub fn select(&mut self, id: LayerId) -> Result<(), VitrinaError> {
        self.index_of(id)?;
        self.selected = Some(id);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Delete a layer, clearing the selection if it pointed at it.
    pub fn remove(&mut self, id: LayerId) -> Result<(), VitrinaError> {
        let index = self.index_of(id)?;
        self.layers.remove(index);
        if self.selected == Some(id) {
            self.selected = None;
        }
        Ok(())
    }

    /// Move a layer to the front or back; relative order of the others is
    /// preserved.
    pub fn reorder(&mut self, id: LayerId, placement: Reorder) -> Result<(), VitrinaError> {
        let index = self.index_of(id)?;
        let layer = self.layers.remove(index);
        match placement {
            Reorder::ToFront => self.layers.push(layer),
            Reorder::ToBack => self.layers.insert(0, layer),
        }
        Ok(())
    }

    /// Grow the selected text layer's font by the step. Returns whether
    /// anything changed — a non-text or missing selection is a no-op.
    pub fn increase_font_size(&mut self) -> bool {
        self.with_selected_text(|text| {
            text.font_size += FONT_SIZE_STEP;
        })
    }

    /// Shrink the selected text layer's font by the step, floor-clamped.
    pub fn decrease_font_size(&mut self) -> bool {
        self.with_selected_text(|text| {
            text.font_size = text.font_size.saturating_sub(FONT_SIZE_STEP).max(MIN_FONT_SIZE);
        })
    }

    /// Recolor the selected text layer. Invalid color values are a
    /// `Validation` error; a non-text selection is a no-op (`Ok(false)`).
    pub fn set_text_color(&mut self, color: &str) -> Result<bool, VitrinaError> {
        let rgba = parse_color(color)?;
        Ok(self.with_selected_text(|text| {
            text.color = rgba;
        }))
    }

    fn with_selected_text(&mut self, apply: impl FnOnce(&mut TextLayer)) -> bool {
        let Some(id) = self.selected else {
            return false;
        };
        let Some(text) = self
            .layers
            .iter_mut()
            .find(|layer| layer.id() == id)
            .and_then(Layer::as_text_mut)
        else {
            return false;
        };
        apply(text);
        true
    }

    /// Flatten all layers in z-order into a PNG at exactly the session
    /// dimensions. Pure with respect to the scene graph: repeated calls
    /// without intervening mutation yield byte-identical output.
    pub fn export(&self) -> Result<Vec<u8>, VitrinaError> {
        let raster = composite::flatten(&self.layers, self.dimensions);
        composite::encode_png(&raster)
    }

    /// Dispose of the session and all layer resources. A new composition
    /// always starts from [`CanvasSession::open`]'s deterministic placement,
    /// never from a previous session's edits.
    pub fn close(self) {}
}
