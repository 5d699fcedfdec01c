//! Layer types for the compositing scene graph.
//!
//! A layer is one visual element with explicit z-order (its index in the
//! session's layer sequence). Layers are addressed by an opaque generated
//! [`LayerId`] — never by a rendering-library handle — and looked up by
//! scanning the sequence.

use image::{Rgba, RgbaImage};
use uuid::Uuid;

use crate::error::VitrinaError;

/// Opaque, stable identifier for one layer within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerId(Uuid);

impl LayerId {
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Raster image layer: decoded pixels plus placement.
#[derive(Debug, Clone)]
pub struct ImageLayer {
    pub id: LayerId,
    pub source: RgbaImage,
    /// Top-left position on the canvas, in pixels.
    pub position: (f32, f32),
    /// Per-axis scale factors applied to the source before placement.
    pub scale: (f32, f32),
    /// Rotation in degrees, clockwise, around the scaled image's center.
    pub rotation: f32,
}

/// Text layer: content plus typography.
#[derive(Debug, Clone)]
pub struct TextLayer {
    pub id: LayerId,
    pub content: String,
    pub position: (f32, f32),
    pub font_size: u32,
    pub color: Rgba<u8>,
}

/// One element of the scene graph.
#[derive(Debug, Clone)]
pub enum Layer {
    Image(ImageLayer),
    Text(TextLayer),
}

impl Layer {
    pub fn id(&self) -> LayerId {
        match self {
            Layer::Image(layer) => layer.id,
            Layer::Text(layer) => layer.id,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut TextLayer> {
        match self {
            Layer::Text(layer) => Some(layer),
            Layer::Image(_) => None,
        }
    }
}

/// The fixed palette offered by the editor.
const PALETTE: &[(&str, [u8; 3])] = &[
    ("black", [0x00, 0x00, 0x00]),
    ("white", [0xff, 0xff, 0xff]),
    ("red", [0xff, 0x00, 0x00]),
    ("green", [0x00, 0xff, 0x00]),
    ("blue", [0x00, 0x00, 0xff]),
];

/// Parse a palette name or `#rgb`/`#rrggbb` hex value into an opaque color.
pub fn parse_color(value: &str) -> Result<Rgba<u8>, VitrinaError> {
    let value = value.trim();
    if let Some((_, rgb)) = PALETTE
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(value))
    {
        return Ok(Rgba([rgb[0], rgb[1], rgb[2], 0xff]));
    }

    let hex = value
        .strip_prefix('#')
        .ok_or_else(|| VitrinaError::Validation(format!("invalid color '{}'", value)))?;
    let expand = |c: u8| (c << 4) | c;
    let channels = match hex.len() {
        3 => {
            let n = u16::from_str_radix(hex, 16)
                .map_err(|_| VitrinaError::Validation(format!("invalid color '{}'", value)))?;
            [
                expand(((n >> 8) & 0xf) as u8),
                expand(((n >> 4) & 0xf) as u8),
                expand((n & 0xf) as u8),
            ]
        }
        6 => {
            let n = u32::from_str_radix(hex, 16)
                .map_err(|_| VitrinaError::Validation(format!("invalid color '{}'", value)))?;
            [((n >> 16) & 0xff) as u8, ((n >> 8) & 0xff) as u8, (n & 0xff) as u8]
        }
        _ => {
            return Err(VitrinaError::Validation(format!(
                "invalid color '{}'",
                value
            )));
        }
    };
    Ok(Rgba([channels[0], channels[1], channels[2], 0xff]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_names_parse() {
        assert_eq!(parse_color("black").unwrap(), Rgba([0, 0, 0, 255]));
        assert_eq!(parse_color("RED").unwrap(), Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn hex_values_parse() {
        assert_eq!(parse_color("#ff0000").unwrap(), Rgba([255, 0, 0, 255]));
        assert_eq!(parse_color("#0f0").unwrap(), Rgba([0, 255, 0, 255]));
        assert_eq!(parse_color(" #336699 ").unwrap(), Rgba([0x33, 0x66, 0x99, 255]));
    }

    #[test]
    fn garbage_rejected() {
        assert!(parse_color("not-a-color").is_err());
        assert!(parse_color("#12345").is_err());
        assert!(parse_color("#gggggg").is_err());
    }

    #[test]
    fn layer_ids_are_unique() {
        assert_ne!(LayerId::generate(), LayerId::generate());
    }
}
