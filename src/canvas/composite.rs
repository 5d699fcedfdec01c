//! Flattening: composite the layer sequence into a single raster.
//!
//! Layers are drawn in sequence order (index 0 = back-most) onto an opaque
//! white background sized exactly to the session dimensions, then encoded as
//! lossless PNG. The whole pipeline is a pure function of the scene graph, so
//! repeated exports of an unmutated session are byte-identical.

use std::io::Cursor;

use image::imageops::{self, FilterType};
use image::{ImageFormat, Rgba, RgbaImage};

use super::layer::{ImageLayer, Layer, TextLayer};
use super::text::render_text;
use crate::campaign::Dimensions;
use crate::error::VitrinaError;

/// Composite all layers in z-order into an RGBA buffer at `dims`.
pub fn flatten(layers: &[Layer], dims: Dimensions) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(dims.width, dims.height, Rgba([255, 255, 255, 255]));
    for layer in layers {
        match layer {
            Layer::Image(image) => draw_image_layer(&mut canvas, image),
            Layer::Text(text) => draw_text_layer(&mut canvas, text),
        }
    }
    canvas
}

/// Encode a flattened buffer as PNG bytes.
pub fn encode_png(raster: &RgbaImage) -> Result<Vec<u8>, VitrinaError> {
    let mut bytes = Vec::new();
    raster
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| VitrinaError::Image(format!("PNG encoding failed: {}", e)))?;
    Ok(bytes)
}

fn draw_image_layer(canvas: &mut RgbaImage, layer: &ImageLayer) {
    let target_w = ((layer.source.width() as f32 * layer.scale.0).round() as u32).max(1);
    let target_h = ((layer.source.height() as f32 * layer.scale.1).round() as u32).max(1);

    let scaled = if (target_w, target_h) == layer.source.dimensions() {
        layer.source.clone()
    } else {
        imageops::resize(&layer.source, target_w, target_h, FilterType::Lanczos3)
    };

    let placed = if layer.rotation % 360.0 == 0.0 {
        scaled
    } else {
        rotate_rgba(&scaled, layer.rotation)
    };

    imageops::overlay(
        canvas,
        &placed,
        layer.position.0.round() as i64,
        layer.position.1.round() as i64,
    );
}

fn draw_text_layer(canvas: &mut RgbaImage, layer: &TextLayer) {
    let raster = render_text(&layer.content, layer.font_size, layer.color);
    imageops::overlay(
        canvas,
        &raster,
        layer.position.0.round() as i64,
        layer.position.1.round() as i64,
    );
}

/// Rotate clockwise by `degrees` around the image center, nearest-neighbor,
/// output sized to the rotated bounding box. Uncovered pixels are transparent.
fn rotate_rgba(source: &RgbaImage, degrees: f32) -> RgbaImage {
    let radians = degrees.to_radians();
    let (sin, cos) = radians.sin_cos();
    let (w, h) = (source.width() as f32, source.height() as f32);

    let out_w = (w * cos.abs() + h * sin.abs()).ceil().max(1.0) as u32;
    let out_h = (w * sin.abs() + h * cos.abs()).ceil().max(1.0) as u32;
    let (cx, cy) = (w / 2.0, h / 2.0);
    let (ocx, ocy) = (out_w as f32 / 2.0, out_h as f32 / 2.0);

    let mut out = RgbaImage::new(out_w, out_h);
    for y in 0..out_h {
        for x in 0..out_w {
            // Inverse-map the output pixel back into source space.
            let dx = x as f32 + 0.5 - ocx;
            let dy = y as f32 + 0.5 - ocy;
            let sx = cos * dx + sin * dy + cx;
            let sy = -sin * dx + cos * dy + cy;
            if sx >= 0.0 && sy >= 0.0 && sx < w && sy < h {
                out.put_pixel(x, y, *source.get_pixel(sx as u32, sy as u32));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::layer::LayerId;

    fn solid(width: u32, height: u32, rgba: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba(rgba))
    }

    fn image_layer(source: RgbaImage, position: (f32, f32), scale: (f32, f32)) -> Layer {
        Layer::Image(ImageLayer {
            id: LayerId::generate(),
            source,
            position,
            scale,
            rotation: 0.0,
        })
    }

    #[test]
    fn flatten_matches_requested_dimensions() {
        let raster = flatten(&[], Dimensions::new(320, 200));
        assert_eq!(raster.dimensions(), (320, 200));
        // Empty scene graph is plain white
        assert_eq!(*raster.get_pixel(0, 0), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn later_layers_paint_over_earlier_ones() {
        let back = image_layer(solid(10, 10, [255, 0, 0, 255]), (0.0, 0.0), (1.0, 1.0));
        let front = image_layer(solid(10, 10, [0, 0, 255, 255]), (0.0, 0.0), (1.0, 1.0));
        let raster = flatten(&[back, front], Dimensions::new(10, 10));
        assert_eq!(*raster.get_pixel(5, 5), Rgba([0, 0, 255, 255]));
    }

    #[test]
    fn transparent_pixels_let_background_through() {
        let overlay = image_layer(solid(10, 10, [0, 255, 0, 0]), (0.0, 0.0), (1.0, 1.0));
        let raster = flatten(&[overlay], Dimensions::new(10, 10));
        assert_eq!(*raster.get_pixel(5, 5), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn scale_stretches_to_target_size() {
        let layer = image_layer(solid(10, 20, [1, 2, 3, 255]), (0.0, 0.0), (4.0, 2.0));
        let raster = flatten(&[layer], Dimensions::new(40, 40));
        // Scaled to 40x40, covers the far corner
        assert_eq!(*raster.get_pixel(39, 39), Rgba([1, 2, 3, 255]));
    }

    #[test]
    fn rotation_by_quarter_turn_swaps_extents() {
        let rotated = rotate_rgba(&solid(20, 10, [9, 9, 9, 255]), 90.0);
        assert_eq!(rotated.dimensions(), (10, 20));
    }

    #[test]
    fn export_encoding_is_deterministic() {
        let layer = image_layer(solid(8, 8, [200, 100, 50, 255]), (2.0, 2.0), (1.0, 1.0));
        let layers = vec![layer];
        let a = encode_png(&flatten(&layers, Dimensions::new(16, 16))).unwrap();
        let b = encode_png(&flatten(&layers, Dimensions::new(16, 16))).unwrap();
        assert_eq!(a, b);
    }
}
