//! Text rasterization for text layers.
//!
//! Renders text to an RGBA buffer using the Spleen 12x24 bitmap font, scaled
//! to the layer's font size with nearest-neighbor sampling. Pixels covered by
//! a glyph take the layer color at full opacity; everything else stays
//! transparent, so compositing is a plain alpha overlay.

use image::{Rgba, RgbaImage};
use spleen_font::{FONT_12X24, PSF2Font};

/// Master glyph cell of the embedded font.
const GLYPH_WIDTH: usize = 12;
const GLYPH_HEIGHT: usize = 24;

/// Collect the 12x24 bitmap of one character; `None` if the font has no glyph.
fn glyph_bitmap(ch: char) -> Option<Vec<u8>> {
    let mut font = PSF2Font::new(FONT_12X24).unwrap();
    let utf8 = ch.to_string();
    let glyph = font.glyph_for_utf8(utf8.as_bytes())?;
    let mut bitmap = vec![0u8; GLYPH_WIDTH * GLYPH_HEIGHT];
    for (y, row) in glyph.enumerate() {
        for (x, on) in row.enumerate() {
            if y < GLYPH_HEIGHT && x < GLYPH_WIDTH && on {
                bitmap[y * GLYPH_WIDTH + x] = 1;
            }
        }
    }
    Some(bitmap)
}

/// Box outline used for characters the font cannot represent.
fn box_bitmap() -> Vec<u8> {
    let mut bitmap = vec![0u8; GLYPH_WIDTH * GLYPH_HEIGHT];
    for x in 0..GLYPH_WIDTH {
        bitmap[x] = 1;
        bitmap[(GLYPH_HEIGHT - 1) * GLYPH_WIDTH + x] = 1;
    }
    for y in 0..GLYPH_HEIGHT {
        bitmap[y * GLYPH_WIDTH] = 1;
        bitmap[y * GLYPH_WIDTH + GLYPH_WIDTH - 1] = 1;
    }
    bitmap
}

/// Render a single line of text at the given pixel height.
///
/// The output is tightly sized: `chars * scaled_width` by `scaled_height`.
/// Empty input produces a 1x1 transparent buffer.
pub fn render_text(content: &str, font_size: u32, color: Rgba<u8>) -> RgbaImage {
    let chars: Vec<char> = content.chars().collect();
    let char_height = font_size.max(1) as usize;
    let char_width = (char_height * GLYPH_WIDTH).div_ceil(GLYPH_HEIGHT);
    let width = (chars.len() * char_width).max(1);

    let mut out = RgbaImage::new(width as u32, char_height as u32);
    if chars.is_empty() {
        return out;
    }

    for (i, &ch) in chars.iter().enumerate() {
        let bitmap = glyph_bitmap(ch).unwrap_or_else(box_bitmap);
        let origin_x = i * char_width;

        // Nearest-neighbor scale from the 12x24 master cell.
        for dy in 0..char_height {
            let sy = dy * GLYPH_HEIGHT / char_height;
            for dx in 0..char_width {
                let sx = dx * GLYPH_WIDTH / char_width;
                if bitmap[sy * GLYPH_WIDTH + sx] == 1 {
                    out.put_pixel((origin_x + dx) as u32, dy as u32, color);
                }
            }
        }
    }

    out
}
