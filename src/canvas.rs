use image::{Rgba, RgbaImage};
use log::debug;

use crate::color::{quantize, Color};
use crate::glyph::GlyphMask;

/// Side length of the square canvas.
pub const CANVAS_SIZE: u32 = 128;
/// Gap between the canvas edge and the circle's bounding box.
pub const CIRCLE_INSET: u32 = 8;

/// Samples per pixel along each axis when computing shape coverage.
pub(crate) const SUBSAMPLES: u32 = 4;

/// Solid color and opacity a glyph's coverage is painted with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tint {
    /// Paint color.
    pub color: Color,
    /// Opacity of fully covered pixels.
    pub alpha: f32,
}

impl Tint {
    /// Black at 50% opacity, the tint used for overlay glyphs.
    pub const HALF_BLACK: Tint = Tint {
        color: Color { red: 0.0, green: 0.0, blue: 0.0 },
        alpha: 0.5,
    };
}

/// The fixed-size RGBA surface an icon is drawn on. Starts fully transparent.
pub struct Canvas {
    pixels: RgbaImage,
}

impl Default for Canvas {
    fn default() -> Self {
        Canvas::new()
    }
}

impl Canvas {
    /// A transparent `CANVAS_SIZE`×`CANVAS_SIZE` canvas.
    #[must_use]
    pub fn new() -> Self {
        Canvas {
            pixels: RgbaImage::new(CANVAS_SIZE, CANVAS_SIZE),
        }
    }

    /// Fills the circle inscribed in the canvas inset by [`CIRCLE_INSET`] on every side.
    #[allow(clippy::cast_precision_loss)]
    pub fn fill_circle(&mut self, color: Color) {
        let center = CANVAS_SIZE as f32 / 2.0;
        let radius = (CANVAS_SIZE - 2 * CIRCLE_INSET) as f32 / 2.0;
        let radius_sq = radius * radius;

        for (x, y, pixel) in self.pixels.enumerate_pixels_mut() {
            let coverage = pixel_coverage(x, y, |sx, sy| {
                let (dx, dy) = (sx - center, sy - center);
                dx * dx + dy * dy <= radius_sq
            });

            if coverage > 0.0 {
                blend(pixel, color, coverage);
            }
        }
    }

    /// Composites `mask` centered on the canvas, painted with `tint`, source-over.
    pub fn draw_glyph(&mut self, mask: &GlyphMask, tint: Tint) {
        let (origin_x, origin_y) = mask.centered_origin(CANVAS_SIZE, CANVAS_SIZE);
        debug!(
            "drawing {}x{} glyph at ({origin_x}, {origin_y})",
            mask.width(),
            mask.height()
        );

        for my in 0..mask.height() {
            for mx in 0..mask.width() {
                let coverage = mask.coverage_at(mx, my);
                if coverage == 0.0 {
                    continue;
                }

                let (Ok(x), Ok(y)) = (
                    u32::try_from(origin_x + i64::from(mx)),
                    u32::try_from(origin_y + i64::from(my)),
                ) else {
                    continue;
                };
                if x >= CANVAS_SIZE || y >= CANVAS_SIZE {
                    continue;
                }

                blend(self.pixels.get_pixel_mut(x, y), tint.color, tint.alpha * coverage);
            }
        }
    }

    /// Current pixel contents.
    #[must_use]
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Finishes drawing and hands out the pixels.
    #[must_use]
    pub fn into_image(self) -> RgbaImage {
        self.pixels
    }
}

/// Fraction of the pixel at `(x, y)` for which `inside` holds, on a regular subsample grid.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn pixel_coverage(x: u32, y: u32, inside: impl Fn(f32, f32) -> bool) -> f32 {
    let step = 1.0 / SUBSAMPLES as f32;
    let mut hits = 0u32;
    for j in 0..SUBSAMPLES {
        for i in 0..SUBSAMPLES {
            let sx = x as f32 + (i as f32 + 0.5) * step;
            let sy = y as f32 + (j as f32 + 0.5) * step;
            if inside(sx, sy) {
                hits += 1;
            }
        }
    }
    hits as f32 / (SUBSAMPLES * SUBSAMPLES) as f32
}

/// Source-over of `color` at opacity `alpha` onto a straight-alpha pixel.
fn blend(pixel: &mut Rgba<u8>, color: Color, alpha: f32) {
    let [dr, dg, db, da] = pixel.0.map(|c| f32::from(c) / 255.0);
    let src_a = alpha.clamp(0.0, 1.0);
    let dst_weight = da * (1.0 - src_a);
    let out_a = src_a + dst_weight;
    if out_a <= 0.0 {
        *pixel = Rgba([0, 0, 0, 0]);
        return;
    }

    let mix = |src: f32, dst: f32| (src * src_a + dst * dst_weight) / out_a;
    *pixel = Rgba([
        quantize(mix(color.red, dr)),
        quantize(mix(color.green, dg)),
        quantize(mix(color.blue, db)),
        quantize(out_a),
    ]);
}
