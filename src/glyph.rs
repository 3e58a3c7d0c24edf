use image::GrayImage;
use serde::{Deserialize, Serialize};

/// Point size the overlay glyph is requested at.
pub const OVERLAY_POINT_SIZE: f32 = 48.0;

/// Maps the short symbol names accepted on the command line to glyph identifiers.
///
/// Unknown names are passed through unchanged, so any identifier a glyph source
/// knows can be requested directly.
#[must_use]
pub fn resolve_symbol(symbol: &str) -> &str {
    match symbol {
        "check" => "checkmark",
        "lock" => "lock.fill",
        "chat" => "bubble.left.fill",
        other => other,
    }
}

/// Stroke weight a glyph is requested with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Weight {
    /// Thinner strokes.
    Regular,
    /// The weight stroke widths are authored at.
    #[default]
    Bold,
}

impl Weight {
    /// Multiplier applied to authored stroke widths.
    #[must_use]
    pub fn stroke_factor(self) -> f32 {
        match self {
            Weight::Regular => 0.75,
            Weight::Bold => 1.0,
        }
    }
}

/// Size and weight a glyph is rendered with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SymbolStyle {
    /// Nominal size; one point is one pixel on the canvas.
    pub point_size: f32,
    /// Stroke weight.
    pub weight: Weight,
}

impl Default for SymbolStyle {
    fn default() -> Self {
        SymbolStyle {
            point_size: OVERLAY_POINT_SIZE,
            weight: Weight::Bold,
        }
    }
}

/// A rendered glyph: 8-bit coverage over its own bounding box.
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphMask {
    coverage: GrayImage,
}

impl GlyphMask {
    /// Wraps a coverage image, `0` meaning empty and `255` fully covered.
    #[must_use]
    pub fn new(coverage: GrayImage) -> Self {
        GlyphMask { coverage }
    }

    /// Width of the bounding box in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.coverage.width()
    }

    /// Height of the bounding box in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.coverage.height()
    }

    /// Coverage of the pixel at `(x, y)` in `[0, 1]`.
    #[must_use]
    pub fn coverage_at(&self, x: u32, y: u32) -> f32 {
        f32::from(self.coverage.get_pixel(x, y)[0]) / 255.0
    }

    /// Top-left position that centers this mask on a `width`×`height` surface.
    ///
    /// Odd leftovers round towards the top-left; the origin is negative when
    /// the mask is larger than the surface.
    #[must_use]
    pub fn centered_origin(&self, width: u32, height: u32) -> (i64, i64) {
        let x = (i64::from(width) - i64::from(self.width())).div_euclid(2);
        let y = (i64::from(height) - i64::from(self.height())).div_euclid(2);
        (x, y)
    }

    /// Whether no pixel has any coverage.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.coverage.pixels().all(|p| p[0] == 0)
    }
}

/// Anything that can turn a glyph identifier into a rendered glyph.
pub trait GlyphSource {
    /// Renders `name`, or returns `None` if this source does not know it.
    fn resolve(&self, name: &str, style: SymbolStyle) -> Option<GlyphMask>;
}

impl<T: GlyphSource + ?Sized> GlyphSource for &T {
    fn resolve(&self, name: &str, style: SymbolStyle) -> Option<GlyphMask> {
        (**self).resolve(name, style)
    }
}

impl<T: GlyphSource + ?Sized> GlyphSource for Box<T> {
    fn resolve(&self, name: &str, style: SymbolStyle) -> Option<GlyphMask> {
        (**self).resolve(name, style)
    }
}

/// Tries several glyph sources in order; the first one that knows a name wins.
#[derive(Default)]
pub struct Chain {
    sources: Vec<Box<dyn GlyphSource>>,
}

impl Chain {
    /// An empty chain that resolves nothing.
    #[must_use]
    pub fn new() -> Self {
        Chain::default()
    }

    /// Appends a source with lower priority than all sources added so far.
    #[must_use]
    pub fn with(mut self, source: impl GlyphSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Number of sources in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Whether the chain has no sources.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl GlyphSource for Chain {
    fn resolve(&self, name: &str, style: SymbolStyle) -> Option<GlyphMask> {
        self.sources
            .iter()
            .find_map(|source| source.resolve(name, style))
    }
}
