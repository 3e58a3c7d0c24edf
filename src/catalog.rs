//! Vector glyphs built from a few primitive shapes, and catalogs of them.
//!
//! Catalogs are plain serde data. The crate bundles one in RON with the glyphs
//! the command-line symbol names map to; more can be loaded from `.ron` or
//! `.json` files.

use std::collections::BTreeMap;
use std::path::Path;

use image::{GrayImage, Luma};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::canvas::pixel_coverage;
use crate::color::quantize;
use crate::glyph::{GlyphMask, GlyphSource, SymbolStyle};
use crate::Error;

const BUNDLED_CATALOG: &str = include_str!("glyphs.ron");

/// Glyphs whose rendered box would exceed this many pixels on a side are refused.
const MAX_GLYPH_SIDE: f32 = 4096.0;

/// A point in glyph design units, y pointing down.
pub type Point = (f32, f32);

/// A filled primitive. A glyph covers the union of its shapes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Closed polygon, filled with the even-odd rule.
    Polygon(Vec<Point>),
    /// Axis-aligned ellipse.
    Ellipse {
        /// Center of the ellipse.
        center: Point,
        /// Horizontal and vertical radius.
        radii: Point,
    },
    /// Axis-aligned rectangle with rounded corners.
    RoundedRect {
        /// Top-left corner.
        min: Point,
        /// Bottom-right corner.
        max: Point,
        /// Corner radius, clamped to half the shorter side.
        radius: f32,
    },
    /// Polyline stroked with round caps and joins.
    Stroke {
        /// Vertices of the polyline.
        points: Vec<Point>,
        /// Stroke width at [`Weight::Bold`](crate::Weight::Bold).
        width: f32,
    },
}

impl Shape {
    /// Whether `point` lies inside the shape. Stroke widths are scaled by `stroke_factor`.
    #[must_use]
    pub fn contains(&self, point: Point, stroke_factor: f32) -> bool {
        let (x, y) = point;
        match self {
            Shape::Polygon(vertices) => {
                let mut inside = false;
                let mut prev = match vertices.last() {
                    Some(&last) => last,
                    None => return false,
                };
                for &(vx, vy) in vertices {
                    let (px, py) = prev;
                    if (vy > y) != (py > y) && x < (px - vx) * (y - vy) / (py - vy) + vx {
                        inside = !inside;
                    }
                    prev = (vx, vy);
                }
                inside
            }
            Shape::Ellipse { center, radii } => {
                if radii.0 <= 0.0 || radii.1 <= 0.0 {
                    return false;
                }
                let dx = (x - center.0) / radii.0;
                let dy = (y - center.1) / radii.1;
                dx * dx + dy * dy <= 1.0
            }
            Shape::RoundedRect { min, max, radius } => {
                if x < min.0 || x > max.0 || y < min.1 || y > max.1 {
                    return false;
                }
                let r = radius
                    .min((max.0 - min.0) / 2.0)
                    .min((max.1 - min.1) / 2.0)
                    .max(0.0);
                let dx = (min.0 + r - x).max(x - (max.0 - r)).max(0.0);
                let dy = (min.1 + r - y).max(y - (max.1 - r)).max(0.0);
                dx * dx + dy * dy <= r * r
            }
            Shape::Stroke { points, width } => {
                let half = width * stroke_factor / 2.0;
                let half_sq = half * half;
                match points.as_slice() {
                    [] => false,
                    [only] => distance_sq(point, *only) <= half_sq,
                    _ => points
                        .windows(2)
                        .any(|seg| segment_distance_sq(point, seg[0], seg[1]) <= half_sq),
                }
            }
        }
    }
}

fn distance_sq(a: Point, b: Point) -> f32 {
    let (dx, dy) = (a.0 - b.0, a.1 - b.1);
    dx * dx + dy * dy
}

fn segment_distance_sq(p: Point, a: Point, b: Point) -> f32 {
    let (abx, aby) = (b.0 - a.0, b.1 - a.1);
    let len_sq = abx * abx + aby * aby;
    if len_sq == 0.0 {
        return distance_sq(p, a);
    }
    let t = (((p.0 - a.0) * abx + (p.1 - a.1) * aby) / len_sq).clamp(0.0, 1.0);
    distance_sq(p, (a.0 + t * abx, a.1 + t * aby))
}

/// A glyph drawn in a `width`×`height` design box.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VectorGlyph {
    /// Design units per point of requested size.
    pub units_per_em: f32,
    /// Width of the design box.
    pub width: f32,
    /// Height of the design box.
    pub height: f32,
    /// Filled shapes, in design units.
    pub shapes: Vec<Shape>,
}

impl VectorGlyph {
    /// Renders the glyph into a mask of its design box scaled to `style.point_size`,
    /// rounded up to whole pixels with the content centered.
    ///
    /// Returns `None` for degenerate sizes.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn rasterize(&self, style: SymbolStyle) -> Option<GlyphMask> {
        if self.units_per_em.is_nan() || self.units_per_em <= 0.0 {
            return None;
        }
        let scale = style.point_size / self.units_per_em;
        let width = (self.width * scale).ceil();
        let height = (self.height * scale).ceil();
        if width.is_nan() || height.is_nan() || width < 1.0 || height < 1.0 {
            return None;
        }
        if width > MAX_GLYPH_SIDE || height > MAX_GLYPH_SIDE {
            warn!("refusing to render a {width}x{height} glyph");
            return None;
        }

        let offset_x = (width - self.width * scale) / 2.0;
        let offset_y = (height - self.height * scale) / 2.0;
        let stroke_factor = style.weight.stroke_factor();

        let mut coverage = GrayImage::new(width as u32, height as u32);
        for (x, y, pixel) in coverage.enumerate_pixels_mut() {
            let covered = pixel_coverage(x, y, |sx, sy| {
                let point = ((sx - offset_x) / scale, (sy - offset_y) / scale);
                self.shapes
                    .iter()
                    .any(|shape| shape.contains(point, stroke_factor))
            });
            *pixel = Luma([quantize(covered)]);
        }

        Some(GlyphMask::new(coverage))
    }
}

/// Named vector glyphs.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VectorCatalog {
    /// Glyphs by identifier.
    pub glyphs: BTreeMap<String, VectorGlyph>,
}

impl VectorCatalog {
    /// The catalog shipped with the crate: `checkmark`, `lock.fill` and `bubble.left.fill`.
    ///
    /// # Errors
    /// Only fails if the bundled data is corrupt.
    pub fn bundled() -> Result<Self, Error> {
        Self::from_ron(BUNDLED_CATALOG)
    }

    /// Parses a catalog written in RON.
    ///
    /// # Errors
    /// Returns [`Error::Catalog`] if `source` is not a valid catalog.
    pub fn from_ron(source: &str) -> Result<Self, Error> {
        ron::from_str(source).map_err(|e| Error::Catalog(e.to_string()))
    }

    /// Parses a catalog written in JSON.
    ///
    /// # Errors
    /// Returns [`Error::Catalog`] if `source` is not a valid catalog.
    pub fn from_json(source: &str) -> Result<Self, Error> {
        serde_json::from_str(source).map_err(|e| Error::Catalog(e.to_string()))
    }

    /// Loads a catalog file, choosing the format from its extension (`ron` or `json`).
    ///
    /// # Errors
    /// Returns [`Error::Io`] if the file cannot be read and [`Error::Catalog`]
    /// if it cannot be parsed or the extension is not supported.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let read = || {
            std::fs::read_to_string(path).map_err(|source| Error::Io {
                path: path.to_owned(),
                source,
            })
        };

        let catalog = match path.extension().map(|os_str| os_str.to_str()) {
            Some(Some("ron")) => Self::from_ron(&read()?)?,
            Some(Some("json")) => Self::from_json(&read()?)?,
            _ => {
                return Err(Error::Catalog(format!(
                    "cannot deduce catalog format from {}; supported formats are ron and json",
                    path.display()
                )))
            }
        };

        debug!("loaded {} glyphs from {}", catalog.glyphs.len(), path.display());
        Ok(catalog)
    }

    /// Looks up a glyph by identifier.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&VectorGlyph> {
        self.glyphs.get(name)
    }
}

impl GlyphSource for VectorCatalog {
    fn resolve(&self, name: &str, style: SymbolStyle) -> Option<GlyphMask> {
        self.get(name)?.rasterize(style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::{resolve_symbol, Weight};

    fn total_coverage(mask: &GlyphMask) -> f32 {
        let mut sum = 0.0;
        for y in 0..mask.height() {
            for x in 0..mask.width() {
                sum += mask.coverage_at(x, y);
            }
        }
        sum
    }

    /// Center of the bounding box of covered pixels.
    fn ink_center(mask: &GlyphMask) -> (f32, f32) {
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (u32::MAX, u32::MAX, 0, 0);
        for y in 0..mask.height() {
            for x in 0..mask.width() {
                if mask.coverage_at(x, y) > 0.0 {
                    min_x = min_x.min(x);
                    min_y = min_y.min(y);
                    max_x = max_x.max(x);
                    max_y = max_y.max(y);
                }
            }
        }
        (
            (min_x + max_x + 1) as f32 / 2.0,
            (min_y + max_y + 1) as f32 / 2.0,
        )
    }

    #[test_log::test]
    fn bundled_catalog_has_every_symbol() {
        let catalog = VectorCatalog::bundled().unwrap();
        for symbol in ["check", "lock", "chat"] {
            assert!(catalog.get(resolve_symbol(symbol)).is_some(), "{symbol}");
        }
        assert_eq!(catalog.glyphs.len(), 3);
    }

    #[test_log::test]
    fn bundled_glyph_sizes_at_48pt() {
        let catalog = VectorCatalog::bundled().unwrap();
        let style = SymbolStyle::default();
        let size = |name: &str| {
            let mask = catalog.resolve(name, style).unwrap();
            (mask.width(), mask.height())
        };
        assert_eq!(size("checkmark"), (47, 41));
        assert_eq!(size("lock.fill"), (35, 47));
        assert_eq!(size("bubble.left.fill"), (48, 45));
    }

    #[test_log::test]
    fn bundled_glyph_ink_is_centered() {
        let catalog = VectorCatalog::bundled().unwrap();
        for name in ["checkmark", "lock.fill", "bubble.left.fill"] {
            let mask = catalog.resolve(name, SymbolStyle::default()).unwrap();
            assert!(!mask.is_blank(), "{name}");
            let (cx, cy) = ink_center(&mask);
            assert!((cx - mask.width() as f32 / 2.0).abs() <= 1.0, "{name}: {cx}");
            assert!((cy - mask.height() as f32 / 2.0).abs() <= 1.0, "{name}: {cy}");
        }
    }

    #[test_log::test]
    fn regular_weight_is_lighter() {
        let catalog = VectorCatalog::bundled().unwrap();
        let bold = catalog.resolve("checkmark", SymbolStyle::default()).unwrap();
        let regular = catalog
            .resolve(
                "checkmark",
                SymbolStyle { weight: Weight::Regular, ..SymbolStyle::default() },
            )
            .unwrap();
        assert_eq!((bold.width(), bold.height()), (regular.width(), regular.height()));
        assert!(total_coverage(&regular) < total_coverage(&bold));
    }

    #[test_log::test]
    fn unknown_and_degenerate_glyphs_do_not_resolve() {
        let mut catalog = VectorCatalog::bundled().unwrap();
        let style = SymbolStyle::default();
        assert!(catalog.resolve("xyz123", style).is_none());
        assert!(catalog.resolve("Checkmark", style).is_none());

        catalog.glyphs.insert(
            "empty".to_owned(),
            VectorGlyph { units_per_em: 100.0, width: 0.0, height: 10.0, shapes: vec![] },
        );
        catalog.glyphs.insert(
            "huge".to_owned(),
            VectorGlyph { units_per_em: 0.001, width: 100.0, height: 100.0, shapes: vec![] },
        );
        assert!(catalog.resolve("empty", style).is_none());
        assert!(catalog.resolve("huge", style).is_none());
    }

    #[test_log::test]
    fn json_catalog() {
        let catalog = VectorCatalog::from_json(
            r#"{"glyphs": {"dot": {
                "units_per_em": 48, "width": 10, "height": 10,
                "shapes": [{"Ellipse": {"center": [5, 5], "radii": [5, 5]}}]
            }}}"#,
        )
        .unwrap();
        let mask = catalog.resolve("dot", SymbolStyle::default()).unwrap();
        assert_eq!((mask.width(), mask.height()), (10, 10));
        assert_eq!(mask.coverage_at(5, 5), 1.0);
        assert_eq!(mask.coverage_at(0, 0), 0.0);
    }

    #[test_log::test]
    fn malformed_catalogs_are_rejected() {
        assert!(matches!(VectorCatalog::from_ron("(glyphs: 3)"), Err(Error::Catalog(_))));
        assert!(matches!(VectorCatalog::from_json("[]"), Err(Error::Catalog(_))));
    }

    #[test_log::test]
    fn load_picks_format_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let ron_path = dir.path().join("glyphs.ron");
        std::fs::write(&ron_path, BUNDLED_CATALOG).unwrap();
        assert_eq!(VectorCatalog::load(&ron_path).unwrap(), VectorCatalog::bundled().unwrap());

        let json_path = dir.path().join("glyphs.json");
        let bundled = VectorCatalog::bundled().unwrap();
        std::fs::write(&json_path, serde_json::to_string(&bundled).unwrap()).unwrap();
        assert_eq!(VectorCatalog::load(&json_path).unwrap(), bundled);

        let toml_path = dir.path().join("glyphs.toml");
        std::fs::write(&toml_path, "").unwrap();
        assert!(matches!(VectorCatalog::load(&toml_path), Err(Error::Catalog(_))));

        let missing = dir.path().join("missing.ron");
        assert!(matches!(VectorCatalog::load(&missing), Err(Error::Io { .. })));
    }

    #[test_log::test]
    fn shape_containment() {
        let triangle = Shape::Polygon(vec![(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)]);
        assert!(triangle.contains((2.0, 2.0), 1.0));
        assert!(!triangle.contains((8.0, 8.0), 1.0));
        assert!(!Shape::Polygon(vec![]).contains((0.0, 0.0), 1.0));

        let rect = Shape::RoundedRect { min: (0.0, 0.0), max: (10.0, 10.0), radius: 4.0 };
        assert!(rect.contains((5.0, 5.0), 1.0));
        assert!(rect.contains((0.5, 5.0), 1.0));
        assert!(!rect.contains((0.5, 0.5), 1.0));
        assert!(!rect.contains((11.0, 5.0), 1.0));

        let stroke = Shape::Stroke { points: vec![(0.0, 0.0), (10.0, 0.0)], width: 4.0 };
        assert!(stroke.contains((5.0, 1.9), 1.0));
        assert!(!stroke.contains((5.0, 1.9), 0.75));
        assert!(stroke.contains((11.5, 0.0), 1.0));
        assert!(!stroke.contains((12.5, 0.0), 1.0));

        let dot = Shape::Stroke { points: vec![(3.0, 3.0)], width: 2.0 };
        assert!(dot.contains((3.5, 3.5), 1.0));
        assert!(!dot.contains((5.0, 3.0), 1.0));
    }
}
