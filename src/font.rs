use std::path::Path;

use image::{GrayImage, Luma};
use log::debug;
use rusttype::{point, Font, Scale};

use crate::color::quantize;
use crate::glyph::{GlyphMask, GlyphSource, SymbolStyle};
use crate::Error;

/// Renders glyphs from a TrueType/OpenType font.
///
/// Identifiers are either a single character (`★`) or a Unicode codepoint
/// written in hex, with or without a `U+` prefix (`2605`, `U+2605`). A single
/// character always means itself, so `A` is the letter, not codepoint `0xA`.
pub struct FontSource {
    font: Font<'static>,
}

impl FontSource {
    /// Parses font data.
    ///
    /// # Errors
    /// Returns [`Error::Font`] if the data is not a font rusttype understands.
    pub fn from_vec(data: Vec<u8>) -> Result<Self, Error> {
        let font = Font::try_from_vec(data)
            .ok_or_else(|| Error::Font("unrecognized font data".to_owned()))?;
        Ok(FontSource { font })
    }

    /// Reads and parses a font file.
    ///
    /// # Errors
    /// Returns [`Error::Io`] if the file cannot be read, [`Error::Font`] if it cannot be parsed.
    pub fn open(path: &Path) -> Result<Self, Error> {
        let data = std::fs::read(path).map_err(|source| Error::Io {
            path: path.to_owned(),
            source,
        })?;
        let source = Self::from_vec(data)
            .map_err(|e| Error::Font(format!("{}: {e}", path.display())))?;
        debug!("loaded font with {} glyphs from {}", source.font.glyph_count(), path.display());
        Ok(source)
    }
}

/// Interprets a glyph identifier as a character.
fn parse_identifier(name: &str) -> Option<char> {
    let mut chars = name.chars();
    if let (Some(single), None) = (chars.next(), chars.next()) {
        return Some(single);
    }

    let hex = name
        .strip_prefix("U+")
        .or_else(|| name.strip_prefix("u+"))
        .unwrap_or(name);
    if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let codepoint = u32::from_str_radix(hex, 16).ok()?;
    char::from_u32(codepoint)
}

impl GlyphSource for FontSource {
    #[allow(clippy::cast_sign_loss)]
    fn resolve(&self, name: &str, style: SymbolStyle) -> Option<GlyphMask> {
        let ch = parse_identifier(name)?;
        let glyph = self.font.glyph(ch);
        // glyph 0 is .notdef, i.e. the font has no such character
        if glyph.id().0 == 0 {
            return None;
        }

        let glyph = glyph
            .scaled(Scale::uniform(style.point_size))
            .positioned(point(0.0, 0.0));
        let bounding_box = glyph.pixel_bounding_box()?;
        let width = bounding_box.width() as u32;
        let height = bounding_box.height() as u32;
        if width == 0 || height == 0 {
            return None;
        }

        let mut coverage = GrayImage::new(width, height);
        glyph.draw(|x, y, v| {
            if x < width && y < height {
                coverage.put_pixel(x, y, Luma([quantize(v)]));
            }
        });
        debug!("rendered {ch:?} from font at {}pt as {width}x{height}", style.point_size);

        Some(GlyphMask::new(coverage))
    }
}
