//! Small icon badges: a filled circle, optionally with a centered glyph.
//!
//! Every icon is a 128×128 RGBA image. The circle is inset by 8 pixels on
//! each side; a glyph, if requested, is painted in black at 50% opacity on
//! top of it, centered on its own bounding box.
//!
//! # Usage
//! ```
//! # fn test() -> Result<(), gen_circle::Error> {
//! use gen_circle::{render_icon, Color, VectorCatalog};
//!
//! let color: Color = "#34c759".parse()?;
//! let glyphs = VectorCatalog::bundled()?;
//! let icon = render_icon(color, Some("check"), &glyphs, false)?;
//! assert_eq!(icon.dimensions(), (128, 128));
//!
//! let png = gen_circle::encode_png(&icon)?;
//! assert!(png.starts_with(b"\x89PNG"));
//! # Ok(())
//! # }
//! # test().unwrap();
//! ```
//!
//! Glyphs come from anything implementing [`GlyphSource`]. The crate bundles
//! a [`VectorCatalog`] with `checkmark`, `lock.fill` and `bubble.left.fill`;
//! catalogs can also be loaded from RON or JSON files, and with the `font`
//! feature glyphs can be taken from a font file.

#![cfg_attr(docs_rs, feature(doc_cfg))]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]

mod canvas;
mod catalog;
mod color;
mod encode;
mod error;
mod glyph;

#[cfg(feature = "font")]
mod font;

use image::RgbaImage;
use log::{debug, info};

pub use canvas::{Canvas, Tint, CANVAS_SIZE, CIRCLE_INSET};
pub use catalog::{Point, Shape, VectorCatalog, VectorGlyph};
pub use color::Color;
pub use encode::{encode_png, write_png};
pub use error::Error;
pub use glyph::{
    resolve_symbol, Chain, GlyphMask, GlyphSource, SymbolStyle, Weight, OVERLAY_POINT_SIZE,
};

#[cfg(feature = "font")]
#[cfg_attr(docs_rs, doc(cfg(feature = "font")))]
pub use font::FontSource;

#[cfg(feature = "bin")]
mod cli;

#[cfg(feature = "bin")]
pub use cli::{run, Args};

/// Draws an icon: the circle in `color`, then `symbol` from `glyphs` if one is given.
///
/// `symbol` goes through [`resolve_symbol`] first; an empty symbol counts as none.
/// A symbol no source can resolve is skipped (logged at info level), or reported as
/// [`Error::UnresolvableGlyph`] when `strict` is set.
///
/// # Errors
/// Only [`Error::UnresolvableGlyph`], and only in strict mode.
pub fn render_icon(
    color: Color,
    symbol: Option<&str>,
    glyphs: &dyn GlyphSource,
    strict: bool,
) -> Result<RgbaImage, Error> {
    let mut canvas = Canvas::new();
    canvas.fill_circle(color);

    if let Some(symbol) = symbol.filter(|s| !s.is_empty()) {
        let name = resolve_symbol(symbol);
        debug!("symbol {symbol:?} resolves to glyph {name:?}");

        match glyphs.resolve(name, SymbolStyle::default()) {
            Some(mask) => canvas.draw_glyph(&mask, Tint::HALF_BLACK),
            None if strict => {
                return Err(Error::UnresolvableGlyph {
                    name: name.to_owned(),
                })
            }
            None => info!("no glyph named {name:?}, drawing a plain circle"),
        }
    }

    Ok(canvas.into_image())
}
