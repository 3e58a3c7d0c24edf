use std::path::PathBuf;

use clap::Parser;
use log::debug;

use crate::{render_icon, write_png, Chain, Color, Error, VectorCatalog};

/// Render a filled circle, optionally with a centered glyph, as a 128x128 PNG.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Fill color as six hex digits, optionally prefixed with '#'
    pub color: String,
    /// Path to where the output image should be written
    pub output: PathBuf,
    /// Glyph to draw on top: check, lock, chat, or any glyph identifier
    pub symbol: Option<String>,
    /// Additional glyph catalog (.ron or .json), consulted after the bundled glyphs
    #[arg(long)]
    pub glyphs: Option<PathBuf>,
    /// Font to take glyphs from when no catalog knows the identifier
    #[arg(long)]
    pub font: Option<PathBuf>,
    /// Fail instead of drawing a plain circle when the glyph cannot be found
    #[arg(long)]
    pub strict: bool,
}

impl Args {
    /// Builds the glyph sources in lookup order: bundled catalog, `--glyphs`, `--font`.
    ///
    /// # Errors
    /// Fails if any of the requested catalog or font files cannot be loaded.
    pub fn glyph_source(&self) -> Result<Chain, Error> {
        let mut chain = Chain::new().with(VectorCatalog::bundled()?);

        if let Some(path) = &self.glyphs {
            chain = chain.with(VectorCatalog::load(path)?);
        }

        if let Some(path) = &self.font {
            #[cfg(feature = "font")]
            {
                chain = chain.with(crate::FontSource::open(path)?);
            }
            #[cfg(not(feature = "font"))]
            return Err(Error::Font(format!(
                "{}: built without font support",
                path.display()
            )));
        }

        Ok(chain)
    }
}

/// Runs the whole pipeline for parsed arguments: decode, draw, encode, write.
///
/// # Errors
/// Any failure along the way; the output file is left untouched in that case.
pub fn run(args: &Args) -> Result<(), Error> {
    let color = Color::from_hex(&args.color)?;
    debug!("decoded {} as {color:?}", args.color);

    let symbol = args.symbol.as_deref().filter(|s| !s.is_empty());
    // glyph files are only read when there is a glyph to draw
    let source = match symbol {
        Some(_) => args.glyph_source()?,
        None => Chain::new(),
    };
    let image = render_icon(color, symbol, &source, args.strict)?;

    write_png(&args.output, &image)?;
    Ok(())
}
