use std::path::PathBuf;

/// Everything that can go wrong while producing an icon.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The color argument is not six hex digits (with an optional leading `#`).
    #[error("malformed color {input:?}: expected 6 hex digits with an optional leading '#'")]
    MalformedColor {
        /// The argument as it was given.
        input: String,
    },
    /// The requested glyph is not known to any glyph source. Only raised in strict mode.
    #[error("glyph {name:?} does not resolve to any known glyph")]
    UnresolvableGlyph {
        /// The glyph identifier after symbol name resolution.
        name: String,
    },
    /// A glyph catalog could not be parsed or has an unsupported format.
    #[error("invalid glyph catalog: {0}")]
    Catalog(String),
    /// A font file could not be parsed.
    #[error("invalid font: {0}")]
    Font(String),
    /// The canvas could not be serialized as PNG.
    #[error("failed to encode PNG")]
    Encode(#[from] image::ImageError),
    /// Reading an input file or writing the output file failed.
    #[error("failed to access {}", path.display())]
    Io {
        /// The file that was being read or written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
