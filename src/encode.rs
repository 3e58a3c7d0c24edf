use std::path::Path;

use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder, RgbaImage};
use log::info;

use crate::Error;

/// Serializes `image` as an RGBA PNG.
///
/// # Errors
/// Returns [`Error::Encode`] if the encoder rejects the pixel data.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, Error> {
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes).write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        ColorType::Rgba8,
    )?;
    Ok(bytes)
}

/// Encodes `image` and writes it to `path`, replacing any existing file.
/// Nothing is written unless encoding succeeds. Returns the number of bytes written.
///
/// # Errors
/// Returns [`Error::Encode`] if encoding fails and [`Error::Io`] if the write fails.
pub fn write_png(path: &Path, image: &RgbaImage) -> Result<usize, Error> {
    let bytes = encode_png(image)?;
    std::fs::write(path, &bytes).map_err(|source| Error::Io {
        path: path.to_owned(),
        source,
    })?;
    info!("wrote {} bytes to {}", bytes.len(), path.display());
    Ok(bytes.len())
}
