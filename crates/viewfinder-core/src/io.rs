use std::fs;
use std::path::Path;

use image::RgbaImage;
use tracing::debug;

use crate::error::Result;

/// Read and decode an image file into an RGBA byte buffer.
pub fn decode_path(path: &Path) -> Result<RgbaImage> {
    let bytes = fs::read(path)?;
    debug!(path = %path.display(), bytes = bytes.len(), "Decoding image file");
    decode_bytes(&bytes)
}

/// Decode an encoded image (PNG, JPEG, ...) already in memory.
pub fn decode_bytes(bytes: &[u8]) -> Result<RgbaImage> {
    let decoded = image::load_from_memory(bytes)?;
    Ok(decoded.to_rgba8())
}
