//! Transport encoding for images exchanged with the remote generator.
//!
//! Outbound images are JPEG-compressed and base64-encoded so they can be
//! embedded in a JSON body. Inbound results are raw image bytes (JPEG,
//! PNG or WebP) decoded back into an RGB buffer. The [`image`] crate works
//! in RGB channel order throughout, so no channel swap is needed on either
//! side of the boundary.

use base64::{engine::general_purpose, Engine as _};
use image::codecs::jpeg::JpegEncoder;

use crate::error::CoreError;
use crate::types::RgbImage;

/// JPEG quality used for uploads.
pub const JPEG_QUALITY: u8 = 95;

/// Reject a missing or zero-sized image.
///
/// `which` names the input in logs (e.g. `"person"`, `"garment"`).
pub fn require_image<'a>(
    image: Option<&'a RgbImage>,
    which: &'static str,
) -> Result<&'a RgbImage, CoreError> {
    match image {
        Some(img) if img.width() > 0 && img.height() > 0 => Ok(img),
        _ => Err(CoreError::EmptyImage { which }),
    }
}

/// Compress an RGB image to JPEG bytes.
pub fn encode_jpeg(image: &RgbImage) -> Result<Vec<u8>, CoreError> {
    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY).encode_image(image)?;
    Ok(bytes)
}

/// Compress an RGB image to JPEG and wrap it as standard padded base64.
pub fn encode_for_transport(image: &RgbImage) -> Result<String, CoreError> {
    let bytes = encode_jpeg(image)?;
    Ok(general_purpose::STANDARD.encode(bytes))
}

/// Decode downloaded result bytes into an RGB image.
///
/// The format is sniffed from the bytes; alpha channels are dropped.
pub fn decode_from_transport(bytes: &[u8]) -> Result<RgbImage, CoreError> {
    let img = image::load_from_memory(bytes)?;
    Ok(img.to_rgb8())
}
