//! Lossless frame codec
//!
//! Converts a single 2D raster into a transport-safe text form and back.
//! The raster is first PNG-encoded (lossless, pixel-exact) and the byte
//! stream is then base64-encoded with the standard alphabet, which contains
//! neither control characters nor the `;` volume delimiter. The service
//! decodes with the exact inverse, so `decode_raster(encode_raster(r)) == r`
//! for every supported raster.

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use image::{DynamicImage, ImageFormat};

use crate::error::Result;

/// One losslessly encoded raster as transport-safe text
///
/// Opaque beyond the guarantee that the text contains only base64 characters
/// and decodes back to the exact pixel grid it was produced from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedFrame(String);

impl EncodedFrame {
    pub(crate) fn from_text(text: impl Into<String>) -> Self {
        EncodedFrame(text.into())
    }

    /// View the encoded text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the underlying text
    pub fn into_string(self) -> String {
        self.0
    }
}

/// Encode one raster into transport-safe text
///
/// Fails with [`CellsparseError::Encoding`](crate::CellsparseError::Encoding)
/// if the pixel layout cannot be represented as PNG.
pub fn encode_raster(raster: &DynamicImage) -> Result<EncodedFrame> {
    let mut png = Vec::new();
    raster.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
    Ok(EncodedFrame(BASE64.encode(&png)))
}

/// Decode transport-safe text back into a raster
///
/// The inverse of [`encode_raster`]. This client only produces encodings;
/// decoding is the receiving side's job, and is kept here so the round trip
/// can be verified.
pub fn decode_raster(frame: &EncodedFrame) -> Result<DynamicImage> {
    let png = BASE64.decode(frame.as_str())?;
    Ok(image::load_from_memory_with_format(&png, ImageFormat::Png)?)
}
