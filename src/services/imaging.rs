//! Image preparation for the OCR engine
//!
//! Decodes incoming bytes with the `image` crate, normalizes the color
//! space to RGB, and re-encodes as PNG. Telegram delivers photos as JPEG
//! but documents arrive in whatever format the user uploaded; everything
//! is normalized here so the OCR engine only ever sees one input shape.

use image::codecs::png::PngEncoder;

use crate::utils::errors::Result;

#[derive(Debug, Clone, Default)]
pub struct ImagingService;

impl ImagingService {
    pub fn new() -> Self {
        Self
    }

    /// Decode `bytes` and return an RGB PNG ready for recognition.
    pub fn prepare(&self, bytes: &[u8]) -> Result<Vec<u8>> {
        let decoded = image::load_from_memory(bytes)?;
        let rgb = decoded.to_rgb8();

        let mut png = Vec::new();
        rgb.write_with_encoder(PngEncoder::new(&mut png))?;
        Ok(png)
    }
}
