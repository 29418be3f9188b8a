use std::io::Cursor;

use crate::shared::frame::Frame;
use crate::video::domain::image_codec::ImageCodec;

/// In-memory codec backed by the `image` crate.
///
/// Decodes whatever format the crate recognizes from the upload bytes and
/// always re-encodes losslessly as PNG.
pub struct MemoryImageCodec;

impl MemoryImageCodec {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MemoryImageCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageCodec for MemoryImageCodec {
    fn decode(&self, bytes: &[u8]) -> Result<Frame, Box<dyn std::error::Error>> {
        let img = image::load_from_memory(bytes)?.to_rgb8();
        let (width, height) = img.dimensions();
        Ok(Frame::new(img.into_raw(), width, height, 3, 0))
    }

    fn encode_png(&self, frame: &Frame) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
        let img =
            image::RgbImage::from_raw(frame.width(), frame.height(), frame.data().to_vec())
                .ok_or("Failed to create image from frame data")?;
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)?;
        Ok(bytes)
    }
}
