use crate::shared::frame::Frame;

/// In-memory image decode/encode seam for the image pipeline.
///
/// Uploads arrive and leave as encoded bytes; the frame never touches disk.
pub trait ImageCodec: Send {
    /// Decodes encoded image bytes into a 3-channel RGB frame.
    fn decode(&self, bytes: &[u8]) -> Result<Frame, Box<dyn std::error::Error>>;

    /// Encodes a frame losslessly as PNG.
    fn encode_png(&self, frame: &Frame) -> Result<Vec<u8>, Box<dyn std::error::Error>>;
}
