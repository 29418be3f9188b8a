use crate::shared::frame::Frame;

/// Domain interface for smoothing a whole frame in-place.
///
/// The blur runs after inpainting over the full frame; implementations
/// modify `&mut Frame` to avoid allocation in the video loop.
pub trait FrameBlurrer: Send {
    fn blur(&self, frame: &mut Frame) -> Result<(), Box<dyn std::error::Error>>;
}
