use thiserror::Error;

/// Terminal failures of the video pipeline that the request boundary needs
/// to name precisely.
#[derive(Debug, Error)]
pub enum VideoPipelineError {
    #[error("invalid stream properties: {width}x{height} @ {fps:.2} fps")]
    InvalidStreamProperties { width: u32, height: u32, fps: f64 },

    #[error("pipeline already executed")]
    AlreadyExecuted,
}
