/// Extensions treated as images; everything else that matches
/// [`VIDEO_EXTENSIONS`] is treated as video, anything else is rejected.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];

pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "mkv", "webm", "m4v", "mpg", "mpeg"];

/// Upper bound for the user-supplied blur level; kernel size = 2 * level + 1.
pub const MAX_BLUR_LEVEL: u8 = 50;

/// Frame-loop progress is logged every this many frames.
pub const PROGRESS_LOG_INTERVAL: usize = 100;

/// Processed videos are always written as MP4, whatever the input container.
pub const OUTPUT_VIDEO_EXTENSION: &str = "mp4";
