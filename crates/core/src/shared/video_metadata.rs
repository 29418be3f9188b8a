use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq)]
pub struct VideoMetadata {
    pub width: u32,
    pub height: u32,
    pub fps: f64,
    /// Container-reported frame count; may be approximate or zero.
    pub total_frames: usize,
    pub codec: String,
    pub source_path: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction() {
        let meta = VideoMetadata {
            width: 1280,
            height: 720,
            fps: 25.0,
            total_frames: 250,
            codec: "h264".to_string(),
            source_path: Some(PathBuf::from("/tmp/clip.mp4")),
        };
        assert_eq!(meta.width, 1280);
        assert_eq!(meta.height, 720);
        assert_eq!(meta.fps, 25.0);
        assert_eq!(meta.total_frames, 250);
        assert_eq!(meta.codec, "h264");
        assert_eq!(meta.source_path, Some(PathBuf::from("/tmp/clip.mp4")));
    }

    #[test]
    fn test_clone_is_independent() {
        let meta = VideoMetadata {
            width: 640,
            height: 480,
            fps: 24.0,
            total_frames: 48,
            codec: "mpeg4".to_string(),
            source_path: None,
        };
        let cloned = meta.clone();
        assert_eq!(meta, cloned);
    }
}
