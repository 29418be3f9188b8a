use std::io;
use std::path::PathBuf;

use maskout_core::pipeline::preset::PipelinePreset;

/// Original upload cap: 100 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 100 * 1024 * 1024;

/// Immutable service configuration, built once at process start and passed
/// to the request handler. No ambient globals.
#[derive(Clone, Debug)]
pub struct ServiceConfig {
    /// Directory for processed videos and temporary uploads.
    pub output_dir: PathBuf,
    pub max_upload_bytes: u64,
    pub preset: PipelinePreset,
}

impl ServiceConfig {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            preset: PipelinePreset::default(),
        }
    }

    pub fn with_max_upload_bytes(mut self, max_upload_bytes: u64) -> Self {
        self.max_upload_bytes = max_upload_bytes;
        self
    }

    pub fn with_preset(mut self, preset: PipelinePreset) -> Self {
        self.preset = preset;
        self
    }

    /// Creates the output directory; call once at startup.
    pub fn ensure_output_dir(&self) -> io::Result<()> {
        std::fs::create_dir_all(&self.output_dir)?;
        log::info!("output folder configured at {}", self.output_dir.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::new("/tmp/out");
        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.max_upload_bytes, 100 * 1024 * 1024);
        assert_eq!(config.preset, PipelinePreset::STRICT);
    }

    #[test]
    fn test_builder_overrides() {
        let config = ServiceConfig::new("/tmp/out")
            .with_max_upload_bytes(1024)
            .with_preset(PipelinePreset::PERMISSIVE);
        assert_eq!(config.max_upload_bytes, 1024);
        assert_eq!(config.preset, PipelinePreset::PERMISSIVE);
    }

    #[test]
    fn test_ensure_output_dir_creates_nested_path() {
        let dir = tempfile::tempdir().unwrap();
        let config = ServiceConfig::new(dir.path().join("static").join("output"));
        config.ensure_output_dir().unwrap();
        assert!(config.output_dir.is_dir());
        // Idempotent
        config.ensure_output_dir().unwrap();
    }
}
