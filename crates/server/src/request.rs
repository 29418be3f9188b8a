use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use thiserror::Error;

use maskout_core::blurring::domain::blur_level::BlurLevel;
use maskout_core::shared::constants::{IMAGE_EXTENSIONS, VIDEO_EXTENSIONS};

/// The uploaded file as the framework hands it over.
#[derive(Clone, Debug)]
pub struct UploadedMedia {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// One processing request: the upload plus the optional form fields.
#[derive(Clone, Debug)]
pub struct ProcessRequest {
    pub media: UploadedMedia,
    /// Mask as a `data:image/png;base64,` URI, exactly as drawn client-side.
    pub mask_data: Option<String>,
    /// Raw blur-level form value; parsed leniently, clamped to [0, 50].
    pub blur_level: Option<String>,
}

/// Input-validation failures; rejected before any processing starts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("No file selected.")]
    MissingFile,

    #[error("Upload exceeds the limit of {limit} bytes.")]
    TooLarge { limit: u64 },

    #[error("Unsupported file type: '{0}'. Upload an image or a video.")]
    UnsupportedType(String),
}

impl RequestError {
    pub fn http_status(&self) -> u16 {
        match self {
            RequestError::MissingFile => 400,
            RequestError::TooLarge { .. } => 413,
            RequestError::UnsupportedType(_) => 415,
        }
    }
}

/// What the upload's filename says it is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let ext = extension_of(file_name)?;
        if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            Some(MediaKind::Image)
        } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            Some(MediaKind::Video)
        } else {
            None
        }
    }

    pub fn is_video(self) -> bool {
        matches!(self, MediaKind::Video)
    }
}

/// MIME type for the response details, from the filename extension.
pub fn mime_type_for(file_name: &str) -> String {
    let Some(ext) = extension_of(file_name) else {
        return "application/octet-stream".to_string();
    };
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "bmp" => "image/bmp",
        "tiff" | "tif" => "image/tiff",
        "webp" => "image/webp",
        "mp4" | "m4v" => "video/mp4",
        "avi" => "video/x-msvideo",
        "mov" => "video/quicktime",
        "mkv" => "video/x-matroska",
        "webm" => "video/webm",
        "mpg" | "mpeg" => "video/mpeg",
        _ => "application/octet-stream",
    }
    .to_string()
}

pub const MASK_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Extracts mask bytes from the data URI; anything malformed counts as no
/// mask, never as a request failure.
pub fn decode_mask_data_uri(uri: &str) -> Option<Vec<u8>> {
    let encoded = uri.strip_prefix(MASK_DATA_URI_PREFIX)?;
    match STANDARD.decode(encoded) {
        Ok(bytes) => Some(bytes),
        Err(err) => {
            log::warn!("could not decode mask base64 data: {err}");
            None
        }
    }
}

/// Parses the blur form value: floats are accepted and truncated, the result
/// is clamped to [0, 50], and garbage falls back to 0 with a warning.
pub fn parse_blur_level(raw: Option<&str>) -> BlurLevel {
    let Some(raw) = raw else {
        return BlurLevel::DISABLED;
    };
    match raw.trim().parse::<f64>() {
        Ok(value) => BlurLevel::clamped(value as i64),
        Err(_) => {
            log::warn!("invalid blur level '{raw}', using 0");
            BlurLevel::DISABLED
        }
    }
}

fn extension_of(file_name: &str) -> Option<String> {
    std::path::Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}
