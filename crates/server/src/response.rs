use serde::Serialize;

use maskout_core::pipeline::report::ProcessingReport;

/// Fixed disclaimer included in every processed response.
pub const DISCLAIMER: &str = "Quality varies. Artifacts possible, especially with video \
(static mask used). Video processing can be slow.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Warning,
    Error,
}

#[derive(Clone, Debug, Serialize)]
pub struct ResponseDetails {
    pub processing_method: String,
    pub input_filename: String,
    pub input_mimetype: String,
    pub is_video: bool,
    pub mask_provided: bool,
    pub blur_applied: bool,
    pub blur_level: u8,
    pub disclaimer: &'static str,
}

/// The structured body the framework serializes back to the client.
#[derive(Clone, Debug, Serialize)]
pub struct ApiResponse {
    pub status: ResponseStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<ResponseDetails>,
    /// Processed image as a `data:image/png;base64,` URI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_image_data: Option<String>,
    /// Relative URL of the processed video under the output endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_video_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_filename: Option<String>,
}

impl ApiResponse {
    /// Response for a request rejected before processing.
    pub fn rejection(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            message: message.into(),
            details: None,
            result_image_data: None,
            result_video_url: None,
            result_filename: None,
        }
    }
}

/// Derives the response status from what actually happened, instead of
/// matching on message substrings.
pub fn derive_status(report: &ProcessingReport, mask_provided: bool) -> ResponseStatus {
    if report.failed {
        ResponseStatus::Error
    } else if mask_provided && !report.mask_applied {
        ResponseStatus::Warning
    } else {
        ResponseStatus::Success
    }
}
