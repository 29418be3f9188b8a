use std::io::Write as _;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use uuid::Uuid;

use maskout_core::blurring::domain::blur_level::BlurLevel;
use maskout_core::blurring::infrastructure::gaussian_blurrer::GaussianBlurrer;
use maskout_core::inpainting::infrastructure::telea_inpainter::TeleaInpainter;
use maskout_core::masking::infrastructure::mask_normalizer::MaskNormalizer;
use maskout_core::pipeline::pipeline_logger::StdoutPipelineLogger;
use maskout_core::pipeline::process_image_use_case::ProcessImageUseCase;
use maskout_core::pipeline::process_video_use_case::ProcessVideoUseCase;
use maskout_core::pipeline::report::ProcessingReport;
use maskout_core::shared::constants::OUTPUT_VIDEO_EXTENSION;
use maskout_core::video::infrastructure::ffmpeg_reader::FfmpegReader;
use maskout_core::video::infrastructure::ffmpeg_writer::FfmpegWriter;
use maskout_core::video::infrastructure::memory_image_codec::MemoryImageCodec;

use crate::config::ServiceConfig;
use crate::request::{
    decode_mask_data_uri, mime_type_for, parse_blur_level, MediaKind, ProcessRequest,
    RequestError,
};
use crate::response::{derive_status, ApiResponse, ResponseDetails, ResponseStatus, DISCLAIMER};

/// Status code plus body, ready for the framework to serialize.
#[derive(Clone, Debug)]
pub struct HandlerReply {
    pub http_status: u16,
    pub body: ApiResponse,
}

/// Dispatches validated uploads into the image or video pipeline and shapes
/// the structured response.
///
/// Holds no per-request state; every invocation builds fresh pipeline
/// components from the immutable configuration.
pub struct RequestHandler {
    config: ServiceConfig,
}

impl RequestHandler {
    pub fn new(config: ServiceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn handle(&self, request: ProcessRequest) -> HandlerReply {
        let kind = match self.validate(&request) {
            Ok(kind) => kind,
            Err(err) => {
                log::warn!("rejected upload '{}': {err}", request.media.file_name);
                return HandlerReply {
                    http_status: err.http_status(),
                    body: ApiResponse::rejection(err.to_string()),
                };
            }
        };

        let mask_bytes = request.mask_data.as_deref().and_then(decode_mask_data_uri);
        let blur = parse_blur_level(request.blur_level.as_deref());
        log::info!(
            "processing '{}' ({:?}, mask: {}, blur: {})",
            request.media.file_name,
            kind,
            mask_bytes.is_some(),
            blur.level()
        );

        match kind {
            MediaKind::Image => self.handle_image(&request, mask_bytes.as_deref(), blur),
            MediaKind::Video => self.handle_video(&request, mask_bytes.as_deref(), blur),
        }
    }

    fn validate(&self, request: &ProcessRequest) -> Result<MediaKind, RequestError> {
        if request.media.file_name.is_empty() {
            return Err(RequestError::MissingFile);
        }
        if request.media.bytes.len() as u64 > self.config.max_upload_bytes {
            return Err(RequestError::TooLarge {
                limit: self.config.max_upload_bytes,
            });
        }
        MediaKind::from_file_name(&request.media.file_name)
            .ok_or_else(|| RequestError::UnsupportedType(mime_type_for(&request.media.file_name)))
    }

    fn handle_image(
        &self,
        request: &ProcessRequest,
        mask_bytes: Option<&[u8]>,
        blur: BlurLevel,
    ) -> HandlerReply {
        let preset = self.config.preset;
        let use_case = ProcessImageUseCase::new(
            Box::new(MemoryImageCodec::new()),
            MaskNormalizer::new(preset.mask_threshold),
            Box::new(TeleaInpainter::new(preset.inpaint_radius)),
            Box::new(GaussianBlurrer::new(blur)),
            blur,
        );

        let result = use_case.execute(&request.media.bytes, mask_bytes);
        let mask_provided = mask_bytes.is_some();
        let status = derive_status(&result.report, mask_provided);

        // Image failures still answer 200: the response carries the original
        // bytes and an error-tagged message instead of an HTTP failure.
        HandlerReply {
            http_status: 200,
            body: ApiResponse {
                status,
                message: result.report.message.clone(),
                details: Some(self.details(request, &result.report, mask_provided, blur, false)),
                result_image_data: Some(format!(
                    "data:image/png;base64,{}",
                    STANDARD.encode(&result.bytes)
                )),
                result_video_url: None,
                result_filename: None,
            },
        }
    }

    fn handle_video(
        &self,
        request: &ProcessRequest,
        mask_bytes: Option<&[u8]>,
        blur: BlurLevel,
    ) -> HandlerReply {
        // Keep the original extension so ffmpeg can probe the container; the
        // temp file deletes itself on every exit path.
        let suffix = Path::new(&request.media.file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{ext}"))
            .unwrap_or_else(|| ".tmp".to_string());

        let temp_input = tempfile::Builder::new()
            .suffix(&suffix)
            .tempfile_in(&self.config.output_dir);
        let mut temp_input = match temp_input {
            Ok(file) => file,
            Err(err) => {
                log::error!("could not create temporary upload file: {err}");
                return self.internal_error();
            }
        };
        if let Err(err) = temp_input.write_all(&request.media.bytes) {
            log::error!("could not persist upload: {err}");
            return self.internal_error();
        }

        let output_name = format!("{}.{}", Uuid::new_v4(), OUTPUT_VIDEO_EXTENSION);
        let output_path = self.config.output_dir.join(&output_name);

        let preset = self.config.preset;
        let mut use_case = ProcessVideoUseCase::new(
            Box::new(FfmpegReader::new()),
            Box::new(FfmpegWriter::new()),
            MaskNormalizer::new(preset.mask_threshold),
            Box::new(TeleaInpainter::new(preset.inpaint_radius)),
            Box::new(GaussianBlurrer::new(blur)),
            blur,
            Box::new(StdoutPipelineLogger::default()),
        );

        let mask_provided = mask_bytes.is_some();
        match use_case.execute(temp_input.path(), &output_path, mask_bytes) {
            Ok(report) => HandlerReply {
                http_status: 200,
                body: ApiResponse {
                    status: derive_status(&report, mask_provided),
                    message: report.message.clone(),
                    details: Some(self.details(request, &report, mask_provided, blur, true)),
                    result_image_data: None,
                    result_video_url: Some(format!("/output/{output_name}")),
                    result_filename: Some(output_name),
                },
            },
            Err(err) => {
                // The pipeline has already removed any partial output.
                log::error!("video processing failed: {err}");
                let report =
                    ProcessingReport::failure(format!("Error during video processing: {err}"));
                HandlerReply {
                    http_status: 500,
                    body: ApiResponse {
                        status: ResponseStatus::Error,
                        message: report.message.clone(),
                        details: Some(self.details(request, &report, mask_provided, blur, true)),
                        result_image_data: None,
                        result_video_url: None,
                        result_filename: None,
                    },
                }
            }
        }
    }

    fn details(
        &self,
        request: &ProcessRequest,
        report: &ProcessingReport,
        mask_provided: bool,
        blur: BlurLevel,
        is_video: bool,
    ) -> ResponseDetails {
        ResponseDetails {
            processing_method: report.method.clone(),
            input_filename: request.media.file_name.clone(),
            input_mimetype: mime_type_for(&request.media.file_name),
            is_video,
            mask_provided,
            blur_applied: report.blur_applied,
            blur_level: blur.level(),
            disclaimer: DISCLAIMER,
        }
    }

    /// Opaque 500: internals are logged, never sent to the client.
    fn internal_error(&self) -> HandlerReply {
        HandlerReply {
            http_status: 500,
            body: ApiResponse::rejection("An unexpected server error occurred."),
        }
    }
}
