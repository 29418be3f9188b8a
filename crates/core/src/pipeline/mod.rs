pub mod error;
pub mod pipeline_logger;
pub mod preset;
pub mod process_image_use_case;
pub mod process_video_use_case;
pub mod report;
