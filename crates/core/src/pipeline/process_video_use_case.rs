use std::path::Path;
use std::time::Instant;

use crate::blurring::domain::blur_level::BlurLevel;
use crate::blurring::domain::frame_blurrer::FrameBlurrer;
use crate::inpainting::domain::frame_inpainter::FrameInpainter;
use crate::masking::domain::static_mask::StaticMask;
use crate::masking::infrastructure::mask_normalizer::MaskNormalizer;
use crate::pipeline::error::VideoPipelineError;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::pipeline::report::{video_report, ProcessingReport};
use crate::shared::video_metadata::VideoMetadata;
use crate::video::domain::video_reader::VideoReader;
use crate::video::domain::video_writer::VideoWriter;

/// Whole-video pipeline: one static mask, inpaint then blur on every frame.
///
/// This is a single-use struct: `execute` consumes the owned reader and
/// writer, so calling it twice will fail. Reader and writer are released on
/// every exit path, and a partially written output file never survives a
/// failed run.
pub struct ProcessVideoUseCase {
    reader: Option<Box<dyn VideoReader>>,
    writer: Option<Box<dyn VideoWriter>>,
    normalizer: MaskNormalizer,
    inpainter: Box<dyn FrameInpainter>,
    blurrer: Box<dyn FrameBlurrer>,
    blur: BlurLevel,
    logger: Box<dyn PipelineLogger>,
}

impl ProcessVideoUseCase {
    pub fn new(
        reader: Box<dyn VideoReader>,
        writer: Box<dyn VideoWriter>,
        normalizer: MaskNormalizer,
        inpainter: Box<dyn FrameInpainter>,
        blurrer: Box<dyn FrameBlurrer>,
        blur: BlurLevel,
        logger: Box<dyn PipelineLogger>,
    ) -> Self {
        Self {
            reader: Some(reader),
            writer: Some(writer),
            normalizer,
            inpainter,
            blurrer,
            blur,
            logger,
        }
    }

    /// Processes `input` into `output`, reusing one normalized mask for the
    /// whole stream.
    ///
    /// The mask is normalized here against the stream dimensions; when it is
    /// disabled an all-black mask of the same size is substituted so the
    /// per-frame inpaint call is a guaranteed no-op rather than a branch.
    pub fn execute(
        &mut self,
        input: &Path,
        output: &Path,
        mask_bytes: Option<&[u8]>,
    ) -> Result<ProcessingReport, Box<dyn std::error::Error>> {
        let mut reader = self
            .reader
            .take()
            .ok_or(VideoPipelineError::AlreadyExecuted)?;
        let mut writer = self
            .writer
            .take()
            .ok_or(VideoPipelineError::AlreadyExecuted)?;

        let metadata = reader.open(input)?;
        if metadata.fps <= 0.0 || metadata.width == 0 || metadata.height == 0 {
            reader.close();
            return Err(VideoPipelineError::InvalidStreamProperties {
                width: metadata.width,
                height: metadata.height,
                fps: metadata.fps,
            }
            .into());
        }
        self.logger.info(&format!(
            "input video: {}x{} @ {:.2} fps (~{} frames)",
            metadata.width, metadata.height, metadata.fps, metadata.total_frames
        ));

        let outcome = self
            .normalizer
            .normalize(mask_bytes, metadata.width, metadata.height);
        let mask = match outcome.mask() {
            Some(mask) => mask.clone(),
            None => StaticMask::empty(metadata.width, metadata.height),
        };

        if let Err(err) = writer.open(output, &metadata) {
            reader.close();
            remove_partial_output(output);
            return Err(err);
        }

        let result = self.run_frame_loop(reader.as_mut(), writer.as_mut(), &mask, &metadata);
        reader.close();

        match result {
            Ok(frames) => {
                if let Err(err) = writer.close() {
                    remove_partial_output(output);
                    return Err(err);
                }
                self.logger.info(&format!("finished, {frames} frames written"));
                self.logger.summary();
                Ok(video_report(&outcome, self.blur))
            }
            Err(err) => {
                // Release the writer before deleting what it wrote.
                let _ = writer.close();
                remove_partial_output(output);
                Err(err)
            }
        }
    }

    fn run_frame_loop(
        &mut self,
        reader: &mut dyn VideoReader,
        writer: &mut dyn VideoWriter,
        mask: &StaticMask,
        metadata: &VideoMetadata,
    ) -> Result<usize, Box<dyn std::error::Error>> {
        let mut processed = 0usize;
        for frame in reader.frames() {
            let mut frame = frame?;

            let start = Instant::now();
            self.inpainter.inpaint(&mut frame, mask)?;
            self.logger
                .timing("inpaint", start.elapsed().as_secs_f64() * 1000.0);

            if self.blur.is_enabled() {
                let start = Instant::now();
                self.blurrer.blur(&mut frame)?;
                self.logger
                    .timing("blur", start.elapsed().as_secs_f64() * 1000.0);
            }

            let start = Instant::now();
            writer.write(&frame)?;
            self.logger
                .timing("write", start.elapsed().as_secs_f64() * 1000.0);

            processed += 1;
            self.logger.progress(processed, metadata.total_frames);
        }
        Ok(processed)
    }
}

fn remove_partial_output(output: &Path) {
    if output.exists() {
        match std::fs::remove_file(output) {
            Ok(()) => log::info!("removed incomplete output file {}", output.display()),
            Err(err) => log::warn!(
                "could not remove incomplete output file {}: {err}",
                output.display()
            ),
        }
    }
}
