use crate::blurring::domain::blur_level::BlurLevel;
use crate::blurring::domain::frame_blurrer::FrameBlurrer;
use crate::inpainting::domain::frame_inpainter::FrameInpainter;
use crate::masking::infrastructure::mask_normalizer::MaskNormalizer;
use crate::pipeline::report::{image_report, ImageResult, ProcessingReport};
use crate::video::domain::image_codec::ImageCodec;

/// Single-image pipeline: decode → normalize mask → inpaint → blur → encode.
///
/// Never propagates an error past `execute`: any decode, inpaint, blur, or
/// encode failure returns the original input bytes with a failure-tagged
/// report, so the caller always has a displayable result.
pub struct ProcessImageUseCase {
    codec: Box<dyn ImageCodec>,
    normalizer: MaskNormalizer,
    inpainter: Box<dyn FrameInpainter>,
    blurrer: Box<dyn FrameBlurrer>,
    blur: BlurLevel,
}

impl ProcessImageUseCase {
    pub fn new(
        codec: Box<dyn ImageCodec>,
        normalizer: MaskNormalizer,
        inpainter: Box<dyn FrameInpainter>,
        blurrer: Box<dyn FrameBlurrer>,
        blur: BlurLevel,
    ) -> Self {
        Self {
            codec,
            normalizer,
            inpainter,
            blurrer,
            blur,
        }
    }

    pub fn execute(&self, image_bytes: &[u8], mask_bytes: Option<&[u8]>) -> ImageResult {
        match self.process(image_bytes, mask_bytes) {
            Ok(result) => result,
            Err(err) => {
                log::error!("image processing failed: {err}");
                ImageResult {
                    bytes: image_bytes.to_vec(),
                    report: ProcessingReport::failure(format!(
                        "Error processing image: {err}. Returning original."
                    )),
                }
            }
        }
    }

    fn process(
        &self,
        image_bytes: &[u8],
        mask_bytes: Option<&[u8]>,
    ) -> Result<ImageResult, Box<dyn std::error::Error>> {
        let mut frame = self.codec.decode(image_bytes)?;
        log::debug!("decoded input image: {}x{}", frame.width(), frame.height());

        let outcome = self
            .normalizer
            .normalize(mask_bytes, frame.width(), frame.height());

        if let Some(mask) = outcome.mask() {
            self.inpainter.inpaint(&mut frame, mask)?;
        }

        if self.blur.is_enabled() {
            self.blurrer.blur(&mut frame)?;
        }

        let bytes = self.codec.encode_png(&frame)?;
        Ok(ImageResult {
            bytes,
            report: image_report(&outcome, self.blur),
        })
    }
}
