use image::imageops::FilterType;

use crate::masking::domain::mask_outcome::{MaskOutcome, MaskSkipReason};
use crate::masking::domain::static_mask::StaticMask;

/// Default binarization threshold (the strict preset).
///
/// Anti-aliased mask strokes carry faint gray edges; requiring > 127 keeps
/// them from activating stray pixels.
pub const DEFAULT_MASK_THRESHOLD: u8 = 127;

/// Turns user-supplied mask bytes into a binary [`StaticMask`] matching the
/// target frame dimensions.
///
/// Decode as grayscale, resize with nearest-neighbor when the dimensions
/// differ (anything smoother would introduce gray edge values that corrupt
/// binarization), binarize against the threshold, and reject masks with no
/// coverage. Every failure mode disables the mask instead of failing the
/// request.
pub struct MaskNormalizer {
    threshold: u8,
}

impl MaskNormalizer {
    pub fn new(threshold: u8) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    pub fn normalize(&self, bytes: Option<&[u8]>, width: u32, height: u32) -> MaskOutcome {
        let Some(bytes) = bytes else {
            return MaskOutcome::Disabled(MaskSkipReason::NotProvided);
        };

        let decoded = match image::load_from_memory(bytes) {
            Ok(img) => img.to_luma8(),
            Err(err) => {
                log::warn!("could not decode mask data: {err}");
                return MaskOutcome::Disabled(MaskSkipReason::Undecodable);
            }
        };

        let gray = if decoded.width() != width || decoded.height() != height {
            log::warn!(
                "resizing mask from {}x{} to {width}x{height}",
                decoded.width(),
                decoded.height()
            );
            image::imageops::resize(&decoded, width, height, FilterType::Nearest)
        } else {
            decoded
        };

        let threshold = self.threshold;
        let data: Vec<u8> = gray
            .into_raw()
            .into_iter()
            .map(|v| if v > threshold { 255 } else { 0 })
            .collect();

        let mask = StaticMask::new(data, width, height);
        if mask.is_empty() {
            log::warn!("mask has no coverage after binarization, skipping inpainting");
            return MaskOutcome::Disabled(MaskSkipReason::NoCoverage);
        }

        MaskOutcome::Applied(mask)
    }
}

impl Default for MaskNormalizer {
    fn default() -> Self {
        Self::new(DEFAULT_MASK_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};
    use rstest::rstest;
    use std::io::Cursor;

    fn png_bytes(img: &GrayImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    fn square_mask_png(size: u32, fill: u8) -> Vec<u8> {
        let img = GrayImage::from_pixel(size, size, Luma([fill]));
        png_bytes(&img)
    }

    #[test]
    fn test_absent_bytes_disable_mask() {
        let outcome = MaskNormalizer::default().normalize(None, 10, 10);
        assert_eq!(outcome, MaskOutcome::Disabled(MaskSkipReason::NotProvided));
    }

    #[test]
    fn test_garbage_bytes_disable_mask() {
        let outcome = MaskNormalizer::default().normalize(Some(b"not a png"), 10, 10);
        assert_eq!(outcome, MaskOutcome::Disabled(MaskSkipReason::Undecodable));
    }

    #[test]
    fn test_all_black_mask_disabled_with_no_coverage() {
        let bytes = square_mask_png(10, 0);
        let outcome = MaskNormalizer::default().normalize(Some(&bytes), 10, 10);
        assert_eq!(outcome, MaskOutcome::Disabled(MaskSkipReason::NoCoverage));
    }

    #[test]
    fn test_white_mask_applied_with_full_coverage() {
        let bytes = square_mask_png(10, 255);
        let outcome = MaskNormalizer::default().normalize(Some(&bytes), 10, 10);
        let mask = outcome.mask().expect("mask should be applied");
        assert_eq!(mask.coverage(), 100);
    }

    #[test]
    fn test_mismatched_mask_is_resized_to_frame_dimensions() {
        let bytes = square_mask_png(32, 255);
        let outcome = MaskNormalizer::default().normalize(Some(&bytes), 10, 6);
        let mask = outcome.mask().expect("mask should be applied");
        assert_eq!(mask.width(), 10);
        assert_eq!(mask.height(), 6);
        assert_eq!(mask.coverage(), 60);
    }

    #[rstest]
    #[case(127, 127, 0)] // at the strict threshold: off
    #[case(127, 128, 255)] // one above: on
    #[case(1, 1, 0)] // at the permissive threshold: off
    #[case(1, 2, 255)] // one above: on
    fn test_threshold_is_exclusive(#[case] threshold: u8, #[case] value: u8, #[case] expected: u8) {
        let bytes = square_mask_png(4, value);
        let outcome = MaskNormalizer::new(threshold).normalize(Some(&bytes), 4, 4);
        match outcome {
            MaskOutcome::Applied(mask) => {
                assert_eq!(expected, 255);
                assert!(mask.data().iter().all(|&v| v == 255));
            }
            MaskOutcome::Disabled(reason) => {
                assert_eq!(expected, 0);
                assert_eq!(reason, MaskSkipReason::NoCoverage);
            }
        }
    }

    #[test]
    fn test_binarization_is_idempotent() {
        // A mask that is already {0, 255} must come through unchanged.
        let mut img = GrayImage::from_pixel(8, 8, Luma([0]));
        for y in 2..6 {
            for x in 2..6 {
                img.put_pixel(x, y, Luma([255]));
            }
        }
        let bytes = png_bytes(&img);

        let normalizer = MaskNormalizer::default();
        let first = normalizer.normalize(Some(&bytes), 8, 8);
        let mask = first.mask().expect("mask should be applied");
        assert_eq!(mask.data(), img.as_raw().as_slice());

        // Round-trip the normalized mask through PNG and normalize again.
        let reencoded =
            png_bytes(&GrayImage::from_raw(8, 8, mask.data().to_vec()).unwrap());
        let second = normalizer.normalize(Some(&reencoded), 8, 8);
        assert_eq!(second.mask().expect("still applied"), mask);
    }

    #[test]
    fn test_gray_speckle_below_strict_threshold_is_dropped() {
        let bytes = square_mask_png(5, 100);
        let strict = MaskNormalizer::default().normalize(Some(&bytes), 5, 5);
        assert_eq!(strict, MaskOutcome::Disabled(MaskSkipReason::NoCoverage));

        let permissive = MaskNormalizer::new(1).normalize(Some(&bytes), 5, 5);
        assert!(permissive.is_applied());
    }
}
