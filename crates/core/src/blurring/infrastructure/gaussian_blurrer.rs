use std::cell::RefCell;

use crate::blurring::domain::blur_level::BlurLevel;
use crate::blurring::domain::frame_blurrer::FrameBlurrer;
use crate::shared::frame::Frame;

use super::gaussian;

/// CPU whole-frame blurrer using a separable Gaussian.
///
/// The kernel is derived once from the blur level (`2 * level + 1`) and
/// reused for every frame of a video; the float scratch buffer is reused
/// across calls as well.
pub struct GaussianBlurrer {
    kernel: Vec<f32>,
    temp: RefCell<Vec<f32>>,
}

impl GaussianBlurrer {
    pub fn new(level: BlurLevel) -> Self {
        Self {
            kernel: gaussian::gaussian_kernel_1d(level.kernel_size()),
            temp: RefCell::new(Vec::new()),
        }
    }

    pub fn kernel_size(&self) -> usize {
        self.kernel.len()
    }
}

impl FrameBlurrer for GaussianBlurrer {
    fn blur(&self, frame: &mut Frame) -> Result<(), Box<dyn std::error::Error>> {
        let width = frame.width() as usize;
        let height = frame.height() as usize;
        let channels = frame.channels() as usize;
        let mut temp = self.temp.borrow_mut();
        gaussian::separable_gaussian_blur_with_kernel(
            frame.data_mut(),
            width,
            height,
            channels,
            &self.kernel,
            &mut temp,
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_frame(width: u32, height: u32, value: u8) -> Frame {
        Frame::new(vec![value; (width * height * 3) as usize], width, height, 3, 0)
    }

    #[test]
    fn test_kernel_size_matches_level() {
        let blurrer = GaussianBlurrer::new(BlurLevel::clamped(10));
        assert_eq!(blurrer.kernel_size(), 21);
    }

    #[test]
    fn test_level_zero_is_identity() {
        let blurrer = GaussianBlurrer::new(BlurLevel::DISABLED);
        let mut frame = make_frame(12, 12, 77);
        frame.data_mut()[0] = 255;
        let original = frame.data().to_vec();
        blurrer.blur(&mut frame).unwrap();
        assert_eq!(frame.data(), &original[..]);
    }

    #[test]
    fn test_blur_smooths_contrast_across_whole_frame() {
        let mut frame = make_frame(20, 20, 0);
        // Bright spots in a corner and in the center; both must be smoothed.
        let corner = (1 * 20 + 1) * 3;
        let center = (10 * 20 + 10) * 3;
        frame.data_mut()[corner] = 255;
        frame.data_mut()[center] = 255;

        let blurrer = GaussianBlurrer::new(BlurLevel::clamped(2));
        blurrer.blur(&mut frame).unwrap();

        assert!(frame.data()[corner] < 255);
        assert!(frame.data()[center] < 255);
        assert!(frame.data()[center + 3] > 0);
    }

    #[test]
    fn test_matches_plain_separable_blur() {
        // GaussianBlurrer must be exactly the separable blur with the derived
        // kernel, nothing more.
        let level = BlurLevel::clamped(3);
        let mut frame = make_frame(16, 16, 0);
        for (i, v) in frame.data_mut().iter_mut().enumerate() {
            *v = ((i * 13) % 256) as u8;
        }
        let mut expected = frame.data().to_vec();

        GaussianBlurrer::new(level).blur(&mut frame).unwrap();
        gaussian::separable_gaussian_blur(&mut expected, 16, 16, 3, level.kernel_size());

        assert_eq!(frame.data(), &expected[..]);
    }

    #[test]
    fn test_reused_blurrer_is_deterministic() {
        let blurrer = GaussianBlurrer::new(BlurLevel::clamped(4));
        let mut first = make_frame(10, 10, 0);
        first.data_mut()[150] = 200;
        let mut second = first.clone();

        blurrer.blur(&mut first).unwrap();
        blurrer.blur(&mut second).unwrap();
        assert_eq!(first.data(), second.data());
    }
}
