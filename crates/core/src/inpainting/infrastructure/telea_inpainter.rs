use crate::inpainting::domain::frame_inpainter::FrameInpainter;
use crate::masking::domain::static_mask::StaticMask;
use crate::shared::frame::Frame;

/// Default fast-marching search radius (the strict preset).
pub const DEFAULT_INPAINT_RADIUS: i32 = 5;

/// Fills masked regions with Telea's fast-marching method via the `inpaint`
/// crate, propagating color from the surrounding pixels.
///
/// The radius controls how far around a masked pixel known neighbors are
/// sampled; larger values smear more context into the fill.
pub struct TeleaInpainter {
    radius: i32,
}

impl TeleaInpainter {
    pub fn new(radius: i32) -> Self {
        debug_assert!(radius >= 1, "inpaint radius must be positive");
        Self { radius }
    }

    pub fn radius(&self) -> i32 {
        self.radius
    }
}

impl Default for TeleaInpainter {
    fn default() -> Self {
        Self::new(DEFAULT_INPAINT_RADIUS)
    }
}

impl FrameInpainter for TeleaInpainter {
    fn inpaint(
        &self,
        frame: &mut Frame,
        mask: &StaticMask,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if mask.width() != frame.width() || mask.height() != frame.height() {
            return Err(format!(
                "mask dimensions {}x{} do not match frame {}x{}",
                mask.width(),
                mask.height(),
                frame.width(),
                frame.height()
            )
            .into());
        }

        let mut pixels = frame.as_ndarray_mut();
        inpaint::telea_inpaint(&mut pixels, &mask.as_ndarray(), self.radius)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_frame(width: u32, height: u32, rgb: [u8; 3]) -> Frame {
        let mut data = Vec::with_capacity((width * height * 3) as usize);
        for _ in 0..width * height {
            data.extend_from_slice(&rgb);
        }
        Frame::new(data, width, height, 3, 0)
    }

    fn centered_square_mask(size: u32, square: u32) -> StaticMask {
        let mut data = vec![0u8; (size * size) as usize];
        let start = (size - square) / 2;
        for y in start..start + square {
            for x in start..start + square {
                data[(y * size + x) as usize] = 255;
            }
        }
        StaticMask::new(data, size, size)
    }

    #[test]
    fn test_empty_mask_is_a_noop() {
        let mut frame = solid_frame(16, 16, [10, 200, 30]);
        let original = frame.data().to_vec();
        TeleaInpainter::default()
            .inpaint(&mut frame, &StaticMask::empty(16, 16))
            .unwrap();
        assert_eq!(frame.data(), &original[..]);
    }

    #[test]
    fn test_masked_region_filled_from_red_surround() {
        // 32x32 red frame with a white square punched into the middle of the
        // mask: the fill can only propagate red.
        let mut frame = solid_frame(32, 32, [255, 0, 0]);
        // Corrupt the pixels under the mask so the fill has work to do.
        let mask = centered_square_mask(32, 8);
        for y in 12..20 {
            for x in 12..20 {
                let i = (y * 32 + x) * 3;
                frame.data_mut()[i] = 0;
                frame.data_mut()[i + 1] = 255;
                frame.data_mut()[i + 2] = 255;
            }
        }

        TeleaInpainter::default().inpaint(&mut frame, &mask).unwrap();

        for y in 12..20 {
            for x in 12..20 {
                let i = (y * 32 + x) * 3;
                assert!(
                    frame.data()[i] > 200,
                    "pixel ({x},{y}) red channel {} not reconstructed",
                    frame.data()[i]
                );
                assert!(frame.data()[i + 1] < 55);
            }
        }
    }

    #[test]
    fn test_pixels_outside_mask_untouched() {
        let mut frame = solid_frame(24, 24, [40, 80, 120]);
        let original = frame.data().to_vec();
        let mask = centered_square_mask(24, 6);

        TeleaInpainter::default().inpaint(&mut frame, &mask).unwrap();

        // Corners are far from the mask and must be byte-identical.
        for (x, y) in [(0u32, 0u32), (23, 0), (0, 23), (23, 23)] {
            let i = ((y * 24 + x) * 3) as usize;
            assert_eq!(&frame.data()[i..i + 3], &original[i..i + 3]);
        }
    }

    #[test]
    fn test_dimension_mismatch_is_an_error() {
        let mut frame = solid_frame(16, 16, [0, 0, 0]);
        let mask = StaticMask::empty(8, 8);
        let result = TeleaInpainter::default().inpaint(&mut frame, &mask);
        assert!(result.is_err());
    }

    #[test]
    fn test_radius_is_configurable() {
        assert_eq!(TeleaInpainter::new(9).radius(), 9);
        assert_eq!(TeleaInpainter::default().radius(), DEFAULT_INPAINT_RADIUS);
    }
}
