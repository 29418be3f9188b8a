use ndarray::ArrayView2;

/// A binary inpainting mask: one byte per pixel, values strictly 0 or 255.
///
/// White (255) marks pixels to reconstruct, black (0) pixels to keep. Always
/// the same dimensions as the frame it applies to; built once per request by
/// the normalizer and never mutated afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct StaticMask {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl StaticMask {
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize),
            "mask length must equal width * height"
        );
        debug_assert!(
            data.iter().all(|&v| v == 0 || v == 255),
            "mask values must be binarized to 0 or 255"
        );
        Self {
            data,
            width,
            height,
        }
    }

    /// All-black mask of the given size; inpainting with it is a no-op.
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            data: vec![0; (width as usize) * (height as usize)],
            width,
            height,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels marked for reconstruction.
    pub fn coverage(&self) -> usize {
        self.data.iter().filter(|&&v| v > 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.coverage() == 0
    }

    /// (height, width) view of the mask data.
    pub fn as_ndarray(&self) -> ArrayView2<'_, u8> {
        ArrayView2::from_shape((self.height as usize, self.width as usize), &self.data)
            .expect("mask length must match dimensions")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_mask_has_zero_coverage() {
        let mask = StaticMask::empty(8, 4);
        assert_eq!(mask.width(), 8);
        assert_eq!(mask.height(), 4);
        assert_eq!(mask.coverage(), 0);
        assert!(mask.is_empty());
    }

    #[test]
    fn test_coverage_counts_white_pixels() {
        let mut data = vec![0u8; 16];
        data[3] = 255;
        data[9] = 255;
        let mask = StaticMask::new(data, 4, 4);
        assert_eq!(mask.coverage(), 2);
        assert!(!mask.is_empty());
    }

    #[test]
    fn test_as_ndarray_is_row_major() {
        let mut data = vec![0u8; 12];
        data[4 * 1 + 2] = 255; // row 1, col 2 of a 4-wide mask
        let mask = StaticMask::new(data, 4, 3);
        let view = mask.as_ndarray();
        assert_eq!(view.shape(), &[3, 4]);
        assert_eq!(view[[1, 2]], 255);
        assert_eq!(view[[2, 1]], 0);
    }

    #[test]
    #[should_panic(expected = "mask values must be binarized")]
    fn test_non_binary_values_panic_in_debug() {
        StaticMask::new(vec![0, 128, 255, 0], 2, 2);
    }
}
