use crate::masking::infrastructure::mask_normalizer::DEFAULT_MASK_THRESHOLD;

/// Tuning knobs that varied between the two historical pipeline revisions,
/// collapsed into named presets instead of parallel implementations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PipelinePreset {
    /// Mask binarization threshold (exclusive: value > threshold is white).
    pub mask_threshold: u8,
    /// Telea fast-marching search radius.
    pub inpaint_radius: i32,
}

impl PipelinePreset {
    /// Conservative default: anti-aliased mask edges stay off, moderate fill
    /// radius.
    pub const STRICT: PipelinePreset = PipelinePreset {
        mask_threshold: DEFAULT_MASK_THRESHOLD,
        inpaint_radius: 5,
    };

    /// Activates on any non-black mask pixel and samples a wider surround.
    pub const PERMISSIVE: PipelinePreset = PipelinePreset {
        mask_threshold: 1,
        inpaint_radius: 9,
    };

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "strict" => Some(Self::STRICT),
            "permissive" => Some(Self::PERMISSIVE),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        if *self == Self::PERMISSIVE {
            "permissive"
        } else {
            "strict"
        }
    }
}

impl Default for PipelinePreset {
    fn default() -> Self {
        Self::STRICT
    }
}
