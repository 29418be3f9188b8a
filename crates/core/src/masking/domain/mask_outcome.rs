use std::fmt;

use super::static_mask::StaticMask;

/// Result of normalizing user-supplied mask data.
///
/// A mask is either usable or disabled with a diagnostic reason; a bad mask
/// never fails the request, the pipelines just skip inpainting.
#[derive(Clone, Debug, PartialEq)]
pub enum MaskOutcome {
    Applied(StaticMask),
    Disabled(MaskSkipReason),
}

impl MaskOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, MaskOutcome::Applied(_))
    }

    pub fn mask(&self) -> Option<&StaticMask> {
        match self {
            MaskOutcome::Applied(mask) => Some(mask),
            MaskOutcome::Disabled(_) => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MaskSkipReason {
    /// The request carried no mask data at all.
    NotProvided,
    /// Mask bytes were present but could not be decoded as an image.
    Undecodable,
    /// The binarized mask contained no white pixels.
    NoCoverage,
}

impl fmt::Display for MaskSkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaskSkipReason::NotProvided => write!(f, "no mask provided"),
            MaskSkipReason::Undecodable => write!(f, "mask data could not be decoded"),
            MaskSkipReason::NoCoverage => write!(f, "mask was empty (all black)"),
        }
    }
}
