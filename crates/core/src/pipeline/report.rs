use crate::blurring::domain::blur_level::BlurLevel;
use crate::masking::domain::mask_outcome::{MaskOutcome, MaskSkipReason};

/// Outcome of one processing run, shaped for response assembly.
///
/// Built once when a pipeline finishes (or fails) and never mutated.
#[derive(Clone, Debug, PartialEq)]
pub struct ProcessingReport {
    /// Human-readable status message.
    pub message: String,
    /// Short processing-method label for the response details.
    pub method: String,
    pub mask_applied: bool,
    pub blur_applied: bool,
    pub failed: bool,
}

impl ProcessingReport {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            method: "Error".to_string(),
            mask_applied: false,
            blur_applied: false,
            failed: true,
        }
    }
}

/// Result of the image pipeline: output bytes plus the report. On failure the
/// bytes are the unmodified input, so there is always something to display.
#[derive(Clone, Debug)]
pub struct ImageResult {
    pub bytes: Vec<u8>,
    pub report: ProcessingReport,
}

/// Composes the image pipeline's report from what actually ran.
pub fn image_report(mask: &MaskOutcome, blur: BlurLevel) -> ProcessingReport {
    let mut message = String::new();
    let mut method;

    match mask {
        MaskOutcome::Applied(_) => {
            message.push_str("Image inpainting complete. ");
            method = "Telea Inpainting".to_string();
        }
        MaskOutcome::Disabled(MaskSkipReason::NotProvided) => {
            message.push_str("No mask provided; inpainting skipped. ");
            method = "No Mask / Skipped Inpainting".to_string();
        }
        MaskOutcome::Disabled(_) => {
            message.push_str("Invalid or empty mask provided; inpainting skipped. ");
            method = "No Mask / Skipped Inpainting".to_string();
        }
    }

    append_blur_parts(&mut message, &mut method, blur);

    if mask.is_applied() {
        message.push_str(" Artifacts may be present.");
    }

    ProcessingReport {
        message,
        method,
        mask_applied: mask.is_applied(),
        blur_applied: blur.is_enabled(),
        failed: false,
    }
}

/// Composes the video pipeline's report.
pub fn video_report(mask: &MaskOutcome, blur: BlurLevel) -> ProcessingReport {
    let mut message = String::new();
    let mut method;

    if mask.is_applied() {
        message.push_str("Video inpainting (static mask) complete. ");
        method = "Static Mask Telea Inpainting".to_string();
    } else {
        message.push_str("Video processing complete (no mask applied). ");
        method = "No Mask / Skipped Inpainting".to_string();
    }

    append_blur_parts(&mut message, &mut method, blur);

    if mask.is_applied() {
        message.push_str(" Artifacts likely, especially with motion.");
    }

    ProcessingReport {
        message,
        method,
        mask_applied: mask.is_applied(),
        blur_applied: blur.is_enabled(),
        failed: false,
    }
}

fn append_blur_parts(message: &mut String, method: &mut String, blur: BlurLevel) {
    if blur.is_enabled() {
        let k = blur.kernel_size();
        message.push_str(&format!("Applied blur ({k}x{k})."));
        method.push_str(&format!(" + Blur({k}x{k})"));
    } else {
        message.push_str("No blur applied.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::masking::domain::static_mask::StaticMask;

    fn applied_mask() -> MaskOutcome {
        MaskOutcome::Applied(StaticMask::new(vec![255; 4], 2, 2))
    }

    #[test]
    fn test_image_report_with_mask_and_blur() {
        let report = image_report(&applied_mask(), BlurLevel::clamped(10));
        assert!(report.mask_applied);
        assert!(report.blur_applied);
        assert!(!report.failed);
        assert!(report.message.contains("inpainting complete"));
        assert!(report.message.contains("21x21"));
        assert!(report.message.contains("Artifacts"));
        assert!(report.method.contains("Blur(21x21)"));
    }

    #[test]
    fn test_image_report_without_mask_or_blur() {
        let report = image_report(
            &MaskOutcome::Disabled(MaskSkipReason::NotProvided),
            BlurLevel::DISABLED,
        );
        assert!(!report.mask_applied);
        assert!(!report.blur_applied);
        assert!(report.message.contains("No mask provided"));
        assert!(report.message.contains("No blur applied"));
        assert!(!report.message.contains("Artifacts"));
    }

    #[test]
    fn test_image_report_distinguishes_invalid_from_absent_mask() {
        let absent = image_report(
            &MaskOutcome::Disabled(MaskSkipReason::NotProvided),
            BlurLevel::DISABLED,
        );
        let invalid = image_report(
            &MaskOutcome::Disabled(MaskSkipReason::Undecodable),
            BlurLevel::DISABLED,
        );
        assert_ne!(absent.message, invalid.message);
    }

    #[test]
    fn test_video_report_mentions_motion_artifacts_only_with_mask() {
        let with_mask = video_report(&applied_mask(), BlurLevel::DISABLED);
        assert!(with_mask.message.contains("motion"));

        let without = video_report(
            &MaskOutcome::Disabled(MaskSkipReason::NoCoverage),
            BlurLevel::DISABLED,
        );
        assert!(!without.message.contains("motion"));
        assert!(without.message.contains("no mask applied"));
    }

    #[test]
    fn test_failure_report() {
        let report = ProcessingReport::failure("Error processing image: boom");
        assert!(report.failed);
        assert_eq!(report.method, "Error");
        assert!(!report.mask_applied);
    }
}
