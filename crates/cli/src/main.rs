use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use maskout_core::blurring::domain::blur_level::BlurLevel;
use maskout_core::blurring::infrastructure::gaussian_blurrer::GaussianBlurrer;
use maskout_core::inpainting::infrastructure::telea_inpainter::TeleaInpainter;
use maskout_core::masking::infrastructure::mask_normalizer::MaskNormalizer;
use maskout_core::pipeline::pipeline_logger::StdoutPipelineLogger;
use maskout_core::pipeline::preset::PipelinePreset;
use maskout_core::pipeline::process_image_use_case::ProcessImageUseCase;
use maskout_core::pipeline::process_video_use_case::ProcessVideoUseCase;
use maskout_core::shared::constants::{IMAGE_EXTENSIONS, MAX_BLUR_LEVEL};
use maskout_core::video::infrastructure::ffmpeg_reader::FfmpegReader;
use maskout_core::video::infrastructure::ffmpeg_writer::FfmpegWriter;
use maskout_core::video::infrastructure::memory_image_codec::MemoryImageCodec;

/// Mask-based object removal for images and videos.
#[derive(Parser)]
#[command(name = "maskout")]
struct Cli {
    /// Input image or video file.
    input: PathBuf,

    /// Output file (PNG for images, MP4 for videos).
    output: PathBuf,

    /// PNG mask: white pixels are removed and filled from their surround.
    #[arg(long)]
    mask: Option<PathBuf>,

    /// Gaussian blur level (0-50, kernel size is 2*level+1; 0 = off).
    #[arg(long, default_value = "0")]
    blur: i64,

    /// Pipeline preset: strict or permissive.
    #[arg(long, default_value = "strict")]
    preset: String,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let preset = PipelinePreset::from_name(&cli.preset).unwrap();
    let blur = BlurLevel::clamped(cli.blur);
    let mask_bytes = match &cli.mask {
        Some(path) => Some(std::fs::read(path)?),
        None => None,
    };

    if is_image(&cli.input) {
        run_image(&cli.input, &cli.output, mask_bytes.as_deref(), blur, preset)
    } else {
        run_video(&cli.input, &cli.output, mask_bytes.as_deref(), blur, preset)
    }
}

fn run_image(
    input: &Path,
    output: &Path,
    mask_bytes: Option<&[u8]>,
    blur: BlurLevel,
    preset: PipelinePreset,
) -> Result<(), Box<dyn std::error::Error>> {
    let image_bytes = std::fs::read(input)?;

    let use_case = ProcessImageUseCase::new(
        Box::new(MemoryImageCodec::new()),
        MaskNormalizer::new(preset.mask_threshold),
        Box::new(TeleaInpainter::new(preset.inpaint_radius)),
        Box::new(GaussianBlurrer::new(blur)),
        blur,
    );

    let result = use_case.execute(&image_bytes, mask_bytes);
    if result.report.failed {
        return Err(result.report.message.into());
    }

    std::fs::write(output, &result.bytes)?;
    log::info!("{}", result.report.message);
    log::info!("Output written to {}", output.display());
    Ok(())
}

fn run_video(
    input: &Path,
    output: &Path,
    mask_bytes: Option<&[u8]>,
    blur: BlurLevel,
    preset: PipelinePreset,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut use_case = ProcessVideoUseCase::new(
        Box::new(FfmpegReader::new()),
        Box::new(FfmpegWriter::new()),
        MaskNormalizer::new(preset.mask_threshold),
        Box::new(TeleaInpainter::new(preset.inpaint_radius)),
        Box::new(GaussianBlurrer::new(blur)),
        blur,
        Box::new(StdoutPipelineLogger::default()),
    );

    let report = use_case.execute(input, output, mask_bytes)?;
    log::info!("{}", report.message);
    log::info!("Output written to {}", output.display());
    Ok(())
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.input.exists() {
        return Err(format!("Input file not found: {}", cli.input.display()).into());
    }
    if let Some(mask) = &cli.mask {
        if !mask.exists() {
            return Err(format!("Mask file not found: {}", mask.display()).into());
        }
    }
    if !(0..=MAX_BLUR_LEVEL as i64).contains(&cli.blur) {
        return Err(format!(
            "Blur level must be between 0 and {MAX_BLUR_LEVEL}, got {}",
            cli.blur
        )
        .into());
    }
    if PipelinePreset::from_name(&cli.preset).is_none() {
        return Err(format!(
            "Preset must be 'strict' or 'permissive', got '{}'",
            cli.preset
        )
        .into());
    }
    Ok(())
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
