use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser;
use pivotwarp_core::{
    transform, PixelBuffer, ResampleStrategy, TransformParams, WarpError, USAGE,
};
use tracing_subscriber::EnvFilter;

/// Rotate and scale an image about a pivot.
///
/// Transform flags follow the input path:
/// [-a|-angle ANGLE_DEGREES] [-s|-scale SCALE] [-p|-pivot PIVOT_X PIVOT_Y]
#[derive(Parser, Debug)]
#[command(name = "pivotwarp", version)]
struct Cli {
    /// Output image path. Defaults to `<input>.warped.png` next to the input.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Use the scalar reference resampler instead of the lane kernel.
    #[arg(long)]
    reference: bool,

    /// Input image (PNG or JPEG).
    input: PathBuf,

    /// Transform flags.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, num_args = 0..)]
    transform: Vec<String>,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(path) => {
            println!("wrote {}", path.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {err:#}");
            if err
                .downcast_ref::<WarpError>()
                .is_some_and(WarpError::is_usage)
            {
                eprintln!("{USAGE}");
                return ExitCode::from(2);
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<PathBuf> {
    // Arguments are checked before the image is touched.
    let params = TransformParams::from_args(&cli.transform).map_err(WarpError::from)?;
    let strategy = if cli.reference {
        ResampleStrategy::Reference
    } else {
        ResampleStrategy::Vectorized
    };

    let src = load_rgb(&cli.input)?;
    let mut dst = PixelBuffer::blank(src.width, src.height);
    transform(&src.view()?, &mut dst.view_mut()?, &params, strategy)
        .with_context(|| format!("transform '{}'", cli.input.display()))?;

    let out = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output(&cli.input));
    save_rgb(&dst, &out)?;
    Ok(out)
}

fn load_rgb(path: &Path) -> anyhow::Result<PixelBuffer> {
    let img = image::open(path).with_context(|| format!("open image '{}'", path.display()))?;
    Ok(PixelBuffer::from_rgb_image(img.to_rgb8()))
}

fn save_rgb(buffer: &PixelBuffer, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let img = buffer
        .to_rgb_image()
        .context("pixel buffer does not match its dimensions")?;
    img.save(path)
        .with_context(|| format!("write image '{}'", path.display()))
}

fn default_output(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    input.with_file_name(format!("{stem}.warped.png"))
}
