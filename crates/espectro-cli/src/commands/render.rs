//! Audio-to-spectrogram rendering command.

use std::path::PathBuf;

use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;

use espectro_analysis::{
    SpectrogramRenderer, SpectrumEngine, SpectrumMode, WindowFunction, export,
};
use espectro_core::CancelToken;
use espectro_io::{StorageMode, load_signal};

#[derive(Args)]
pub struct RenderArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output PPM image (defaults to the input with a .ppm extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Frequency bins per spectrum (image height)
    #[arg(long)]
    bins: Option<usize>,

    /// Fraction of a transform segment advanced between spectra
    #[arg(long)]
    overlap: Option<f64>,

    /// Window function (rectangular, hann, hamming, blackman, ...)
    #[arg(long)]
    window: Option<String>,

    /// Use a logarithmic frequency axis
    #[arg(long)]
    log_axis: bool,

    /// Render phase instead of power
    #[arg(long)]
    phase: bool,

    /// Stream samples through a disk-backed store instead of RAM
    #[arg(long)]
    disk: bool,

    /// Render settings file (TOML); explicit flags override it
    #[arg(short, long)]
    preset: Option<PathBuf>,
}

/// Render settings loadable from a TOML preset file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RenderPreset {
    bins: Option<usize>,
    overlap: Option<f64>,
    window: Option<String>,
    log_axis: Option<bool>,
    phase: Option<bool>,
}

pub fn run(args: RenderArgs, cancel: &CancelToken) -> anyhow::Result<()> {
    let preset = match &args.preset {
        Some(path) => toml::from_str(&std::fs::read_to_string(path)?)?,
        None => RenderPreset::default(),
    };

    let bins = args.bins.or(preset.bins).unwrap_or(512);
    let overlap = args.overlap.or(preset.overlap).unwrap_or(0.5);
    let window_name = args
        .window
        .or(preset.window)
        .unwrap_or_else(|| "hann".to_string());
    let window: WindowFunction = window_name
        .parse()
        .map_err(|err: String| anyhow::anyhow!(err))?;
    let log_axis = args.log_axis || preset.log_axis.unwrap_or(false);
    let mode = if args.phase || preset.phase.unwrap_or(false) {
        SpectrumMode::Phase
    } else {
        SpectrumMode::Power
    };
    anyhow::ensure!(bins >= 2, "bins must be >= 2");
    anyhow::ensure!(
        overlap > 0.0 && overlap <= 1.0,
        "overlap must be in (0, 1]"
    );

    let storage = if args.disk {
        StorageMode::Disk
    } else {
        StorageMode::Memory
    };
    tracing::debug!(bins, overlap, window = window.key(), log_axis, ?storage, "render settings");

    println!("Reading {}...", args.input.display());
    let signal = load_signal(&args.input, storage, cancel)?;
    println!(
        "  {} samples, {} Hz, {:.2}s",
        signal.len(),
        signal.sample_rate(),
        signal.duration_secs()
    );

    let renderer = SpectrogramRenderer::new(bins, overlap, window, mode, log_axis);
    let width = signal.len() / renderer.time_step() + 1;
    println!(
        "Rendering {width}x{bins} spectrogram ({} window, {} axis)...",
        window,
        if log_axis { "log" } else { "linear" }
    );

    let pb = ProgressBar::new(width as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .unwrap()
            .progress_chars("##-"),
    );

    let mut engine = SpectrumEngine::new();
    let image = renderer.render(&mut engine, &signal, cancel, |done, _| {
        pb.set_position(done as u64);
    })?;
    pb.finish_with_message("done");

    let output = args
        .output
        .unwrap_or_else(|| args.input.with_extension("ppm"));
    export::write_ppm(&image, &output)?;
    println!("Wrote {}", output.display());

    Ok(())
}
