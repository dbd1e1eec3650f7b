//! Image-to-audio synthesis command.

use std::path::PathBuf;

use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};

use espectro_analysis::{ImageSynthesizer, export};
use espectro_core::{CancelToken, SampleStore};
use espectro_io::pcm;

#[derive(Args)]
pub struct SynthArgs {
    /// Input PPM power image (one column per time step, row 0 = highest
    /// frequency)
    #[arg(value_name = "IMAGE")]
    input: PathBuf,

    /// Output WAV file (defaults to the input with a .wav extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Fraction of a transform segment kept per image column
    #[arg(long, default_value = "0.5")]
    overlap: f64,

    /// Sample rate of the synthesized audio in Hz
    #[arg(long, default_value = "44100")]
    rate: u32,
}

pub fn run(args: SynthArgs, cancel: &CancelToken) -> anyhow::Result<()> {
    anyhow::ensure!(
        args.overlap > 0.0 && args.overlap <= 1.0,
        "overlap must be in (0, 1]"
    );
    anyhow::ensure!(args.rate > 0, "sample rate must be positive");

    tracing::debug!(overlap = args.overlap, rate = args.rate, "synth settings");

    println!("Reading {}...", args.input.display());
    let image = export::read_ppm(&args.input)?;
    println!(
        "  {} columns x {} bins",
        image.width(),
        image.height()
    );

    let synth = ImageSynthesizer::new(args.overlap);
    let total = image.width();
    println!(
        "Synthesizing {} samples (random phase)...",
        synth.samples_per_column(image.height()) * total
    );

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .unwrap()
            .progress_chars("##-"),
    );

    let store = synth.synthesize(&image, cancel, |done, _| {
        pb.set_position(done as u64);
    })?;
    pb.finish_with_message("done");

    let output = args
        .output
        .unwrap_or_else(|| args.input.with_extension("wav"));
    pcm::write_wav16(&store, args.rate, &output)?;
    println!(
        "Wrote {} ({:.2}s at {} Hz)",
        output.display(),
        store.len() as f64 / f64::from(args.rate),
        args.rate
    );

    Ok(())
}
