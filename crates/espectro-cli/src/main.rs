//! Espectro CLI - Render spectrogram images from audio and synthesize
//! audio back from power images.

mod commands;

use clap::{Parser, Subcommand};
use espectro_core::CancelToken;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "espectro")]
#[command(author, version, about = "Espectro spectrogram toolkit CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display audio file information
    Info(commands::info::InfoArgs),

    /// Render an audio file to a spectrogram image
    Render(commands::render::RenderArgs),

    /// Synthesize audio from a spectrogram power image
    Synth(commands::synth::SynthArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let cli = Cli::parse();

    // Ctrl-C flips the shared cancel flag; long operations poll it and
    // abort without leaving partial output behind.
    let cancel = CancelToken::new();
    let handler = cancel.clone();
    ctrlc::set_handler(move || handler.cancel())?;

    match cli.command {
        Commands::Info(args) => commands::info::run(args),
        Commands::Render(args) => commands::render::run(args, &cancel),
        Commands::Synth(args) => commands::synth::run(args, &cancel),
    }
}
