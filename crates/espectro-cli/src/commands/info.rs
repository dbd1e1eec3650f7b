//! Display audio file metadata.

use clap::Args;
use espectro_io::WavDecoder;

/// Display audio file information.
#[derive(Args)]
pub struct InfoArgs {
    /// Path to the WAV file
    pub file: std::path::PathBuf,
}

/// Run the info command.
pub fn run(args: InfoArgs) -> anyhow::Result<()> {
    let decoder = WavDecoder::open(&args.file)?;

    println!("File:        {}", args.file.display());
    println!("Format:      16-bit signed PCM");
    println!("Channels:    {}", decoder.channels());
    println!("Sample Rate: {} Hz", decoder.sample_rate());
    println!(
        "Duration:    {:.3}s ({} samples)",
        decoder.len() as f64 / f64::from(decoder.sample_rate()),
        decoder.len()
    );

    let file_size = std::fs::metadata(&args.file)?.len();
    println!("File Size:   {}", format_bytes(file_size));

    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
