use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use neonscribe::canvas::{DrawingSurface, Point, Snapshot};
use neonscribe::recognize::{GeminiRecognizer, Transcription, TranscriptionClient};
use neonscribe::Config;

#[derive(Parser)]
#[command(name = "neonscribe", about = "Sketch-to-text: freehand strokes to transcribed text")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a scripted stroke sequence and write the snapshot PNG
    Demo {
        /// Output path for the rendered snapshot
        #[arg(long, default_value = "demo.png")]
        output: PathBuf,
    },
    /// Transcribe a PNG image of handwriting via the remote recognizer
    Transcribe {
        /// Path to the image file
        image: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cfg = Config::load("config/neonscribe")?;
    info!("{} starting", cfg.service.name);

    match Cli::parse().command {
        Command::Demo { output } => run_demo(&cfg, &output),
        Command::Transcribe { image } => run_transcribe(&cfg, &image).await,
    }
}

fn run_demo(cfg: &Config, output: &PathBuf) -> Result<()> {
    let suppressed = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let mut surface = DrawingSurface::new(cfg.canvas.width, cfg.canvas.height, suppressed);

    // A zigzag across the surface, sampled the way a pointer would
    let w = cfg.canvas.width as f32;
    let h = cfg.canvas.height as f32;
    surface.begin_stroke(Point::new(w * 0.1, h * 0.7));
    for i in 1..=40 {
        let t = i as f32 / 40.0;
        let x = w * (0.1 + 0.8 * t);
        let y = h * (0.5 + 0.3 * (t * 12.0).sin() * (1.0 - t * 0.5));
        surface.extend_stroke(Point::new(x, y));
    }
    surface.end_stroke();

    let png = surface.snapshot().to_png()?;
    std::fs::write(output, &png)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    info!("Wrote {} ({} bytes)", output.display(), png.len());
    Ok(())
}

async fn run_transcribe(cfg: &Config, image: &PathBuf) -> Result<()> {
    let recognizer = GeminiRecognizer::from_config(&cfg.recognizer)?;
    let client = TranscriptionClient::new(Arc::new(recognizer));

    let loaded = image::open(image)
        .with_context(|| format!("Failed to open {}", image.display()))?
        .to_rgba8();
    let snapshot = Snapshot::from_image(loaded);

    match client.transcribe(&snapshot).await? {
        Transcription::Text(text) => println!("{}", text),
        Transcription::NoTextDetected => println!("(no legible text detected)"),
    }

    Ok(())
}
