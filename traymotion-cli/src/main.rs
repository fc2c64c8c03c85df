//! Traymotion CLI Tool
//!
//! Command-line shell around the icon pipeline: preview a source, crop and
//! store it as the tray icon, choose a performance profile and play the
//! stored animation.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;
use traymotion_core::{AppPaths, ProfileKind, RawAsset};
use traymotion_encoder::CropRect;
use traymotion_player::{
    runtime, AnimationEngine, ChannelTimer, FileSurface, IconSurface, LogSurface, ManualTimer,
    PlayerEvent,
};

#[derive(Parser)]
#[command(name = "traymotion")]
#[command(about = "Traymotion - animated tray icons from gif, png and jpg images")]
#[command(version)]
struct Cli {
    /// Directory holding settings and the stored icon
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect a file's format and optionally write a preview
    Detect {
        /// Image file to inspect
        input: PathBuf,

        /// Write the preview (first gif frame) as png
        #[arg(long)]
        preview: Option<PathBuf>,
    },

    /// Crop, resize and store a source image as the tray icon
    Save {
        /// Source image (gif, png or jpg)
        source: PathBuf,

        /// Left edge of the crop, in source pixels
        #[arg(long, default_value = "0")]
        x: f64,

        /// Top edge of the crop, in source pixels
        #[arg(long, default_value = "0")]
        y: f64,

        /// Crop width, in source pixels
        #[arg(long)]
        width: f64,

        /// Crop height, in source pixels
        #[arg(long)]
        height: f64,

        /// Icon size in pixels (16-128); defaults to the saved size
        #[arg(long)]
        size: Option<u32>,
    },

    /// List performance profiles or select one
    Profile {
        /// light, balanced or performance
        name: Option<String>,
    },

    /// Show settings and the stored icon
    Status,

    /// Play the stored icon until interrupted
    Play {
        /// Stop after this many seconds
        #[arg(long)]
        seconds: Option<u64>,

        /// Mirror the current frame into this png file
        #[arg(long)]
        mirror: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("traymotion=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let paths = match cli.data_dir {
        Some(dir) => AppPaths::in_dir(dir),
        None => AppPaths::default_location(),
    };

    match cli.command {
        Commands::Detect { input, preview } => detect(input, preview)?,
        Commands::Save {
            source,
            x,
            y,
            width,
            height,
            size,
        } => save(paths, source, CropRect::from_user(x, y, width, height), size)?,
        Commands::Profile { name } => profile(paths, name),
        Commands::Status => status(paths)?,
        Commands::Play { seconds, mirror } => play(paths, seconds, mirror)?,
    }

    Ok(())
}

fn detect(input: PathBuf, preview: Option<PathBuf>) -> Result<()> {
    let asset = RawAsset::read(&input).context("Failed to read input file")?;
    println!("{}: {}", input.display(), asset.format);

    let (_, image) = traymotion_decoder::detect_and_load(&asset.data)
        .context("Failed to decode preview")?;
    println!("Dimensions: {}x{}", image.width(), image.height());

    if let Some(path) = preview {
        image.save(&path).context("Failed to write preview")?;
        println!("Preview written to {}", path.display());
    }
    Ok(())
}

fn save(paths: AppPaths, source: PathBuf, crop: CropRect, size: Option<u32>) -> Result<()> {
    let mut engine = AnimationEngine::new(paths, ManualTimer::new(), LogSurface::new());
    let size = size.unwrap_or(engine.settings().size);

    println!("Processing {}", source.display());
    let result = engine.process_and_save(&source, crop, size);
    engine.shutdown();
    if let Err(e) = &result {
        tracing::error!(source = %source.display(), error = %e, "Save failed, previous icon kept");
    }
    result.context("Failed to save icon")?;

    println!(
        "Saved icon to {} ({}px)",
        engine.paths().asset.display(),
        engine.settings().size
    );
    Ok(())
}

fn profile(paths: AppPaths, name: Option<String>) {
    let mut engine = AnimationEngine::new(paths, ManualTimer::new(), LogSurface::new());

    if let Some(name) = name {
        let kind = engine.select_profile(&name);
        println!("Selected profile: {kind} (run `traymotion play` or save again to apply)");
        return;
    }

    let active = engine.settings().performance_mode;
    for kind in ProfileKind::ALL {
        let profile = kind.profile();
        let marker = if kind == active { "*" } else { " " };
        println!(
            "{} {:<12} {:>2} frames, >= {}ms/frame  {}",
            marker, kind, profile.max_frames, profile.min_frame_delay_ms, profile.description
        );
    }
}

fn status(paths: AppPaths) -> Result<()> {
    let engine = AnimationEngine::new(paths, ManualTimer::new(), LogSurface::new());
    let settings = engine.settings();
    let profile = settings.performance_mode.profile();

    println!("Data directory: {}", engine.paths().data_dir.display());
    println!("Profile: {} ({})", profile.label, profile.description);
    println!("Size: {}px", settings.size);

    if !engine.paths().has_asset() {
        println!("No icon stored yet");
        return Ok(());
    }

    let asset = RawAsset::read(&engine.paths().asset).context("Failed to read stored icon")?;
    let summary = traymotion_decoder::summarize(&asset.data, profile)
        .context("Stored icon is unreadable")?;
    println!(
        "Stored icon: {} {}x{}, {} bytes",
        summary.format,
        summary.width,
        summary.height,
        asset.data_size()
    );
    println!(
        "Frames: {}/{} ({} in file)",
        summary.sampled_frames, profile.max_frames, summary.frame_count
    );
    Ok(())
}

fn play(paths: AppPaths, seconds: Option<u64>, mirror: Option<PathBuf>) -> Result<()> {
    let (tx, rx) = mpsc::channel();
    let surface: Box<dyn IconSurface> = match mirror {
        Some(path) => Box::new(FileSurface::new(path)),
        None => Box::new(LogSurface::new()),
    };
    let mut engine = AnimationEngine::new(paths, ChannelTimer::new(tx.clone()), surface);

    engine.reload().context("Failed to load stored icon")?;
    println!("{}", engine.status());

    let interrupt = tx.clone();
    ctrlc::set_handler(move || {
        tracing::info!("Interrupt received, stopping");
        let _ = interrupt.send(PlayerEvent::Shutdown);
    })
    .context("Failed to install Ctrl-C handler")?;

    if let Some(seconds) = seconds {
        std::thread::spawn(move || {
            std::thread::sleep(Duration::from_secs(seconds));
            tracing::debug!(seconds, "Play time limit reached");
            let _ = tx.send(PlayerEvent::Shutdown);
        });
    }

    let shown = runtime::run(&mut engine, rx);
    println!("Stopped after {shown} frame updates");
    Ok(())
}
