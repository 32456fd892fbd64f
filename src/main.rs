mod config;
mod error;
mod extract;
mod ffmpeg_decoder;
mod output;
mod transcribe;
mod walker;

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

use crate::extract::FfmpegExtractor;
use crate::transcribe::whisper_cpp::Whisper;
use crate::walker::Walker;

#[derive(Parser)]
#[command(name = "autosrt", version)]
#[command(about = "Generate subtitles for videos in a folder", long_about = None)]
struct Cli {
    /// Path to the folder containing video files
    folder: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let app_config = config::load_app_config().context("Failed to load app config")?;
    let model_path = app_config.model_path()?;

    let whisper = Whisper::new(
        &model_path,
        app_config.language(),
        app_config.whisper.clone(),
    )
    .with_context(|| format!("Failed to load whisper model {:?}", model_path))?;
    log::info!("Whisper model loaded.");

    let mut walker = Walker::new(FfmpegExtractor, whisper);
    let summary = walker
        .process(&cli.folder)
        .with_context(|| format!("Failed to process {:?}", cli.folder))?;

    log::info!(
        "Done: {} video(s) subtitled, {} failed",
        summary.processed,
        summary.failed
    );

    Ok(())
}
