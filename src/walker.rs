use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use walkdir::WalkDir;

use crate::error::PipelineError;
use crate::extract::AudioExtractor;
use crate::output::{self, SUBTITLE_EXTENSION, SubtitleWriter};
use crate::transcribe::Transcriber;

pub const VIDEO_SUFFIX: &str = ".mp4";
/// Created under the scanned root. Subtitles are still written next to
/// each video, not in here.
pub const SUBTITLE_DIR: &str = "SrtFiles";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub processed: usize,
    pub failed: usize,
}

/// Drives one video-to-subtitle pipeline per video file under a folder.
pub struct Walker<E, T> {
    extractor: E,
    transcriber: T,
}

pub fn subtitle_path_for(video: &Path) -> PathBuf {
    video.with_extension(SUBTITLE_EXTENSION)
}

fn is_video(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.as_encoded_bytes().ends_with(VIDEO_SUFFIX.as_bytes()))
}

impl<E: AudioExtractor, T: Transcriber> Walker<E, T> {
    pub fn new(extractor: E, transcriber: T) -> Self {
        Self {
            extractor,
            transcriber,
        }
    }

    pub fn process(&mut self, root: &Path) -> Result<RunSummary> {
        if !root.is_dir() {
            return Err(anyhow!("{:?} is not a directory", root));
        }

        let subtitle_dir = root.join(SUBTITLE_DIR);
        std::fs::create_dir_all(&subtitle_dir)
            .with_context(|| format!("Failed to create {:?}", subtitle_dir))?;

        let mut summary = RunSummary::default();

        for entry in WalkDir::new(root) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };
            // symlinks are followed, and broken ones are kept so they fail loudly
            if entry.path().is_dir() || !is_video(entry.path()) {
                continue;
            }

            let video = entry.path();
            match self.process_video(video) {
                Ok(subtitles) => {
                    log::info!("Generated subtitles for {:?} at {:?}", video, subtitles);
                    summary.processed += 1;
                }
                Err(e) => {
                    log::error!("Error processing {:?}: {}", video, e);
                    summary.failed += 1;
                }
            }
        }

        Ok(summary)
    }

    fn process_video(&mut self, video: &Path) -> Result<PathBuf, PipelineError> {
        let audio = self
            .extractor
            .extract(video)
            .map_err(PipelineError::Extraction)?;

        let subtitles = subtitle_path_for(video);
        log::info!("Processing video: {:?}", video);

        let segments = self
            .transcriber
            .transcribe(&audio)
            .map_err(PipelineError::Transcription)?;

        let mut writer = SubtitleWriter::open_append(&subtitles)
            .map_err(|e| PipelineError::io(&subtitles, e))?;
        for segment in &segments {
            writer
                .append(&output::format_segment(segment))
                .map_err(|e| PipelineError::io(&subtitles, e))?;
        }
        writer
            .finish()
            .map_err(|e| PipelineError::io(&subtitles, e))?;

        Ok(subtitles)
    }
}
