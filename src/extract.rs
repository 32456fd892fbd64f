use std::path::{Path, PathBuf};

use anyhow::Result;
use ffmpeg_sidecar::command::FfmpegCommand;

use crate::ffmpeg_decoder::{self, path_str};

pub const AUDIO_SUFFIX: &str = ".mp3";

/// Pulls the audio track out of a video into a file on disk.
pub trait AudioExtractor {
    fn extract(&self, video: &Path) -> Result<PathBuf>;
}

/// `<video-path>.mp3`, next to the video.
pub fn audio_path_for(video: &Path) -> PathBuf {
    let mut path = video.as_os_str().to_owned();
    path.push(AUDIO_SUFFIX);
    PathBuf::from(path)
}

/// Extracts audio with the ffmpeg binary. The mp3 is left in place.
pub struct FfmpegExtractor;

impl AudioExtractor for FfmpegExtractor {
    // ffmpeg -y -i video.mp4 -vn -c:a libmp3lame video.mp4.mp3
    fn extract(&self, video: &Path) -> Result<PathBuf> {
        let audio = audio_path_for(video);

        let mut command = FfmpegCommand::new();
        command
            .hide_banner()
            .overwrite()
            .input(path_str(video)?)
            .args(["-vn", "-c:a", "libmp3lame"])
            .output(path_str(&audio)?);
        ffmpeg_decoder::run(&mut command)?;

        log::debug!("Wrote audio track to {:?}", audio);
        Ok(audio)
    }
}
