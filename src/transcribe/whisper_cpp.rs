use std::{ffi::c_int, path::Path};

use anyhow::{Result, anyhow};
use indicatif::{ProgressBar, ProgressStyle};
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use crate::{
    config::WhisperConfig,
    ffmpeg_decoder,
    transcribe::{TranscriptSegment, Transcriber},
};

const DEFAULT_BEAM_SIZE: u32 = 5;
const DEFAULT_PATIENCE: f32 = 1.0;

pub struct Whisper {
    ctx: WhisperContext,
    lang: String,
    conf: WhisperConfig,
}

impl Whisper {
    pub fn new<P: AsRef<Path>>(model: P, lang: &str, conf: WhisperConfig) -> Result<Self> {
        let model = model.as_ref();
        if !model.exists() {
            return Err(anyhow!("whisper model not found at {:?}", model));
        }

        let param = WhisperContextParameters::default();
        let ctx = WhisperContext::new_with_params(
            model.to_str().ok_or_else(|| anyhow!("invalid model path"))?,
            param,
        )?;

        Ok(Self {
            ctx,
            lang: lang.to_string(),
            conf,
        })
    }

    fn params(&self, pb: &ProgressBar) -> FullParams<'_, '_> {
        let mut params = FullParams::new(SamplingStrategy::BeamSearch {
            beam_size: self.conf.beam_size.unwrap_or(DEFAULT_BEAM_SIZE) as c_int,
            patience: self.conf.patience.unwrap_or(DEFAULT_PATIENCE),
        });

        params.set_print_special(false);
        params.set_print_progress(false);
        params.set_print_realtime(false);
        params.set_print_timestamps(false);
        params.set_token_timestamps(false);

        params.set_temperature(self.conf.temperature.unwrap_or(0.0));

        params.set_language(Some(self.lang.as_str()));
        if let Some(prompt) = self.conf.initial_prompt.as_ref() {
            params.set_initial_prompt(prompt);
        }

        let pb = pb.clone();
        params.set_progress_callback_safe(move |progress: i32| {
            pb.set_position(progress.clamp(0, 100) as u64);
        });

        params
    }
}

impl Transcriber for Whisper {
    fn transcribe(&mut self, audio: &Path) -> Result<Vec<TranscriptSegment>> {
        let samples = ffmpeg_decoder::read_file(audio)?;

        let pb = ProgressBar::new(100);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}% ({eta})")?
                .progress_chars("#>-"),
        );

        let params = self.params(&pb);
        let mut state = self.ctx.create_state()?;
        state.full(params, &samples)?;
        pb.finish_and_clear();

        let mut segments = Vec::with_capacity(state.full_n_segments().max(0) as usize);

        // whisper timestamps are in centiseconds
        for (index, segment) in state.as_iter().enumerate() {
            let text = segment.to_str_lossy()?.to_string();
            segments.push(TranscriptSegment {
                index,
                start: segment.start_timestamp() as f64 / 100.0,
                end: segment.end_timestamp() as f64 / 100.0,
                text,
            });
        }

        Ok(segments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn missing_model_is_an_error() {
        let result = Whisper::new("/nonexistent/ggml-base.bin", "auto", WhisperConfig::default());
        assert!(result.is_err());
    }

    #[test]
    #[ignore] // needs ffmpeg, a ggml model and a sample clip
    fn transcribes_sample_audio() {
        let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap();
        let root = PathBuf::from(manifest_dir);
        let model = std::env::var("AUTOSRT_TEST_MODEL")
            .map(PathBuf::from)
            .unwrap_or_else(|_| root.join("models/ggml-base.bin"));
        let audio = root.join("testdata/harvard.wav");

        if !model.exists() || !audio.exists() {
            eprintln!("Skipping test: model or audio not found");
            return;
        }

        let mut whisper = Whisper::new(&model, "en", WhisperConfig::default()).unwrap();
        let segments = whisper.transcribe(&audio).unwrap();

        assert!(!segments.is_empty(), "Should return at least one segment");
        for (i, segment) in segments.iter().enumerate() {
            assert_eq!(segment.index, i);
            assert!(segment.start <= segment.end);
        }
    }
}
