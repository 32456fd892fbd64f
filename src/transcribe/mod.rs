pub mod whisper_cpp;

use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptSegment {
    pub index: usize,
    pub start: f64, // seconds
    pub end: f64,   // seconds
    pub text: String,
}

/// Turns an audio file into ordered, timed text segments.
pub trait Transcriber {
    fn transcribe(&mut self, audio: &Path) -> anyhow::Result<Vec<TranscriptSegment>>;
}
