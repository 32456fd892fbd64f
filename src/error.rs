use std::path::PathBuf;

use thiserror::Error;

/// Failure of one video's pipeline, by stage.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("audio extraction failed: {0:#}")]
    Extraction(#[source] anyhow::Error),
    #[error("transcription failed: {0:#}")]
    Transcription(#[source] anyhow::Error),
    #[error("failed to write {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PipelineError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PipelineError::Io {
            path: path.into(),
            source,
        }
    }
}
