use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while analyzing one file. All variants are
/// recoverable at the call site; the public APIs map them to an absent
/// result rather than aborting the batch.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("unsupported format: {0:?}")]
    UnsupportedFormat(String),
    #[error("decode failed: {0}")]
    Decode(String),
    #[error("insufficient audio: got {got} samples, need at least {needed}")]
    InsufficientAudio { needed: usize, got: usize },
    #[error("transform setup failed: {0}")]
    TransformSetup(String),
    #[error("no tempo candidate survived the prior cutoff")]
    NoValidCandidate,
    #[error("invalid parameters: {0}")]
    InvalidParams(String),
    #[error("analysis cancelled")]
    Cancelled,
}

impl AnalysisError {
    pub fn decode<T: Into<String>>(message: T) -> Self {
        Self::Decode(message.into())
    }

    pub fn invalid_params<T: Into<String>>(message: T) -> Self {
        Self::InvalidParams(message.into())
    }
}
