use serde::{Deserialize, Serialize};

use crate::AnalysisError;

/// A single dominant-tempo estimate for one piece of audio. Immutable once
/// created; owned by whoever requested the analysis.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct TempoEstimate {
    /// Beats per minute.
    pub bpm: f32,
}

impl TempoEstimate {
    pub fn new(bpm: f32) -> Result<Self, AnalysisError> {
        if !(bpm.is_finite() && bpm > 0.0) {
            return Err(AnalysisError::invalid_params(
                "tempo estimate must be finite and positive",
            ));
        }
        Ok(Self { bpm })
    }
}
