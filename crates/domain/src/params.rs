use serde::{Deserialize, Serialize};

use crate::AnalysisError;

/// Tunable parameters for the tempo pipeline. Every field has a default and
/// every field affects the estimate.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct TempoParams {
    /// Samples per analysis frame for the onset envelope.
    pub frame_length: usize,
    /// Samples advanced between consecutive frames.
    pub hop_length: usize,
    /// Center of the log-normal tempo prior, in BPM.
    pub start_bpm: f32,
    /// Standard deviation of the prior, in octaves of BPM.
    pub std_bpm: f32,
    /// Autocorrelation window size in seconds.
    pub ac_size: f32,
    /// Candidates at or above this BPM are excluded. `None` disables the cutoff.
    pub max_tempo: Option<f32>,
}

impl Default for TempoParams {
    fn default() -> Self {
        Self {
            frame_length: 2048,
            hop_length: 512,
            start_bpm: 120.0,
            std_bpm: 1.0,
            ac_size: 8.0,
            max_tempo: Some(320.0),
        }
    }
}

impl TempoParams {
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.frame_length == 0 {
            return Err(AnalysisError::invalid_params("frame_length must be > 0"));
        }
        if self.hop_length == 0 {
            return Err(AnalysisError::invalid_params("hop_length must be > 0"));
        }
        if !(self.start_bpm.is_finite() && self.start_bpm > 0.0) {
            return Err(AnalysisError::invalid_params(
                "start_bpm must be finite and positive",
            ));
        }
        if !(self.std_bpm.is_finite() && self.std_bpm > 0.0) {
            return Err(AnalysisError::invalid_params(
                "std_bpm must be finite and positive",
            ));
        }
        if !(self.ac_size.is_finite() && self.ac_size > 0.0) {
            return Err(AnalysisError::invalid_params(
                "ac_size must be finite and positive",
            ));
        }
        if let Some(max_tempo) = self.max_tempo {
            if !(max_tempo.is_finite() && max_tempo > 0.0) {
                return Err(AnalysisError::invalid_params(
                    "max_tempo must be finite and positive",
                ));
            }
        }
        Ok(())
    }
}
