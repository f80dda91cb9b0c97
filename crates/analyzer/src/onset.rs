use beatfind_domain::{AnalysisError, TempoParams};

/// Per-frame novelty curve used as a proxy for rhythmic events.
#[derive(Debug, Clone)]
pub struct OnsetEnvelope {
    /// One non-negative novelty value per analysis frame.
    pub values: Vec<f32>,
    pub frame_length: usize,
    pub hop_length: usize,
}

/// Compute a coarse energy novelty curve: the mean absolute sample value of
/// each frame. No windowing function is applied.
pub fn onset_strength(
    samples: &[f32],
    params: &TempoParams,
) -> Result<OnsetEnvelope, AnalysisError> {
    let frame_length = params.frame_length;
    let hop_length = params.hop_length;
    if samples.len() < frame_length {
        return Err(AnalysisError::InsufficientAudio {
            needed: frame_length,
            got: samples.len(),
        });
    }

    let frame_count = (samples.len() - frame_length) / hop_length + 1;
    let mut values = Vec::with_capacity(frame_count);
    for index in 0..frame_count {
        let start = index * hop_length;
        let frame = &samples[start..start + frame_length];
        let sum: f32 = frame.iter().map(|s| s.abs()).sum();
        values.push(sum / frame_length as f32);
    }

    Ok(OnsetEnvelope {
        values,
        frame_length,
        hop_length,
    })
}
