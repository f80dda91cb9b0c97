use beatfind_domain::{AnalysisError, TempoParams};

use crate::autocorr::Autocorrelator;
use crate::onset::OnsetEnvelope;

/// Number of autocorrelation lags kept for tempo candidates:
/// `⌊ac_size · sample_rate / hop_length⌋`.
pub fn window_length(params: &TempoParams, sample_rate: u32) -> usize {
    (params.ac_size * sample_rate as f32 / params.hop_length as f32) as usize
}

/// Autocorrelate the onset envelope and fit the result to exactly
/// `window_length` lags. Envelopes shorter than the window are padded with
/// zeros at the tail (no measured correlation at those lags).
pub fn build(
    envelope: &OnsetEnvelope,
    sample_rate: u32,
    params: &TempoParams,
) -> Result<Vec<f32>, AnalysisError> {
    let win_length = window_length(params, sample_rate);
    if win_length == 0 {
        return Err(AnalysisError::invalid_params(
            "autocorrelation window is empty; increase ac_size",
        ));
    }
    let mut autocorr = Autocorrelator::new().autocorrelate(&envelope.values)?;
    autocorr.resize(win_length, 0.0);
    Ok(autocorr)
}
