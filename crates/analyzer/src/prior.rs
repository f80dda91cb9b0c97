use beatfind_domain::TempoParams;

/// BPM candidate for each autocorrelation lag:
/// `bpm(i) = 60 · sample_rate / ((i + 1) · hop_length)`.
///
/// Strictly decreasing in the lag index; lag 0 maps to the highest
/// representable tempo. Callers must ensure sample_rate and hop_length are
/// non-zero.
pub fn tempo_frequencies(win_length: usize, hop_length: usize, sample_rate: u32) -> Vec<f32> {
    (0..win_length)
        .map(|i| 60.0 * sample_rate as f32 / ((i + 1) as f32 * hop_length as f32))
        .collect()
}

/// Log-normal tempo prior: a Gaussian over log2-BPM centered on `start_bpm`
/// with a standard deviation of `std_bpm` octaves. Candidates at or above
/// `max_tempo` are excluded outright with negative infinity; low tempos are
/// penalized but never excluded.
pub fn log_prior(bpms: &[f32], params: &TempoParams) -> Vec<f32> {
    let center = params.start_bpm.log2();
    bpms.iter()
        .map(|&bpm| {
            if params.max_tempo.is_some_and(|max| bpm >= max) {
                f32::NEG_INFINITY
            } else {
                let distance = (bpm.log2() - center) / params.std_bpm;
                -0.5 * distance * distance
            }
        })
        .collect()
}
