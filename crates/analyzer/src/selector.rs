use beatfind_domain::AnalysisError;

/// Pick the lag whose combined score (compressed tempogram strength plus the
/// tempo log-prior) is maximal. The `ln(1 + 1e6·s)` transform tames the
/// dynamic range of the strengths and never sees log(0).
///
/// Strict greater-than comparison means ties keep the first (lowest-lag,
/// highest-BPM) candidate. If every score is negative infinity, no candidate
/// is valid and selection fails instead of defaulting to lag 0.
pub fn select_period(strengths: &[f32], logprior: &[f32]) -> Result<usize, AnalysisError> {
    let mut best: Option<usize> = None;
    let mut best_score = f32::NEG_INFINITY;
    for (lag, (&strength, &prior)) in strengths.iter().zip(logprior).enumerate() {
        // FFT roundoff can leave tiny negative strengths.
        let strength = strength.max(0.0);
        let score = (1e6 * strength).ln_1p() + prior;
        if score > best_score {
            best_score = score;
            best = Some(lag);
        }
    }
    best.ok_or(AnalysisError::NoValidCandidate)
}
