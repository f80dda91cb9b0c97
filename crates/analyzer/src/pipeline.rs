use std::path::{Path, PathBuf};

use tracing::{instrument, warn};

use beatfind_audio::AudioDecoder;
use beatfind_domain::{AnalysisError, TempoEstimate, TempoParams};

use crate::cancel::CancelToken;
use crate::detector::AutocorrelationDetector;

/// Decode and analyze one file. Synchronous and CPU-bound; the async entry
/// points below dispatch it onto a blocking worker.
pub fn analyze_path(path: &Path, params: &TempoParams) -> Result<TempoEstimate, AnalysisError> {
    analyze_path_with_cancel(path, params, &CancelToken::new())
}

#[instrument(skip(params, cancel))]
pub fn analyze_path_with_cancel(
    path: &Path,
    params: &TempoParams,
    cancel: &CancelToken,
) -> Result<TempoEstimate, AnalysisError> {
    cancel.check()?;
    let detector = AutocorrelationDetector::new(*params)?;
    let track = AudioDecoder::open(path)?;
    detector.detect_with_cancel(&track, cancel)
}

/// Analyze one file on a background worker, returning the typed error.
pub async fn try_analyze_file(
    path: impl Into<PathBuf>,
    params: TempoParams,
) -> Result<TempoEstimate, AnalysisError> {
    let path = path.into();
    match tokio::task::spawn_blocking(move || analyze_path(&path, &params)).await {
        Ok(result) => result,
        Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
        Err(_) => Err(AnalysisError::Cancelled),
    }
}

/// Analyze one file on a background worker. Failures of any kind resolve to
/// `None` after a log line; they never propagate.
pub async fn analyze_file(path: impl Into<PathBuf>, params: TempoParams) -> Option<f32> {
    let path = path.into();
    match try_analyze_file(path.clone(), params).await {
        Ok(estimate) => Some(estimate.bpm),
        Err(err) => {
            warn!(path = ?path, %err, "analysis failed");
            None
        }
    }
}
