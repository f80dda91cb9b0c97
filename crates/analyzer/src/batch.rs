use std::collections::BTreeMap;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{mpsc, Semaphore};
use tracing::{debug, warn};

use beatfind_domain::{AnalysisError, TempoEstimate, TempoParams};

use crate::cancel::CancelToken;
use crate::pipeline;

/// Snapshot delivered after every individual file completion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct BatchProgress {
    pub processed: usize,
    pub total: usize,
}

/// Fans the single-file pipeline out over many files on a bounded worker
/// pool and aggregates the successes. Per-file failures are logged and
/// omitted from the aggregate; they never abort the batch.
pub struct BatchAnalyzer {
    params: TempoParams,
    concurrency: usize,
    cancel: CancelToken,
}

impl BatchAnalyzer {
    pub fn new(params: TempoParams) -> Result<Self, AnalysisError> {
        params.validate()?;
        let concurrency = std::thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(4);
        Ok(Self {
            params,
            concurrency,
            cancel: CancelToken::new(),
        })
    }

    /// Cap the number of files analyzed concurrently. Values below one are
    /// clamped to one.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Token that cancels the remaining work of any running batch. Files not
    /// yet started are skipped; the file currently in a worker stops at its
    /// next stage boundary. Progress accounting still runs to completion.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Analyze every file, invoking `progress` with a strictly increasing
    /// `(processed, total)` pair after each completion, ending at
    /// `(total, total)` exactly once. Returns the successes keyed by path.
    /// Completion order across files is unspecified.
    pub async fn run<F>(&self, files: &[PathBuf], mut progress: F) -> BTreeMap<PathBuf, f32>
    where
        F: FnMut(BatchProgress),
    {
        let total = files.len();
        let mut results = BTreeMap::new();
        if total == 0 {
            return results;
        }

        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let (tx, mut rx) = mpsc::channel::<(PathBuf, Result<TempoEstimate, AnalysisError>)>(
            self.concurrency.max(1),
        );

        for path in files.iter().cloned() {
            let semaphore = Arc::clone(&semaphore);
            let tx = tx.clone();
            let params = self.params;
            let cancel = self.cancel.clone();
            tokio::spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => return,
                };
                let result = if cancel.is_cancelled() {
                    Err(AnalysisError::Cancelled)
                } else {
                    let worker_path = path.clone();
                    match tokio::task::spawn_blocking(move || {
                        pipeline::analyze_path_with_cancel(&worker_path, &params, &cancel)
                    })
                    .await
                    {
                        Ok(result) => result,
                        Err(_) => Err(AnalysisError::Cancelled),
                    }
                };
                // The collector going away means the batch was dropped.
                let _ = tx.send((path, result)).await;
            });
        }
        drop(tx);

        // Single collector owns the results map and the progress callback,
        // so every write is serialized.
        let mut processed = 0;
        while let Some((path, result)) = rx.recv().await {
            processed += 1;
            match result {
                Ok(estimate) => {
                    debug!(path = ?path, bpm = estimate.bpm, "analyzed");
                    results.insert(path, estimate.bpm);
                }
                Err(err) => {
                    warn!(path = ?path, %err, "skipping file");
                }
            }
            progress(BatchProgress { processed, total });
        }
        results
    }
}
