use tracing::debug;

use beatfind_audio::AudioTrack;
use beatfind_domain::{AnalysisError, TempoEstimate, TempoParams};

use crate::cancel::CancelToken;
use crate::onset;
use crate::prior;
use crate::selector;
use crate::tempogram;

/// A strategy that turns decoded audio into a tempo estimate. The shipped
/// implementation is [`AutocorrelationDetector`]; alternative strategies plug
/// in here without touching callers.
pub trait TempoDetector: Send + Sync {
    fn detect(&self, track: &AudioTrack) -> Result<TempoEstimate, AnalysisError>;

    fn name(&self) -> &'static str;
}

/// The core pipeline: onset envelope → autocorrelation tempogram → log-normal
/// prior → period selection. Deterministic for a fixed track and parameters.
pub struct AutocorrelationDetector {
    params: TempoParams,
}

impl AutocorrelationDetector {
    pub fn new(params: TempoParams) -> Result<Self, AnalysisError> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &TempoParams {
        &self.params
    }

    /// Run the pipeline, honoring `cancel` between stages.
    pub fn detect_with_cancel(
        &self,
        track: &AudioTrack,
        cancel: &CancelToken,
    ) -> Result<TempoEstimate, AnalysisError> {
        if track.sample_rate == 0 {
            return Err(AnalysisError::invalid_params("sample rate must be > 0"));
        }

        cancel.check()?;
        let envelope = onset::onset_strength(&track.samples, &self.params)?;
        debug!(frames = envelope.values.len(), "extracted onset envelope");

        cancel.check()?;
        let tempogram = tempogram::build(&envelope, track.sample_rate, &self.params)?;

        cancel.check()?;
        let bpms = prior::tempo_frequencies(
            tempogram.len(),
            self.params.hop_length,
            track.sample_rate,
        );
        let logprior = prior::log_prior(&bpms, &self.params);

        cancel.check()?;
        let best = selector::select_period(&tempogram, &logprior)?;
        let estimate = TempoEstimate::new(bpms[best])?;
        debug!(lag = best, bpm = estimate.bpm, "selected tempo");
        Ok(estimate)
    }
}

impl TempoDetector for AutocorrelationDetector {
    fn detect(&self, track: &AudioTrack) -> Result<TempoEstimate, AnalysisError> {
        self.detect_with_cancel(track, &CancelToken::new())
    }

    fn name(&self) -> &'static str {
        "autocorrelation"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Impulse train at a fixed sample interval, mimicking a click track.
    fn click_track(sample_rate: u32, interval: usize, seconds: u32) -> AudioTrack {
        let total = (sample_rate * seconds) as usize;
        let mut samples = vec![0.0f32; total];
        for i in (0..total).step_by(interval) {
            samples[i] = 0.9;
        }
        AudioTrack {
            sample_rate,
            samples,
        }
    }

    fn detector(params: TempoParams) -> AutocorrelationDetector {
        AutocorrelationDetector::new(params).unwrap()
    }

    #[test]
    fn recovers_120_bpm_click_track() {
        // Impulses every 22050 samples at 44.1 kHz are exactly 120 BPM. The
        // lag grid quantizes candidates to ~117.5 and ~120.2 around it.
        let track = click_track(44_100, 22_050, 10);
        let estimate = detector(TempoParams::default()).detect(&track).unwrap();
        assert!(
            (estimate.bpm - 120.0).abs() < 5.0,
            "expected ~120 BPM, got {}",
            estimate.bpm
        );
    }

    #[test]
    fn detection_is_deterministic() {
        let track = click_track(44_100, 22_050, 8);
        let det = detector(TempoParams::default());
        let first = det.detect(&track).unwrap();
        let second = det.detect(&track).unwrap();
        assert_eq!(first.bpm.to_bits(), second.bpm.to_bits());
    }

    #[test]
    fn max_tempo_bound_is_respected() {
        let track = click_track(44_100, 22_050, 10);
        let params = TempoParams {
            max_tempo: Some(100.0),
            ..Default::default()
        };
        let estimate = detector(params).detect(&track).unwrap();
        assert!(estimate.bpm < 100.0, "got {}", estimate.bpm);
    }

    #[test]
    fn pathological_cutoff_yields_no_candidate() {
        // Every representable candidate sits above 2 BPM here, so the cutoff
        // excludes them all.
        let track = click_track(44_100, 22_050, 10);
        let params = TempoParams {
            max_tempo: Some(2.0),
            ..Default::default()
        };
        let result = detector(params).detect(&track);
        assert!(matches!(result, Err(AnalysisError::NoValidCandidate)));
    }

    #[test]
    fn short_audio_fails_before_numerics() {
        let track = AudioTrack {
            sample_rate: 44_100,
            samples: vec![0.5; 1000],
        };
        let result = detector(TempoParams::default()).detect(&track);
        assert!(matches!(result, Err(AnalysisError::InsufficientAudio { .. })));
    }

    #[test]
    fn zero_sample_rate_is_rejected() {
        let track = AudioTrack {
            sample_rate: 0,
            samples: vec![0.5; 44_100],
        };
        let result = detector(TempoParams::default()).detect(&track);
        assert!(matches!(result, Err(AnalysisError::InvalidParams(_))));
    }

    #[test]
    fn cancelled_token_stops_the_pipeline() {
        let track = click_track(44_100, 22_050, 4);
        let cancel = CancelToken::new();
        cancel.cancel();
        let result = detector(TempoParams::default()).detect_with_cancel(&track, &cancel);
        assert!(matches!(result, Err(AnalysisError::Cancelled)));
    }

    #[test]
    fn invalid_params_fail_construction() {
        let params = TempoParams {
            hop_length: 0,
            ..Default::default()
        };
        assert!(AutocorrelationDetector::new(params).is_err());
    }
}
