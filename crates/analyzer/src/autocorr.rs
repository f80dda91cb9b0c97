//! Spectral-domain autocorrelation.
//!
//! Forward real FFT, magnitude-squared power spectrum, inverse FFT. The
//! input is zero-padded to a power of two at least twice its length so the
//! circular autocorrelation does not wrap around into the lags of interest.

use realfft::num_complex::Complex;
use realfft::RealFftPlanner;

use beatfind_domain::AnalysisError;

/// Autocorrelation engine with cached FFT plans. Planning for a new length
/// is cheap after the first call thanks to the planner's internal cache.
pub struct Autocorrelator {
    planner: RealFftPlanner<f32>,
}

impl Autocorrelator {
    pub fn new() -> Self {
        Self {
            planner: RealFftPlanner::new(),
        }
    }

    /// Autocorrelation of `input` at lags `0..input.len()`, normalized by the
    /// input length so lag 0 approximates the mean-square signal energy.
    pub fn autocorrelate(&mut self, input: &[f32]) -> Result<Vec<f32>, AnalysisError> {
        let n = input.len();
        if n == 0 {
            return Err(AnalysisError::invalid_params(
                "autocorrelation input is empty",
            ));
        }
        let nfft = n
            .checked_mul(2)
            .and_then(usize::checked_next_power_of_two)
            .ok_or_else(|| {
                AnalysisError::TransformSetup(format!(
                    "no power-of-two transform size for {n} samples"
                ))
            })?;

        let forward = self.planner.plan_fft_forward(nfft);
        let inverse = self.planner.plan_fft_inverse(nfft);

        let mut padded = forward.make_input_vec();
        padded[..n].copy_from_slice(input);
        let mut spectrum = forward.make_output_vec();
        forward
            .process(&mut padded, &mut spectrum)
            .map_err(|err| AnalysisError::TransformSetup(err.to_string()))?;

        for bin in spectrum.iter_mut() {
            *bin = Complex::new(bin.norm_sqr(), 0.0);
        }

        let mut output = inverse.make_output_vec();
        inverse
            .process(&mut spectrum, &mut output)
            .map_err(|err| AnalysisError::TransformSetup(err.to_string()))?;

        // Both transforms are unnormalized, so the roundtrip carries a factor
        // of nfft on top of the 1/n lag normalization.
        let scale = 1.0 / (nfft as f32 * n as f32);
        let autocorr: Vec<f32> = output.iter().take(n).map(|v| v * scale).collect();
        if autocorr.iter().any(|v| !v.is_finite()) {
            return Err(AnalysisError::TransformSetup(
                "autocorrelation produced non-finite values".to_string(),
            ));
        }
        Ok(autocorr)
    }
}

impl Default for Autocorrelator {
    fn default() -> Self {
        Self::new()
    }
}
