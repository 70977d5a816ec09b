//! Griffin-Lim phase reconstruction from a magnitude spectrogram.
//!
//! The input magnitude is first decoded with `exp(log10(|S|)) - 1`. This
//! convention is pinned for compatibility with the pipeline the engine
//! replaces; it is not a general Griffin-Lim preprocessing step. After
//! decoding, phases start as uniform random values in `[-π, π)` and each
//! iteration re-estimates them from the inverse transform of the current
//! complex spectrogram. The iteration budget is fixed up front; there is
//! no convergence check.

use std::f64::consts::PI;

use rand::Rng;
use rand_pcg::Pcg32;
use rustfft::num_complex::Complex64;
use rustfft::FftPlanner;

use crate::error::{EngineError, EngineResult};
use crate::spectrogram::MagnitudeSpectrogram;
use crate::stft;

/// Reconstructs a time-domain signal whose STFT magnitude approximates
/// the given spectrogram.
///
/// The analysis length is derived from the spectrogram geometry
/// (`(num_bins - 1) * 2`), so any magnitude source with the engine's
/// frequency-row convention can be inverted. `num_iterations` counts
/// phase re-estimation passes; with `0` the result is a single inverse
/// STFT of the decoded magnitude under the initial random phase.
///
/// # Arguments
/// * `magnitude` - Magnitude spectrogram, `[bin][frame]`
/// * `num_iterations` - Fixed number of refinement passes
/// * `rng` - Source for the random phase initialization
///
/// # Errors
/// [`EngineError::NumericInstability`] when the decoded magnitude
/// contains a non-finite value, and [`EngineError::InvalidBinCount`] /
/// [`EngineError::InvalidParameter`] for degenerate geometry.
pub fn reconstruct(
    magnitude: &MagnitudeSpectrogram,
    num_iterations: usize,
    rng: &mut Pcg32,
) -> EngineResult<Vec<f64>> {
    let num_bins = magnitude.num_bins();
    let num_frames = magnitude.num_frames();
    if num_bins < 2 {
        return Err(EngineError::InvalidBinCount { bins: num_bins });
    }
    if num_frames == 0 {
        return Err(EngineError::invalid_param(
            "magnitude",
            "spectrogram has no frames",
        ));
    }

    let fft_size = (num_bins - 1) * 2;

    // Pinned decode: treat the input as log10-domain, shift back by one.
    let mut amplitude = vec![vec![0.0_f64; num_frames]; num_bins];
    for (bin, row) in amplitude.iter_mut().enumerate() {
        for (frame, value) in row.iter_mut().enumerate() {
            let decoded = magnitude.get(bin, frame).abs().log10().exp() - 1.0;
            if !decoded.is_finite() {
                return Err(EngineError::NumericInstability { bin, frame });
            }
            *value = decoded;
        }
    }

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(fft_size);
    let ifft = planner.plan_fft_inverse(fft_size);

    let mut spec: Vec<Vec<Complex64>> = amplitude
        .iter()
        .map(|row| {
            row.iter()
                .map(|&a| {
                    let phase = rng.gen::<f64>() * 2.0 * PI - PI;
                    Complex64::from_polar(a, phase)
                })
                .collect()
        })
        .collect();

    let mut audio = stft::inverse_with(&spec, fft_size, ifft.as_ref());

    for _ in 0..num_iterations {
        let analyzed = stft::forward_with(&audio, fft_size, fft.as_ref());
        for (bin, row) in spec.iter_mut().enumerate() {
            for (frame, value) in row.iter_mut().enumerate() {
                let phase = analyzed[bin][frame].arg();
                *value = Complex64::from_polar(amplitude[bin][frame], phase);
            }
        }
        audio = stft::inverse_with(&spec, fft_size, ifft.as_ref());
    }

    Ok(audio)
}
