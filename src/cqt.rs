//! Constant-Q magnitude transform.
//!
//! Pseudo-CQT: each frame is a single windowed FFT whose bins are
//! interpolated at logarithmically spaced center frequencies, with a
//! per-bin scale compensating for the constant-Q filter length. The
//! default range starts at C1 with 12 bins per octave.

use std::f64::consts::PI;

use rustfft::num_complex::Complex64;
use rustfft::FftPlanner;

use crate::spectrogram::MagnitudeSpectrogram;

/// Lowest analyzed frequency, C1.
pub const DEFAULT_FMIN: f64 = 32.70;

/// Frequency bins per octave.
pub const BINS_PER_OCTAVE: usize = 12;

/// Samples between successive CQT columns.
pub const HOP_LENGTH: usize = 512;

/// Center frequencies of `num_bins` constant-Q bins above `fmin`.
pub fn cqt_frequencies(num_bins: usize, fmin: f64, bins_per_octave: usize) -> Vec<f64> {
    (0..num_bins)
        .map(|k| fmin * 2.0_f64.powf(k as f64 / bins_per_octave as f64))
        .collect()
}

/// Computes the constant-Q magnitude of one signal.
///
/// The output geometry is `num_bins` rows by however many hops fit the
/// signal (at least one frame). Bins above the Nyquist frequency stay
/// zero.
pub fn magnitude(signal: &[f64], sample_rate: f64, num_bins: usize) -> MagnitudeSpectrogram {
    let freqs = cqt_frequencies(num_bins, DEFAULT_FMIN, BINS_PER_OCTAVE);

    // Constant Q factor and the matching filter length per bin.
    let q = 1.0 / (2.0_f64.powf(1.0 / BINS_PER_OCTAVE as f64) - 1.0);
    let lengths: Vec<usize> = freqs
        .iter()
        .map(|&f| ((sample_rate * q / f).ceil() as usize).max(1))
        .collect();

    let max_len = lengths.iter().copied().max().unwrap_or(2048);
    let n_fft = max_len.next_power_of_two().max(512);

    let num_frames = if signal.len() > n_fft / 2 {
        (signal.len() - n_fft / 2) / HOP_LENGTH + 1
    } else {
        1
    };

    let mut out = MagnitudeSpectrogram::zeros(num_bins, num_frames);

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(n_fft);
    let mut buffer = vec![Complex64::new(0.0, 0.0); n_fft];

    for frame in 0..num_frames {
        let center = frame * HOP_LENGTH + n_fft / 2;

        for (i, value) in buffer.iter_mut().enumerate() {
            let sample_idx = center as isize - (n_fft / 2) as isize + i as isize;
            let sample = if sample_idx >= 0 && (sample_idx as usize) < signal.len() {
                signal[sample_idx as usize]
            } else {
                0.0
            };
            let w = 0.5 * (1.0 - (2.0 * PI * i as f64 / n_fft as f64).cos());
            *value = Complex64::new(sample * w, 0.0);
        }

        fft.process(&mut buffer);

        for (bin, &freq) in freqs.iter().enumerate() {
            let fft_bin = freq * n_fft as f64 / sample_rate;
            let bin_low = fft_bin.floor() as usize;
            if bin_low >= n_fft / 2 {
                continue;
            }
            let bin_high = (bin_low + 1).min(n_fft / 2);
            let frac = fft_bin - bin_low as f64;

            let value = buffer[bin_low] * (1.0 - frac) + buffer[bin_high] * frac;
            let scale = (n_fft as f64 / lengths[bin] as f64).sqrt();
            out.set(bin, frame, value.norm() * scale);
        }
    }

    out
}
