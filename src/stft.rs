//! Short-time Fourier analysis and window-sum-normalized resynthesis.
//!
//! One fixed policy is shared by the forward transform and the
//! Griffin-Lim reconstructor: periodic Hann window, hop of a quarter
//! frame, non-centered frames. Signals shorter than one frame are
//! zero-padded to a single frame.

use std::f64::consts::PI;

use rustfft::num_complex::Complex64;
use rustfft::{Fft, FftPlanner};

use crate::spectrogram::MagnitudeSpectrogram;

/// Hop length for a given analysis frame length.
pub fn hop_for(fft_size: usize) -> usize {
    (fft_size / 4).max(1)
}

/// Number of frequency rows an analysis of `fft_size` produces.
pub fn bins_for(fft_size: usize) -> usize {
    fft_size / 2 + 1
}

/// Number of frames the forward transform produces for a signal.
pub fn frames_for(signal_len: usize, fft_size: usize, hop: usize) -> usize {
    (signal_len.max(fft_size) - fft_size) / hop + 1
}

/// Computes the periodic Hann window of the given size.
pub fn hann_window(size: usize) -> Vec<f64> {
    (0..size)
        .map(|i| 0.5 * (1.0 - (2.0 * PI * i as f64 / size as f64).cos()))
        .collect()
}

/// Forward STFT, returning complex bins indexed `[bin][frame]` with
/// `fft_size / 2 + 1` rows.
pub fn forward(signal: &[f64], fft_size: usize) -> Vec<Vec<Complex64>> {
    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(fft_size);
    forward_with(signal, fft_size, fft.as_ref())
}

/// Forward STFT using a caller-provided FFT plan.
pub fn forward_with(signal: &[f64], fft_size: usize, fft: &dyn Fft<f64>) -> Vec<Vec<Complex64>> {
    let hop = hop_for(fft_size);
    let num_bins = bins_for(fft_size);
    let num_frames = frames_for(signal.len(), fft_size, hop);
    let window = hann_window(fft_size);

    let mut out = vec![vec![Complex64::new(0.0, 0.0); num_frames]; num_bins];
    let mut buffer = vec![Complex64::new(0.0, 0.0); fft_size];

    for frame in 0..num_frames {
        let start = frame * hop;
        for i in 0..fft_size {
            let sample = signal.get(start + i).copied().unwrap_or(0.0);
            buffer[i] = Complex64::new(sample * window[i], 0.0);
        }
        fft.process(&mut buffer);
        for (bin, row) in out.iter_mut().enumerate() {
            row[frame] = buffer[bin];
        }
    }

    out
}

/// Inverse STFT via overlap-add with window-sum normalization.
///
/// The input carries only the non-negative frequency rows; the negative
/// half of each frame spectrum is rebuilt by conjugate symmetry.
pub fn inverse(spec: &[Vec<Complex64>], fft_size: usize) -> Vec<f64> {
    let mut planner = FftPlanner::new();
    let ifft = planner.plan_fft_inverse(fft_size);
    inverse_with(spec, fft_size, ifft.as_ref())
}

/// Inverse STFT using a caller-provided inverse FFT plan.
pub fn inverse_with(spec: &[Vec<Complex64>], fft_size: usize, ifft: &dyn Fft<f64>) -> Vec<f64> {
    debug_assert!(!spec.is_empty() && !spec[0].is_empty());
    let hop = hop_for(fft_size);
    let num_frames = spec[0].len();
    let audio_len = (num_frames - 1) * hop + fft_size;
    let window = hann_window(fft_size);
    let ifft_scale = 1.0 / fft_size as f64;

    let mut audio = vec![0.0_f64; audio_len];
    let mut window_sum = vec![0.0_f64; audio_len];
    let mut buffer = vec![Complex64::new(0.0, 0.0); fft_size];

    for frame in 0..num_frames {
        buffer[0] = spec[0][frame];
        for (bin, row) in spec.iter().enumerate().skip(1) {
            buffer[bin] = row[frame];
            let mirror = fft_size - bin;
            if mirror > bin {
                buffer[mirror] = row[frame].conj();
            }
        }
        ifft.process(&mut buffer);

        let start = frame * hop;
        for i in 0..fft_size {
            audio[start + i] += buffer[i].re * ifft_scale * window[i];
            window_sum[start + i] += window[i] * window[i];
        }
        // The ifft left time-domain samples in the scratch buffer; the
        // next frame only overwrites spectrum bins.
        for value in buffer.iter_mut() {
            *value = Complex64::new(0.0, 0.0);
        }
    }

    for (sample, &ws) in audio.iter_mut().zip(window_sum.iter()) {
        if ws > 1e-10 {
            *sample /= ws;
        }
    }

    audio
}

/// Element-wise magnitude of the forward STFT.
pub fn magnitude(signal: &[f64], fft_size: usize) -> MagnitudeSpectrogram {
    let spec = forward(signal, fft_size);
    let num_bins = spec.len();
    let num_frames = spec[0].len();
    let mut out = MagnitudeSpectrogram::zeros(num_bins, num_frames);
    for (bin, row) in spec.iter().enumerate() {
        for (frame, value) in row.iter().enumerate() {
            out.set(bin, frame, value.norm());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(freq: f64, sample_rate: f64, len: usize) -> Vec<f64> {
        (0..len)
            .map(|i| (2.0 * PI * freq * i as f64 / sample_rate).sin())
            .collect()
    }

    #[test]
    fn test_hann_window_shape() {
        let window = hann_window(1024);
        assert!(window[0].abs() < 1e-12);
        assert!((window[512] - 1.0).abs() < 1e-12);
        assert!(window.iter().all(|&w| (0.0..=1.0).contains(&w)));
    }

    #[test]
    fn test_frame_count() {
        // (2048 - 256) / 64 + 1
        assert_eq!(frames_for(2048, 256, 64), 29);
        // Shorter than one frame pads to a single frame.
        assert_eq!(frames_for(100, 256, 64), 1);
    }

    #[test]
    fn test_forward_geometry() {
        let signal = sine(440.0, 8000.0, 2048);
        let spec = forward(&signal, 256);
        assert_eq!(spec.len(), 129);
        assert_eq!(spec[0].len(), 29);
    }

    #[test]
    fn test_round_trip_reconstructs_interior() {
        let signal = sine(440.0, 8000.0, 2048);
        let spec = forward(&signal, 256);
        let rebuilt = inverse(&spec, 256);
        assert_eq!(rebuilt.len(), 2048);

        for i in 256..(2048 - 256) {
            assert!(
                (rebuilt[i] - signal[i]).abs() < 1e-9,
                "sample {} diverged: {} vs {}",
                i,
                rebuilt[i],
                signal[i]
            );
        }
    }

    #[test]
    fn test_magnitude_is_non_negative() {
        let signal = sine(440.0, 8000.0, 1024);
        let mag = magnitude(&signal, 256);
        assert!(mag.data().iter().all(|&v| v >= 0.0));
    }

    #[test]
    fn test_magnitude_peaks_at_tone_bin() {
        let signal = sine(1000.0, 8000.0, 4096);
        let mag = magnitude(&signal, 256);
        // 1000 Hz at 8 kHz with a 256-point analysis lands on bin 32.
        assert_eq!(mag.dominant_bin(), Some(32));
    }
}
