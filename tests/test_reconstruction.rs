//! Griffin-Lim reconstruction integration tests.

use toneforge::{MagnitudeSpectrogram, SynthesisEngine, ToneParameters, DEFAULT_NUM_MODES};

fn engine() -> SynthesisEngine {
    SynthesisEngine::new(8000, 256)
}

/// Magnitude target the reconstructor actually chases: the pinned decode
/// applied to the input, as absolute values.
fn decoded_target(mag: &MagnitudeSpectrogram) -> Vec<f64> {
    mag.data()
        .iter()
        .map(|&v| (v.abs().log10().exp() - 1.0).abs())
        .collect()
}

fn magnitude_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

fn pearson(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len() as f64;
    let mean_a = a.iter().sum::<f64>() / n;
    let mean_b = b.iter().sum::<f64>() / n;
    let cov: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| (x - mean_a) * (y - mean_b))
        .sum();
    let var_a: f64 = a.iter().map(|x| (x - mean_a) * (x - mean_a)).sum();
    let var_b: f64 = b.iter().map(|y| (y - mean_b) * (y - mean_b)).sum();
    cov / (var_a.sqrt() * var_b.sqrt())
}

fn tonal_spectrogram(engine: &SynthesisEngine) -> MagnitudeSpectrogram {
    let params = ToneParameters {
        spectral_slope: -2.0,
        ..ToneParameters::harmonic(440.0)
    };
    let signal = engine.render(&params, 4096, DEFAULT_NUM_MODES).unwrap();
    engine.stft_magnitude(&[signal]).unwrap().remove(0)
}

#[test]
fn test_zero_iterations_degenerates_to_random_phase_inverse() {
    let engine = engine();
    let mag = tonal_spectrogram(&engine);

    let audio = engine.reconstruct_seeded(&mag, 0, 42).unwrap();
    assert!(!audio.is_empty());
    assert!(audio.iter().all(|s| s.is_finite()));
    assert!(audio.iter().any(|&s| s != 0.0));
}

#[test]
fn test_reconstruction_is_random_across_seeds() {
    let engine = engine();
    let mag = tonal_spectrogram(&engine);

    let a = engine.reconstruct_seeded(&mag, 10, 1).unwrap();
    let b = engine.reconstruct_seeded(&mag, 10, 2).unwrap();
    assert_ne!(a, b);
}

#[test]
fn test_iterations_reduce_spectral_error() {
    let engine = engine();
    let mag = tonal_spectrogram(&engine);
    let target = decoded_target(&mag);

    let initial = engine.reconstruct_seeded(&mag, 0, 42).unwrap();
    let refined = engine.reconstruct_seeded(&mag, 100, 42).unwrap();

    let initial_mag = engine.stft_magnitude(&[initial]).unwrap().remove(0);
    let refined_mag = engine.stft_magnitude(&[refined]).unwrap().remove(0);

    let err_initial = magnitude_distance(initial_mag.data(), &target);
    let err_refined = magnitude_distance(refined_mag.data(), &target);
    assert!(
        err_refined < err_initial,
        "refinement did not reduce spectral error: {} -> {}",
        err_initial,
        err_refined
    );
}

#[test]
fn test_reconstruction_converges_toward_target_spectrum() {
    let engine = engine();
    let mag = tonal_spectrogram(&engine);
    let target = decoded_target(&mag);

    let refined = engine.reconstruct_seeded(&mag, 100, 42).unwrap();
    let refined_mag = engine.stft_magnitude(&[refined]).unwrap().remove(0);

    let correlation = pearson(refined_mag.data(), &target);
    assert!(
        correlation > 0.5,
        "reconstructed spectrum correlation too low: {}",
        correlation
    );
}

#[test]
fn test_reconstruction_keeps_dominant_partial() {
    let engine = engine();
    let mag = tonal_spectrogram(&engine);
    let dominant = mag.dominant_bin().unwrap();

    let refined = engine.reconstruct_seeded(&mag, 100, 42).unwrap();
    let refined_mag = engine.stft_magnitude(&[refined]).unwrap().remove(0);

    assert_eq!(refined_mag.dominant_bin(), Some(dominant));
}

#[test]
fn test_reconstruction_length_matches_frame_geometry() {
    let engine = engine();
    let mag = tonal_spectrogram(&engine);

    let audio = engine.reconstruct_seeded(&mag, 1, 42).unwrap();
    // (frames - 1) * hop + fft_size, hop = fft / 4.
    let expected = (mag.num_frames() - 1) * 64 + 256;
    assert_eq!(audio.len(), expected);
}
