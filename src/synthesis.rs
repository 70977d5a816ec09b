//! Additive tone synthesis from a parametric model.
//!
//! A tone is a sum of sinusoidal modes. Mode frequencies follow the
//! stretched-harmonic (inharmonic string) model
//! `f_m = m * f0 * sqrt(1 + B * m^2)`, amplitudes follow a linear ramp
//! over the mode index, clamped at zero, and the whole signal gets an
//! exponential time decay before peak normalization.

use std::f64::consts::PI;

use crate::error::{EngineError, EngineResult};
use crate::params::{HarmonicPresence, ToneParameters};

/// Selects between the engine's historical mode arithmetic and a
/// corrected variant.
///
/// The historical behavior has two pinned quirks: the summation stops one
/// mode short of the active set, and EVEN presence counts the
/// force-included fundamental toward the effective mode count. `Corrected`
/// sums every mode of the set and uses the true even-mode set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeCompat {
    /// Replicate the historical mode iteration exactly.
    Legacy,
    /// Sum all modes of the set; EVEN means even modes only.
    Corrected,
}

/// Computes the active mode indices and the effective mode count used to
/// normalize the amplitude ramp.
///
/// Under [`ModeCompat::Legacy`], the effective count follows the
/// historical integer arithmetic (`num_modes / 2` for ODD,
/// `num_modes / 2 + 1` for EVEN) and EVEN force-includes mode 1.
pub fn mode_set(
    presence: HarmonicPresence,
    num_modes: usize,
    compat: ModeCompat,
) -> (Vec<usize>, usize) {
    let modes: Vec<usize> = match (presence, compat) {
        (HarmonicPresence::All, _) => (1..=num_modes).collect(),
        (HarmonicPresence::Odd, _) => (1..=num_modes).step_by(2).collect(),
        (HarmonicPresence::Even, ModeCompat::Legacy) => {
            let mut set = vec![1];
            set.extend((2..=num_modes).step_by(2));
            set
        }
        (HarmonicPresence::Even, ModeCompat::Corrected) => (2..=num_modes).step_by(2).collect(),
    };

    let effective = match compat {
        ModeCompat::Legacy => match presence {
            HarmonicPresence::All => num_modes,
            HarmonicPresence::Odd => num_modes / 2,
            HarmonicPresence::Even => num_modes / 2 + 1,
        },
        ModeCompat::Corrected => modes.len(),
    };

    (modes, effective)
}

/// Renders a tone as a peak-normalized sample vector.
///
/// # Arguments
/// * `params` - Tone parameters
/// * `num_samples` - Output length in samples
/// * `num_modes` - Upper bound of the mode series
/// * `sample_rate` - Sample rate in Hz
/// * `compat` - Mode arithmetic variant
///
/// # Errors
/// [`EngineError::InvalidParameter`] for out-of-range parameters and
/// [`EngineError::DegenerateSignal`] when every active mode is clamped or
/// the mode set is empty, leaving nothing to normalize.
pub fn render_tone(
    params: &ToneParameters,
    num_samples: usize,
    num_modes: usize,
    sample_rate: f64,
    compat: ModeCompat,
) -> EngineResult<Vec<f64>> {
    params.validate()?;
    if num_samples == 0 {
        return Err(EngineError::invalid_param(
            "num_samples",
            "must be at least 1",
        ));
    }

    let (modes, effective) = mode_set(params.harmonic_presence, num_modes, compat);

    // Legacy iteration stops one mode short of the active set.
    let summed = match compat {
        ModeCompat::Legacy => effective.saturating_sub(1).min(modes.len()),
        ModeCompat::Corrected => modes.len(),
    };

    let dt = 1.0 / sample_rate;
    let two_pi = 2.0 * PI;
    let eff = effective as f64;
    let mut signal = vec![0.0; num_samples];

    for &m in modes.iter().take(summed) {
        let mode = m as f64;
        let freq = mode * params.fundamental_hz * (1.0 + params.inharmonicity * mode * mode).sqrt();
        let amp = (((mode - 1.0) * params.spectral_slope + eff) / eff).max(0.0);
        if amp == 0.0 {
            continue;
        }

        for (i, sample) in signal.iter_mut().enumerate() {
            let t = i as f64 * dt;
            *sample += amp * (two_pi * freq * t).sin();
        }
    }

    if params.decay_rate > 0.0 {
        for (i, sample) in signal.iter_mut().enumerate() {
            *sample *= (-params.decay_rate * i as f64 * dt).exp();
        }
    }

    let peak = signal.iter().map(|s| s.abs()).fold(0.0_f64, f64::max);
    if peak == 0.0 {
        return Err(EngineError::DegenerateSignal);
    }
    for sample in &mut signal {
        *sample /= peak;
    }

    Ok(signal)
}
