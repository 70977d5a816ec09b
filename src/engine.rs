//! The synthesis engine: configuration plus the public operations.

use rand_pcg::Pcg32;

use crate::error::EngineResult;
use crate::params::ToneParameters;
use crate::spectrogram::MagnitudeSpectrogram;
use crate::synthesis::ModeCompat;
use crate::{batch, cqt, griffin_lim, rng, stft, synthesis};

/// Default number of modes rendered per tone.
pub const DEFAULT_NUM_MODES: usize = 10;

/// Default Griffin-Lim iteration budget.
pub const DEFAULT_ITERATIONS: usize = 100;

/// Stateless (per-call) signal-processing engine.
///
/// The engine holds the pipeline-wide configuration: the sample rate and
/// the spectral bin count, both fixed at construction. Waveform length,
/// sample rate, and bin count must stay consistent across a pipeline;
/// nothing here resamples implicitly.
///
/// `num_bins` names the STFT analysis length; STFT-magnitude output
/// carries `num_bins / 2 + 1` frequency rows, while the CQT uses the same
/// count as its number of logarithmic bins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SynthesisEngine {
    sample_rate: u32,
    num_bins: usize,
}

impl SynthesisEngine {
    /// Creates an engine with the given sample rate and bin count.
    pub fn new(sample_rate: u32, num_bins: usize) -> Self {
        Self {
            sample_rate,
            num_bins,
        }
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Spectral bin count.
    pub fn num_bins(&self) -> usize {
        self.num_bins
    }

    /// Renders a tone with the engine's historical mode arithmetic.
    ///
    /// The output is peak-normalized to 1. Deterministic: identical
    /// parameters yield bit-identical samples.
    ///
    /// # Errors
    /// [`crate::EngineError::DegenerateSignal`] when every active mode is
    /// clamped or excluded, [`crate::EngineError::InvalidParameter`] for
    /// out-of-range parameters.
    pub fn render(
        &self,
        params: &ToneParameters,
        num_samples: usize,
        num_modes: usize,
    ) -> EngineResult<Vec<f64>> {
        self.render_compat(params, num_samples, num_modes, ModeCompat::Legacy)
    }

    /// Renders a tone with an explicit mode-arithmetic variant.
    pub fn render_compat(
        &self,
        params: &ToneParameters,
        num_samples: usize,
        num_modes: usize,
        compat: ModeCompat,
    ) -> EngineResult<Vec<f64>> {
        synthesis::render_tone(
            params,
            num_samples,
            num_modes,
            self.sample_rate as f64,
            compat,
        )
    }

    /// STFT magnitude of every waveform in the batch, one spectrogram per
    /// input, in input order.
    ///
    /// # Errors
    /// [`crate::EngineError::EmptyBatch`],
    /// [`crate::EngineError::InvalidBinCount`].
    pub fn stft_magnitude(&self, batch: &[Vec<f64>]) -> EngineResult<Vec<MagnitudeSpectrogram>> {
        let fft_size = self.num_bins;
        batch::transform(batch, fft_size, move |signal| {
            stft::magnitude(signal, fft_size)
        })
    }

    /// Constant-Q magnitude of every waveform in the batch.
    ///
    /// # Errors
    /// [`crate::EngineError::EmptyBatch`],
    /// [`crate::EngineError::InvalidBinCount`].
    pub fn cqt_magnitude(&self, batch: &[Vec<f64>]) -> EngineResult<Vec<MagnitudeSpectrogram>> {
        let sample_rate = self.sample_rate as f64;
        let num_bins = self.num_bins;
        batch::transform(batch, num_bins, move |signal| {
            cqt::magnitude(signal, sample_rate, num_bins)
        })
    }

    /// Griffin-Lim reconstruction with a caller-provided phase RNG.
    ///
    /// # Errors
    /// [`crate::EngineError::NumericInstability`] for non-finite decoded
    /// magnitudes; see [`griffin_lim::reconstruct`] for the full set.
    pub fn reconstruct(
        &self,
        magnitude: &MagnitudeSpectrogram,
        num_iterations: usize,
        rng: &mut Pcg32,
    ) -> EngineResult<Vec<f64>> {
        griffin_lim::reconstruct(magnitude, num_iterations, rng)
    }

    /// Griffin-Lim reconstruction with the phase RNG derived from a seed.
    ///
    /// The phase stream is derived with the component key `"phase-init"`,
    /// so the same seed always reproduces the same reconstruction.
    pub fn reconstruct_seeded(
        &self,
        magnitude: &MagnitudeSpectrogram,
        num_iterations: usize,
        seed: u32,
    ) -> EngineResult<Vec<f64>> {
        let mut rng = rng::create_component_rng(seed, "phase-init");
        griffin_lim::reconstruct(magnitude, num_iterations, &mut rng)
    }
}

impl Default for SynthesisEngine {
    /// 16 kHz, 1024-point analysis.
    fn default() -> Self {
        Self::new(16000, 1024)
    }
}
