//! Tone parameter types.

use crate::error::{EngineError, EngineResult};

/// Which partials of the harmonic series a tone contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarmonicPresence {
    /// Every mode from 1 up to the mode count.
    All,
    /// Odd modes only (1, 3, 5, ...).
    Odd,
    /// Even modes (2, 4, 6, ...) with mode 1 force-included as the
    /// fundamental reference. The mode 1 inclusion is a pinned behavior
    /// of the engine, not an oversight.
    Even,
}

/// Parameters for one additive tone.
///
/// Constructed by the caller and consumed once per [`render`] call.
/// The same parameters always produce the same waveform.
///
/// [`render`]: crate::SynthesisEngine::render
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneParameters {
    /// Fundamental frequency in Hz. Must be positive.
    pub fundamental_hz: f64,
    /// Slope of the linear per-mode amplitude ramp. Negative slopes
    /// silently zero out high modes (timbral control, not an error).
    pub spectral_slope: f64,
    /// Which modes of the harmonic series are present.
    pub harmonic_presence: HarmonicPresence,
    /// Inharmonicity coefficient of the stretched-harmonic model.
    /// Must be non-negative; 0 gives exact integer harmonics.
    pub inharmonicity: f64,
    /// Exponential time-decay rate in 1/s. Must be non-negative.
    pub decay_rate: f64,
}

impl ToneParameters {
    /// Creates parameters for a plain harmonic tone: flat spectrum, all
    /// modes present, no inharmonicity, no decay.
    pub fn harmonic(fundamental_hz: f64) -> Self {
        Self {
            fundamental_hz,
            spectral_slope: 0.0,
            harmonic_presence: HarmonicPresence::All,
            inharmonicity: 0.0,
            decay_rate: 0.0,
        }
    }

    /// Validates the parameter ranges.
    pub fn validate(&self) -> EngineResult<()> {
        if !(self.fundamental_hz > 0.0) || !self.fundamental_hz.is_finite() {
            return Err(EngineError::invalid_param(
                "fundamental_hz",
                format!("must be a positive finite frequency, got {}", self.fundamental_hz),
            ));
        }
        if !(self.inharmonicity >= 0.0) {
            return Err(EngineError::invalid_param(
                "inharmonicity",
                format!("must be non-negative, got {}", self.inharmonicity),
            ));
        }
        if !(self.decay_rate >= 0.0) {
            return Err(EngineError::invalid_param(
                "decay_rate",
                format!("must be non-negative, got {}", self.decay_rate),
            ));
        }
        if !self.spectral_slope.is_finite() {
            return Err(EngineError::invalid_param(
                "spectral_slope",
                format!("must be finite, got {}", self.spectral_slope),
            ));
        }
        Ok(())
    }
}
