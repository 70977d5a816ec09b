//! Toneforge
//!
//! A pure, per-call-stateless audio engine with three parts:
//!
//! - **Tone synthesis** - additive rendering of harmonic/inharmonic tones
//!   from a small parametric model ([`ToneParameters`])
//! - **Spectral transforms** - batch STFT-magnitude and constant-Q
//!   magnitude computation, data-parallel across samples
//! - **Phase reconstruction** - Griffin-Lim estimation of a time-domain
//!   signal from a magnitude-only spectrogram
//!
//! # Determinism
//!
//! Synthesis has no random path: the same parameters always produce
//! byte-identical samples. The only randomness is Griffin-Lim's phase
//! initialization, which flows through an injected PCG32 generator so a
//! fixed seed reproduces a reconstruction exactly.
//!
//! # Example
//!
//! ```
//! use toneforge::{SynthesisEngine, ToneParameters};
//!
//! # fn main() -> toneforge::EngineResult<()> {
//! let engine = SynthesisEngine::new(8000, 256);
//! let params = ToneParameters::harmonic(440.0);
//!
//! let waveform = engine.render(&params, 8000, 10)?;
//! let spectrograms = engine.stft_magnitude(&[waveform])?;
//! let estimate = engine.reconstruct_seeded(&spectrograms[0], 100, 42)?;
//! # let _ = estimate;
//! # Ok(())
//! # }
//! ```
//!
//! # Crate Structure
//!
//! - [`engine`] - [`SynthesisEngine`]: configuration and public operations
//! - [`synthesis`] - additive tone rendering and mode arithmetic
//! - [`stft`] - short-time Fourier analysis/resynthesis pair
//! - [`cqt`] - constant-Q magnitude transform
//! - [`griffin_lim`] - iterative phase reconstruction
//! - [`batch`] - scoped worker pool for batch transforms
//! - [`rng`] - deterministic RNG with seed derivation
//! - [`error`] - error taxonomy

pub mod batch;
pub mod cqt;
pub mod engine;
pub mod error;
pub mod griffin_lim;
pub mod params;
pub mod rng;
pub mod spectrogram;
pub mod stft;
pub mod synthesis;

// Re-export main types at crate root
pub use engine::{SynthesisEngine, DEFAULT_ITERATIONS, DEFAULT_NUM_MODES};
pub use error::{EngineError, EngineResult};
pub use params::{HarmonicPresence, ToneParameters};
pub use spectrogram::MagnitudeSpectrogram;
pub use synthesis::ModeCompat;
