//! Error types for the synthesis engine.

use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur during synthesis, spectral transforms, or
/// phase reconstruction.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Synthesis produced an all-zero signal, so peak normalization is
    /// impossible. The caller must adjust the tone parameters.
    #[error("synthesis produced an all-zero signal (all modes canceled or clamped)")]
    DegenerateSignal,

    /// A batch transform was called with no input waveforms.
    #[error("batch transform called on an empty batch")]
    EmptyBatch,

    /// Invalid frequency bin count.
    #[error("invalid bin count: {bins}")]
    InvalidBinCount {
        /// The invalid bin count.
        bins: usize,
    },

    /// Invalid parameter value.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Error message.
        message: String,
    },

    /// Phase reconstruction encountered a non-finite value after the
    /// magnitude decode step.
    #[error("non-finite magnitude at bin {bin}, frame {frame} after decode")]
    NumericInstability {
        /// Frequency bin of the offending value.
        bin: usize,
        /// Time frame of the offending value.
        frame: usize,
    },
}

impl EngineError {
    /// Creates an invalid parameter error.
    pub fn invalid_param(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_param_helper() {
        let err = EngineError::invalid_param("fundamental_hz", "must be positive");
        assert!(err.to_string().contains("fundamental_hz"));
        assert!(err.to_string().contains("must be positive"));
    }

    #[test]
    fn test_bin_count_message() {
        let err = EngineError::InvalidBinCount { bins: 0 };
        assert!(err.to_string().contains('0'));
    }
}
