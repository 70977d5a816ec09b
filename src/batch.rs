//! Data-parallel batch transforms.
//!
//! Each waveform in a batch is transformed independently, so the batch is
//! split into contiguous chunks across scoped worker threads. Every worker
//! writes into pre-allocated output slots for its own chunk; the only
//! synchronization is the scope join.

use std::thread;

use crate::error::{EngineError, EngineResult};
use crate::spectrogram::MagnitudeSpectrogram;

/// Applies `transform` to every waveform in `batch`, in parallel.
///
/// Output order matches input order: slot `i` holds the spectrogram of
/// `batch[i]`.
///
/// # Errors
/// [`EngineError::EmptyBatch`] for an empty batch and
/// [`EngineError::InvalidBinCount`] when `num_bins` is zero.
pub fn transform<F>(
    batch: &[Vec<f64>],
    num_bins: usize,
    transform: F,
) -> EngineResult<Vec<MagnitudeSpectrogram>>
where
    F: Fn(&[f64]) -> MagnitudeSpectrogram + Sync,
{
    if batch.is_empty() {
        return Err(EngineError::EmptyBatch);
    }
    if num_bins == 0 {
        return Err(EngineError::InvalidBinCount { bins: 0 });
    }

    let workers = thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .min(batch.len());
    let chunk_len = (batch.len() + workers - 1) / workers;

    let mut results = vec![MagnitudeSpectrogram::default(); batch.len()];
    let transform = &transform;

    thread::scope(|scope| {
        for (inputs, slots) in batch.chunks(chunk_len).zip(results.chunks_mut(chunk_len)) {
            scope.spawn(move || {
                for (signal, slot) in inputs.iter().zip(slots.iter_mut()) {
                    *slot = transform(signal);
                }
            });
        }
    });

    Ok(results)
}
