//! Magnitude spectrogram storage.

/// A real-valued time-frequency magnitude array, indexed `[bin][frame]`.
///
/// Values produced by the engine's transforms are non-negative. The data
/// is stored row-major: all frames of bin 0, then all frames of bin 1, etc.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MagnitudeSpectrogram {
    num_bins: usize,
    num_frames: usize,
    data: Vec<f64>,
}

impl MagnitudeSpectrogram {
    /// Creates a zero-filled spectrogram with the given geometry.
    pub fn zeros(num_bins: usize, num_frames: usize) -> Self {
        Self {
            num_bins,
            num_frames,
            data: vec![0.0; num_bins * num_frames],
        }
    }

    /// Creates a spectrogram from row-major data.
    ///
    /// # Panics
    /// Panics if `data.len() != num_bins * num_frames`.
    pub fn from_data(num_bins: usize, num_frames: usize, data: Vec<f64>) -> Self {
        assert_eq!(
            data.len(),
            num_bins * num_frames,
            "spectrogram data length must match geometry"
        );
        Self {
            num_bins,
            num_frames,
            data,
        }
    }

    /// Number of frequency bins (rows).
    pub fn num_bins(&self) -> usize {
        self.num_bins
    }

    /// Number of time frames (columns).
    pub fn num_frames(&self) -> usize {
        self.num_frames
    }

    /// Returns the value at `(bin, frame)`.
    ///
    /// # Panics
    /// Panics if the index is out of bounds.
    pub fn get(&self, bin: usize, frame: usize) -> f64 {
        assert!(bin < self.num_bins && frame < self.num_frames);
        self.data[bin * self.num_frames + frame]
    }

    /// Sets the value at `(bin, frame)`.
    ///
    /// # Panics
    /// Panics if the index is out of bounds.
    pub fn set(&mut self, bin: usize, frame: usize, value: f64) {
        assert!(bin < self.num_bins && frame < self.num_frames);
        self.data[bin * self.num_frames + frame] = value;
    }

    /// Row-major view of the underlying data.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// True if the spectrogram has no bins or no frames.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Index of the bin with the highest total magnitude across frames.
    ///
    /// Returns `None` for an empty spectrogram. Useful for locating the
    /// dominant partial of a tonal signal.
    pub fn dominant_bin(&self) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        let mut best_bin = 0;
        let mut best_energy = f64::NEG_INFINITY;
        for bin in 0..self.num_bins {
            let energy: f64 = (0..self.num_frames).map(|t| self.get(bin, t)).sum();
            if energy > best_energy {
                best_energy = energy;
                best_bin = bin;
            }
        }
        Some(best_bin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeros_geometry() {
        let spec = MagnitudeSpectrogram::zeros(5, 3);
        assert_eq!(spec.num_bins(), 5);
        assert_eq!(spec.num_frames(), 3);
        assert!(spec.data().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_get_set_round_trip() {
        let mut spec = MagnitudeSpectrogram::zeros(4, 4);
        spec.set(2, 3, 1.5);
        assert_eq!(spec.get(2, 3), 1.5);
        assert_eq!(spec.get(3, 2), 0.0);
    }

    #[test]
    fn test_dominant_bin() {
        let mut spec = MagnitudeSpectrogram::zeros(8, 2);
        spec.set(5, 0, 3.0);
        spec.set(5, 1, 2.0);
        spec.set(1, 0, 1.0);
        assert_eq!(spec.dominant_bin(), Some(5));
    }

    #[test]
    fn test_dominant_bin_empty() {
        let spec = MagnitudeSpectrogram::zeros(0, 0);
        assert_eq!(spec.dominant_bin(), None);
    }

    #[test]
    #[should_panic]
    fn test_from_data_length_mismatch() {
        let _ = MagnitudeSpectrogram::from_data(2, 2, vec![0.0; 3]);
    }
}
