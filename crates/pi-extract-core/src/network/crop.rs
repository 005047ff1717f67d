//! Frequency-range selection (DC stripping)

use ndarray::Array3;
use num_complex::Complex64;
use tracing::debug;

use super::core::Network;
use crate::constants::{DC_FREQ_TOL, MIN_POINTS};
use crate::error::{ExtractionError, Result};

impl Network {
    /// Network holding only the samples at `indices` (in order)
    fn select(&self, indices: &[usize]) -> Result<Network> {
        let s = Array3::<Complex64>::from_shape_fn((indices.len(), 2, 2), |(k, i, j)| {
            self.s[[indices[k], i, j]]
        });
        let mut ntwk = Network::new(self.frequency.select(indices), s, self.z0.clone())?;
        ntwk.name = self.name.clone();
        ntwk.comments = self.comments.clone();
        Ok(ntwk)
    }

    /// Remove a zero-frequency region from the start of the sweep
    ///
    /// If the first sample is at DC, every sample below `floor_hz` (and any
    /// sample at DC) is dropped, so the new sweep starts at the nearest
    /// sample >= `floor_hz`. A sweep that does not start at DC is returned
    /// unchanged.
    pub fn strip_dc(&self, floor_hz: f64) -> Result<Network> {
        if self.frequency.start().abs() > DC_FREQ_TOL {
            return Ok(self.clone());
        }

        let indices: Vec<usize> = self
            .f()
            .iter()
            .enumerate()
            .filter(|(_, &freq)| freq >= floor_hz && freq > DC_FREQ_TOL)
            .map(|(i, _)| i)
            .collect();

        if indices.len() < MIN_POINTS {
            return Err(ExtractionError::malformed(format!(
                "sweep starts at DC and only {} sample(s) remain at or above the {} Hz floor",
                indices.len(),
                floor_hz
            )));
        }

        debug!(
            removed = self.nfreq() - indices.len(),
            new_start_hz = self.f()[indices[0]],
            "stripped DC region"
        );
        self.select(&indices)
    }
}
