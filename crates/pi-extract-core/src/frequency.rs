//! Frequency module - represents a measured frequency grid
//!
//! Frequencies are always stored in Hz; the unit is only kept for display.

use ndarray::Array1;
use std::f64::consts::PI;

use crate::constants::MIN_POINTS;
use crate::error::{ExtractionError, Result};
use crate::math::search::nearest_index;

/// Frequency unit enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrequencyUnit {
    Hz,
    KHz,
    MHz,
    #[default]
    GHz,
    THz,
}

impl FrequencyUnit {
    /// Get the multiplier to convert to Hz
    pub fn multiplier(&self) -> f64 {
        match self {
            FrequencyUnit::Hz => 1.0,
            FrequencyUnit::KHz => 1e3,
            FrequencyUnit::MHz => 1e6,
            FrequencyUnit::GHz => 1e9,
            FrequencyUnit::THz => 1e12,
        }
    }

    /// Parse from string (case-insensitive)
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "hz" => Some(FrequencyUnit::Hz),
            "khz" => Some(FrequencyUnit::KHz),
            "mhz" => Some(FrequencyUnit::MHz),
            "ghz" => Some(FrequencyUnit::GHz),
            "thz" => Some(FrequencyUnit::THz),
            _ => None,
        }
    }
}

/// A frequency grid
#[derive(Debug, Clone, PartialEq)]
pub struct Frequency {
    /// Frequency vector in Hz
    f: Vec<f64>,
    /// Display unit
    unit: FrequencyUnit,
}

impl Frequency {
    /// Create a linearly spaced grid
    ///
    /// # Example
    /// ```
    /// use pi_extract_core::frequency::{Frequency, FrequencyUnit};
    /// let freq = Frequency::new(1.0, 5.0, 5, FrequencyUnit::GHz);
    /// assert_eq!(freq.npoints(), 5);
    /// ```
    pub fn new(start: f64, stop: f64, npoints: usize, unit: FrequencyUnit) -> Self {
        let mult = unit.multiplier();
        let start_hz = start * mult;
        let stop_hz = stop * mult;

        let f = match npoints {
            0 => Vec::new(),
            1 => vec![start_hz],
            _ => {
                let step = (stop_hz - start_hz) / (npoints - 1) as f64;
                (0..npoints).map(|i| start_hz + i as f64 * step).collect()
            }
        };

        Self { f, unit }
    }

    /// Create from values expressed in `unit`
    pub fn from_f(f: Vec<f64>, unit: FrequencyUnit) -> Self {
        let mult = unit.multiplier();
        Self {
            f: f.into_iter().map(|x| x * mult).collect(),
            unit,
        }
    }

    /// Create from values already in Hz
    pub fn from_hz(f: Vec<f64>, unit: FrequencyUnit) -> Self {
        Self { f, unit }
    }

    /// Check the grid invariants: at least two finite, non-negative,
    /// strictly increasing samples.
    pub fn validate(&self) -> Result<()> {
        if self.f.len() < MIN_POINTS {
            return Err(ExtractionError::malformed(format!(
                "frequency grid needs at least {} points, got {}",
                MIN_POINTS,
                self.f.len()
            )));
        }
        if let Some(bad) = self.f.iter().find(|x| !x.is_finite() || **x < 0.0) {
            return Err(ExtractionError::malformed(format!(
                "frequency grid contains invalid sample {} Hz",
                bad
            )));
        }
        if let Some(i) = self.f.windows(2).position(|w| w[1] <= w[0]) {
            return Err(ExtractionError::malformed(format!(
                "frequency grid is not strictly increasing at index {} ({} Hz -> {} Hz)",
                i + 1,
                self.f[i],
                self.f[i + 1]
            )));
        }
        Ok(())
    }

    /// Get frequency vector in Hz
    #[inline]
    pub fn f(&self) -> &[f64] {
        &self.f
    }

    /// Get frequency vector in the current unit
    pub fn f_scaled(&self) -> Vec<f64> {
        let mult = self.unit.multiplier();
        self.f.iter().map(|&x| x / mult).collect()
    }

    /// Angular frequency 2*pi*f for every sample
    pub fn omega(&self) -> Array1<f64> {
        self.f.iter().map(|&x| 2.0 * PI * x).collect()
    }

    /// Get the number of frequency points
    #[inline]
    pub fn npoints(&self) -> usize {
        self.f.len()
    }

    /// Get the start frequency in Hz
    #[inline]
    pub fn start(&self) -> f64 {
        *self.f.first().unwrap_or(&0.0)
    }

    /// Get the stop frequency in Hz
    #[inline]
    pub fn stop(&self) -> f64 {
        *self.f.last().unwrap_or(&0.0)
    }

    /// Get the current unit
    #[inline]
    pub fn unit(&self) -> FrequencyUnit {
        self.unit
    }

    /// Index of the sample closest to `target` (Hz); ties go to the lower index
    pub fn nearest_index(&self, target: f64) -> Option<usize> {
        nearest_index(&self.f, target)
    }

    /// New grid made of the samples at `indices`
    pub fn select(&self, indices: &[usize]) -> Self {
        Self {
            f: indices.iter().map(|&i| self.f[i]).collect(),
            unit: self.unit,
        }
    }
}
