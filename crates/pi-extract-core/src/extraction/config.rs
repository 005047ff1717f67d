//! Extraction configuration

use crate::constants::{DEFAULT_DC_FLOOR_HZ, NEAR_ZERO, REL_ZERO};

/// Tunable parameters of the extraction pipeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtractionConfig {
    /// Samples below this frequency (Hz) are dropped when the sweep starts at DC
    pub dc_floor_hz: f64,
    /// Magnitude below which a determinant or branch admittance counts as zero
    pub singular_tol: f64,
    /// Fraction of |Z| below which Re(Zdiff) or Im(Zshunt) counts as zero
    pub rel_tol: f64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            dc_floor_hz: DEFAULT_DC_FLOOR_HZ,
            singular_tol: NEAR_ZERO,
            rel_tol: REL_ZERO,
        }
    }
}

impl ExtractionConfig {
    /// Set the DC-stripping floor in Hz
    pub fn with_dc_floor(mut self, dc_floor_hz: f64) -> Self {
        self.dc_floor_hz = dc_floor_hz;
        self
    }

    /// Set the singularity tolerance
    pub fn with_singular_tol(mut self, singular_tol: f64) -> Self {
        self.singular_tol = singular_tol;
        self
    }

    /// Set the relative zero tolerance
    pub fn with_rel_tol(mut self, rel_tol: f64) -> Self {
        self.rel_tol = rel_tol;
        self
    }

    /// True when `part` of a complex value with modulus `magnitude` is zero
    /// up to conversion noise
    pub(crate) fn is_negligible(&self, part: f64, magnitude: f64) -> bool {
        let part = part.abs();
        part < self.singular_tol || part <= self.rel_tol * magnitude
    }
}
