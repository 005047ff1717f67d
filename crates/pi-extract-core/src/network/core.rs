//! Core Network struct and constructors

use ndarray::{Array1, Array3};
use num_complex::Complex64;
use std::path::Path;

use crate::constants::DEFAULT_Z0;
use crate::error::{ExtractionError, Result};
use crate::frequency::Frequency;
use crate::math::transforms::{y2s, z2s};
use crate::touchstone::{ParameterType, Touchstone, TouchstoneError};

/// A two-port electrical network
///
/// Construction validates shape and grid invariants, so every Network in
/// circulation has a strictly increasing grid of at least two points and
/// `[nfreq, 2, 2]` S-parameters.
#[derive(Debug, Clone)]
pub struct Network {
    /// Frequency data
    pub(crate) frequency: Frequency,
    /// S-parameter data [nfreq, 2, 2]
    pub(crate) s: Array3<Complex64>,
    /// Reference impedance (per port)
    pub(crate) z0: Array1<Complex64>,
    /// Network name
    pub name: Option<String>,
    /// Comments
    pub comments: Vec<String>,
}

impl Network {
    /// Create a new Network from S-parameters
    pub fn new(frequency: Frequency, s: Array3<Complex64>, z0: Array1<Complex64>) -> Result<Self> {
        let shape = s.shape();
        if shape[1] != 2 || shape[2] != 2 {
            return Err(ExtractionError::malformed(format!(
                "expected a 2-port network, got {}x{} parameter matrices",
                shape[1], shape[2]
            )));
        }
        if shape[0] != frequency.npoints() {
            return Err(ExtractionError::malformed(format!(
                "frequency grid has {} points but {} parameter matrices were given",
                frequency.npoints(),
                shape[0]
            )));
        }
        if z0.len() != 2 {
            return Err(ExtractionError::malformed(format!(
                "expected 2 reference impedances, got {}",
                z0.len()
            )));
        }
        if z0.iter().any(|z| !z.is_finite() || z.norm() == 0.0) {
            return Err(ExtractionError::malformed(
                "reference impedance must be finite and non-zero",
            ));
        }
        frequency.validate()?;

        Ok(Self {
            frequency,
            s,
            z0,
            name: None,
            comments: Vec::new(),
        })
    }

    /// Create with the same real reference impedance on both ports
    pub fn with_uniform_z0(frequency: Frequency, s: Array3<Complex64>, z0: f64) -> Result<Self> {
        Self::new(frequency, s, Array1::from_elem(2, Complex64::new(z0, 0.0)))
    }

    /// Create with the default 50 ohm reference impedance
    pub fn with_default_z0(frequency: Frequency, s: Array3<Complex64>) -> Result<Self> {
        Self::with_uniform_z0(frequency, s, DEFAULT_Z0)
    }

    /// Create from a Touchstone file
    pub fn from_touchstone<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let ts = Touchstone::from_file(path)?;
        let mut ntwk = Self::from_touchstone_data(ts)?;
        ntwk.name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .map(str::to_string);
        Ok(ntwk)
    }

    /// Create from Touchstone content string
    ///
    /// v1 content is read as a 2-port; v2 content declares its own port count.
    ///
    /// # Example
    /// ```
    /// use pi_extract_core::Network;
    /// let content = "# GHz S RI R 50\n1.0 0.1 0 0.9 0 0.9 0 0.1 0\n2.0 0.1 0 0.9 0 0.9 0 0.1 0";
    /// let ntwk = Network::from_touchstone_content(content).unwrap();
    /// assert_eq!(ntwk.nfreq(), 2);
    /// ```
    pub fn from_touchstone_content(content: &str) -> Result<Self> {
        let ts = Touchstone::from_str(content, 2)?;
        Self::from_touchstone_data(ts)
    }

    /// Convert parsed Touchstone data to a Network
    fn from_touchstone_data(ts: Touchstone) -> Result<Self> {
        if ts.nports != 2 {
            return Err(ExtractionError::malformed(format!(
                "expected a 2-port Touchstone file, got {} ports",
                ts.nports
            )));
        }

        let z0 = Array1::from_vec(ts.z0.iter().map(|&x| Complex64::new(x, 0.0)).collect());
        let s = match ts.param_type {
            ParameterType::S => ts.data.clone(),
            ParameterType::Z => z2s(&Self::denormalize_v1(&ts, true), &z0),
            ParameterType::Y => y2s(&Self::denormalize_v1(&ts, false), &z0),
            other => return Err(TouchstoneError::UnsupportedParameter(other).into()),
        };

        let mut ntwk = Self::new(ts.frequency, s, z0)?;
        ntwk.comments = ts.comments;
        Ok(ntwk)
    }

    /// Denormalize v1 Z or Y data
    ///
    /// For Z-params: multiply by sqrt(Z0_i * Z0_j)
    /// For Y-params: divide by sqrt(Z0_i * Z0_j)
    fn denormalize_v1(ts: &Touchstone, is_z_params: bool) -> Array3<Complex64> {
        if ts.is_v2 {
            return ts.data.clone();
        }

        let scaling = ndarray::Array2::from_shape_fn((2, 2), |(i, j)| {
            Complex64::new((ts.z0[i] * ts.z0[j]).sqrt(), 0.0)
        });

        if is_z_params {
            ts.data.clone() * &scaling
        } else {
            ts.data.clone() / &scaling
        }
    }

    /// Get the number of ports
    #[inline]
    pub fn nports(&self) -> usize {
        self.s.shape()[1]
    }

    /// Get the number of frequency points
    #[inline]
    pub fn nfreq(&self) -> usize {
        self.s.shape()[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::FrequencyUnit;

    fn grid(n: usize) -> Frequency {
        Frequency::new(1.0, n as f64, n, FrequencyUnit::GHz)
    }

    #[test]
    fn test_network_creation() {
        let s = Array3::<Complex64>::zeros((10, 2, 2));
        let ntwk = Network::with_default_z0(grid(10), s).unwrap();

        assert_eq!(ntwk.nports(), 2);
        assert_eq!(ntwk.nfreq(), 10);
        assert_eq!(ntwk.z0[0].re, 50.0);
    }

    #[test]
    fn test_rejects_wrong_port_count() {
        let s = Array3::<Complex64>::zeros((3, 3, 3));
        let err = Network::with_default_z0(grid(3), s).unwrap_err();
        assert!(matches!(err, ExtractionError::MalformedInput(_)));
    }

    #[test]
    fn test_rejects_length_mismatch() {
        let s = Array3::<Complex64>::zeros((4, 2, 2));
        let err = Network::with_default_z0(grid(3), s).unwrap_err();
        assert!(err.to_string().contains("3 points but 4"));
    }

    #[test]
    fn test_rejects_single_point() {
        let s = Array3::<Complex64>::zeros((1, 2, 2));
        assert!(Network::with_default_z0(grid(1), s).is_err());
    }

    #[test]
    fn test_rejects_zero_z0() {
        let s = Array3::<Complex64>::zeros((2, 2, 2));
        assert!(Network::with_uniform_z0(grid(2), s, 0.0).is_err());
    }

    #[test]
    fn test_from_content_rejects_g_params() {
        let content = "# GHz G RI R 50\n1 0 0 0 0 0 0 0 0\n2 0 0 0 0 0 0 0 0";
        let err = Network::from_touchstone_content(content).unwrap_err();
        assert!(matches!(err, ExtractionError::Touchstone(_)));
    }

    #[test]
    fn test_from_content_z_params_v1() {
        // Normalized Z of a matched two-port: diag(1) -> S = 0
        let content = "# GHz Z RI R 50\n1 1 0 0 0 0 0 1 0\n2 1 0 0 0 0 0 1 0";
        let ntwk = Network::from_touchstone_content(content).unwrap();
        assert!(ntwk.s().iter().all(|c| c.norm() < 1e-12));
    }
}
