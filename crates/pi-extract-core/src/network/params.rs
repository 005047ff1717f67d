//! Network parameter access (S, Z, Y)

use ndarray::{Array1, Array3};
use num_complex::Complex64;

use super::core::Network;
use crate::frequency::Frequency;
use crate::math::transforms::{s2y, s2z};

impl Network {
    /// Get reference impedance
    pub fn z0(&self) -> &Array1<Complex64> {
        &self.z0
    }

    /// Get S-parameters
    pub fn s(&self) -> &Array3<Complex64> {
        &self.s
    }

    /// Get frequency object
    pub fn frequency(&self) -> &Frequency {
        &self.frequency
    }

    /// Get frequency vector in Hz
    pub fn f(&self) -> &[f64] {
        self.frequency.f()
    }

    /// Get Z-parameters (impedance)
    pub fn z(&self) -> Array3<Complex64> {
        s2z(&self.s, &self.z0)
    }

    /// Get Y-parameters (admittance)
    pub fn y(&self) -> Array3<Complex64> {
        s2y(&self.s, &self.z0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::FrequencyUnit;
    use approx::assert_relative_eq;

    #[test]
    fn test_s_to_z_matched() {
        // A matched two-port (S = 0) has Z = diag(z0)
        let freq = Frequency::new(1.0, 2.0, 2, FrequencyUnit::GHz);
        let s = Array3::<Complex64>::zeros((2, 2, 2));
        let ntwk = Network::with_uniform_z0(freq, s, 75.0).unwrap();
        let z = ntwk.z();

        assert_relative_eq!(z[[0, 0, 0]].re, 75.0, epsilon = 1e-10);
        assert_relative_eq!(z[[1, 1, 1]].re, 75.0, epsilon = 1e-10);
        assert_relative_eq!(z[[0, 0, 0]].im, 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_y_shape_matches_s() {
        let freq = Frequency::new(1.0, 3.0, 3, FrequencyUnit::GHz);
        let mut s = Array3::<Complex64>::zeros((3, 2, 2));
        s[[1, 0, 1]] = Complex64::new(0.5, 0.0);
        s[[1, 1, 0]] = Complex64::new(0.5, 0.0);
        let ntwk = Network::with_default_z0(freq, s).unwrap();

        assert_eq!(ntwk.y().shape(), ntwk.s().shape());
        assert_relative_eq!(ntwk.y()[[0, 0, 0]].re, 1.0 / 50.0, epsilon = 1e-12);
    }
}
