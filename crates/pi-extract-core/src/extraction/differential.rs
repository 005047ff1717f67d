//! Differential inductor model
//!
//! Driving the two ports against each other gives the differential
//! impedance Zdiff = z11 - z12 - z21 + z22. Inductance, resistance and Q
//! follow directly from it.

use ndarray::{Array1, Array3};
use num_complex::Complex64;

use super::config::ExtractionConfig;
use super::result::PeakQ;
use crate::frequency::Frequency;
use crate::math::search::argmax_ignore_nan;

/// Differential model values at one frequency
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DifferentialPoint {
    /// Differential impedance (ohm)
    pub impedance: Complex64,
    /// Im(Zdiff) / omega (H)
    pub inductance: f64,
    /// Re(Zdiff) (ohm)
    pub resistance: f64,
    /// Im(Zdiff) / Re(Zdiff); NaN when Re(Zdiff) is zero
    pub q: f64,
}

impl DifferentialPoint {
    fn from_impedance(impedance: Complex64, omega: f64, config: &ExtractionConfig) -> Self {
        let q = if config.is_negligible(impedance.re, impedance.norm()) {
            f64::NAN
        } else {
            impedance.im / impedance.re
        };
        Self {
            impedance,
            inductance: impedance.im / omega,
            resistance: impedance.re,
            q,
        }
    }
}

/// Differential model over the whole sweep, index-aligned with its grid
#[derive(Debug, Clone)]
pub struct DifferentialCurve {
    points: Vec<DifferentialPoint>,
}

impl DifferentialCurve {
    /// Build from Z-parameters `[nfreq, 2, 2]` sampled on `frequency`
    pub fn from_z(frequency: &Frequency, z: &Array3<Complex64>, config: &ExtractionConfig) -> Self {
        let omega = frequency.omega();
        let points = z
            .outer_iter()
            .zip(omega.iter())
            .map(|(z_f, &w)| {
                let zdiff = z_f[[0, 0]] - z_f[[0, 1]] - z_f[[1, 0]] + z_f[[1, 1]];
                DifferentialPoint::from_impedance(zdiff, w, config)
            })
            .collect();
        Self { points }
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Values at sample `index`
    pub fn at(&self, index: usize) -> DifferentialPoint {
        self.points[index]
    }

    pub fn points(&self) -> &[DifferentialPoint] {
        &self.points
    }

    pub fn impedance(&self) -> Array1<Complex64> {
        self.points.iter().map(|p| p.impedance).collect()
    }

    pub fn inductance(&self) -> Array1<f64> {
        self.points.iter().map(|p| p.inductance).collect()
    }

    pub fn resistance(&self) -> Array1<f64> {
        self.points.iter().map(|p| p.resistance).collect()
    }

    pub fn q(&self) -> Array1<f64> {
        self.points.iter().map(|p| p.q).collect()
    }

    /// Highest Q over the sweep
    ///
    /// NaN samples never win; ties go to the lowest frequency. Returns None
    /// when Q is undefined everywhere.
    pub fn peak_q(&self, frequency: &Frequency) -> Option<PeakQ> {
        let q: Vec<f64> = self.points.iter().map(|p| p.q).collect();
        argmax_ignore_nan(&q).map(|index| PeakQ {
            index,
            frequency: frequency.f()[index],
            value: q[index],
        })
    }
}
