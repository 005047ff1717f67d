//! Pi-model equivalent circuit
//!
//! A reciprocal two-port with admittance matrix Y maps onto a pi network:
//!
//! ```text
//!   port 1 ---+----[ Zseries ]----+--- port 2
//!             |                   |
//!          [Zshunt1]          [Zshunt2]
//!             |                   |
//!            gnd                 gnd
//! ```
//!
//! with ymn = (y12 + y21) / 2, Zseries = -1/ymn, Zshunt1 = 1/(y11 + ymn)
//! and Zshunt2 = 1/(y22 + ymn). The series branch is read as R + jwL and
//! each shunt branch as R + 1/(jwC).

use ndarray::{Array1, Array3, ArrayView2};
use num_complex::Complex64;

use super::config::ExtractionConfig;
use crate::frequency::Frequency;
use crate::math::matrix_ops::UNDEFINED;

/// Pi-model values at one frequency
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PiModelPoint {
    pub series_impedance: Complex64,
    pub shunt_impedance1: Complex64,
    pub shunt_impedance2: Complex64,
    /// Re(Zseries) (ohm)
    pub series_resistance: f64,
    /// Im(Zseries) / omega (H)
    pub series_inductance: f64,
    /// -1 / (omega * Im(Zshunt1)) (F)
    pub shunt_capacitance1: f64,
    /// -1 / (omega * Im(Zshunt2)) (F)
    pub shunt_capacitance2: f64,
    /// Re(Zshunt1) (ohm)
    pub shunt_resistance1: f64,
    /// Re(Zshunt2) (ohm)
    pub shunt_resistance2: f64,
    /// Mean of the two shunt resistances (ohm)
    pub shunt_resistance_avg: f64,
}

/// 1/y, or UNDEFINED when the branch admittance vanishes
#[inline]
fn branch_impedance(y: Complex64, tol: f64) -> Complex64 {
    if y.norm() < tol {
        UNDEFINED
    } else {
        y.inv()
    }
}

#[inline]
fn shunt_capacitance(z: Complex64, omega: f64, config: &ExtractionConfig) -> f64 {
    if config.is_negligible(z.im, z.norm()) {
        f64::NAN
    } else {
        -1.0 / (omega * z.im)
    }
}

impl PiModelPoint {
    fn from_admittance(y: ArrayView2<Complex64>, omega: f64, config: &ExtractionConfig) -> Self {
        let tol = config.singular_tol;
        let ymn = (y[[0, 1]] + y[[1, 0]]) / 2.0;
        let series_impedance = -branch_impedance(ymn, tol);
        let shunt_impedance1 = branch_impedance(y[[0, 0]] + ymn, tol);
        let shunt_impedance2 = branch_impedance(y[[1, 1]] + ymn, tol);

        Self {
            series_impedance,
            shunt_impedance1,
            shunt_impedance2,
            series_resistance: series_impedance.re,
            series_inductance: series_impedance.im / omega,
            shunt_capacitance1: shunt_capacitance(shunt_impedance1, omega, config),
            shunt_capacitance2: shunt_capacitance(shunt_impedance2, omega, config),
            shunt_resistance1: shunt_impedance1.re,
            shunt_resistance2: shunt_impedance2.re,
            shunt_resistance_avg: (shunt_impedance1.re + shunt_impedance2.re) / 2.0,
        }
    }
}

/// Pi model over the whole sweep, index-aligned with its grid
#[derive(Debug, Clone)]
pub struct PiModelCurve {
    points: Vec<PiModelPoint>,
}

impl PiModelCurve {
    /// Build from Y-parameters `[nfreq, 2, 2]` sampled on `frequency`
    pub fn from_y(frequency: &Frequency, y: &Array3<Complex64>, config: &ExtractionConfig) -> Self {
        let omega = frequency.omega();
        let points = y
            .outer_iter()
            .zip(omega.iter())
            .map(|(y_f, &w)| PiModelPoint::from_admittance(y_f, w, config))
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
    pub fn at(&self, index: usize) -> PiModelPoint {
        self.points[index]
    }

    pub fn points(&self) -> &[PiModelPoint] {
        &self.points
    }

    pub fn series_resistance(&self) -> Array1<f64> {
        self.column(|p| p.series_resistance)
    }

    pub fn series_inductance(&self) -> Array1<f64> {
        self.column(|p| p.series_inductance)
    }

    pub fn shunt_capacitance1(&self) -> Array1<f64> {
        self.column(|p| p.shunt_capacitance1)
    }

    pub fn shunt_capacitance2(&self) -> Array1<f64> {
        self.column(|p| p.shunt_capacitance2)
    }

    pub fn shunt_resistance1(&self) -> Array1<f64> {
        self.column(|p| p.shunt_resistance1)
    }

    pub fn shunt_resistance2(&self) -> Array1<f64> {
        self.column(|p| p.shunt_resistance2)
    }

    fn column(&self, field: impl Fn(&PiModelPoint) -> f64) -> Array1<f64> {
        self.points.iter().map(field).collect()
    }
}
