//! Single-frequency extraction result

use ndarray::ArrayView2;
use num_complex::Complex64;
use std::fmt;

use super::differential::DifferentialPoint;
use super::pi_model::PiModelPoint;
use crate::math::matrix_ops::all_finite;

/// Frequency and value of the highest differential Q in the sweep
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PeakQ {
    /// Sample index in the (DC-stripped) grid
    pub index: usize,
    /// Frequency in Hz
    pub frequency: f64,
    pub value: f64,
}

/// Numeric breakdown at a single sample
///
/// A flagged sample carries NaN in the affected quantities, so any value
/// reported from it is meaningless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "snake_case")
)]
pub enum Degeneracy {
    /// I - S is singular, so Z does not exist
    SingularImpedance,
    /// Z is singular, so Y does not exist
    SingularAdmittance,
    /// Re(Zdiff) is zero
    UndefinedQ,
    /// Mutual admittance vanishes: the series branch is open
    OpenSeriesBranch,
    /// Shunt branch at port 1 has no finite impedance or capacitance
    DegenerateShunt1,
    /// Shunt branch at port 2 has no finite impedance or capacitance
    DegenerateShunt2,
}

impl fmt::Display for Degeneracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Degeneracy::SingularImpedance => "impedance matrix is singular (I - S not invertible)",
            Degeneracy::SingularAdmittance => "admittance matrix is singular (Z not invertible)",
            Degeneracy::UndefinedQ => "differential Q is undefined (zero resistance)",
            Degeneracy::OpenSeriesBranch => "series branch is open (zero mutual admittance)",
            Degeneracy::DegenerateShunt1 => "shunt branch at port 1 is degenerate",
            Degeneracy::DegenerateShunt2 => "shunt branch at port 2 is degenerate",
        };
        f.write_str(msg)
    }
}

impl Degeneracy {
    /// All breakdowns present at one sample
    pub(crate) fn detect(
        z: ArrayView2<Complex64>,
        y: ArrayView2<Complex64>,
        diff: &DifferentialPoint,
        pi: &PiModelPoint,
    ) -> Vec<Degeneracy> {
        let mut flags = Vec::new();
        if !all_finite(&z) {
            flags.push(Degeneracy::SingularImpedance);
        }
        if !all_finite(&y) {
            flags.push(Degeneracy::SingularAdmittance);
        }
        if !diff.q.is_finite() {
            flags.push(Degeneracy::UndefinedQ);
        }
        if !pi.series_impedance.is_finite() || !pi.series_inductance.is_finite() {
            flags.push(Degeneracy::OpenSeriesBranch);
        }
        if !pi.shunt_impedance1.is_finite() || !pi.shunt_capacitance1.is_finite() {
            flags.push(Degeneracy::DegenerateShunt1);
        }
        if !pi.shunt_impedance2.is_finite() || !pi.shunt_capacitance2.is_finite() {
            flags.push(Degeneracy::DegenerateShunt2);
        }
        flags
    }
}

/// Extraction snapshot at the grid sample nearest the target frequency
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ExtractionResult {
    /// Requested frequency in Hz
    pub target_frequency: f64,
    /// Selected sample index in the (DC-stripped) grid
    pub index: usize,
    /// Frequency of the selected sample in Hz
    pub frequency: f64,
    pub differential: DifferentialPoint,
    pub pi_model: PiModelPoint,
    /// Differential inductance at the second sample, as a low-frequency estimate (H)
    pub dc_inductance: f64,
    /// Differential resistance at the first sample (ohm)
    pub dc_resistance: f64,
    /// None when Q is undefined over the whole sweep
    pub peak_q: Option<PeakQ>,
    /// Breakdowns at the selected sample
    pub target_degeneracies: Vec<Degeneracy>,
    /// Breakdowns at the peak-Q sample
    pub peak_degeneracies: Vec<Degeneracy>,
}

impl ExtractionResult {
    /// True if either reported sample is flagged
    pub fn is_degenerate(&self) -> bool {
        !self.target_degeneracies.is_empty() || !self.peak_degeneracies.is_empty()
    }
}
