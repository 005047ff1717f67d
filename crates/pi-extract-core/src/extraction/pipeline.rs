//! End-to-end extraction: strip DC, validate, convert, decompose, sample

use ndarray::Array3;
use num_complex::Complex64;
use tracing::{debug, warn};

use super::config::ExtractionConfig;
use super::differential::DifferentialCurve;
use super::pi_model::PiModelCurve;
use super::result::{Degeneracy, ExtractionResult};
use crate::error::{ExtractionError, Result};
use crate::frequency::Frequency;
use crate::math::transforms::{s2z_with_tol, z2y_with_tol};
use crate::network::Network;

/// Everything computed for one run
///
/// All arrays and curves are index-aligned with the DC-stripped grid of
/// [`Extraction::network`].
#[derive(Debug, Clone)]
pub struct Extraction {
    network: Network,
    z: Array3<Complex64>,
    y: Array3<Complex64>,
    differential: DifferentialCurve,
    pi_model: PiModelCurve,
    result: ExtractionResult,
}

impl Extraction {
    /// Network after DC stripping
    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn frequency(&self) -> &Frequency {
        self.network.frequency()
    }

    /// Z-parameters `[nfreq, 2, 2]`
    pub fn z(&self) -> &Array3<Complex64> {
        &self.z
    }

    /// Y-parameters `[nfreq, 2, 2]`
    pub fn y(&self) -> &Array3<Complex64> {
        &self.y
    }

    pub fn differential(&self) -> &DifferentialCurve {
        &self.differential
    }

    pub fn pi_model(&self) -> &PiModelCurve {
        &self.pi_model
    }

    /// Single-frequency summary
    pub fn result(&self) -> &ExtractionResult {
        &self.result
    }

    /// Breakdowns at sample `index`
    pub fn degeneracies_at(&self, index: usize) -> Vec<Degeneracy> {
        Degeneracy::detect(
            self.z.index_axis(ndarray::Axis(0), index),
            self.y.index_axis(ndarray::Axis(0), index),
            &self.differential.points()[index],
            &self.pi_model.points()[index],
        )
    }

    /// Indices of every flagged sample in the sweep
    pub fn degenerate_indices(&self) -> Vec<usize> {
        (0..self.differential.len())
            .filter(|&i| !self.degeneracies_at(i).is_empty())
            .collect()
    }
}

/// Check `first <= target < last` on `frequency` (all in Hz)
///
/// A NaN target is rejected.
pub fn validate_target(frequency: &Frequency, target_hz: f64) -> Result<()> {
    let start = frequency.start();
    let stop = frequency.stop();
    if target_hz >= start && target_hz < stop {
        Ok(())
    } else {
        Err(ExtractionError::InvalidFrequencyRange {
            target: target_hz,
            start,
            stop,
        })
    }
}

/// Run the full extraction on `network` at `target_hz`
///
/// Fatal conditions (bad grid, target out of range) are returned before any
/// conversion. Per-sample singularities produce NaN values and are reported
/// through [`ExtractionResult::target_degeneracies`] and
/// [`ExtractionResult::peak_degeneracies`].
pub fn extract(network: &Network, target_hz: f64, config: &ExtractionConfig) -> Result<Extraction> {
    let network = network.strip_dc(config.dc_floor_hz)?;
    let frequency = network.frequency();
    validate_target(frequency, target_hz)?;
    debug!(
        npoints = network.nfreq(),
        start_hz = frequency.start(),
        stop_hz = frequency.stop(),
        target_hz,
        "validated sweep"
    );

    let tol = config.singular_tol;
    let z = s2z_with_tol(network.s(), network.z0(), tol);
    let y = z2y_with_tol(&z, tol);
    debug!("converted S to Z and Y");

    let differential = DifferentialCurve::from_z(frequency, &z, config);
    let pi_model = PiModelCurve::from_y(frequency, &y, config);
    debug!("decomposed differential and pi models");

    let index = frequency
        .nearest_index(target_hz)
        .ok_or_else(|| ExtractionError::malformed("empty frequency grid"))?;
    let peak_q = differential.peak_q(frequency);

    let mut extraction = Extraction {
        z,
        y,
        result: ExtractionResult {
            target_frequency: target_hz,
            index,
            frequency: frequency.f()[index],
            differential: differential.at(index),
            pi_model: pi_model.at(index),
            dc_inductance: differential.at(1).inductance,
            dc_resistance: differential.at(0).resistance,
            peak_q,
            target_degeneracies: Vec::new(),
            peak_degeneracies: Vec::new(),
        },
        differential,
        pi_model,
        network,
    };

    extraction.result.target_degeneracies = extraction.degeneracies_at(index);
    extraction.result.peak_degeneracies = match peak_q {
        Some(peak) => extraction.degeneracies_at(peak.index),
        None => vec![Degeneracy::UndefinedQ],
    };

    let degenerate = extraction.degenerate_indices();
    if !degenerate.is_empty() {
        warn!(
            count = degenerate.len(),
            first_index = degenerate[0],
            "sweep contains degenerate samples"
        );
    }
    debug!(
        index,
        frequency_hz = extraction.result.frequency,
        "sampled target frequency"
    );

    Ok(extraction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::FrequencyUnit;
    use crate::math::conversions::magdeg_2_reim;
    use crate::math::transforms::y2s;
    use ndarray::Array1;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn symmetric_network(freq: Frequency) -> Network {
        let s11 = magdeg_2_reim(0.1, 0.0);
        let s12 = magdeg_2_reim(0.95, -10.0);
        let n = freq.npoints();
        let s = Array3::from_shape_fn((n, 2, 2), |(_, i, j)| if i == j { s11 } else { s12 });
        Network::with_uniform_z0(freq, s, 50.0).unwrap()
    }

    fn thru_network(freq: Frequency) -> Network {
        let n = freq.npoints();
        let s = Array3::from_shape_fn((n, 2, 2), |(_, i, j)| {
            if i == j {
                Complex64::new(0.0, 0.0)
            } else {
                Complex64::new(1.0, 0.0)
            }
        });
        Network::with_uniform_z0(freq, s, 50.0).unwrap()
    }

    #[test]
    fn test_validate_target_range() {
        let freq = Frequency::new(1.0, 10.0, 10, FrequencyUnit::GHz);
        assert!(validate_target(&freq, 1e9).is_ok());
        assert!(validate_target(&freq, 9.999e9).is_ok());
        assert!(matches!(
            validate_target(&freq, 10e9),
            Err(ExtractionError::InvalidFrequencyRange { .. })
        ));
        assert!(validate_target(&freq, 0.5e9).is_err());
        assert!(validate_target(&freq, f64::NAN).is_err());
    }

    #[test]
    fn test_target_at_last_sample_rejected() {
        let ntwk = symmetric_network(Frequency::new(1.0, 10.0, 10, FrequencyUnit::GHz));
        let config = ExtractionConfig::default();

        let err = extract(&ntwk, 10e9, &config).unwrap_err();
        assert!(err.to_string().contains("10000000000"));

        let ok = extract(&ntwk, 9.999e9, &config).unwrap();
        assert_eq!(ok.result().index, 9);
    }

    #[test]
    fn test_symmetric_two_port() {
        let ntwk = symmetric_network(Frequency::new(1.0, 5.0, 5, FrequencyUnit::GHz));
        let ext = extract(&ntwk, 3.4e9, &ExtractionConfig::default()).unwrap();
        let res = ext.result();

        assert_eq!(res.index, 2);
        assert_relative_eq!(res.frequency, 3e9);
        assert!(res.target_degeneracies.is_empty());
        assert!(!res.is_degenerate());

        for (k, p) in ext.pi_model().points().iter().enumerate() {
            let w = 2.0 * PI * ext.frequency().f()[k];
            assert_relative_eq!(p.shunt_capacitance1, p.shunt_capacitance2, max_relative = 1e-9);
            assert!(p.series_resistance >= 0.0);
            assert_relative_eq!(
                p.series_inductance,
                p.series_impedance.im / w,
                max_relative = 1e-6
            );
        }

        // Frequency-independent S: the element values follow from Z alone
        let pi = res.pi_model;
        assert_relative_eq!(pi.series_impedance.re, 7.969, epsilon = 1e-3);
        assert_relative_eq!(pi.series_impedance.im, 9.653, epsilon = 1e-3);
        assert_relative_eq!(res.differential.q, 1.2014, epsilon = 1e-3);
    }

    #[test]
    fn test_dc_values_and_peak_q() {
        let ntwk = symmetric_network(Frequency::new(1.0, 5.0, 5, FrequencyUnit::GHz));
        let ext = extract(&ntwk, 1e9, &ExtractionConfig::default()).unwrap();
        let res = ext.result();

        assert_relative_eq!(res.dc_inductance, ext.differential().at(1).inductance);
        assert_relative_eq!(res.dc_resistance, ext.differential().at(0).resistance);

        // Q is the same at every sample, so the first one wins
        let peak = res.peak_q.unwrap();
        assert_eq!(peak.index, 0);
        assert_relative_eq!(peak.frequency, 1e9);
    }

    #[test]
    fn test_dc_stripped_before_validation() {
        let ntwk = symmetric_network(Frequency::new(0.0, 5.0, 11, FrequencyUnit::GHz));
        let ext = extract(&ntwk, 2e9, &ExtractionConfig::default()).unwrap();

        assert_relative_eq!(ext.frequency().start(), 1e9);
        assert_eq!(ext.frequency().npoints(), 9);
        assert!(ext.differential().inductance().iter().all(|l| l.is_finite()));

        // Target below the floor is out of range once DC is gone
        assert!(matches!(
            extract(&ntwk, 0.5e9, &ExtractionConfig::default()),
            Err(ExtractionError::InvalidFrequencyRange { .. })
        ));
    }

    #[test]
    fn test_dc_floor_from_config() {
        let ntwk = symmetric_network(Frequency::new(0.0, 5.0, 11, FrequencyUnit::GHz));
        let config = ExtractionConfig::default().with_dc_floor(2e9);
        let ext = extract(&ntwk, 2e9, &config).unwrap();
        assert_relative_eq!(ext.frequency().start(), 2e9);
    }

    /// Pi network whose port 1 shunt is purely resistive at `resistive_index`
    fn resistive_shunt_network(freq: Frequency, resistive_index: usize) -> Network {
        let n = freq.npoints();
        let mut y = Array3::<Complex64>::zeros((n, 2, 2));
        for f in 0..n {
            let y2 = Complex64::new(20.0, -200.0).inv();
            let (ys, y1) = if f == resistive_index {
                (Complex64::new(1.0, 50.0).inv(), Complex64::new(0.05, 0.0))
            } else {
                (Complex64::new(2.0, 10.0).inv(), y2)
            };
            y[[f, 0, 0]] = y1 + ys;
            y[[f, 0, 1]] = -ys;
            y[[f, 1, 0]] = -ys;
            y[[f, 1, 1]] = y2 + ys;
        }
        let z0 = Array1::from_elem(2, Complex64::new(50.0, 0.0));
        Network::new(freq, y2s(&y, &z0), z0).unwrap()
    }

    #[test]
    fn test_degenerate_peak_with_clean_target() {
        let ntwk = resistive_shunt_network(Frequency::new(1.0, 4.0, 4, FrequencyUnit::GHz), 2);
        let ext = extract(&ntwk, 1e9, &ExtractionConfig::default()).unwrap();
        let res = ext.result();

        assert_eq!(res.index, 0);
        assert!(res.target_degeneracies.is_empty());
        assert_relative_eq!(res.differential.q, 4.8094, epsilon = 1e-3);

        let peak = res.peak_q.unwrap();
        assert_eq!(peak.index, 2);
        assert_relative_eq!(peak.frequency, 3e9);
        assert_relative_eq!(peak.value, 11.1536, epsilon = 1e-3);
        assert_eq!(res.peak_degeneracies, vec![Degeneracy::DegenerateShunt1]);
        assert!(res.is_degenerate());
        assert_eq!(ext.degenerate_indices(), vec![2]);
    }

    #[test]
    fn test_degenerate_target_flagged() {
        let ntwk = thru_network(Frequency::new(1.0, 5.0, 5, FrequencyUnit::GHz));
        let ext = extract(&ntwk, 2e9, &ExtractionConfig::default()).unwrap();
        let res = ext.result();

        assert!(res.is_degenerate());
        assert!(res
            .target_degeneracies
            .contains(&Degeneracy::SingularImpedance));
        assert!(res.peak_q.is_none());
        assert_eq!(res.peak_degeneracies, vec![Degeneracy::UndefinedQ]);
        assert!(res.differential.inductance.is_nan());
        assert_eq!(ext.degenerate_indices().len(), 5);
    }
}
