//! Output seam for extraction results

use crate::extraction::Extraction;

/// Consumes a finished extraction
///
/// Reporters get the single-frequency result together with the full
/// curves and own all unit scaling and formatting.
pub trait Reporter {
    type Error;

    fn report(&mut self, extraction: &Extraction) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::{extract, ExtractionConfig};
    use crate::frequency::{Frequency, FrequencyUnit};
    use crate::network::Network;
    use ndarray::Array3;
    use num_complex::Complex64;

    /// Records the selected frequency of every report
    #[derive(Default)]
    struct Recorder {
        seen: Vec<f64>,
    }

    impl Reporter for Recorder {
        type Error = std::convert::Infallible;

        fn report(&mut self, extraction: &Extraction) -> Result<(), Self::Error> {
            self.seen.push(extraction.result().frequency);
            Ok(())
        }
    }

    #[test]
    fn test_reporter_receives_result() {
        let freq = Frequency::new(1.0, 4.0, 4, FrequencyUnit::GHz);
        let s = Array3::from_shape_fn((4, 2, 2), |(_, i, j)| {
            if i == j {
                Complex64::new(0.2, 0.0)
            } else {
                Complex64::new(0.0, -0.8)
            }
        });
        let ntwk = Network::with_default_z0(freq, s).unwrap();
        let ext = extract(&ntwk, 2.2e9, &ExtractionConfig::default()).unwrap();

        let mut rec = Recorder::default();
        rec.report(&ext).unwrap();
        assert_eq!(rec.seen, vec![2e9]);
    }
}
