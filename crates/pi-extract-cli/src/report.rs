//! Text, CSV and JSON reporters

use std::io::Write;

use pi_extract_core::extraction::{Degeneracy, Extraction};
use pi_extract_core::report::Reporter;
use serde::Serialize;

const GHZ: f64 = 1e9;
const NANO: f64 = 1e9;
const FEMTO: f64 = 1e15;

/// Human-readable summary at the selected frequency
pub struct TextReporter<W: Write> {
    out: W,
}

impl<W: Write> TextReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn warnings(
        &mut self,
        label: &str,
        f_hz: Option<f64>,
        flags: &[Degeneracy],
    ) -> std::io::Result<()> {
        for flag in flags {
            match f_hz {
                Some(f) => writeln!(
                    self.out,
                    "WARNING: {} sample at {:.3} GHz: {}",
                    label,
                    f / GHZ,
                    flag
                )?,
                None => writeln!(self.out, "WARNING: {}: {}", label, flag)?,
            }
        }
        Ok(())
    }
}

impl<W: Write> Reporter for TextReporter<W> {
    type Error = std::io::Error;

    fn report(&mut self, extraction: &Extraction) -> Result<(), Self::Error> {
        let res = extraction.result();
        let diff = &res.differential;
        let pi = &res.pi_model;
        let f_ghz = res.frequency / GHZ;

        writeln!(self.out)?;
        writeln!(self.out, "Differential inductor parameters")?;
        writeln!(
            self.out,
            "Effective series L  [nH] : {:.3} @ {:.3} GHz",
            diff.inductance * NANO,
            f_ghz
        )?;
        writeln!(
            self.out,
            "Effective series R  [Ohm]: {:.3} @ {:.3} GHz",
            diff.resistance, f_ghz
        )?;
        writeln!(self.out, "Differential Q factor    : {:.2} @ {:.3} GHz", diff.q, f_ghz)?;
        writeln!(self.out, "----------------------")?;
        writeln!(self.out, "L_DC      [nH] : {:.3}", res.dc_inductance * NANO)?;
        writeln!(self.out, "R_DC      [Ohm]: {:.3}", res.dc_resistance)?;
        match res.peak_q {
            Some(peak) => writeln!(
                self.out,
                "Peak Q         : {:.2} @ {:.3} GHz",
                peak.value,
                peak.frequency / GHZ
            )?,
            None => writeln!(self.out, "Peak Q         : undefined")?,
        }

        writeln!(self.out)?;
        writeln!(self.out, "Pi model extraction (narrowband) at {:.3} GHz", f_ghz)?;
        writeln!(self.out, "Series L  [nH] : {:.3}", pi.series_inductance * NANO)?;
        writeln!(self.out, "Series R  [Ohm]: {:.3}", pi.series_resistance)?;
        writeln!(self.out, "Shunt C @ port 1 [fF] : {:.3}", pi.shunt_capacitance1 * FEMTO)?;
        writeln!(self.out, "Shunt R @ port 1 [Ohm]: {:.3}", pi.shunt_resistance1)?;
        writeln!(self.out, "Shunt C @ port 2 [fF] : {:.3}", pi.shunt_capacitance2 * FEMTO)?;
        writeln!(self.out, "Shunt R @ port 2 [Ohm]: {:.3}", pi.shunt_resistance2)?;

        if res.is_degenerate() {
            writeln!(self.out)?;
            self.warnings("selected", Some(res.frequency), &res.target_degeneracies)?;
            let peak_f = res.peak_q.map(|p| p.frequency);
            self.warnings("peak-Q", peak_f, &res.peak_degeneracies)?;
        }
        self.out.flush()
    }
}

/// One CSV row per frequency sample, in display units
#[derive(Debug, Serialize)]
struct CurveRow {
    f_ghz: f64,
    ldiff_nh: f64,
    rdiff_ohm: f64,
    qdiff: f64,
    lseries_nh: f64,
    rseries_ohm: f64,
    cshunt1_ff: f64,
    cshunt2_ff: f64,
    rshunt1_ohm: f64,
    rshunt2_ohm: f64,
    rshunt_avg_ohm: f64,
}

/// Writes the full differential and pi-model curves as CSV
pub struct CsvReporter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(out),
        }
    }
}

impl<W: Write> Reporter for CsvReporter<W> {
    type Error = csv::Error;

    fn report(&mut self, extraction: &Extraction) -> Result<(), Self::Error> {
        let f = extraction.frequency().f();
        let rows = extraction
            .differential()
            .points()
            .iter()
            .zip(extraction.pi_model().points())
            .zip(f);

        for ((d, p), &freq) in rows {
            self.writer.serialize(CurveRow {
                f_ghz: freq / GHZ,
                ldiff_nh: d.inductance * NANO,
                rdiff_ohm: d.resistance,
                qdiff: d.q,
                lseries_nh: p.series_inductance * NANO,
                rseries_ohm: p.series_resistance,
                cshunt1_ff: p.shunt_capacitance1 * FEMTO,
                cshunt2_ff: p.shunt_capacitance2 * FEMTO,
                rshunt1_ohm: p.shunt_resistance1,
                rshunt2_ohm: p.shunt_resistance2,
                rshunt_avg_ohm: p.shunt_resistance_avg,
            })?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

/// Prints the single-frequency result as pretty JSON (SI units)
pub struct JsonReporter<W: Write> {
    out: W,
}

impl<W: Write> JsonReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Reporter for JsonReporter<W> {
    type Error = serde_json::Error;

    fn report(&mut self, extraction: &Extraction) -> Result<(), Self::Error> {
        serde_json::to_writer_pretty(&mut self.out, extraction.result())?;
        writeln!(self.out).map_err(serde_json::Error::io)
    }
}
