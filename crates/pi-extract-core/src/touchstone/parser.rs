//! Touchstone file parser
//!
//! Implements parsing of Touchstone v1 and v2 network data. Noise
//! parameter blocks are recognised and skipped.

use ndarray::Array3;
use num_complex::Complex64;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

use crate::constants::DEFAULT_Z0;
use crate::frequency::{Frequency, FrequencyUnit};
use crate::math::conversions::{dbdeg_2_reim, magdeg_2_reim};

/// Touchstone parsing errors
#[derive(Error, Debug)]
pub enum TouchstoneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Invalid option line: {0}")]
    InvalidOption(String),

    #[error("Invalid file extension: expected .sNp or .ts")]
    InvalidExtension,

    #[error("Unsupported parameter type {0:?}: only S, Y and Z data can be converted")]
    UnsupportedParameter(ParameterType),
}

/// Number pair format of the data section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SParamFormat {
    #[default]
    MA, // Magnitude-Angle (degrees)
    RI, // Real-Imaginary
    DB, // dB-Angle (degrees)
}

impl SParamFormat {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "RI" => Some(SParamFormat::RI),
            "MA" => Some(SParamFormat::MA),
            "DB" => Some(SParamFormat::DB),
            _ => None,
        }
    }

    fn to_complex(self, v1: f64, v2: f64) -> Complex64 {
        match self {
            SParamFormat::RI => Complex64::new(v1, v2),
            SParamFormat::MA => magdeg_2_reim(v1, v2),
            SParamFormat::DB => dbdeg_2_reim(v1, v2),
        }
    }
}

/// Network parameter type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParameterType {
    #[default]
    S,
    Y,
    Z,
    G,
    H,
}

impl ParameterType {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "S" => Some(ParameterType::S),
            "Y" => Some(ParameterType::Y),
            "Z" => Some(ParameterType::Z),
            "G" => Some(ParameterType::G),
            "H" => Some(ParameterType::H),
            _ => None,
        }
    }
}

/// Layout of each matrix in the data section (v2 `[Matrix Format]`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum MatrixFormat {
    #[default]
    Full,
    Lower,
    Upper,
}

/// Parsed Touchstone data
#[derive(Debug, Clone)]
pub struct Touchstone {
    /// Number of ports
    pub nports: usize,
    /// Frequency data
    pub frequency: Frequency,
    /// Parameter data [nfreq, nports, nports], of kind `param_type`
    pub data: Array3<Complex64>,
    /// Reference impedance (per port)
    pub z0: Vec<f64>,
    /// Comments from the file
    pub comments: Vec<String>,
    /// Number pair format
    pub format: SParamFormat,
    /// Parameter type (S, Y, Z, G, H)
    pub param_type: ParameterType,
    /// Is this a Version 2.0 file?
    pub is_v2: bool,
}

/// Settings carried by the `#` option line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptionLine {
    pub unit: FrequencyUnit,
    pub param_type: ParameterType,
    pub format: SParamFormat,
    pub z0: f64,
}

impl Default for OptionLine {
    fn default() -> Self {
        Self {
            unit: FrequencyUnit::GHz,
            param_type: ParameterType::S,
            format: SParamFormat::MA,
            z0: DEFAULT_Z0,
        }
    }
}

impl Touchstone {
    /// Parse a Touchstone file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TouchstoneError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or(TouchstoneError::InvalidExtension)?;
        let nports = Self::parse_extension(ext)?;

        let reader = BufReader::new(File::open(path)?);
        Self::parse(reader, nports)
    }

    /// Port count implied by the extension; 0 for `.ts`, where the file declares it
    fn parse_extension(ext: &str) -> Result<usize, TouchstoneError> {
        let ext_lower = ext.to_lowercase();
        if ext_lower == "ts" {
            return Ok(0);
        }
        ext_lower
            .strip_prefix('s')
            .and_then(|rest| rest.strip_suffix('p'))
            .and_then(|num| num.parse::<usize>().ok())
            .filter(|&n| n > 0)
            .ok_or(TouchstoneError::InvalidExtension)
    }

    /// Parse from string content
    ///
    /// # Arguments
    /// * `content` - Touchstone file content as string
    /// * `nports` - Port count for v1 content (v2 content declares its own)
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str, nports: usize) -> Result<Self, TouchstoneError> {
        Self::parse(std::io::Cursor::new(content), nports)
    }

    fn parse<R: BufRead>(reader: R, nports_hint: usize) -> Result<Self, TouchstoneError> {
        let mut state = ParserState::new(nports_hint);

        for (idx, line_result) in reader.lines().enumerate() {
            let line = line_result?;
            state.line_no = idx + 1;
            if state.finished {
                break;
            }

            let (content, comment) = match line.find('!') {
                Some(pos) => (&line[..pos], Some(line[pos + 1..].trim())),
                None => (line.as_str(), None),
            };
            if let Some(c) = comment.filter(|c| !c.is_empty()) {
                state.comments.push(c.to_string());
            }

            let trimmed = content.trim();
            if trimmed.is_empty() {
                continue;
            }

            if trimmed.starts_with('[') {
                state.keyword(trimmed)?;
            } else if trimmed.starts_with('#') {
                if state.option.is_none() {
                    state.option = Some(Self::parse_option_line(trimmed)?);
                }
            } else if state.expecting_reference {
                state.reference_values(trimmed)?;
            } else if state.in_data_section() {
                state.data_line(trimmed)?;
            }
        }

        state.finalize()
    }

    /// Parse the option line (`# GHz S RI R 50`)
    ///
    /// Missing fields take the Touchstone defaults (GHz, S, MA, 50 ohm).
    pub fn parse_option_line(line: &str) -> Result<OptionLine, TouchstoneError> {
        let body = line.strip_prefix('#').unwrap_or(line);
        let mut option = OptionLine::default();
        let mut parts = body.split_whitespace();

        while let Some(part) = parts.next() {
            if let Some(unit) = FrequencyUnit::from_str(part) {
                option.unit = unit;
            } else if let Some(fmt) = SParamFormat::from_str(part) {
                option.format = fmt;
            } else if let Some(pt) = ParameterType::from_str(part) {
                option.param_type = pt;
            } else if part.eq_ignore_ascii_case("R") {
                option.z0 = parts
                    .next()
                    .and_then(|v| v.parse::<f64>().ok())
                    .ok_or_else(|| {
                        TouchstoneError::InvalidOption(format!("missing value after R in '{line}'"))
                    })?;
            } else {
                return Err(TouchstoneError::InvalidOption(format!(
                    "unknown token '{part}' in '{line}'"
                )));
            }
        }

        Ok(option)
    }

    /// Get the number of frequency points
    pub fn nfreq(&self) -> usize {
        self.data.shape()[0]
    }
}

struct ParserState {
    line_no: usize,
    nports: usize,
    option: Option<OptionLine>,
    comments: Vec<String>,
    z0: Vec<f64>,
    matrix_format: MatrixFormat,

    // v2 keywords
    is_v2: bool,
    order_21_12: bool,
    data_section: bool,
    expecting_reference: bool,
    finished: bool,

    // Accumulated network data
    pending: Vec<f64>,
    frequencies: Vec<f64>,
    matrices: Vec<Vec<Complex64>>,
}

impl ParserState {
    fn new(nports_hint: usize) -> Self {
        Self {
            line_no: 0,
            nports: nports_hint,
            option: None,
            comments: Vec::new(),
            z0: Vec::new(),
            matrix_format: MatrixFormat::Full,
            is_v2: false,
            order_21_12: true,
            data_section: false,
            expecting_reference: false,
            finished: false,
            pending: Vec::new(),
            frequencies: Vec::new(),
            matrices: Vec::new(),
        }
    }

    fn error(&self, message: impl Into<String>) -> TouchstoneError {
        TouchstoneError::Parse {
            line: self.line_no,
            message: message.into(),
        }
    }

    fn option(&self) -> OptionLine {
        self.option.unwrap_or_default()
    }

    fn in_data_section(&self) -> bool {
        !self.is_v2 || self.data_section
    }

    fn keyword(&mut self, line: &str) -> Result<(), TouchstoneError> {
        let close = line
            .find(']')
            .ok_or_else(|| self.error(format!("unterminated keyword '{line}'")))?;
        let name = line[1..close].trim().to_lowercase();
        let arg = line[close + 1..].trim();

        match name.as_str() {
            "version" => self.is_v2 = arg != "1.0",
            "number of ports" => {
                self.nports = arg
                    .parse()
                    .map_err(|_| self.error(format!("invalid port count '{arg}'")))?;
            }
            "two-port data order" => self.order_21_12 = !arg.contains("12_21"),
            "reference" => {
                self.z0.clear();
                self.expecting_reference = true;
                self.reference_values(arg)?;
            }
            "matrix format" => {
                self.matrix_format = match arg.to_lowercase().as_str() {
                    "lower" => MatrixFormat::Lower,
                    "upper" => MatrixFormat::Upper,
                    _ => MatrixFormat::Full,
                };
            }
            "network data" => self.data_section = true,
            "noise data" | "end" => {
                self.data_section = false;
                self.finished = true;
            }
            // Informational keywords ([Number of Frequencies], [Network Data] counts, ...)
            _ => {}
        }
        Ok(())
    }

    fn reference_values(&mut self, text: &str) -> Result<(), TouchstoneError> {
        for token in text.split_whitespace() {
            let value = token
                .parse::<f64>()
                .map_err(|_| self.error(format!("invalid reference impedance '{token}'")))?;
            self.z0.push(value);
        }
        if self.nports > 0 && self.z0.len() >= self.nports {
            self.expecting_reference = false;
        }
        Ok(())
    }

    fn values_per_matrix(&self) -> usize {
        match self.matrix_format {
            MatrixFormat::Full => self.nports * self.nports,
            MatrixFormat::Lower | MatrixFormat::Upper => self.nports * (self.nports + 1) / 2,
        }
    }

    fn data_line(&mut self, line: &str) -> Result<(), TouchstoneError> {
        if self.nports == 0 {
            return Err(self.error("network data before the port count is known"));
        }

        let mut values = Vec::new();
        for token in line.split_whitespace() {
            let v = token
                .parse::<f64>()
                .map_err(|_| self.error(format!("invalid number '{token}'")))?;
            values.push(v);
        }

        // In v1 files the noise block follows the network data directly and
        // is recognised by a frequency that does not increase.
        if !self.is_v2 && self.pending.is_empty() {
            let freq = values[0] * self.option().unit.multiplier();
            if self.frequencies.last().is_some_and(|&last| freq <= last) {
                self.finished = true;
                return Ok(());
            }
        }

        self.pending.extend(values);

        let record_len = 1 + 2 * self.values_per_matrix();
        while self.pending.len() >= record_len {
            let record: Vec<f64> = self.pending.drain(..record_len).collect();
            self.push_record(&record);
        }
        Ok(())
    }

    fn push_record(&mut self, record: &[f64]) {
        let option = self.option();
        let n = self.nports;
        let mut matrix = vec![Complex64::new(0.0, 0.0); n * n];
        let mut pairs = record[1..]
            .chunks_exact(2)
            .map(|p| option.format.to_complex(p[0], p[1]));

        match self.matrix_format {
            MatrixFormat::Full => {
                for (k, c) in pairs.enumerate() {
                    let (i, j) = (k / n, k % n);
                    // Two-port data is column-major when the order is 21_12
                    let (i, j) = if n == 2 && self.order_21_12 { (j, i) } else { (i, j) };
                    matrix[i * n + j] = c;
                }
            }
            MatrixFormat::Lower | MatrixFormat::Upper => {
                for i in 0..n {
                    let cols = if self.matrix_format == MatrixFormat::Lower {
                        0..i + 1
                    } else {
                        i..n
                    };
                    for j in cols {
                        if let Some(c) = pairs.next() {
                            matrix[i * n + j] = c;
                            matrix[j * n + i] = c;
                        }
                    }
                }
            }
        }

        self.frequencies.push(record[0] * option.unit.multiplier());
        self.matrices.push(matrix);
    }

    fn finalize(self) -> Result<Touchstone, TouchstoneError> {
        if !self.pending.is_empty() {
            return Err(self.error(format!(
                "incomplete record: {} trailing value(s)",
                self.pending.len()
            )));
        }
        if self.nports == 0 {
            return Err(self.error("port count not declared"));
        }

        let option = self.option();
        let n = self.nports;
        let nfreq = self.frequencies.len();
        let data = Array3::from_shape_fn((nfreq, n, n), |(f, i, j)| self.matrices[f][i * n + j]);

        let z0 = match self.z0.len() {
            len if len == n => self.z0,
            0 => vec![option.z0; n],
            _ => vec![self.z0[0]; n],
        };

        Ok(Touchstone {
            nports: n,
            frequency: Frequency::from_hz(self.frequencies, option.unit),
            data,
            z0,
            comments: self.comments,
            format: option.format,
            param_type: option.param_type,
            is_v2: self.is_v2,
        })
    }
}
