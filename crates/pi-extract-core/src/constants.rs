//! Numerical constants for pi-model extraction
//!
//! Provides standardized tolerance values and defaults used throughout
//! the library.

/// Tolerance for detecting near-zero values in division and singularity checks.
/// Used to detect singular 2x2 matrices and open branches.
pub const NEAR_ZERO: f64 = 1e-15;

/// Relative tolerance below which a real or imaginary part counts as zero.
/// S to Z conversion leaves residues around 1e-16 of the magnitude on parts
/// that are exactly zero in the device.
pub const REL_ZERO: f64 = 1e-12;

/// Tolerance for detecting DC (zero frequency).
pub const DC_FREQ_TOL: f64 = 1e-10;

/// Default port reference impedance in ohms.
pub const DEFAULT_Z0: f64 = 50.0;

/// Default floor applied when a sweep starts at DC, in Hz.
///
/// Samples below this frequency are dropped before extraction.
pub const DEFAULT_DC_FLOOR_HZ: f64 = 1e9;

/// Minimum number of frequency points required for extraction.
/// The DC inductance estimate reads the second sample.
pub const MIN_POINTS: usize = 2;
