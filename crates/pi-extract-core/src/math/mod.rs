//! Mathematical functions module
//!
//! Two-port parameter transforms, polar/dB conversions and the
//! NaN-aware search reductions used to pick single-frequency results.

pub mod conversions;
pub mod matrix_ops;
pub mod search;
pub mod transforms;

pub use conversions::*;
pub use search::*;
pub use transforms::*;
