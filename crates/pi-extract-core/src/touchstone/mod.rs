//! Touchstone file input module
//!
//! Provides reading of Touchstone v1 (.sNp) and v2 (.ts) files.

pub mod parser;

pub use parser::{ParameterType, SParamFormat, Touchstone, TouchstoneError};
