//! pi-extract-core: narrowband pi-model extraction for two-port devices
//!
//! Turns a frequency-swept S-parameter measurement of a passive two-port
//! (typically an on-chip inductor) into a lumped equivalent circuit evaluated
//! at a single target frequency.
//!
//! ## Modules
//!
//! - `frequency` - Frequency grid representation
//! - `math` - S/Z/Y transforms and search reductions
//! - `touchstone` - Touchstone file parsing
//! - `network` - Two-port network representation
//! - `extraction` - Differential and pi-model extraction pipeline
//! - `loader` / `report` - Pluggable input and output seams

pub mod constants;
pub mod error;
pub mod extraction;
pub mod frequency;
pub mod loader;
pub mod math;
pub mod network;
pub mod report;
pub mod touchstone;

pub use error::{ExtractionError, Result};
pub use extraction::{extract, Extraction, ExtractionConfig, ExtractionResult};
pub use frequency::Frequency;
pub use network::Network;
