//! Extraction module - differential and pi-model equivalent circuits
//!
//! Stages, in pipeline order:
//! - `config` - tunable parameters of the pipeline
//! - `differential` - differential inductor curves and peak-Q search
//! - `pi_model` - series/shunt branch decomposition
//! - `result` - single-frequency snapshot and degeneracy flags
//! - `pipeline` - range validation, DC stripping and target sampling

mod config;
mod differential;
mod pi_model;
mod pipeline;
mod result;

pub use config::ExtractionConfig;
pub use differential::{DifferentialCurve, DifferentialPoint};
pub use pi_model::{PiModelCurve, PiModelPoint};
pub use pipeline::{extract, validate_target, Extraction};
pub use result::{Degeneracy, ExtractionResult, PeakQ};
