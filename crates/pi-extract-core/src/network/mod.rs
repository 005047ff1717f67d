//! Network module - two-port electrical network representation
//!
//! Provides the Network struct holding a validated S-parameter sweep and
//! the operations the extraction pipeline needs on it.

mod core;
mod crop;
mod params;

pub use core::Network;
