//! Sources of two-port measurements

use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::network::Network;

/// Produces a validated two-port [`Network`] from a path
///
/// Implementations guarantee equal-length grid and matrix sequences with
/// at least two samples, 2x2 matrices and a strictly increasing grid.
pub trait NetworkLoader {
    fn load(&self, path: &Path) -> Result<Network>;
}

/// Loads Touchstone `.s2p` files (v1 and v2)
#[derive(Debug, Clone, Copy, Default)]
pub struct TouchstoneLoader;

impl NetworkLoader for TouchstoneLoader {
    fn load(&self, path: &Path) -> Result<Network> {
        let network = Network::from_touchstone(path)?;
        debug!(
            path = %path.display(),
            npoints = network.nfreq(),
            start_hz = network.frequency().start(),
            stop_hz = network.frequency().stop(),
            "loaded touchstone file"
        );
        Ok(network)
    }
}
