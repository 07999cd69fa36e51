//! Boundary to the printer transport collaborator.

use std::future::Future;

use crate::raster::Band;

/// Injected capability that carries finished bands to the printer.
///
/// Implementations write `reset` verbatim, then each band's raster data in
/// order with whatever inter-band pacing the hardware needs, then `cut`.
/// The pipeline itself never blocks on I/O; a completed band list crosses
/// this boundary exactly once per image.
pub trait BandTransport {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Transmit a complete print job.
    fn send(
        &mut self,
        bands: &[Band],
        reset: &[u8],
        cut: &[u8],
    ) -> impl Future<Output = std::result::Result<(), Self::Error>> + Send;
}
