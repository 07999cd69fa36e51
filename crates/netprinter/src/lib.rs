//! ESC/POS network printer transport.
//!
//! Drives a thermal receipt printer over a raw TCP socket (port 9100),
//! framing 1-bit raster bands as `GS v 0` commands with a fixed inter-band
//! pacing delay so the print buffer never overruns.

use std::time::Duration;

pub mod commands;
pub mod session;

// Re-exports for convenience
pub use session::PrinterSession;

/// Default ESC/POS raw-socket port.
pub const DEFAULT_PORT: u16 = 9100;

/// Fixed delay between band transmissions, giving the print buffer room to
/// drain.
pub const BAND_PACING: Duration = Duration::from_millis(100);

/// Errors that can occur while talking to the printer.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("failed to connect to printer at {addr}: {source}")]
    Connect {
        addr: String,
        source: std::io::Error,
    },

    #[error("timed out connecting to printer at {0}")]
    ConnectTimeout(String),

    #[error("I/O error during print session: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for transport operations.
pub type Result<T> = std::result::Result<T, TransportError>;
