//! TCP print session with inter-band pacing.

use std::time::Duration;

use raster_pipeline::{Band, BandTransport};
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::time::{sleep, timeout};
use tracing::{debug, info};

use crate::{BAND_PACING, Result, TransportError, commands};

/// Timeout for establishing the printer connection.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// An open session to a networked ESC/POS printer.
pub struct PrinterSession {
    stream: TcpStream,
    pacing: Duration,
}

impl PrinterSession {
    /// Connect to a printer at `addr` (`host:port` form).
    pub async fn connect(addr: &str) -> Result<Self> {
        info!(addr, "Connecting to printer");
        let stream = timeout(CONNECT_TIMEOUT, TcpStream::connect(addr))
            .await
            .map_err(|_| TransportError::ConnectTimeout(addr.to_string()))?
            .map_err(|source| TransportError::Connect {
                addr: addr.to_string(),
                source,
            })?;
        Ok(Self {
            stream,
            pacing: BAND_PACING,
        })
    }

    /// Builder: override the inter-band pacing delay.
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    async fn write_raw(&mut self, bytes: &[u8]) -> Result<()> {
        self.stream.write_all(bytes).await?;
        Ok(())
    }

    /// Send a complete raster job: reset, each band in order with pacing,
    /// then the cut command. Reset and cut bytes are written verbatim.
    pub async fn print_bands(&mut self, bands: &[Band], reset: &[u8], cut: &[u8]) -> Result<()> {
        info!(bands = bands.len(), "Starting raster job");
        self.write_raw(reset).await?;

        for band in bands {
            let cmd = commands::raster_band(band.bytes_per_row, band.height, &band.data);
            self.write_raw(&cmd).await?;
            debug!(top = band.top, height = band.height, "Band sent");
            sleep(self.pacing).await;
        }

        self.write_raw(cut).await?;
        self.stream.flush().await?;
        info!("Raster job complete");
        Ok(())
    }

    /// Print a short text record: sender line, message, partial cut.
    pub async fn print_text(&mut self, name: &str, message: &str) -> Result<()> {
        info!(name, "Starting text job");
        self.write_raw(&commands::reset_sequence()).await?;
        self.write_raw(&commands::text_line(&format!("Name: {name}"))).await?;
        self.write_raw(&commands::text_line(message)).await?;
        self.write_raw(&commands::PARTIAL_CUT).await?;
        self.stream.flush().await?;
        Ok(())
    }
}

impl BandTransport for PrinterSession {
    type Error = TransportError;

    async fn send(
        &mut self,
        bands: &[Band],
        reset: &[u8],
        cut: &[u8],
    ) -> std::result::Result<(), TransportError> {
        self.print_bands(bands, reset, cut).await
    }
}
