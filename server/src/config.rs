//! Runtime configuration from environment variables.

use std::path::PathBuf;

/// Runtime configuration for the server and the printer link.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Printer host name or address.
    pub printer_host: String,
    /// Raw ESC/POS socket port.
    pub printer_port: u16,
    /// HTTP listen port.
    pub server_port: u16,
    /// Root directory for printed-image and message records.
    pub records_dir: PathBuf,
    /// Inter-band pacing delay in milliseconds.
    pub pacing_ms: u64,
    /// Process and record uploads without touching the printer.
    pub dry_run: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            printer_host: "192.168.1.128".into(),
            printer_port: netprinter::DEFAULT_PORT,
            server_port: 8080,
            records_dir: PathBuf::from("records"),
            pacing_ms: 100,
            dry_run: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from the environment, falling back to defaults
    /// for anything unset or unparsable.
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            printer_host: env_string("PRINTER_HOST", &d.printer_host),
            printer_port: env_parse("PRINTER_PORT", d.printer_port),
            server_port: env_parse("SERVER_PORT", d.server_port),
            records_dir: PathBuf::from(env_string("RECORDS_DIR", "records")),
            pacing_ms: env_parse("BAND_PACING_MS", d.pacing_ms),
            dry_run: env_string("DRY_RUN", "") == "true",
        }
    }

    /// Printer socket address in `host:port` form.
    pub fn printer_addr(&self) -> String {
        format!("{}:{}", self.printer_host, self.printer_port)
    }
}

fn env_string(key: &str, default: &str) -> String {
    match std::env::var(key) {
        Ok(v) if !v.is_empty() => v,
        _ => default.to_string(),
    }
}

fn env_parse<T: std::str::FromStr + Copy>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
