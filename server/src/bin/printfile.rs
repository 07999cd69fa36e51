//! Batch print tool.
//!
//! Rasterizes image files given on the command line and sends them straight
//! to the printer, bypassing the web front end. The processed mono bitmap
//! is saved next to each input for inspection.
//!
//! Printer address comes from `PRINTER_HOST` / `PRINTER_PORT`; set
//! `DRY_RUN=true` to only write the processed previews.

use std::path::Path;

use tracing_subscriber::EnvFilter;

use netprinter::{PrinterSession, commands};
use raster_pipeline::{FRAGMENT_HEIGHT, PrintOptions, decode_source, fragment, process_image};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() {
        eprintln!("usage: printfile <image>...");
        std::process::exit(2);
    }

    let host = std::env::var("PRINTER_HOST").unwrap_or_else(|_| "192.168.1.128".into());
    let port: u16 = std::env::var("PRINTER_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(netprinter::DEFAULT_PORT);
    let dry_run = std::env::var("DRY_RUN").is_ok_and(|v| v == "true");
    let printer_addr = format!("{host}:{port}");

    for path in &paths {
        tracing::info!(path, "Processing");
        let bytes = std::fs::read(path)?;
        let source = decode_source(&bytes)?;
        let processed = process_image(&source, &PrintOptions::default())?;
        tracing::info!(
            class = processed.class.name(),
            mean = processed.mean_luminance,
            "Rasterized"
        );

        let preview = preview_path(path);
        processed.mono.save(&preview)?;
        tracing::info!(preview = %preview.display(), "Preview written");

        if dry_run {
            continue;
        }

        let bands = fragment(&processed.bitmap, FRAGMENT_HEIGHT);
        let mut session = PrinterSession::connect(&printer_addr).await?;
        session
            .print_bands(&bands, &commands::reset_sequence(), &commands::PARTIAL_CUT)
            .await?;
    }

    Ok(())
}

fn preview_path(input: &str) -> std::path::PathBuf {
    let path = Path::new(input);
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    path.with_file_name(format!("processed_{stem}.png"))
}
