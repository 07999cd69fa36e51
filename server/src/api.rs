//! HTTP handlers for printing and status.

use std::time::Duration;

use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{error, info};

use netprinter::{PrinterSession, commands};
use raster_pipeline::{
    Band, DitherMode, FRAGMENT_HEIGHT, PipelineError, PrintOptions, decode_source, fragment,
    process_image,
};

use crate::records;
use crate::state::SharedState;

type ApiResult = Result<Json<Value>, (StatusCode, Json<Value>)>;

/// Standard error response.
fn err_json(status: u16, message: &str) -> (StatusCode, Json<Value>) {
    (
        StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(json!({ "status": "error", "error": message })),
    )
}

fn pipeline_err(err: PipelineError) -> (StatusCode, Json<Value>) {
    error!("Pipeline failed: {err}");
    match err {
        PipelineError::Decode(_) | PipelineError::InvalidInput(_) => err_json(400, &err.to_string()),
        PipelineError::Enhancement(_) => err_json(500, &err.to_string()),
    }
}

/// GET /status
pub async fn status(State(state): State<SharedState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "printer": state.config.printer_addr(),
        "dry_run": state.config.dry_run,
    }))
}

/// POST /api/print/image — multipart upload: `file` plus optional `dither`
/// (mode name) and `edge_enhance` fields.
pub async fn print_image(State(state): State<SharedState>, mut multipart: Multipart) -> ApiResult {
    let mut file_bytes: Option<Vec<u8>> = None;
    let mut file_name = String::from("upload");
    let mut options = PrintOptions::default();

    while let Ok(Some(field)) = multipart.next_field().await {
        match field.name().unwrap_or("") {
            "file" => {
                file_name = field.file_name().unwrap_or("upload").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| err_json(400, &e.to_string()))?;
                file_bytes = Some(data.to_vec());
            }
            "dither" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| err_json(400, &e.to_string()))?;
                if !value.is_empty() {
                    options.dither = Some(DitherMode::from_name(&value));
                }
            }
            "edge_enhance" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| err_json(400, &e.to_string()))?;
                options.edge_enhance = matches!(value.as_str(), "true" | "on" | "1");
            }
            _ => {}
        }
    }

    let bytes = file_bytes.ok_or_else(|| err_json(400, "No image file provided"))?;
    let source = decode_source(&bytes).map_err(pipeline_err)?;

    // The pipeline is CPU-bound; keep it off the async workers.
    let processed = tokio::task::spawn_blocking(move || process_image(&source, &options))
        .await
        .map_err(|e| err_json(500, &e.to_string()))?
        .map_err(pipeline_err)?;

    let record = records::save_image_record(&state.config.records_dir, &processed.mono, &file_name)
        .map_err(|e| err_json(500, &e.to_string()))?;

    let bands = fragment(&processed.bitmap, FRAGMENT_HEIGHT);

    if state.config.dry_run {
        info!("Dry run, skipping printer");
    } else {
        send_to_printer(&state, &bands)
            .await
            .map_err(|e| err_json(502, &e.to_string()))?;
    }

    Ok(Json(json!({
        "status": "ok",
        "class": processed.class.name(),
        "mean_luminance": processed.mean_luminance,
        "width": processed.bitmap.width(),
        "height": processed.bitmap.height(),
        "bands": bands.len(),
        "record": record.display().to_string(),
    })))
}

async fn send_to_printer(state: &SharedState, bands: &[Band]) -> netprinter::Result<()> {
    let mut session = PrinterSession::connect(&state.config.printer_addr())
        .await?
        .with_pacing(Duration::from_millis(state.config.pacing_ms));
    session
        .print_bands(bands, &commands::reset_sequence(), &commands::PARTIAL_CUT)
        .await
}

#[derive(Debug, Deserialize)]
pub struct TextJob {
    pub name: String,
    pub message: String,
}

/// POST /api/print/text — form fields `name` and `message`.
pub async fn print_text(
    State(state): State<SharedState>,
    axum::Form(job): axum::Form<TextJob>,
) -> ApiResult {
    let record = records::save_text_record(&state.config.records_dir, &job.name, &job.message)
        .map_err(|e| err_json(500, &e.to_string()))?;

    if state.config.dry_run {
        info!("Dry run, skipping printer");
    } else {
        let mut session = PrinterSession::connect(&state.config.printer_addr())
            .await
            .map_err(|e| err_json(502, &e.to_string()))?;
        session
            .print_text(&job.name, &job.message)
            .await
            .map_err(|e| err_json(502, &e.to_string()))?;
    }

    Ok(Json(json!({
        "status": "ok",
        "record": record.display().to_string(),
    })))
}
