//! Persistence of printed images and messages.
//!
//! Every accepted job leaves a record on disk: the final mono bitmap as a
//! PNG, or the text message as written, under timestamped filenames.

use std::path::{Path, PathBuf};

use chrono::Local;
use image::GrayImage;

/// Create the records directory tree.
pub fn ensure_dirs(root: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(root.join("images"))?;
    std::fs::create_dir_all(root.join("messages"))
}

/// Persist the final mono image as a PNG record.
pub fn save_image_record(
    root: &Path,
    mono: &GrayImage,
    original_name: &str,
) -> anyhow::Result<PathBuf> {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let short = sanitize_fragment(original_name);
    let path = root.join("images").join(format!("{timestamp}_{short}.png"));
    mono.save(&path)?;
    Ok(path)
}

/// Persist a printed text message.
pub fn save_text_record(root: &Path, name: &str, message: &str) -> anyhow::Result<PathBuf> {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let short = sanitize_fragment(name);
    let path = root.join("messages").join(format!("{timestamp}_{short}.txt"));
    std::fs::write(&path, format!("Name: {name}\n{message}\n"))?;
    Ok(path)
}

/// First few filename-safe characters of the submitted name, stem only, so
/// records stay greppable without trusting upload filenames.
fn sanitize_fragment(name: &str) -> String {
    let stem = Path::new(name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("upload");
    let cleaned: String = stem
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .take(5)
        .collect();
    if cleaned.is_empty() {
        "upload".into()
    } else {
        cleaned
    }
}
