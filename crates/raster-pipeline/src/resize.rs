//! Resizing to the fixed print width.

use image::GrayImage;
use image::imageops::{self, FilterType};
use tracing::debug;

use crate::{PRINT_WIDTH, PipelineError, Result};

/// Resize a grayscale image to `PRINT_WIDTH`, preserving aspect ratio.
///
/// The new height is `round(height * PRINT_WIDTH / width)`, clamped to at
/// least one row so downstream stages always see a drawable image. Fails
/// with `InvalidInput` when the source width is zero. Lanczos3 filtering
/// keeps downscaled output clean; upscaling works but is not the common
/// case for printer input.
pub fn resize_to_print_width(img: &GrayImage) -> Result<GrayImage> {
    let (width, height) = img.dimensions();
    if width == 0 {
        return Err(PipelineError::InvalidInput(
            "cannot resize a zero-width image".into(),
        ));
    }

    let ratio = f64::from(PRINT_WIDTH) / f64::from(width);
    let new_height = ((f64::from(height) * ratio).round() as u32).max(1);

    if width == PRINT_WIDTH && height == new_height {
        debug!(width, "Image already at print width, skipping resize");
        return Ok(img.clone());
    }

    debug!(width, height, new_height, "Resizing to print width");
    Ok(imageops::resize(img, PRINT_WIDTH, new_height, FilterType::Lanczos3))
}
