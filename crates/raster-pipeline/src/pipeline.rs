//! End-to-end rasterization: decode, analyze, enhance, resize, dither, pack.
//!
//! One call processes one image start to finish and returns an owned
//! result; there is no shared mutable state, so callers may run any number
//! of images concurrently on separate tasks. A failed stage fails the whole
//! request with no partial output.

use image::{DynamicImage, GrayImage, Rgb, RgbImage};
use tracing::info;

use crate::analyze::mean_luminance;
use crate::profile::{DitherMode, ImageClass, classify};
use crate::raster::MonoBitmap;
use crate::resize::resize_to_print_width;
use crate::{Result, dither, enhance};

/// Caller-supplied knobs for a single rasterization.
#[derive(Debug, Clone, Default)]
pub struct PrintOptions {
    /// Dithering algorithm override; `None` uses the profile's choice.
    pub dither: Option<DitherMode>,
    /// Force edge emphasis even when the profile leaves it off. ORed with
    /// the profile flag, never masking it.
    pub edge_enhance: bool,
}

/// Finished output of one pipeline run.
#[derive(Debug, Clone)]
pub struct ProcessedImage {
    /// Final 1-bit image as 0/255 grayscale, for persistence.
    pub mono: GrayImage,
    /// The same image packed one bit per pixel, for transmission.
    pub bitmap: MonoBitmap,
    /// Luminance class the source was graded into.
    pub class: ImageClass,
    /// Mean luminance measured on the grayed source.
    pub mean_luminance: f32,
}

/// Decode raw upload bytes into an image.
pub fn decode_source(bytes: &[u8]) -> Result<DynamicImage> {
    Ok(image::load_from_memory(bytes)?)
}

/// Run the full adaptive pipeline over a decoded source image.
///
/// Stages run in fixed order: alpha-flatten onto white, grayscale,
/// luminance analysis, classification, equalization, optional edge
/// blending (from the color source), brightness and contrast scaling,
/// resize to the print width, sharpness adjustment, dithering, packing.
pub fn process_image(source: &DynamicImage, options: &PrintOptions) -> Result<ProcessedImage> {
    let color = flatten_onto_white(source);
    let gray = image::imageops::grayscale(&color);

    let mean = mean_luminance(&gray)?;
    let class = classify(mean);
    let profile = class.profile();
    info!(mean, class = class.name(), "Classified source image");

    let mut enhanced = enhance::equalize(&gray, profile);
    if options.edge_enhance || profile.edge_enhance {
        let edges = enhance::edge_mask(&color);
        enhanced = enhance::blend_edges(&enhanced, &edges);
    }
    let enhanced = enhance::scale_saturating(&enhanced, profile.brightness_gain);
    let enhanced = enhance::scale_saturating(&enhanced, profile.contrast_gain);

    let resized = resize_to_print_width(&enhanced)?;
    let sharpened = enhance::adjust_sharpness(&resized, profile.sharpness_gain);

    let mode = options.dither.unwrap_or(profile.dither);
    let mono = dither::dither(&sharpened, mode);
    let bitmap = MonoBitmap::from_binary(&mono)?;

    Ok(ProcessedImage {
        mono,
        bitmap,
        class,
        mean_luminance: mean,
    })
}

/// Composite the source onto a white background, discarding alpha.
///
/// Transparent uploads (stickers, logos) otherwise gray to black and print
/// as solid bars.
fn flatten_onto_white(source: &DynamicImage) -> RgbImage {
    let rgba = source.to_rgba8();
    let mut out = RgbImage::from_pixel(rgba.width(), rgba.height(), Rgb([255, 255, 255]));
    for (x, y, pixel) in rgba.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        let alpha = u32::from(a);
        let blend = |c: u8| ((u32::from(c) * alpha + 255 * (255 - alpha)) / 255) as u8;
        out.put_pixel(x, y, Rgb([blend(r), blend(g), blend(b)]));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_flatten_transparent_pixel_becomes_white() {
        let img = image::RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 0]));
        let flat = flatten_onto_white(&DynamicImage::ImageRgba8(img));
        assert_eq!(flat.get_pixel(0, 0).0, [255, 255, 255]);
    }

    #[test]
    fn test_flatten_opaque_pixel_unchanged() {
        let img = image::RgbaImage::from_pixel(2, 2, Rgba([10, 200, 77, 255]));
        let flat = flatten_onto_white(&DynamicImage::ImageRgba8(img));
        assert_eq!(flat.get_pixel(1, 1).0, [10, 200, 77]);
    }

    #[test]
    fn test_flatten_half_transparent_blends() {
        let img = image::RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 128]));
        let flat = flatten_onto_white(&DynamicImage::ImageRgba8(img));
        // (0 * 128 + 255 * 127) / 255 = 127
        assert_eq!(flat.get_pixel(0, 0).0, [127, 127, 127]);
    }

    #[test]
    fn test_decode_source_rejects_garbage() {
        let result = decode_source(b"definitely not an image");
        assert!(matches!(result, Err(crate::PipelineError::Decode(_))));
    }
}
