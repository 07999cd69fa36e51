//! Tone and edge enhancement applied ahead of dithering.
//!
//! Steps always run in the same order: equalization, optional edge-emphasis
//! blending, brightness scaling, contrast scaling. All numeric steps use
//! saturating arithmetic; no stage can wrap past the sample range.

use image::{GrayImage, Luma, RgbImage};
use imageproc::contrast::{ThresholdType, equalize_histogram, threshold};
use imageproc::distance_transform::Norm;
use imageproc::filter::gaussian_blur_f32;
use imageproc::morphology::dilate;
use tracing::debug;

use crate::clahe;
use crate::profile::{EnhancementProfile, EqualizeMethod};

/// Binarization cut for the edge mask.
const EDGE_THRESHOLD: u8 = 180;

/// Blend weight of the base image against the edge mask.
const BASE_WEIGHT: f32 = 0.8;

/// Blend weight of the edge mask.
const EDGE_WEIGHT: f32 = 0.2;

/// Gaussian sigma for the sharpness pre-blur.
const SHARPNESS_SIGMA: f32 = 1.0;

/// Equalize per the profile: CLAHE, global histogram, or pass-through.
pub fn equalize(img: &GrayImage, profile: &EnhancementProfile) -> GrayImage {
    if !profile.equalize {
        return img.clone();
    }
    match profile.equalize_method {
        EqualizeMethod::Clahe => clahe::equalize_adaptive(img),
        EqualizeMethod::Histogram => equalize_histogram(img),
        EqualizeMethod::None => img.clone(),
    }
}

/// Derive an edge-emphasis mask from the original color image.
///
/// The color image is grayscaled, binarized at the edge threshold, and
/// dilated with a 5x5 square element. The difference between the dilated and
/// plain binary images marks edge fringes, which are inverted so edges read
/// as dark strokes when blended into the base.
pub fn edge_mask(color: &RgbImage) -> GrayImage {
    let gray = image::imageops::grayscale(color);
    let binary = threshold(&gray, EDGE_THRESHOLD, ThresholdType::Binary);
    let dilated = dilate(&binary, Norm::LInf, 2);

    let mut mask = GrayImage::new(gray.width(), gray.height());
    for (x, y, pixel) in mask.enumerate_pixels_mut() {
        let diff = dilated.get_pixel(x, y).0[0].abs_diff(binary.get_pixel(x, y).0[0]);
        *pixel = Luma([255 - diff]);
    }
    mask
}

/// Blend the edge mask into the base image at the fixed weights, saturating.
pub fn blend_edges(base: &GrayImage, edges: &GrayImage) -> GrayImage {
    debug_assert_eq!(base.dimensions(), edges.dimensions());
    debug!("Blending edge mask");

    let mut out = GrayImage::new(base.width(), base.height());
    for (x, y, pixel) in out.enumerate_pixels_mut() {
        let b = f32::from(base.get_pixel(x, y).0[0]);
        let e = f32::from(edges.get_pixel(x, y).0[0]);
        let blended = BASE_WEIGHT * b + EDGE_WEIGHT * e;
        *pixel = Luma([blended.round().clamp(0.0, 255.0) as u8]);
    }
    out
}

/// Multiply every sample by `gain`, saturating to the valid range.
///
/// Used for both the brightness and the contrast step (the contrast step
/// carries no offset, so the two are the same saturating multiply).
pub fn scale_saturating(img: &GrayImage, gain: f32) -> GrayImage {
    debug!(gain, "Scaling samples");
    let mut out = img.clone();
    for pixel in out.pixels_mut() {
        pixel.0[0] = (f32::from(pixel.0[0]) * gain).round().clamp(0.0, 255.0) as u8;
    }
    out
}

/// Unsharp-style sharpness adjustment.
///
/// Blends a Gaussian-smoothed copy toward (or past) the original:
/// `out = smoothed + gain * (original - smoothed)`. A gain of 1.0 returns
/// the image unchanged; above 1.0 emphasizes detail, below softens it.
pub fn adjust_sharpness(img: &GrayImage, gain: f32) -> GrayImage {
    if (gain - 1.0).abs() < f32::EPSILON {
        return img.clone();
    }
    debug!(gain, "Adjusting sharpness");

    let smoothed = gaussian_blur_f32(img, SHARPNESS_SIGMA);
    let mut out = GrayImage::new(img.width(), img.height());
    for (x, y, pixel) in out.enumerate_pixels_mut() {
        let original = f32::from(img.get_pixel(x, y).0[0]);
        let smooth = f32::from(smoothed.get_pixel(x, y).0[0]);
        let value = smooth + gain * (original - smooth);
        *pixel = Luma([value.round().clamp(0.0, 255.0) as u8]);
    }
    out
}
