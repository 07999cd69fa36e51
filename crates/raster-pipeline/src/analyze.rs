//! Luminance statistics over grayscale images.

use image::GrayImage;
use tracing::debug;

use crate::{PipelineError, Result};

/// Mean sample value of a grayscale image, as a float in `[0, 255]`.
///
/// An image with no pixels fails with `InvalidInput` rather than dividing
/// by zero.
pub fn mean_luminance(img: &GrayImage) -> Result<f32> {
    let (width, height) = img.dimensions();
    let pixel_count = u64::from(width) * u64::from(height);
    if pixel_count == 0 {
        return Err(PipelineError::InvalidInput(format!(
            "cannot measure luminance of a {width}x{height} image"
        )));
    }

    let sum: u64 = img.pixels().map(|p| u64::from(p.0[0])).sum();
    let mean = sum as f32 / pixel_count as f32;
    debug!(width, height, mean, "Measured mean luminance");
    Ok(mean)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn test_uniform_image_mean() {
        let img = GrayImage::from_pixel(10, 10, Luma([42]));
        let mean = mean_luminance(&img).unwrap();
        assert!((mean - 42.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_mixed_image_mean() {
        let mut img = GrayImage::new(2, 1);
        img.put_pixel(0, 0, Luma([0]));
        img.put_pixel(1, 0, Luma([255]));
        let mean = mean_luminance(&img).unwrap();
        assert!((mean - 127.5).abs() < 0.001);
    }

    #[test]
    fn test_zero_width_image_is_invalid() {
        let img = GrayImage::new(0, 5);
        assert!(matches!(
            mean_luminance(&img),
            Err(PipelineError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_zero_height_image_is_invalid() {
        let img = GrayImage::new(5, 0);
        assert!(matches!(
            mean_luminance(&img),
            Err(PipelineError::InvalidInput(_))
        ));
    }
}
