//! Contrast-limited adaptive histogram equalization.
//!
//! The image is split into a fixed 8x8 grid of tiles and each tile is
//! equalized against its own clip-limited histogram. The clip caps how much
//! any single intensity can steepen the mapping, which keeps flat regions
//! from being amplified into noise.

use image::{GrayImage, Luma};
use tracing::debug;

/// Tiles per axis in the equalization grid.
const TILE_GRID: u32 = 8;

/// Relative clip limit for each tile histogram.
const CLIP_LIMIT: f32 = 2.0;

/// Equalize local contrast tile by tile.
///
/// Tile boundaries partition the image evenly; images smaller than the grid
/// simply produce fewer, single-pixel-wide tiles. Empty tiles are skipped.
pub(crate) fn equalize_adaptive(img: &GrayImage) -> GrayImage {
    let (width, height) = img.dimensions();
    debug!(width, height, "Applying CLAHE");
    let mut out = GrayImage::new(width, height);

    for ty in 0..TILE_GRID {
        for tx in 0..TILE_GRID {
            let x0 = tile_edge(tx, width);
            let x1 = tile_edge(tx + 1, width);
            let y0 = tile_edge(ty, height);
            let y1 = tile_edge(ty + 1, height);
            if x0 == x1 || y0 == y1 {
                continue;
            }
            equalize_tile(img, &mut out, x0, x1, y0, y1);
        }
    }

    out
}

fn tile_edge(index: u32, extent: u32) -> u32 {
    (u64::from(index) * u64::from(extent) / u64::from(TILE_GRID)) as u32
}

fn equalize_tile(img: &GrayImage, out: &mut GrayImage, x0: u32, x1: u32, y0: u32, y1: u32) {
    let total = ((x1 - x0) * (y1 - y0)) as f32;

    let mut histogram = [0u32; 256];
    for y in y0..y1 {
        for x in x0..x1 {
            histogram[img.get_pixel(x, y).0[0] as usize] += 1;
        }
    }

    // Clip each bin and pool the excess.
    let cap = (CLIP_LIMIT * total / 256.0).round().max(1.0) as u32;
    let mut excess = 0u32;
    for count in &mut histogram {
        if *count > cap {
            excess += *count - cap;
            *count = cap;
        }
    }

    // Redistribute the pooled excess evenly across all bins.
    let share = excess / 256;
    let mut remainder = excess % 256;
    for count in &mut histogram {
        *count += share;
        if remainder > 0 {
            *count += 1;
            remainder -= 1;
        }
    }

    // Equalization mapping from the cumulative distribution.
    let mut mapping = [0u8; 256];
    let mut cumulative = 0f32;
    for (value, count) in histogram.iter().enumerate() {
        cumulative += *count as f32 / total;
        mapping[value] = (cumulative * 255.0).round().min(255.0) as u8;
    }

    for y in y0..y1 {
        for x in x0..x1 {
            out.put_pixel(x, y, Luma([mapping[img.get_pixel(x, y).0[0] as usize]]));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preserves_dimensions() {
        let img = GrayImage::from_pixel(37, 53, Luma([90]));
        let result = equalize_adaptive(&img);
        assert_eq!(result.dimensions(), (37, 53));
    }

    #[test]
    fn test_small_image_does_not_panic() {
        let img = GrayImage::from_pixel(3, 3, Luma([10]));
        let result = equalize_adaptive(&img);
        assert_eq!(result.dimensions(), (3, 3));
    }

    #[test]
    fn test_uniform_image_maps_near_its_rank() {
        // A uniform mid-gray image: clipping flattens the histogram, so each
        // tile's mapping sends value v to roughly (v + 1) / 256 of the range.
        let img = GrayImage::from_pixel(256, 256, Luma([128]));
        let result = equalize_adaptive(&img);
        let v = result.get_pixel(128, 128).0[0];
        assert!(
            (120..=140).contains(&v),
            "expected ~130 after clipped equalization, got {v}"
        );
    }

    #[test]
    fn test_narrow_band_is_stretched() {
        // Samples crammed into 100..=119 should spread over a wider range.
        let mut img = GrayImage::new(256, 256);
        for (x, _y, pixel) in img.enumerate_pixels_mut() {
            *pixel = Luma([100 + (x % 20) as u8]);
        }
        let result = equalize_adaptive(&img);
        let min = result.pixels().map(|p| p.0[0]).min().unwrap();
        let max = result.pixels().map(|p| p.0[0]).max().unwrap();
        assert!(max - min > 20, "contrast not stretched: {min}..{max}");
    }
}
