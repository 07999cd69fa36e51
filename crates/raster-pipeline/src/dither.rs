//! 1-bit reduction: ordered (Bayer) dithering, hard threshold, and
//! Floyd-Steinberg error diffusion.

use image::{GrayImage, Luma};
use imageproc::contrast::{ThresholdType, threshold};
use tracing::debug;

use crate::profile::DitherMode;

/// Binarization cut for the hard-threshold mode and error diffusion.
const BINARY_THRESHOLD: u8 = 128;

/// A pre-scaled ordered-dither threshold matrix.
///
/// Entries span the full sample range (`raw * (255 / n²)`, integer
/// division) and are compared directly against image samples. The matrix
/// tiles across the image by modulo indexing, so a partial trailing tile is
/// clipped against the same origin as a full tile, never stretched.
pub struct BayerMatrix {
    n: usize,
    cells: &'static [u8],
}

impl BayerMatrix {
    /// Edge length of the matrix.
    pub const fn size(&self) -> usize {
        self.n
    }

    /// Threshold for the pixel at `(x, y)` under infinite tiling.
    #[inline]
    pub fn threshold_at(&self, x: u32, y: u32) -> u8 {
        self.cells[(y as usize % self.n) * self.n + (x as usize % self.n)]
    }
}

const fn scaled<const LEN: usize>(raw: [u8; LEN], cell_count: u8) -> [u8; LEN] {
    let scale = 255 / cell_count;
    let mut out = [0u8; LEN];
    let mut i = 0;
    while i < LEN {
        out[i] = raw[i] * scale;
        i += 1;
    }
    out
}

static BAYER_2X2_CELLS: [u8; 4] = scaled([0, 2, 3, 1], 4);

#[rustfmt::skip]
static BAYER_4X4_CELLS: [u8; 16] = scaled([
     0,  8,  2, 10,
    12,  4, 14,  6,
     3, 11,  1,  9,
    15,  7, 13,  5,
], 16);

#[rustfmt::skip]
static BAYER_8X8_CELLS: [u8; 64] = scaled([
     0, 48, 12, 60,  3, 51, 15, 63,
    32, 16, 44, 28, 35, 19, 47, 31,
     8, 56,  4, 52, 11, 59,  7, 55,
    40, 24, 36, 20, 43, 27, 39, 23,
     2, 50, 14, 62,  1, 49, 13, 61,
    34, 18, 46, 30, 33, 17, 45, 29,
    10, 58,  6, 54,  9, 57,  5, 53,
    42, 26, 38, 22, 41, 25, 37, 21,
], 64);

/// 2x2 Bayer matrix, entries scaled by 63.
pub static BAYER_2X2: BayerMatrix = BayerMatrix { n: 2, cells: &BAYER_2X2_CELLS };

/// 4x4 Bayer matrix, entries scaled by 15.
pub static BAYER_4X4: BayerMatrix = BayerMatrix { n: 4, cells: &BAYER_4X4_CELLS };

/// 8x8 Bayer matrix, entries scaled by 3.
pub static BAYER_8X8: BayerMatrix = BayerMatrix { n: 8, cells: &BAYER_8X8_CELLS };

/// Reduce a grayscale image to 0/255 samples with the selected algorithm.
///
/// Output dimensions always equal input dimensions.
pub fn dither(img: &GrayImage, mode: DitherMode) -> GrayImage {
    match mode {
        DitherMode::Bayer2x2 => ordered_dither(img, &BAYER_2X2),
        DitherMode::Bayer4x4 => ordered_dither(img, &BAYER_4X4),
        DitherMode::Bayer8x8 => ordered_dither(img, &BAYER_8X8),
        DitherMode::Threshold => threshold(img, BINARY_THRESHOLD, ThresholdType::Binary),
        DitherMode::FloydSteinberg => floyd_steinberg(img),
    }
}

/// Ordered dithering against a tiled Bayer matrix.
///
/// A sample strictly above its tiled threshold prints white; ties and
/// everything below print black.
pub fn ordered_dither(img: &GrayImage, matrix: &BayerMatrix) -> GrayImage {
    let (width, height) = img.dimensions();
    debug!(width, height, size = matrix.size(), "Applying ordered dithering");

    let mut output = GrayImage::new(width, height);
    for (x, y, pixel) in output.enumerate_pixels_mut() {
        let sample = img.get_pixel(x, y).0[0];
        let value = if sample > matrix.threshold_at(x, y) { 255 } else { 0 };
        *pixel = Luma([value]);
    }
    output
}

/// Classic row-major Floyd-Steinberg error diffusion.
///
/// Error distribution to unvisited neighbors:
/// right 7/16, below-left 3/16, below 5/16, below-right 1/16.
pub fn floyd_steinberg(img: &GrayImage) -> GrayImage {
    let (width, height) = img.dimensions();
    debug!(width, height, "Applying Floyd-Steinberg dithering");

    let w = width as usize;
    let mut buffer: Vec<i16> = img.pixels().map(|p| i16::from(p.0[0])).collect();

    for y in 0..height as usize {
        for x in 0..w {
            let idx = y * w + x;
            let old = buffer[idx];
            let new = if old >= i16::from(BINARY_THRESHOLD) { 255 } else { 0 };
            buffer[idx] = new;
            let error = old - new;

            if x + 1 < w {
                buffer[idx + 1] += error * 7 / 16;
            }
            if y + 1 < height as usize {
                if x > 0 {
                    buffer[idx + w - 1] += error * 3 / 16;
                }
                buffer[idx + w] += error * 5 / 16;
                if x + 1 < w {
                    buffer[idx + w + 1] += error / 16;
                }
            }
        }
    }

    let mut output = GrayImage::new(width, height);
    for (x, y, pixel) in output.enumerate_pixels_mut() {
        *pixel = Luma([buffer[y as usize * w + x as usize].clamp(0, 255) as u8]);
    }
    output
}
