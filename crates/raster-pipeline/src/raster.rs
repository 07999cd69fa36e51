//! Packed 1-bit raster output and band fragmentation.

use image::GrayImage;
use tracing::debug;

use crate::{PipelineError, Result};

/// A 1-bit monochrome bitmap.
///
/// Rows are packed MSB-first, one set bit per black dot, padded with white
/// to a whole byte. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonoBitmap {
    width: u32,
    height: u32,
    bytes_per_row: usize,
    data: Vec<u8>,
}

impl MonoBitmap {
    /// Pack a dithered 0/255 grayscale image into 1-bit rows.
    ///
    /// Any other sample value means an upstream stage broke the binary
    /// invariant and is reported as an enhancement failure.
    pub fn from_binary(img: &GrayImage) -> Result<Self> {
        let (width, height) = img.dimensions();
        let bytes_per_row = (width as usize).div_ceil(8);
        let mut data = vec![0u8; bytes_per_row * height as usize];

        for (x, y, pixel) in img.enumerate_pixels() {
            match pixel.0[0] {
                255 => {}
                0 => {
                    data[y as usize * bytes_per_row + x as usize / 8] |= 0x80 >> (x % 8);
                }
                other => {
                    return Err(PipelineError::Enhancement(format!(
                        "non-binary sample {other} at ({x}, {y})"
                    )));
                }
            }
        }

        Ok(Self { width, height, bytes_per_row, data })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Packed bytes per row, `ceil(width / 8)`.
    pub fn bytes_per_row(&self) -> usize {
        self.bytes_per_row
    }

    /// Raw packed rows, top to bottom.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    fn rows(&self, top: u32, height: u32) -> &[u8] {
        let start = top as usize * self.bytes_per_row;
        let end = (top as usize + height as usize) * self.bytes_per_row;
        &self.data[start..end]
    }
}

/// A contiguous horizontal slice of the final bitmap.
///
/// Bands are produced top to bottom with no overlap or gap and consumed
/// exactly once by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Band {
    /// Row offset of this band within the source bitmap.
    pub top: u32,
    /// Number of rows; at most the fragment height, shorter only for the
    /// last band.
    pub height: u32,
    /// Packed bytes per row.
    pub bytes_per_row: usize,
    /// Packed row data, `bytes_per_row * height` bytes.
    pub data: Vec<u8>,
}

/// Slice a bitmap into top-to-bottom bands of at most `fragment_height`
/// rows.
///
/// A zero-height bitmap yields no bands; whether printing nothing is an
/// error is the caller's call.
///
/// # Panics
/// Panics if `fragment_height` is zero.
pub fn fragment(bitmap: &MonoBitmap, fragment_height: u32) -> Vec<Band> {
    assert!(fragment_height > 0, "fragment height must be positive");

    let count = (bitmap.height() as usize).div_ceil(fragment_height as usize);
    let mut bands = Vec::with_capacity(count);
    let mut top = 0;
    while top < bitmap.height() {
        let height = fragment_height.min(bitmap.height() - top);
        bands.push(Band {
            top,
            height,
            bytes_per_row: bitmap.bytes_per_row(),
            data: bitmap.rows(top, height).to_vec(),
        });
        top += height;
    }

    debug!(
        height = bitmap.height(),
        bands = bands.len(),
        "Fragmented bitmap"
    );
    bands
}
