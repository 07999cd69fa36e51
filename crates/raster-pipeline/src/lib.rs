//! Adaptive image-to-raster pipeline for 576px thermal receipt printers.
//!
//! Measures source luminance, grades the image into an enhancement profile,
//! applies tone and edge enhancement, resizes to the print width, reduces to
//! 1-bit output via ordered (Bayer) or error-diffusion dithering, and slices
//! the result into bounded-height bands for sequential transmission.

pub mod analyze;
pub mod dither;
pub mod enhance;
pub mod pipeline;
pub mod profile;
pub mod raster;
pub mod resize;
pub mod transport;

mod clahe;

// Re-exports for convenience
pub use analyze::mean_luminance;
pub use dither::{BayerMatrix, dither};
pub use pipeline::{PrintOptions, ProcessedImage, decode_source, process_image};
pub use profile::{DitherMode, EnhancementProfile, EqualizeMethod, ImageClass, classify};
pub use raster::{Band, MonoBitmap, fragment};
pub use resize::resize_to_print_width;
pub use transport::BandTransport;

/// Print head width in pixels; every rasterized image is exactly this wide.
pub const PRINT_WIDTH: u32 = 576;

/// Maximum height in rows of a single transmitted band.
pub const FRAGMENT_HEIGHT: u32 = 256;

/// Errors that can occur while rasterizing an image.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The source bytes could not be decoded as an image.
    #[error("failed to decode source image: {0}")]
    Decode(#[from] image::ImageError),

    /// The caller handed us an image or parameter we cannot work with.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An enhancement step produced data outside the representable range.
    /// Saturating arithmetic should make this unreachable.
    #[error("enhancement produced out-of-range data: {0}")]
    Enhancement(String),
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;
