//! Enhancement profiles and luminance-based classification.
//!
//! Each incoming image is graded into exactly one class from its mean
//! luminance alone; the class selects an immutable profile carrying the
//! gains and switches the later pipeline stages consume.

use tracing::debug;

/// Dithering algorithm used for the final 1-bit reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DitherMode {
    Bayer2x2,
    Bayer4x4,
    Bayer8x8,
    Threshold,
    FloydSteinberg,
}

impl DitherMode {
    /// Parse a mode name as submitted by callers.
    ///
    /// Unrecognized names deterministically fall back to `FloydSteinberg`,
    /// the documented default.
    pub fn from_name(name: &str) -> Self {
        match name {
            "BAYER_2x2" => Self::Bayer2x2,
            "BAYER_4x4" => Self::Bayer4x4,
            "BAYER_8x8" => Self::Bayer8x8,
            "THRESHOLD" => Self::Threshold,
            "FLOYDSTEINBERG" => Self::FloydSteinberg,
            other => {
                debug!(
                    mode = other,
                    "Unknown dither mode, falling back to Floyd-Steinberg"
                );
                Self::FloydSteinberg
            }
        }
    }
}

/// Equalization strategy applied as the first enhancement step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EqualizeMethod {
    /// Contrast-limited adaptive histogram equalization (8x8 tile grid).
    Clahe,
    /// Global histogram equalization.
    Histogram,
    /// Leave the image unchanged.
    None,
}

/// Immutable set of enhancement parameters for one luminance class.
#[derive(Debug, Clone, PartialEq)]
pub struct EnhancementProfile {
    /// Saturating multiplier applied to every sample, `> 0`.
    pub brightness_gain: f32,
    /// Saturating multiplier applied after brightness, `> 0`.
    pub contrast_gain: f32,
    /// Unsharp-style gain applied before dithering; `1.0` is a no-op.
    pub sharpness_gain: f32,
    /// Dithering algorithm unless the caller overrides it.
    pub dither: DitherMode,
    /// Whether to equalize at all.
    pub equalize: bool,
    /// How to equalize when `equalize` is set.
    pub equalize_method: EqualizeMethod,
    /// Whether to blend the edge-emphasis mask in.
    pub edge_enhance: bool,
}

static BRIGHT: EnhancementProfile = EnhancementProfile {
    brightness_gain: 1.1,
    contrast_gain: 1.2,
    sharpness_gain: 1.2,
    dither: DitherMode::Bayer4x4,
    equalize: true,
    equalize_method: EqualizeMethod::Clahe,
    edge_enhance: false,
};

static DARK: EnhancementProfile = EnhancementProfile {
    brightness_gain: 1.1,
    contrast_gain: 1.1,
    sharpness_gain: 1.0,
    dither: DitherMode::Bayer4x4,
    equalize: true,
    equalize_method: EqualizeMethod::Clahe,
    edge_enhance: true,
};

static SUPER_BRIGHT: EnhancementProfile = EnhancementProfile {
    brightness_gain: 0.8,
    contrast_gain: 1.0,
    sharpness_gain: 1.0,
    dither: DitherMode::Bayer4x4,
    equalize: false,
    equalize_method: EqualizeMethod::Clahe,
    edge_enhance: true,
};

static SUPER_DARK: EnhancementProfile = EnhancementProfile {
    brightness_gain: 1.8,
    contrast_gain: 1.8,
    sharpness_gain: 1.8,
    dither: DitherMode::Bayer4x4,
    equalize: true,
    equalize_method: EqualizeMethod::Clahe,
    edge_enhance: true,
};

/// Luminance class an image is graded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageClass {
    SuperDark,
    Dark,
    Bright,
    SuperBright,
}

impl ImageClass {
    /// The tuned enhancement profile for this class.
    pub fn profile(self) -> &'static EnhancementProfile {
        match self {
            Self::SuperDark => &SUPER_DARK,
            Self::Dark => &DARK,
            Self::Bright => &BRIGHT,
            Self::SuperBright => &SUPER_BRIGHT,
        }
    }

    /// Stable lowercase name, as reported to callers.
    pub fn name(self) -> &'static str {
        match self {
            Self::SuperDark => "super_dark",
            Self::Dark => "dark",
            Self::Bright => "bright",
            Self::SuperBright => "super_bright",
        }
    }
}

/// Grade a mean luminance value into its class.
///
/// The cut points are tuned for this hardware and evaluated in order with
/// half-open boundaries: below 50 is super-dark, below 118 dark, above 200
/// super-bright, everything else bright.
pub fn classify(mean_luminance: f32) -> ImageClass {
    if mean_luminance < 50.0 {
        ImageClass::SuperDark
    } else if mean_luminance < 118.0 {
        ImageClass::Dark
    } else if mean_luminance > 200.0 {
        ImageClass::SuperBright
    } else {
        ImageClass::Bright
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify(49.9), ImageClass::SuperDark);
        assert_eq!(classify(50.0), ImageClass::Dark);
        assert_eq!(classify(117.9), ImageClass::Dark);
        assert_eq!(classify(118.0), ImageClass::Bright);
        assert_eq!(classify(200.0), ImageClass::Bright);
        assert_eq!(classify(200.1), ImageClass::SuperBright);
    }

    #[test]
    fn test_classify_extremes() {
        assert_eq!(classify(0.0), ImageClass::SuperDark);
        assert_eq!(classify(255.0), ImageClass::SuperBright);
    }

    #[test]
    fn test_super_dark_profile_gains() {
        let p = ImageClass::SuperDark.profile();
        assert!((p.brightness_gain - 1.8).abs() < f32::EPSILON);
        assert!((p.contrast_gain - 1.8).abs() < f32::EPSILON);
        assert!((p.sharpness_gain - 1.8).abs() < f32::EPSILON);
        assert!(p.equalize);
        assert_eq!(p.equalize_method, EqualizeMethod::Clahe);
        assert!(p.edge_enhance);
        assert_eq!(p.dither, DitherMode::Bayer4x4);
    }

    #[test]
    fn test_bright_profile_leaves_edges_off() {
        assert!(!ImageClass::Bright.profile().edge_enhance);
        assert!(ImageClass::Dark.profile().edge_enhance);
    }

    #[test]
    fn test_super_bright_skips_equalization() {
        assert!(!ImageClass::SuperBright.profile().equalize);
    }

    #[test]
    fn test_dither_mode_names() {
        assert_eq!(DitherMode::from_name("BAYER_2x2"), DitherMode::Bayer2x2);
        assert_eq!(DitherMode::from_name("BAYER_4x4"), DitherMode::Bayer4x4);
        assert_eq!(DitherMode::from_name("BAYER_8x8"), DitherMode::Bayer8x8);
        assert_eq!(DitherMode::from_name("THRESHOLD"), DitherMode::Threshold);
        assert_eq!(
            DitherMode::from_name("FLOYDSTEINBERG"),
            DitherMode::FloydSteinberg
        );
    }

    #[test]
    fn test_unknown_dither_mode_falls_back() {
        assert_eq!(DitherMode::from_name("UNKNOWN"), DitherMode::FloydSteinberg);
        assert_eq!(DitherMode::from_name(""), DitherMode::FloydSteinberg);
        // Case matters: names come from the form values verbatim.
        assert_eq!(
            DitherMode::from_name("bayer_4x4"),
            DitherMode::FloydSteinberg
        );
    }
}
