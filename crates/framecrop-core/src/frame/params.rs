//! Frame parameters exchanged on reconfiguration.

use serde::{Deserialize, Serialize};

use crate::format::PixelFormat;

/// Pixel aspect ratio as a fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelAspect {
    pub num: u32,
    pub den: u32,
}

impl Default for PixelAspect {
    fn default() -> Self {
        Self { num: 1, den: 1 }
    }
}

/// Nominal range of sample values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorRange {
    /// Studio swing (16-235 for 8-bit luma).
    #[default]
    Limited,
    /// Full swing (0-255 for 8-bit).
    Full,
}

/// Geometry and format of the frames a stage receives or produces.
///
/// A crop only replaces `w` and `h`; every other field passes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameParams {
    pub format: PixelFormat,
    pub w: u32,
    pub h: u32,
    #[serde(default)]
    pub pixel_aspect: PixelAspect,
    #[serde(default)]
    pub color_range: ColorRange,
}

impl FrameParams {
    /// Parameters with square pixels and limited range.
    pub fn new(format: PixelFormat, w: u32, h: u32) -> Self {
        Self {
            format,
            w,
            h,
            pixel_aspect: PixelAspect::default(),
            color_range: ColorRange::default(),
        }
    }

    /// Copy of these parameters with a different size.
    pub fn with_size(self, w: u32, h: u32) -> Self {
        Self { w, h, ..self }
    }
}
