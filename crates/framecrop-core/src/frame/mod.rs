//! Frames and the per-frame cropper.
//!
//! Cropping a frame is a view change, never a copy. Two kinds of frames are
//! supported:
//!
//! - [`PlaneFrame`]: pixels in addressable memory. Each plane's origin moves
//!   by the crop offset scaled by that plane's subsampling.
//! - [`HwSurface`]: an opaque hardware handle. Only the logical size changes.
//!
//! Both implement [`CropSurface`]; [`VideoFrame`] is the tagged union a
//! pipeline passes around.
//!
//! The cropper trusts its input: the rectangle must already have been
//! resolved for the frame's current size and format. Debug builds assert
//! this.

mod hardware;
mod params;
mod planar;

pub use hardware::HwSurface;
pub use params::{ColorRange, FrameParams, PixelAspect};
pub use planar::{Plane, PlaneFrame};

use thiserror::Error;

use crate::format::PixelFormat;
use crate::geometry::ResolvedCrop;

/// Error types for frame construction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// Planes were requested for a hardware format.
    #[error("Pixel format {0} is a hardware surface without planes")]
    OpaqueFormat(PixelFormat),

    /// A hardware surface was requested for a software format.
    #[error("Pixel format {0} is not a hardware surface format")]
    AddressableFormat(PixelFormat),

    /// Wrong number of planes for the format.
    #[error("Expected {expected} planes, got {got}")]
    PlaneCount { expected: usize, got: usize },

    /// A plane buffer cannot hold the frame.
    #[error("Plane {plane} needs {needed} bytes, got {got}")]
    PlaneTooSmall {
        plane: usize,
        needed: usize,
        got: usize,
    },

    /// Plane sizes for the frame do not fit in memory.
    #[error("Frame {width}x{height} is too large")]
    TooLarge { width: u32, height: u32 },
}

/// Something a resolved crop can be applied to.
pub trait CropSurface {
    /// Apply `crop` in place. No pixel data is copied or written.
    fn apply_crop(&mut self, crop: &ResolvedCrop);

    /// Current logical `(width, height)`.
    fn size(&self) -> (u32, u32);
}

/// A frame flowing through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoFrame {
    Planar(PlaneFrame),
    Hardware(HwSurface),
}

impl VideoFrame {
    pub fn format(&self) -> PixelFormat {
        match self {
            VideoFrame::Planar(frame) => frame.format(),
            VideoFrame::Hardware(surface) => surface.format(),
        }
    }

    /// Check if this frame has no addressable pixels.
    pub fn is_opaque(&self) -> bool {
        matches!(self, VideoFrame::Hardware(_))
    }

    pub fn as_planar(&self) -> Option<&PlaneFrame> {
        match self {
            VideoFrame::Planar(frame) => Some(frame),
            VideoFrame::Hardware(_) => None,
        }
    }
}

impl CropSurface for VideoFrame {
    fn apply_crop(&mut self, crop: &ResolvedCrop) {
        match self {
            VideoFrame::Planar(frame) => frame.apply_crop(crop),
            VideoFrame::Hardware(surface) => surface.apply_crop(crop),
        }
    }

    fn size(&self) -> (u32, u32) {
        match self {
            VideoFrame::Planar(frame) => frame.size(),
            VideoFrame::Hardware(surface) => surface.size(),
        }
    }
}

impl From<PlaneFrame> for VideoFrame {
    fn from(frame: PlaneFrame) -> Self {
        VideoFrame::Planar(frame)
    }
}

impl From<HwSurface> for VideoFrame {
    fn from(surface: HwSurface) -> Self {
        VideoFrame::Hardware(surface)
    }
}

/// Apply a resolved crop to a frame, handing the frame back.
#[inline]
pub fn apply_crop<S: CropSurface>(crop: &ResolvedCrop, mut frame: S) -> S {
    frame.apply_crop(crop);
    frame
}
