//! Core types for crop geometry.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for crop resolution and the crop stage.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CropError {
    /// The resolved rectangle does not fit inside the frame.
    #[error(
        "Bad position/width/height - cropped area {w}x{h}+{x}+{y} outside of the original {frame_w}x{frame_h}"
    )]
    GeometryRejected {
        w: u32,
        h: u32,
        x: u32,
        y: u32,
        frame_w: u32,
        frame_h: u32,
    },

    /// A frame arrived before any reconfiguration succeeded.
    #[error("Crop stage is not configured")]
    NotConfigured,
}

/// A user-requested crop rectangle.
///
/// Every field is independently optional. Unset sizes default to the full
/// frame dimension; unset offsets center the rectangle on that axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CropRequest {
    pub w: Option<u32>,
    pub h: Option<u32>,
    pub x: Option<u32>,
    pub y: Option<u32>,
}

impl CropRequest {
    /// A request with every field unset (identity crop).
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a request from the sentinel encoding used by option tables.
    ///
    /// Sizes `<= 0` and offsets `< 0` mean "unset".
    pub fn from_sentinels(w: i32, h: i32, x: i32, y: i32) -> Self {
        let size = |v: i32| u32::try_from(v).ok().filter(|&v| v > 0);
        let offset = |v: i32| u32::try_from(v).ok();
        Self {
            w: size(w),
            h: size(h),
            x: offset(x),
            y: offset(y),
        }
    }

    pub fn with_size(mut self, w: u32, h: u32) -> Self {
        self.w = Some(w).filter(|&w| w > 0);
        self.h = Some(h).filter(|&h| h > 0);
        self
    }

    pub fn with_origin(mut self, x: u32, y: u32) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    /// Check if no field is set.
    pub fn is_unset(&self) -> bool {
        *self == Self::default()
    }
}

/// A fully determined, aligned, bounds-checked crop rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedCrop {
    pub w: u32,
    pub h: u32,
    pub x: u32,
    pub y: u32,
}

impl ResolvedCrop {
    /// Rightmost column (exclusive).
    #[inline]
    pub fn right(&self) -> u64 {
        u64::from(self.x) + u64::from(self.w)
    }

    /// Bottom row (exclusive).
    #[inline]
    pub fn bottom(&self) -> u64 {
        u64::from(self.y) + u64::from(self.h)
    }

    /// Check that this rectangle lies within a `frame_w` x `frame_h` frame.
    pub fn fits(&self, frame_w: u32, frame_h: u32) -> bool {
        self.right() <= u64::from(frame_w) && self.bottom() <= u64::from(frame_h)
    }

    /// Check if this crop keeps the whole frame.
    pub fn is_identity(&self, frame_w: u32, frame_h: u32) -> bool {
        self.x == 0 && self.y == 0 && self.w == frame_w && self.h == frame_h
    }

    /// Output dimensions produced by this crop.
    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.w, self.h)
    }
}

/// Origin change made to satisfy format alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OriginAdjustment {
    /// Origin after defaulting and centering.
    pub requested: (u32, u32),
    /// Origin actually used.
    pub applied: (u32, u32),
}

/// Successful output of the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub crop: ResolvedCrop,
    /// Set when alignment moved the origin.
    pub adjustment: Option<OriginAdjustment>,
}

impl Resolution {
    /// Output frame dimensions.
    #[inline]
    pub fn output_size(&self) -> (u32, u32) {
        self.crop.size()
    }
}
