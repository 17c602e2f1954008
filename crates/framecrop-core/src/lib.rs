//! Framecrop Core - crop stage for video pipelines
//!
//! This crate resolves crop rectangles against frame geometry and pixel
//! format alignment, and applies them to frames without copying pixels.
//!
//! # Flow
//!
//! 1. On every format or size change, [`CropFilter::reconfigure`] looks the
//!    format up, runs [`resolve`] and stores the [`ResolvedCrop`]
//! 2. For every frame, [`CropFilter::filter`] applies the stored rectangle:
//!    plane origins move for addressable frames, only the logical size
//!    changes for hardware surfaces
//!
//! Advisory events (origin moved for alignment, rectangle rejected) are
//! reported through the `log` facade at warning level.

pub mod config;
pub mod filter;
pub mod format;
pub mod frame;
pub mod geometry;

pub use config::{ConfigError, CropOptions};
pub use filter::CropFilter;
pub use format::{BuiltinFormats, FormatDesc, FormatError, FormatQuery, PixelFormat, PlaneDesc};
pub use frame::{
    apply_crop, CropSurface, FrameError, FrameParams, HwSurface, Plane, PlaneFrame, VideoFrame,
};
pub use geometry::{resolve, CropError, CropRequest, OriginAdjustment, Resolution, ResolvedCrop};
