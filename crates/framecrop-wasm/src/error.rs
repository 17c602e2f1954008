//! Error conversion for the JavaScript boundary.

use framecrop_core::{ConfigError, CropError, FormatError, FrameError, PixelFormat};
use thiserror::Error;
use wasm_bindgen::JsValue;

/// Any error a binding can raise before it crosses into JavaScript.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BindingError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Crop(#[from] CropError),

    #[error(transparent)]
    Frame(#[from] FrameError),

    /// Plane index past the end of the frame.
    #[error("Plane {plane} does not exist (frame has {count})")]
    NoSuchPlane { plane: usize, count: usize },

    /// Pixel data length does not match the visible plane area.
    #[error("Plane {plane} expects {expected} bytes, got {got}")]
    PlaneLength {
        plane: usize,
        expected: usize,
        got: usize,
    },

    /// Frame does not match the input the stage was configured for.
    #[error(
        "Frame {got_format} {got_w}x{got_h} does not match configured input {expected_format} {expected_w}x{expected_h}"
    )]
    FrameMismatch {
        expected_format: PixelFormat,
        expected_w: u32,
        expected_h: u32,
        got_format: PixelFormat,
        got_w: u32,
        got_h: u32,
    },

    /// The operation needs addressable pixels.
    #[error("Frame is a hardware surface")]
    OpaqueFrame,
}

impl From<BindingError> for JsValue {
    fn from(err: BindingError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
