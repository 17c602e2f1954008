//! WASM-compatible wrapper types for video frames.
//!
//! This module provides a JavaScript-friendly frame type wrapping the core
//! `VideoFrame`, with accessors for inspecting the plane views a crop
//! produces.

use framecrop_core::{CropSurface, HwSurface, PixelFormat, PlaneFrame, VideoFrame};
use wasm_bindgen::prelude::*;

use crate::error::BindingError;

/// A video frame wrapper for JavaScript.
///
/// Frames are either planar (pixels stored in WASM memory) or hardware
/// surfaces (an opaque handle plus a logical size).
///
/// # Memory Management
///
/// Plane pixels stay in WASM memory. `plane_pixels()` copies the visible
/// area of a plane out to a `Uint8Array`; cropping itself never copies.
#[wasm_bindgen]
pub struct JsVideoFrame {
    inner: VideoFrame,
}

#[wasm_bindgen]
impl JsVideoFrame {
    /// Allocate a zeroed planar frame.
    ///
    /// # Arguments
    /// * `format` - Pixel format name, e.g. `"yuv420p"` or `"nv12"`
    /// * `width` - Frame width in pixels
    /// * `height` - Frame height in pixels
    #[wasm_bindgen(constructor)]
    pub fn new(format: &str, width: u32, height: u32) -> Result<JsVideoFrame, JsValue> {
        Ok(Self::planar(format, width, height)?)
    }

    /// Wrap a hardware surface handle.
    ///
    /// `handle` is a 64-bit value and must be passed as a `BigInt`
    /// (e.g. `JsVideoFrame.hardware("vaapi", 42n, 1920, 1080)`).
    pub fn hardware(
        format: &str,
        handle: u64,
        width: u32,
        height: u32,
    ) -> Result<JsVideoFrame, JsValue> {
        Ok(Self::surface(format, handle, width, height)?)
    }

    /// Get the logical frame width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.size().0
    }

    /// Get the logical frame height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.size().1
    }

    /// Get the pixel format name
    #[wasm_bindgen(getter)]
    pub fn format(&self) -> String {
        self.inner.format().to_string()
    }

    /// Whether this frame is a hardware surface
    #[wasm_bindgen(getter)]
    pub fn is_opaque(&self) -> bool {
        self.inner.is_opaque()
    }

    /// Number of pixel planes (0 for hardware surfaces)
    #[wasm_bindgen(getter)]
    pub fn num_planes(&self) -> usize {
        self.inner.as_planar().map_or(0, PlaneFrame::num_planes)
    }

    /// Row stride of a plane in bytes.
    pub fn stride(&self, plane: usize) -> Option<usize> {
        self.inner
            .as_planar()
            .and_then(|f| f.planes().get(plane))
            .map(|p| p.stride())
    }

    /// Byte offset of a plane's visible origin inside its buffer.
    pub fn plane_offset(&self, plane: usize) -> Option<usize> {
        self.inner
            .as_planar()
            .and_then(|f| f.planes().get(plane))
            .map(|p| p.offset())
    }

    /// Returns the visible rows of a plane, packed without padding.
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn plane_pixels(&self, plane: usize) -> Result<Vec<u8>, JsValue> {
        Ok(self.read_plane(plane)?)
    }

    /// Overwrite the visible rows of a plane from tightly packed data.
    pub fn set_plane_pixels(&mut self, plane: usize, data: &[u8]) -> Result<(), JsValue> {
        Ok(self.write_plane(plane, data)?)
    }
}

impl JsVideoFrame {
    pub(crate) fn planar(format: &str, width: u32, height: u32) -> Result<Self, BindingError> {
        let format: PixelFormat = format.parse()?;
        Ok(Self {
            inner: PlaneFrame::new(format, width, height)?.into(),
        })
    }

    pub(crate) fn surface(
        format: &str,
        handle: u64,
        width: u32,
        height: u32,
    ) -> Result<Self, BindingError> {
        let format: PixelFormat = format.parse()?;
        Ok(Self {
            inner: HwSurface::new(format, handle, width, height)?.into(),
        })
    }

    pub(crate) fn inner(&self) -> &VideoFrame {
        &self.inner
    }

    pub(crate) fn inner_mut(&mut self) -> &mut VideoFrame {
        &mut self.inner
    }

    fn planar_mut(&mut self, plane: usize) -> Result<&mut PlaneFrame, BindingError> {
        let VideoFrame::Planar(frame) = &mut self.inner else {
            return Err(BindingError::OpaqueFrame);
        };
        let count = frame.num_planes();
        if plane < count {
            Ok(frame)
        } else {
            Err(BindingError::NoSuchPlane { plane, count })
        }
    }

    pub(crate) fn read_plane(&self, plane: usize) -> Result<Vec<u8>, BindingError> {
        let frame = match &self.inner {
            VideoFrame::Planar(frame) => frame,
            VideoFrame::Hardware(_) => return Err(BindingError::OpaqueFrame),
        };
        if plane >= frame.num_planes() {
            return Err(BindingError::NoSuchPlane {
                plane,
                count: frame.num_planes(),
            });
        }

        let mut out = Vec::new();
        let mut y = 0;
        while let Some(row) = frame.row(plane, y) {
            out.extend_from_slice(row);
            y += 1;
        }
        Ok(out)
    }

    pub(crate) fn write_plane(&mut self, plane: usize, data: &[u8]) -> Result<(), BindingError> {
        let frame = self.planar_mut(plane)?;

        let mut expected = 0;
        let mut rows = 0;
        while let Some(row) = frame.row(plane, rows) {
            expected += row.len();
            rows += 1;
        }
        if data.len() != expected {
            return Err(BindingError::PlaneLength {
                plane,
                expected,
                got: data.len(),
            });
        }

        let mut src = data;
        for y in 0..rows {
            if let Some(row) = frame.row_mut(plane, y) {
                let (head, tail) = src.split_at(row.len());
                row.copy_from_slice(head);
                src = tail;
            }
        }
        Ok(())
    }
}
