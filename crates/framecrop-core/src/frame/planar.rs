//! CPU-addressable frames made of byte planes.

use super::{CropSurface, FrameError};
use crate::format::{FormatDesc, PixelFormat, PlaneDesc};
use crate::geometry::ResolvedCrop;

/// Row stride alignment used when allocating planes.
const STRIDE_ALIGN: usize = 16;

/// One plane of pixel data.
///
/// `offset` is the byte position of the visible top-left sample inside
/// `data`. Cropping only ever moves `offset`; the buffer is never touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plane {
    data: Vec<u8>,
    stride: usize,
    offset: usize,
}

impl Plane {
    /// Wrap an existing buffer with the given row stride.
    pub fn new(data: Vec<u8>, stride: usize) -> Self {
        Self {
            data,
            stride,
            offset: 0,
        }
    }

    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Byte offset of the visible origin.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }
}

/// A frame whose pixels live in addressable memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaneFrame {
    format: PixelFormat,
    desc: FormatDesc,
    width: u32,
    height: u32,
    planes: Vec<Plane>,
}

impl PlaneFrame {
    /// Allocate a zeroed frame of the given format and size.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::OpaqueFormat`] for hardware formats, which have
    /// no planes to allocate, and [`FrameError::TooLarge`] when a plane size
    /// overflows or cannot be allocated.
    pub fn new(format: PixelFormat, width: u32, height: u32) -> Result<Self, FrameError> {
        let desc = format.describe();
        if desc.is_opaque() {
            return Err(FrameError::OpaqueFormat(format));
        }

        let too_large = || FrameError::TooLarge { width, height };
        let planes = desc
            .planes
            .iter()
            .map(|p| {
                let stride = row_bytes(p, width)
                    .and_then(|row| row.checked_next_multiple_of(STRIDE_ALIGN))
                    .ok_or_else(too_large)?;
                let len = stride
                    .checked_mul(p.plane_height(height) as usize)
                    .filter(|&len| len <= isize::MAX as usize)
                    .ok_or_else(too_large)?;

                let mut data = Vec::new();
                data.try_reserve_exact(len).map_err(|_| too_large())?;
                data.resize(len, 0u8);
                Ok(Plane::new(data, stride))
            })
            .collect::<Result<Vec<_>, FrameError>>()?;

        Ok(Self {
            format,
            desc,
            width,
            height,
            planes,
        })
    }

    /// Build a frame from caller-provided planes.
    ///
    /// # Errors
    ///
    /// Fails if the format is opaque, the plane count does not match the
    /// format, or a plane is too small for the frame size. A frame whose
    /// plane extent overflows `usize` is [`FrameError::TooLarge`].
    pub fn from_planes(
        format: PixelFormat,
        width: u32,
        height: u32,
        planes: Vec<Plane>,
    ) -> Result<Self, FrameError> {
        let desc = format.describe();
        if desc.is_opaque() {
            return Err(FrameError::OpaqueFormat(format));
        }
        if planes.len() != desc.num_planes() {
            return Err(FrameError::PlaneCount {
                expected: desc.num_planes(),
                got: planes.len(),
            });
        }

        let too_large = || FrameError::TooLarge { width, height };
        for (index, (plane, layout)) in planes.iter().zip(desc.planes).enumerate() {
            let row = row_bytes(layout, width).ok_or_else(too_large)?;
            let needed = match layout.plane_height(height) as usize {
                0 => 0,
                n => (n - 1)
                    .checked_mul(plane.stride)
                    .and_then(|n| n.checked_add(row))
                    .ok_or_else(too_large)?,
            };
            if plane.stride < row || plane.data.len() < needed {
                return Err(FrameError::PlaneTooSmall {
                    plane: index,
                    needed,
                    got: plane.data.len(),
                });
            }
        }

        Ok(Self {
            format,
            desc,
            width,
            height,
            planes,
        })
    }

    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    #[inline]
    pub fn num_planes(&self) -> usize {
        self.planes.len()
    }

    /// Visible bytes of row `y` in `plane`.
    pub fn row(&self, plane: usize, y: u32) -> Option<&[u8]> {
        let (start, len) = self.row_span(plane, y)?;
        self.planes[plane].data.get(start..start + len)
    }

    /// Mutable visible bytes of row `y` in `plane`.
    pub fn row_mut(&mut self, plane: usize, y: u32) -> Option<&mut [u8]> {
        let (start, len) = self.row_span(plane, y)?;
        self.planes[plane].data.get_mut(start..start + len)
    }

    fn row_span(&self, plane: usize, y: u32) -> Option<(usize, usize)> {
        let layout = self.desc.planes.get(plane)?;
        if y >= layout.plane_height(self.height) {
            return None;
        }
        let p = &self.planes[plane];
        let len = layout.plane_width(self.width) as usize * layout.bytes_per_pixel as usize;
        Some((p.offset + y as usize * p.stride, len))
    }
}

/// Visible bytes in one row of `layout` for a frame `width` pixels wide.
fn row_bytes(layout: &PlaneDesc, width: u32) -> Option<usize> {
    (layout.plane_width(width) as usize).checked_mul(layout.bytes_per_pixel as usize)
}

impl CropSurface for PlaneFrame {
    fn apply_crop(&mut self, crop: &ResolvedCrop) {
        debug_assert!(
            crop.fits(self.width, self.height),
            "crop {crop:?} outside {}x{} frame",
            self.width,
            self.height
        );
        debug_assert!(
            crop.x % self.desc.align_x == 0 && crop.y % self.desc.align_y == 0,
            "crop origin {}/{} not aligned for {}",
            crop.x,
            crop.y,
            self.format
        );

        for (plane, layout) in self.planes.iter_mut().zip(self.desc.planes) {
            let rows = (crop.y >> layout.ys) as usize;
            let cols = (crop.x >> layout.xs) as usize;
            plane.offset += rows * plane.stride + cols * layout.bytes_per_pixel as usize;
        }

        self.width = crop.w;
        self.height = crop.h;
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
