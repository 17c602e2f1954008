//! Opaque hardware surfaces.

use super::{CropSurface, FrameError};
use crate::format::PixelFormat;
use crate::geometry::ResolvedCrop;

/// Handle to a hardware-resident frame.
///
/// Only the logical size is visible to the cropper. The coded size is the
/// size of the allocation behind the handle and never changes; the surface
/// owner decides how a smaller logical size maps onto it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HwSurface {
    format: PixelFormat,
    handle: u64,
    width: u32,
    height: u32,
    coded_width: u32,
    coded_height: u32,
}

impl HwSurface {
    /// Wrap a surface handle of the given hardware format.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::AddressableFormat`] if `format` is not a
    /// hardware format.
    pub fn new(
        format: PixelFormat,
        handle: u64,
        width: u32,
        height: u32,
    ) -> Result<Self, FrameError> {
        if !format.is_hardware() {
            return Err(FrameError::AddressableFormat(format));
        }
        Ok(Self {
            format,
            handle,
            width,
            height,
            coded_width: width,
            coded_height: height,
        })
    }

    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    #[inline]
    pub fn handle(&self) -> u64 {
        self.handle
    }

    #[inline]
    pub fn coded_size(&self) -> (u32, u32) {
        (self.coded_width, self.coded_height)
    }
}

impl CropSurface for HwSurface {
    fn apply_crop(&mut self, crop: &ResolvedCrop) {
        debug_assert!(
            crop.fits(self.width, self.height),
            "crop {crop:?} outside {}x{} surface",
            self.width,
            self.height
        );
        self.width = crop.w;
        self.height = crop.h;
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_software_format() {
        assert_eq!(
            HwSurface::new(PixelFormat::Nv12, 1, 64, 64),
            Err(FrameError::AddressableFormat(PixelFormat::Nv12))
        );
    }

    #[test]
    fn test_crop_only_changes_logical_size() {
        let mut surface = HwSurface::new(PixelFormat::Vaapi, 42, 1920, 1080).unwrap();
        surface.apply_crop(&ResolvedCrop {
            w: 1280,
            h: 720,
            x: 0,
            y: 0,
        });

        assert_eq!(surface.size(), (1280, 720));
        assert_eq!(surface.coded_size(), (1920, 1080));
        assert_eq!(surface.handle(), 42);
        assert_eq!(surface.format(), PixelFormat::Vaapi);
    }
}
