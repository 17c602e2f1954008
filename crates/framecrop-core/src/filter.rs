//! The crop pipeline stage.
//!
//! [`CropFilter`] owns the requested rectangle and the result of the last
//! successful reconfiguration. A pipeline driver calls
//! [`CropFilter::reconfigure`] whenever the upstream geometry or format
//! changes, and [`CropFilter::filter`] once per frame.
//!
//! A failed reconfiguration leaves the previous state in place. Frames that
//! arrive before any reconfiguration succeeded are refused with
//! [`CropError::NotConfigured`] rather than cropped with stale data.

use log::debug;

use crate::config::{ConfigError, CropOptions};
use crate::format::{BuiltinFormats, FormatQuery};
use crate::frame::{apply_crop, CropSurface, FrameParams, VideoFrame};
use crate::geometry::{resolve, CropError, CropRequest, ResolvedCrop};

/// State produced by a successful reconfiguration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Configured {
    crop: ResolvedCrop,
    input: FrameParams,
    output: FrameParams,
}

/// Crop stage for a video pipeline.
#[derive(Debug, Clone)]
pub struct CropFilter<Q = BuiltinFormats> {
    request: CropRequest,
    formats: Q,
    state: Option<Configured>,
}

impl CropFilter<BuiltinFormats> {
    /// Create a stage using the built-in format table.
    pub fn new(request: CropRequest) -> Self {
        Self::with_formats(request, BuiltinFormats)
    }

    /// Create a stage from user options.
    pub fn from_options(options: &CropOptions) -> Result<Self, ConfigError> {
        Ok(Self::new(options.to_request()?))
    }
}

impl<Q: FormatQuery> CropFilter<Q> {
    /// Create a stage that looks formats up through `formats`.
    pub fn with_formats(request: CropRequest, formats: Q) -> Self {
        Self {
            request,
            formats,
            state: None,
        }
    }

    #[inline]
    pub fn request(&self) -> &CropRequest {
        &self.request
    }

    /// Rectangle from the last successful reconfiguration.
    pub fn resolved(&self) -> Option<&ResolvedCrop> {
        self.state.as_ref().map(|s| &s.crop)
    }

    /// Input parameters of the last successful reconfiguration.
    pub fn input_params(&self) -> Option<&FrameParams> {
        self.state.as_ref().map(|s| &s.input)
    }

    /// Output parameters of the last successful reconfiguration.
    pub fn output_params(&self) -> Option<&FrameParams> {
        self.state.as_ref().map(|s| &s.output)
    }

    /// Resolve the crop for new input parameters.
    ///
    /// # Returns
    ///
    /// The output parameters: the input with its size replaced by the crop
    /// size.
    ///
    /// # Errors
    ///
    /// [`CropError::GeometryRejected`] if the rectangle does not fit. The
    /// previous configuration is kept.
    pub fn reconfigure(&mut self, input: &FrameParams) -> Result<FrameParams, CropError> {
        let desc = self.formats.describe(input.format);
        debug!(
            "crop: reconfigure {}x{} {} (align {}x{}, opaque {})",
            input.w, input.h, input.format, desc.align_x, desc.align_y, desc.opaque
        );

        let resolution = resolve(&self.request, input.w, input.h, &desc)?;
        let crop = resolution.crop;
        let output = input.with_size(crop.w, crop.h);

        debug!(
            "crop: {}x{}+{}+{} -> {}x{}",
            crop.w, crop.h, crop.x, crop.y, output.w, output.h
        );

        self.state = Some(Configured {
            crop,
            input: *input,
            output,
        });
        Ok(output)
    }

    /// Crop one frame with the current configuration.
    ///
    /// # Errors
    ///
    /// [`CropError::NotConfigured`] if no reconfiguration has succeeded.
    pub fn filter(&self, frame: VideoFrame) -> Result<VideoFrame, CropError> {
        let state = self.state.as_ref().ok_or(CropError::NotConfigured)?;
        Ok(apply_crop(&state.crop, frame))
    }

    /// Crop a frame the caller keeps ownership of.
    ///
    /// The frame must match the input of the last successful
    /// [`reconfigure`](Self::reconfigure); callers that take frames from an
    /// untrusted source check that first.
    ///
    /// # Errors
    ///
    /// [`CropError::NotConfigured`] if no reconfiguration has succeeded.
    pub fn filter_in_place<S: CropSurface>(&self, frame: &mut S) -> Result<(), CropError> {
        let state = self.state.as_ref().ok_or(CropError::NotConfigured)?;
        frame.apply_crop(&state.crop);
        Ok(())
    }

    /// Drop the current configuration.
    pub fn reset(&mut self) {
        self.state = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{FormatDesc, PixelFormat, PlaneDesc};
    use crate::frame::{CropSurface, HwSurface, PlaneFrame};

    #[test]
    fn test_reconfigure_centered() {
        let mut filter = CropFilter::new(CropRequest::from_sentinels(401, 301, -1, -1));
        let out = filter
            .reconfigure(&FrameParams::new(PixelFormat::Yuv420p, 800, 600))
            .unwrap();

        assert_eq!((out.w, out.h), (401, 301));
        assert_eq!(out.format, PixelFormat::Yuv420p);
        assert_eq!(
            filter.resolved(),
            Some(&ResolvedCrop {
                w: 401,
                h: 301,
                x: 198,
                y: 148
            })
        );
        assert_eq!(filter.output_params(), Some(&out));
    }

    #[test]
    fn test_failed_reconfigure_keeps_previous_state() {
        let mut filter = CropFilter::new(CropRequest::new().with_size(300, 50).with_origin(100, 0));
        filter
            .reconfigure(&FrameParams::new(PixelFormat::Rgb24, 640, 480))
            .unwrap();
        let before = *filter.resolved().unwrap();

        let err = filter
            .reconfigure(&FrameParams::new(PixelFormat::Rgb24, 320, 240))
            .unwrap_err();
        assert!(matches!(err, CropError::GeometryRejected { .. }));
        assert_eq!(filter.resolved(), Some(&before));
        assert_eq!(filter.input_params().unwrap().w, 640);
    }

    #[test]
    fn test_filter_before_configure_is_refused() {
        let filter = CropFilter::new(CropRequest::new());
        let frame = PlaneFrame::new(PixelFormat::Gray8, 16, 16).unwrap();
        assert_eq!(
            filter.filter(frame.into()),
            Err(CropError::NotConfigured)
        );
    }

    #[test]
    fn test_filter_after_failed_first_configure_is_refused() {
        let mut filter = CropFilter::new(CropRequest::new().with_size(300, 50).with_origin(100, 0));
        assert!(filter
            .reconfigure(&FrameParams::new(PixelFormat::Gray8, 320, 240))
            .is_err());

        let frame = PlaneFrame::new(PixelFormat::Gray8, 320, 240).unwrap();
        assert_eq!(
            filter.filter(frame.into()),
            Err(CropError::NotConfigured)
        );
    }

    #[test]
    fn test_filter_planar_frame() {
        let mut filter = CropFilter::new(CropRequest::new().with_size(32, 16).with_origin(8, 4));
        filter
            .reconfigure(&FrameParams::new(PixelFormat::Yuv420p, 64, 48))
            .unwrap();

        let frame = PlaneFrame::new(PixelFormat::Yuv420p, 64, 48).unwrap();
        let out = filter.filter(frame.into()).unwrap();
        assert_eq!(out.size(), (32, 16));
        assert_eq!(out.as_planar().unwrap().planes()[1].offset(), 2 * 32 + 4);
    }

    #[test]
    fn test_filter_hardware_frame() {
        let mut filter = CropFilter::new(CropRequest::new().with_size(1280, 720).with_origin(64, 64));
        filter
            .reconfigure(&FrameParams::new(PixelFormat::Vaapi, 1920, 1080))
            .unwrap();
        assert_eq!(filter.resolved().map(|c| (c.x, c.y)), Some((0, 0)));

        let surface = HwSurface::new(PixelFormat::Vaapi, 3, 1920, 1080).unwrap();
        let out = filter.filter(surface.into()).unwrap();
        assert_eq!(out.size(), (1280, 720));
        assert!(out.is_opaque());
    }

    #[test]
    fn test_format_queried_on_every_reconfigure() {
        use std::cell::Cell;

        static PLANE: [PlaneDesc; 1] = [PlaneDesc::new(1, 0, 0)];
        let calls = Cell::new(0);
        let query = |_: PixelFormat| {
            calls.set(calls.get() + 1);
            FormatDesc::packed(&PLANE, 8, 8)
        };

        let mut filter =
            CropFilter::with_formats(CropRequest::new().with_size(16, 16).with_origin(13, 13), query);
        filter
            .reconfigure(&FrameParams::new(PixelFormat::Gray8, 64, 64))
            .unwrap();
        filter
            .reconfigure(&FrameParams::new(PixelFormat::Gray8, 64, 64))
            .unwrap();

        assert_eq!(calls.get(), 2);
        assert_eq!(filter.resolved().map(|c| (c.x, c.y)), Some((8, 8)));
    }

    #[test]
    fn test_format_change_mid_stream() {
        let mut filter = CropFilter::new(CropRequest::new().with_size(100, 100).with_origin(11, 11));

        filter
            .reconfigure(&FrameParams::new(PixelFormat::Yuv444p, 640, 480))
            .unwrap();
        assert_eq!(filter.resolved().map(|c| (c.x, c.y)), Some((11, 11)));

        filter
            .reconfigure(&FrameParams::new(PixelFormat::Yuv410p, 640, 480))
            .unwrap();
        assert_eq!(filter.resolved().map(|c| (c.x, c.y)), Some((8, 8)));
    }

    #[test]
    fn test_from_options() {
        let opts = CropOptions {
            w: 100,
            ..CropOptions::default()
        };
        let filter = CropFilter::from_options(&opts).unwrap();
        assert_eq!(filter.request().w, Some(100));

        let bad = CropOptions {
            x: -3,
            ..CropOptions::default()
        };
        assert!(CropFilter::from_options(&bad).is_err());
    }

    #[test]
    fn test_filter_in_place() {
        let mut filter = CropFilter::new(CropRequest::new().with_size(8, 8));
        let mut frame = PlaneFrame::new(PixelFormat::Gray8, 16, 16).unwrap();
        assert_eq!(
            filter.filter_in_place(&mut frame),
            Err(CropError::NotConfigured)
        );
        assert_eq!(frame.size(), (16, 16));

        filter
            .reconfigure(&FrameParams::new(PixelFormat::Gray8, 16, 16))
            .unwrap();
        filter.filter_in_place(&mut frame).unwrap();
        assert_eq!(frame.size(), (8, 8));
        assert_eq!(frame.planes()[0].offset(), 4 * 16 + 4);
    }

    #[test]
    fn test_reset() {
        let mut filter = CropFilter::new(CropRequest::new());
        filter
            .reconfigure(&FrameParams::new(PixelFormat::Nv12, 64, 64))
            .unwrap();
        filter.reset();
        assert!(filter.resolved().is_none());
    }
}
