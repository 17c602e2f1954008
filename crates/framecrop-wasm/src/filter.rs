//! WASM bindings for crop resolution and the crop stage.
//!
//! Options cross the boundary as plain objects (`{ w, h, x, y }`), using the
//! same encoding as the core `CropOptions`: `0` leaves a size unset, `-1`
//! centers on that axis. Missing fields take those defaults.

use framecrop_core::{
    resolve, CropFilter, CropOptions, CropSurface, FrameParams, PixelFormat, ResolvedCrop,
};
use wasm_bindgen::prelude::*;

use crate::error::BindingError;
use crate::types::JsVideoFrame;

/// JavaScript-accessible crop stage.
///
/// # Example (TypeScript)
/// ```typescript
/// const crop = new JsCropFilter({ w: 1280, h: 720 });
/// const out = crop.reconfigure("nv12", 1920, 1080); // { format, w: 1280, h: 720, ... }
///
/// const frame = new JsVideoFrame("nv12", 1920, 1080);
/// crop.crop_frame(frame);
/// console.log(frame.width, frame.plane_offset(0));
/// ```
#[wasm_bindgen]
pub struct JsCropFilter {
    inner: CropFilter,
}

#[wasm_bindgen]
impl JsCropFilter {
    /// Create a crop stage from an options object.
    ///
    /// # Errors
    /// Returns error if the options cannot be deserialized or are out of range
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<JsCropFilter, JsValue> {
        let options = options_from_js(options)?;
        Ok(Self::from_options(&options)?)
    }

    /// Resolve the crop for a new input format and size.
    ///
    /// Returns the output frame parameters. On failure the previous
    /// configuration stays active.
    pub fn reconfigure(&mut self, format: &str, width: u32, height: u32) -> Result<JsValue, JsValue> {
        let output = self.reconfigure_params(format, width, height)?;
        serde_wasm_bindgen::to_value(&output).map_err(JsValue::from)
    }

    /// The active crop rectangle, or `undefined` before a successful
    /// reconfiguration.
    pub fn resolved(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.resolved()).map_err(JsValue::from)
    }

    /// Crop a frame in place with the active rectangle.
    ///
    /// The frame must have the format and size passed to the last
    /// successful `reconfigure`; a frame that was already cropped no longer
    /// does.
    pub fn crop_frame(&self, frame: &mut JsVideoFrame) -> Result<(), JsValue> {
        Ok(self.crop(frame)?)
    }
}

impl JsCropFilter {
    pub(crate) fn from_options(options: &CropOptions) -> Result<Self, BindingError> {
        Ok(Self {
            inner: CropFilter::from_options(options)?,
        })
    }

    pub(crate) fn reconfigure_params(
        &mut self,
        format: &str,
        width: u32,
        height: u32,
    ) -> Result<FrameParams, BindingError> {
        let format: PixelFormat = format.parse()?;
        Ok(self
            .inner
            .reconfigure(&FrameParams::new(format, width, height))?)
    }

    pub(crate) fn crop(&self, frame: &mut JsVideoFrame) -> Result<(), BindingError> {
        if let Some(input) = self.inner.input_params() {
            let got_format = frame.inner().format();
            let (got_w, got_h) = frame.inner().size();
            if (got_format, got_w, got_h) != (input.format, input.w, input.h) {
                return Err(BindingError::FrameMismatch {
                    expected_format: input.format,
                    expected_w: input.w,
                    expected_h: input.h,
                    got_format,
                    got_w,
                    got_h,
                });
            }
        }
        Ok(self.inner.filter_in_place(frame.inner_mut())?)
    }
}

/// Resolve a crop rectangle without creating a stage.
///
/// # Returns
///
/// `{ w, h, x, y }` for the resolved rectangle.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const rect = resolve_crop({ w: 401, h: 301 }, "yuv420p", 800, 600);
/// // { w: 401, h: 301, x: 198, y: 148 }
/// ```
#[wasm_bindgen]
pub fn resolve_crop(
    options: JsValue,
    format: &str,
    width: u32,
    height: u32,
) -> Result<JsValue, JsValue> {
    let options = options_from_js(options)?;
    let crop = resolve_rect(&options, format, width, height)?;
    serde_wasm_bindgen::to_value(&crop).map_err(JsValue::from)
}

pub(crate) fn resolve_rect(
    options: &CropOptions,
    format: &str,
    width: u32,
    height: u32,
) -> Result<ResolvedCrop, BindingError> {
    let request = options.to_request()?;
    let format: PixelFormat = format.parse()?;
    Ok(resolve(&request, width, height, &format.describe())?.crop)
}

fn options_from_js(options: JsValue) -> Result<CropOptions, JsValue> {
    if options.is_undefined() || options.is_null() {
        return Ok(CropOptions::default());
    }
    serde_wasm_bindgen::from_value(options)
        .map_err(|e| JsValue::from_str(&format!("Invalid crop options: {}", e)))
}


/// WASM-specific tests that require JsValue.
///
/// These tests pass options as `JsValue` and can only run on wasm32
/// targets. Use `wasm-pack test` to run these.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use serde::Serialize;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[derive(Serialize)]
    struct TestOptions {
        w: i32,
        h: i32,
    }

    #[wasm_bindgen_test]
    fn test_resolve_crop_from_js_options() {
        let opts = serde_wasm_bindgen::to_value(&TestOptions { w: 401, h: 301 }).unwrap();
        let value = resolve_crop(opts, "yuv420p", 800, 600).unwrap();
        let crop: ResolvedCrop = serde_wasm_bindgen::from_value(value).unwrap();
        assert_eq!((crop.x, crop.y), (198, 148));
    }

    #[wasm_bindgen_test]
    fn test_undefined_options_mean_identity() {
        let value = resolve_crop(JsValue::UNDEFINED, "nv12", 640, 480).unwrap();
        let crop: ResolvedCrop = serde_wasm_bindgen::from_value(value).unwrap();
        assert_eq!(
            crop,
            ResolvedCrop {
                w: 640,
                h: 480,
                x: 0,
                y: 0
            }
        );
    }

    #[wasm_bindgen_test]
    fn test_rejection_is_error() {
        let opts = serde_wasm_bindgen::to_value(&CropOptions {
            w: 300,
            h: 50,
            x: 100,
            y: 0,
        })
        .unwrap();
        assert!(resolve_crop(opts, "rgb24", 320, 240).is_err());
    }

    #[wasm_bindgen_test]
    fn test_stage_round_trip() {
        let opts = serde_wasm_bindgen::to_value(&TestOptions { w: 32, h: 16 }).unwrap();
        let mut filter = JsCropFilter::new(opts).unwrap();
        let out = filter.reconfigure("yuv420p", 64, 48).unwrap();
        let params: FrameParams = serde_wasm_bindgen::from_value(out).unwrap();
        assert_eq!((params.w, params.h), (32, 16));

        let mut frame = JsVideoFrame::new("yuv420p", 64, 48).unwrap();
        filter.crop_frame(&mut frame).unwrap();
        assert_eq!(frame.width(), 32);
    }
}
