//! Crop rectangle resolution.
//!
//! Turns a partially specified [`CropRequest`] into a [`ResolvedCrop`] for a
//! concrete frame size and pixel format. The steps always run in this order:
//!
//! 1. Unset or oversized width/height fall back to the frame dimension
//! 2. Unset offsets center the rectangle (integer division)
//! 3. The origin is rounded down to the format alignment, or forced to
//!    `(0, 0)` for opaque hardware formats
//! 4. The rectangle is checked against the frame bounds
//!
//! Nothing is clamped after alignment: a rectangle that no longer fits is
//! rejected as a whole.

use log::warn;

use super::types::{CropError, CropRequest, OriginAdjustment, Resolution, ResolvedCrop};
use crate::format::FormatDesc;

/// Resolve a crop request against a frame of `frame_w` x `frame_h` pixels.
///
/// # Arguments
///
/// * `request` - Requested rectangle; unset fields are filled in
/// * `frame_w` - Input frame width in pixels
/// * `frame_h` - Input frame height in pixels
/// * `format` - Descriptor of the input pixel format
///
/// # Returns
///
/// The resolved rectangle together with any alignment adjustment made to
/// its origin.
///
/// # Errors
///
/// Returns [`CropError::GeometryRejected`] when the aligned rectangle does
/// not fit within the frame.
///
/// # Logging
///
/// An origin adjustment is logged at warning level even when the bounds
/// check fails afterwards, and so is the rejection itself.
pub fn resolve(
    request: &CropRequest,
    frame_w: u32,
    frame_h: u32,
    format: &FormatDesc,
) -> Result<Resolution, CropError> {
    let w = fill_size(request.w, frame_w);
    let h = fill_size(request.h, frame_h);

    // w <= frame_w and h <= frame_h after filling
    let requested = (
        request.x.unwrap_or((frame_w - w) / 2),
        request.y.unwrap_or((frame_h - h) / 2),
    );

    let applied = if format.is_opaque() {
        (0, 0)
    } else {
        (
            align_down(requested.0, format.align_x),
            align_down(requested.1, format.align_y),
        )
    };

    let adjustment = (applied != requested).then_some(OriginAdjustment { requested, applied });
    if adjustment.is_some() {
        warn!(
            "Adjusting crop origin to {}/{} for pixel format alignment.",
            applied.0, applied.1
        );
    }

    let crop = ResolvedCrop {
        w,
        h,
        x: applied.0,
        y: applied.1,
    };

    if !crop.fits(frame_w, frame_h) {
        warn!(
            "Bad position/width/height - cropped area {}x{}+{}+{} outside of the original {}x{}!",
            crop.w, crop.h, crop.x, crop.y, frame_w, frame_h
        );
        return Err(CropError::GeometryRejected {
            w: crop.w,
            h: crop.h,
            x: crop.x,
            y: crop.y,
            frame_w,
            frame_h,
        });
    }

    Ok(Resolution { crop, adjustment })
}

/// Requested size if set and within the frame, otherwise the frame size.
#[inline]
fn fill_size(requested: Option<u32>, frame: u32) -> u32 {
    match requested {
        Some(v) if v > 0 && v <= frame => v,
        _ => frame,
    }
}

/// Round `value` down to a multiple of `align`.
#[inline]
fn align_down(value: u32, align: u32) -> u32 {
    let align = align.max(1);
    value - value % align
}


/// Checks on the warnings `resolve` emits through the `log` facade.
#[cfg(test)]
mod log_tests {
    use super::*;
    use crate::format::PlaneDesc;
    use log::{Level, Log, Metadata, Record};
    use std::cell::RefCell;
    use std::sync::Once;

    static PLANE: [PlaneDesc; 1] = [PlaneDesc::new(1, 0, 0)];

    thread_local! {
        static RECORDS: RefCell<Vec<(Level, String)>> = const { RefCell::new(Vec::new()) };
    }

    /// Keeps records per thread so parallel tests do not see each other.
    struct CaptureLogger;

    impl Log for CaptureLogger {
        fn enabled(&self, _: &Metadata) -> bool {
            true
        }

        fn log(&self, record: &Record) {
            RECORDS.with(|r| {
                r.borrow_mut()
                    .push((record.level(), record.args().to_string()))
            });
        }

        fn flush(&self) {}
    }

    static LOGGER: CaptureLogger = CaptureLogger;
    static INSTALL: Once = Once::new();

    fn capture() {
        INSTALL.call_once(|| {
            log::set_logger(&LOGGER).unwrap();
            log::set_max_level(log::LevelFilter::Trace);
        });
        RECORDS.with(|r| r.borrow_mut().clear());
    }

    fn warnings() -> Vec<String> {
        RECORDS.with(|r| {
            r.borrow()
                .iter()
                .filter(|(level, _)| *level == Level::Warn)
                .map(|(_, msg)| msg.clone())
                .collect()
        })
    }

    #[test]
    fn test_adjustment_logs_one_warning() {
        capture();
        let req = CropRequest::from_sentinels(401, 301, -1, -1);
        resolve(&req, 800, 600, &FormatDesc::packed(&PLANE, 2, 2)).unwrap();

        assert_eq!(
            warnings(),
            vec!["Adjusting crop origin to 198/148 for pixel format alignment.".to_string()]
        );
    }

    #[test]
    fn test_rejection_logs_adjustment_then_bounds() {
        capture();
        let req = CropRequest::new().with_size(300, 50).with_origin(101, 0);
        assert!(resolve(&req, 320, 240, &FormatDesc::packed(&PLANE, 2, 1)).is_err());

        assert_eq!(
            warnings(),
            vec![
                "Adjusting crop origin to 100/0 for pixel format alignment.".to_string(),
                "Bad position/width/height - cropped area 300x50+100+0 outside of the original 320x240!"
                    .to_string(),
            ]
        );
    }

    #[test]
    fn test_plain_rejection_logs_only_bounds() {
        capture();
        let req = CropRequest::from_sentinels(300, 50, 100, 0);
        assert!(resolve(&req, 320, 240, &FormatDesc::packed(&PLANE, 1, 1)).is_err());

        let logged = warnings();
        assert_eq!(logged.len(), 1);
        assert!(logged[0].starts_with("Bad position/width/height"));
    }

    #[test]
    fn test_identity_logs_nothing() {
        capture();
        resolve(&CropRequest::new(), 640, 480, &FormatDesc::packed(&PLANE, 2, 2)).unwrap();
        resolve(&CropRequest::new(), 640, 480, &FormatDesc::OPAQUE).unwrap();
        assert!(warnings().is_empty());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
