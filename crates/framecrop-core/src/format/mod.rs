//! Pixel format descriptions.
//!
//! The crop geometry only needs three facts about a format: whether frames of
//! that format are opaque hardware surfaces, the alignment a crop origin must
//! respect, and (for the per-frame cropper) how each plane is laid out.
//!
//! # Alignment
//!
//! For planar and semi-planar formats the alignment is derived from the
//! largest chroma shift across planes: `(1 << xs, 1 << ys)`. Packed 4:2:2
//! formats carry two luma samples per macropixel and align to 2 horizontally.
//! Opaque formats always report `(1, 1)`; offsets are meaningless for them.
//!
//! # Querying
//!
//! Stages look formats up through [`FormatQuery`] on every reconfiguration,
//! since a long-running pipeline may renegotiate its format mid-stream.
//! [`BuiltinFormats`] answers from the table in this module; any
//! `Fn(PixelFormat) -> FormatDesc` can stand in for it.

mod pixel;

pub use pixel::{FormatError, PixelFormat};

/// Layout of one plane of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaneDesc {
    /// Bytes occupied by one sample position in this plane.
    pub bytes_per_pixel: u8,
    /// Horizontal subsampling as a right shift of the luma x coordinate.
    pub xs: u8,
    /// Vertical subsampling as a right shift of the luma y coordinate.
    pub ys: u8,
}

impl PlaneDesc {
    pub const fn new(bytes_per_pixel: u8, xs: u8, ys: u8) -> Self {
        Self {
            bytes_per_pixel,
            xs,
            ys,
        }
    }

    /// Width of this plane in samples for a frame `width` luma pixels wide.
    #[inline]
    pub fn plane_width(&self, width: u32) -> u32 {
        shift_ceil(width, self.xs)
    }

    /// Height of this plane in rows for a frame `height` luma pixels tall.
    #[inline]
    pub fn plane_height(&self, height: u32) -> u32 {
        shift_ceil(height, self.ys)
    }
}

/// Derived properties of a pixel format consumed by the cropper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatDesc {
    /// Horizontal boundary a crop origin must fall on.
    pub align_x: u32,
    /// Vertical boundary a crop origin must fall on.
    pub align_y: u32,
    /// Hardware-backed surface with no addressable planes.
    pub opaque: bool,
    /// Plane layout, empty for opaque formats.
    pub planes: &'static [PlaneDesc],
}

impl FormatDesc {
    /// Descriptor for an opaque hardware surface format.
    pub const OPAQUE: FormatDesc = FormatDesc {
        align_x: 1,
        align_y: 1,
        opaque: true,
        planes: &[],
    };

    /// Build a descriptor for a (semi-)planar format, deriving the alignment
    /// from the largest chroma shift.
    pub fn planar(planes: &'static [PlaneDesc]) -> Self {
        let xs = planes.iter().map(|p| p.xs).max().unwrap_or(0);
        let ys = planes.iter().map(|p| p.ys).max().unwrap_or(0);
        Self {
            align_x: 1 << xs,
            align_y: 1 << ys,
            opaque: false,
            planes,
        }
    }

    /// Build a descriptor with an explicit alignment, for packed formats
    /// whose macropixels span more than one luma sample.
    pub fn packed(planes: &'static [PlaneDesc], align_x: u32, align_y: u32) -> Self {
        Self {
            align_x: align_x.max(1),
            align_y: align_y.max(1),
            opaque: false,
            planes,
        }
    }

    /// Alignment as an `(x, y)` pair.
    #[inline]
    pub fn alignment(&self) -> (u32, u32) {
        (self.align_x, self.align_y)
    }

    #[inline]
    pub fn is_opaque(&self) -> bool {
        self.opaque
    }

    #[inline]
    pub fn num_planes(&self) -> usize {
        self.planes.len()
    }
}

/// Source of format descriptions.
pub trait FormatQuery {
    fn describe(&self, format: PixelFormat) -> FormatDesc;
}

/// The built-in format table.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinFormats;

impl FormatQuery for BuiltinFormats {
    fn describe(&self, format: PixelFormat) -> FormatDesc {
        format.describe()
    }
}

impl<F> FormatQuery for F
where
    F: Fn(PixelFormat) -> FormatDesc,
{
    fn describe(&self, format: PixelFormat) -> FormatDesc {
        self(format)
    }
}

#[inline]
fn shift_ceil(value: u32, shift: u8) -> u32 {
    if shift == 0 {
        value
    } else {
        let round = (1u32 << shift) - 1;
        value.saturating_add(round) >> shift
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static YUV420: [PlaneDesc; 3] = [
        PlaneDesc::new(1, 0, 0),
        PlaneDesc::new(1, 1, 1),
        PlaneDesc::new(1, 1, 1),
    ];

    #[test]
    fn test_planar_alignment_from_shifts() {
        let desc = FormatDesc::planar(&YUV420);
        assert_eq!(desc.alignment(), (2, 2));
        assert!(!desc.is_opaque());
        assert_eq!(desc.num_planes(), 3);
    }

    #[test]
    fn test_opaque_descriptor() {
        let desc = FormatDesc::OPAQUE;
        assert!(desc.is_opaque());
        assert_eq!(desc.alignment(), (1, 1));
        assert_eq!(desc.num_planes(), 0);
    }

    #[test]
    fn test_packed_alignment_never_zero() {
        let desc = FormatDesc::packed(&YUV420[..1], 0, 0);
        assert_eq!(desc.alignment(), (1, 1));
    }

    #[test]
    fn test_plane_dimensions_round_up() {
        let chroma = PlaneDesc::new(1, 1, 1);
        assert_eq!(chroma.plane_width(641), 321);
        assert_eq!(chroma.plane_height(480), 240);

        let luma = PlaneDesc::new(1, 0, 0);
        assert_eq!(luma.plane_width(641), 641);
    }

    #[test]
    fn test_closure_as_query() {
        let query = |_: PixelFormat| FormatDesc::packed(&YUV420[..1], 4, 8);
        let desc = query.describe(PixelFormat::Rgb24);
        assert_eq!(desc.alignment(), (4, 8));
    }

    #[test]
    fn test_builtin_query_matches_table() {
        let desc = BuiltinFormats.describe(PixelFormat::Nv12);
        assert_eq!(desc, PixelFormat::Nv12.describe());
    }
}
