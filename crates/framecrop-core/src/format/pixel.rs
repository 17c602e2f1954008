//! Built-in pixel format table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{FormatDesc, PlaneDesc};

/// Errors raised while naming pixel formats.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    /// The name does not match any known pixel format.
    #[error("Unknown pixel format: {0}")]
    UnknownFormat(String),
}

/// Pixel formats known to the built-in table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PixelFormat {
    /// Planar YUV 4:2:0, 8-bit.
    Yuv420p,
    /// Planar YUV 4:2:2, 8-bit.
    Yuv422p,
    /// Planar YUV 4:4:4, 8-bit.
    Yuv444p,
    /// Planar YUV 4:1:0, 8-bit.
    Yuv410p,
    /// Planar YUV 4:1:1, 8-bit.
    Yuv411p,
    /// Planar YUV 4:4:0, 8-bit.
    Yuv440p,
    /// Planar YUV 4:2:0, 10-bit in 16-bit words.
    Yuv420p10,
    /// Semi-planar 4:2:0, interleaved UV.
    Nv12,
    /// Semi-planar 4:2:0, interleaved VU.
    Nv21,
    /// Semi-planar 4:2:0, 10-bit in 16-bit words.
    P010,
    /// Packed YUV 4:2:2, Y0 U Y1 V.
    Yuyv422,
    /// Packed YUV 4:2:2, U Y0 V Y1.
    Uyvy422,
    /// Packed RGB, 8 bits per channel.
    Rgb24,
    /// Packed BGR, 8 bits per channel.
    Bgr24,
    /// Packed RGBA, 8 bits per channel.
    Rgba,
    /// Packed BGRA, 8 bits per channel.
    Bgra,
    /// Packed BGR with a padding byte.
    Bgr0,
    /// Single-plane 8-bit luma.
    Gray8,
    /// Single-plane 16-bit luma.
    Gray16,
    /// VA-API surface.
    Vaapi,
    /// VDPAU surface.
    Vdpau,
    /// VideoToolbox pixel buffer.
    VideoToolbox,
    /// Direct3D 11 texture.
    D3d11,
    /// CUDA device memory.
    Cuda,
    /// DRM PRIME buffer descriptor.
    DrmPrime,
}

const YUV420P_PLANES: &[PlaneDesc] = &[
    PlaneDesc::new(1, 0, 0),
    PlaneDesc::new(1, 1, 1),
    PlaneDesc::new(1, 1, 1),
];
const YUV422P_PLANES: &[PlaneDesc] = &[
    PlaneDesc::new(1, 0, 0),
    PlaneDesc::new(1, 1, 0),
    PlaneDesc::new(1, 1, 0),
];
const YUV444P_PLANES: &[PlaneDesc] = &[
    PlaneDesc::new(1, 0, 0),
    PlaneDesc::new(1, 0, 0),
    PlaneDesc::new(1, 0, 0),
];
const YUV410P_PLANES: &[PlaneDesc] = &[
    PlaneDesc::new(1, 0, 0),
    PlaneDesc::new(1, 2, 2),
    PlaneDesc::new(1, 2, 2),
];
const YUV411P_PLANES: &[PlaneDesc] = &[
    PlaneDesc::new(1, 0, 0),
    PlaneDesc::new(1, 2, 0),
    PlaneDesc::new(1, 2, 0),
];
const YUV440P_PLANES: &[PlaneDesc] = &[
    PlaneDesc::new(1, 0, 0),
    PlaneDesc::new(1, 0, 1),
    PlaneDesc::new(1, 0, 1),
];
const YUV420P10_PLANES: &[PlaneDesc] = &[
    PlaneDesc::new(2, 0, 0),
    PlaneDesc::new(2, 1, 1),
    PlaneDesc::new(2, 1, 1),
];
const NV12_PLANES: &[PlaneDesc] = &[PlaneDesc::new(1, 0, 0), PlaneDesc::new(2, 1, 1)];
const P010_PLANES: &[PlaneDesc] = &[PlaneDesc::new(2, 0, 0), PlaneDesc::new(4, 1, 1)];
const PACKED_2_PLANES: &[PlaneDesc] = &[PlaneDesc::new(2, 0, 0)];
const PACKED_3_PLANES: &[PlaneDesc] = &[PlaneDesc::new(3, 0, 0)];
const PACKED_4_PLANES: &[PlaneDesc] = &[PlaneDesc::new(4, 0, 0)];
const GRAY8_PLANES: &[PlaneDesc] = &[PlaneDesc::new(1, 0, 0)];

impl PixelFormat {
    /// Every format in the built-in table.
    pub const ALL: [PixelFormat; 25] = [
        PixelFormat::Yuv420p,
        PixelFormat::Yuv422p,
        PixelFormat::Yuv444p,
        PixelFormat::Yuv410p,
        PixelFormat::Yuv411p,
        PixelFormat::Yuv440p,
        PixelFormat::Yuv420p10,
        PixelFormat::Nv12,
        PixelFormat::Nv21,
        PixelFormat::P010,
        PixelFormat::Yuyv422,
        PixelFormat::Uyvy422,
        PixelFormat::Rgb24,
        PixelFormat::Bgr24,
        PixelFormat::Rgba,
        PixelFormat::Bgra,
        PixelFormat::Bgr0,
        PixelFormat::Gray8,
        PixelFormat::Gray16,
        PixelFormat::Vaapi,
        PixelFormat::Vdpau,
        PixelFormat::VideoToolbox,
        PixelFormat::D3d11,
        PixelFormat::Cuda,
        PixelFormat::DrmPrime,
    ];

    /// Look up the descriptor for this format.
    pub fn describe(self) -> FormatDesc {
        use PixelFormat::*;
        match self {
            Yuv420p => FormatDesc::planar(YUV420P_PLANES),
            Yuv422p => FormatDesc::planar(YUV422P_PLANES),
            Yuv444p => FormatDesc::planar(YUV444P_PLANES),
            Yuv410p => FormatDesc::planar(YUV410P_PLANES),
            Yuv411p => FormatDesc::planar(YUV411P_PLANES),
            Yuv440p => FormatDesc::planar(YUV440P_PLANES),
            Yuv420p10 => FormatDesc::planar(YUV420P10_PLANES),
            Nv12 | Nv21 => FormatDesc::planar(NV12_PLANES),
            P010 => FormatDesc::planar(P010_PLANES),
            Yuyv422 | Uyvy422 => FormatDesc::packed(PACKED_2_PLANES, 2, 1),
            Rgb24 | Bgr24 => FormatDesc::planar(PACKED_3_PLANES),
            Rgba | Bgra | Bgr0 => FormatDesc::planar(PACKED_4_PLANES),
            Gray8 => FormatDesc::planar(GRAY8_PLANES),
            Gray16 => FormatDesc::planar(PACKED_2_PLANES),
            Vaapi | Vdpau | VideoToolbox | D3d11 | Cuda | DrmPrime => FormatDesc::OPAQUE,
        }
    }

    /// Whether frames of this format are hardware surfaces.
    #[inline]
    pub fn is_hardware(self) -> bool {
        self.describe().is_opaque()
    }

    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        use PixelFormat::*;
        match self {
            Yuv420p => "yuv420p",
            Yuv422p => "yuv422p",
            Yuv444p => "yuv444p",
            Yuv410p => "yuv410p",
            Yuv411p => "yuv411p",
            Yuv440p => "yuv440p",
            Yuv420p10 => "yuv420p10",
            Nv12 => "nv12",
            Nv21 => "nv21",
            P010 => "p010",
            Yuyv422 => "yuyv422",
            Uyvy422 => "uyvy422",
            Rgb24 => "rgb24",
            Bgr24 => "bgr24",
            Rgba => "rgba",
            Bgra => "bgra",
            Bgr0 => "bgr0",
            Gray8 => "gray8",
            Gray16 => "gray16",
            Vaapi => "vaapi",
            Vdpau => "vdpau",
            VideoToolbox => "video_toolbox",
            D3d11 => "d3d11",
            Cuda => "cuda",
            DrmPrime => "drm_prime",
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PixelFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        // "gray" and "videotoolbox" are common spellings elsewhere
        let wanted = match wanted.as_str() {
            "gray" => "gray8",
            "videotoolbox" => "video_toolbox",
            other => other,
        };
        PixelFormat::ALL
            .iter()
            .copied()
            .find(|f| f.name() == wanted)
            .ok_or_else(|| FormatError::UnknownFormat(s.to_string()))
    }
}
