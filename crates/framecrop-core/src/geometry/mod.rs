//! Crop geometry: requests, resolved rectangles and the resolver.
//!
//! # Coordinate System
//!
//! - All values are integer pixels in luma (full resolution) coordinates
//! - Origin is the top-left corner of the frame
//! - A rectangle `(w, h, x, y)` covers columns `x..x + w` and rows `y..y + h`

mod resolve;
mod types;

pub use resolve::resolve;
pub use types::{CropError, CropRequest, OriginAdjustment, Resolution, ResolvedCrop};
