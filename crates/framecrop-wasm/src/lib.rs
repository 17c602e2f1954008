//! Framecrop WASM - WebAssembly bindings for Framecrop
//!
//! This crate provides WASM bindings to expose the framecrop-core
//! functionality to JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `filter` - Crop resolution and the crop stage
//! - `types` - WASM-compatible wrapper types for video frames
//! - `logger` - Console backend for the `log` facade
//! - `error` - Error conversion to `JsValue`
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsCropFilter, JsVideoFrame, set_log_level } from '@framecrop/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//! set_log_level("debug");
//!
//! const crop = new JsCropFilter({ w: 1280, h: 720 });
//! crop.reconfigure("yuv420p", 1920, 1080);
//! ```

use wasm_bindgen::prelude::*;

mod error;
mod filter;
mod logger;
mod types;

// Re-export public types
pub use error::BindingError;
pub use filter::{resolve_crop, JsCropFilter};
pub use logger::set_log_level;
pub use types::JsVideoFrame;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logger::install(log::LevelFilter::Warn);
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Names of all pixel formats the bindings accept.
#[wasm_bindgen]
pub fn pixel_formats() -> Vec<String> {
    framecrop_core::PixelFormat::ALL
        .iter()
        .map(|f| f.name().to_string())
        .collect()
}
