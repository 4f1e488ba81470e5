//! pivotwarp WASM - WebAssembly bindings for pivotwarp
//!
//! This crate exposes the pivotwarp-core transform to JavaScript/TypeScript.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper type for RGB image data
//! - `transform` - Rotation/scale bindings
//!
//! # Usage
//!
//! ```typescript
//! import init, { transform_image, JsImage } from '@pivotwarp/wasm';
//!
//! await init();
//!
//! const image = new JsImage(width, height, rgbBytes);
//! const rotated = transform_image(image, ["-a", "30"]);
//! ```

use wasm_bindgen::prelude::*;

mod transform;
mod types;

pub use transform::{transform_image, transform_image_with};
pub use types::JsImage;

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Usage line for the argument form accepted by `transform_image`.
#[wasm_bindgen]
pub fn usage() -> String {
    pivotwarp_core::USAGE.to_string()
}

/// Minimum image width accepted by the default resampler.
#[wasm_bindgen]
pub fn min_width() -> u32 {
    pivotwarp_core::ResampleStrategy::default().min_width()
}
