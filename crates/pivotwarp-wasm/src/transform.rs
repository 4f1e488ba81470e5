//! WASM bindings for the pivot transform.
//!
//! The JavaScript side owns no buffers: each call copies the source into
//! WASM memory, allocates the destination here, and returns it as a new
//! `JsImage`.

use crate::types::JsImage;
use pivotwarp_core::{
    transform, transform_with_args, ImageMut, ImageRef, PixelBuffer, ResampleStrategy,
    TransformParams, WarpError,
};
use wasm_bindgen::prelude::*;

/// Rotate and scale an image using command-line style arguments.
///
/// # Arguments
///
/// * `image` - Source image
/// * `args` - Transform flags, e.g. `["-a", "30", "-p", "0.5", "0.5"]`
///
/// # Example (TypeScript)
///
/// ```typescript
/// const rotated = transform_image(source, ["-angle", "45", "-scale", "0.8"]);
/// ```
#[wasm_bindgen]
pub fn transform_image(image: &JsImage, args: Vec<String>) -> Result<JsImage, JsValue> {
    warp(image, |src, dst| transform_with_args(src, dst, &args)).map_err(to_js_error)
}

/// Rotate and scale an image using a parameters object.
///
/// Missing fields take their defaults (`angle: 0`, `scale: 1`,
/// `pivot: { u: 0.5, v: 0.5 }`).
///
/// # Example (TypeScript)
///
/// ```typescript
/// const rotated = transform_image_with(source, { angle: 90, pivot: { u: 0, v: 0 } }, false);
/// ```
#[wasm_bindgen]
pub fn transform_image_with(
    image: &JsImage,
    params: JsValue,
    use_reference: bool,
) -> Result<JsImage, JsValue> {
    let params: TransformParams = serde_wasm_bindgen::from_value(params)
        .map_err(|e| JsValue::from_str(&format!("Invalid transform parameters: {}", e)))?;
    warp_params(image, &params, use_reference).map_err(to_js_error)
}

fn warp_params(
    image: &JsImage,
    params: &TransformParams,
    use_reference: bool,
) -> Result<JsImage, WarpError> {
    let strategy = if use_reference {
        ResampleStrategy::Reference
    } else {
        ResampleStrategy::Vectorized
    };
    warp(image, |src, dst| transform(src, dst, params, strategy))
}

/// Allocate a destination matching `image` and run `apply` into it.
fn warp<F>(image: &JsImage, apply: F) -> Result<JsImage, WarpError>
where
    F: FnOnce(&ImageRef<'_>, &mut ImageMut<'_>) -> Result<(), WarpError>,
{
    let src = image.view()?;
    let mut dst = PixelBuffer::blank(src.width(), src.height());
    apply(&src, &mut dst.view_mut()?)?;
    Ok(JsImage::from_buffer(dst))
}

fn to_js_error(err: WarpError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
