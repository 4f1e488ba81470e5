//! Scalar nearest-neighbor resampler.
//!
//! This is the behavioral baseline: the lane kernels in
//! [`super::vectorized`] must produce byte-identical output.

use super::{copy_or_fill, in_bounds};
use crate::buffer::{ImageMut, ImageRef, CHANNELS};
use crate::matrix::InverseMatrix;

/// Resample `src` into `dst` through the inverse matrix, one pixel at a time.
///
/// Every destination pixel is written. Works for any width.
///
/// # Panics
///
/// Panics if `src` and `dst` have different dimensions.
pub fn resample(src: &ImageRef<'_>, dst: &mut ImageMut<'_>, matrix: &InverseMatrix) {
    assert_eq!(
        (src.width(), src.height()),
        (dst.width(), dst.height()),
        "source and destination dimensions differ"
    );
    let (width, height) = (src.width() as i32, src.height() as i32);

    for (y, row) in dst.rows_mut() {
        for (x, out) in row.chunks_exact_mut(CHANNELS).enumerate() {
            let (sx, sy) = matrix.sample_coords(x as u32, y);
            let sample = in_bounds(sx, sy, width, height).then_some((sx, sy));
            copy_or_fill(src, sample, out);
        }
    }
}
