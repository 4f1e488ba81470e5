//! Nearest-neighbor resampling through an inverse affine matrix.
//!
//! Two variants share one contract:
//!
//! - [`reference`]: one pixel at a time, any width.
//! - [`vectorized`]: [`LANES`] pixels at a time, width >= [`LANES`].
//!
//! Both write every destination pixel and produce identical bytes.
//!
//! # Sampling rule
//!
//! Destination pixel (x, y) reads source pixel `(sx, sy)`, the truncated
//! result of mapping (x, y) through the matrix, when
//! `0 < sx < width` and `0 < sy < height`. Otherwise it gets [`FILL_COLOR`].
//!
//! The lower bound is strict: column 0 and row 0 of the source are never
//! sampled. Existing outputs depend on this, so it is kept as is.

pub mod reference;
pub mod vectorized;

pub use vectorized::LaneKernel;

use crate::buffer::{ImageMut, ImageRef, CHANNELS};
use crate::error::WarpError;
use crate::matrix::InverseMatrix;

/// Pixels per lane chunk, and the minimum width of the vectorized path.
pub const LANES: usize = 4;

/// Color written where the source is not sampled.
pub const FILL_COLOR: [u8; 3] = [0, 0, 0];

/// Which resampler to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResampleStrategy {
    /// Scalar per-pixel loop. No width requirement.
    Reference,
    /// Lane kernel, best available for the running CPU. Needs width >= [`LANES`].
    #[default]
    Vectorized,
}

impl ResampleStrategy {
    /// Smallest image width this strategy accepts.
    pub fn min_width(self) -> u32 {
        match self {
            ResampleStrategy::Reference => 1,
            ResampleStrategy::Vectorized => LANES as u32,
        }
    }

    /// Check the preconditions of this strategy for `src` and `dst`.
    pub fn check(self, src: &ImageRef<'_>, dst: &ImageMut<'_>) -> Result<(), WarpError> {
        if (src.width(), src.height()) != (dst.width(), dst.height()) {
            return Err(WarpError::DimensionMismatch {
                src_width: src.width(),
                src_height: src.height(),
                dst_width: dst.width(),
                dst_height: dst.height(),
            });
        }
        if src.width() < self.min_width() {
            return Err(WarpError::TooNarrow {
                width: src.width(),
                min_width: self.min_width(),
            });
        }
        Ok(())
    }
}

/// Resample `src` into `dst` with the chosen strategy.
///
/// Preconditions are checked before any pixel is written, so on error `dst`
/// is untouched.
pub fn resample(
    strategy: ResampleStrategy,
    src: &ImageRef<'_>,
    dst: &mut ImageMut<'_>,
    matrix: &InverseMatrix,
) -> Result<(), WarpError> {
    strategy.check(src, dst)?;
    match strategy {
        ResampleStrategy::Reference => reference::resample(src, dst, matrix),
        ResampleStrategy::Vectorized => vectorized::resample(src, dst, matrix),
    }
    Ok(())
}

/// The sampling bounds test, strict on both ends.
#[inline(always)]
pub(crate) fn in_bounds(sx: i32, sy: i32, width: i32, height: i32) -> bool {
    sx > 0 && sx < width && sy > 0 && sy < height
}

/// Write the source pixel at `sample`, or the fill color when `None`.
///
/// `sample` must already have passed [`in_bounds`].
#[inline(always)]
pub(crate) fn copy_or_fill(src: &ImageRef<'_>, sample: Option<(i32, i32)>, out: &mut [u8]) {
    match sample {
        Some((sx, sy)) => {
            let idx = (sy as usize * src.width() as usize + sx as usize) * CHANNELS;
            out.copy_from_slice(&src.pixels()[idx..idx + CHANNELS]);
        }
        None => out.copy_from_slice(&FILL_COLOR),
    }
}
