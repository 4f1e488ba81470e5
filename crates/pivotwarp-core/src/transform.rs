//! Transform entry points: parameters in, resampled destination out.
//!
//! A transform runs in three steps:
//!
//! 1. Obtain [`TransformParams`] (parsed from arguments or built directly)
//!    and validate them.
//! 2. Compile them into an [`InverseMatrix`] for the image dimensions.
//! 3. Resample the source into the destination.
//!
//! Every check happens before the destination is written, so a failed
//! transform leaves the destination exactly as it was.

use tracing::{debug, warn};

use crate::buffer::{ImageMut, ImageRef};
use crate::error::WarpError;
use crate::matrix::InverseMatrix;
use crate::params::{TransformParams, USAGE};
use crate::resample::{self, LaneKernel, ResampleStrategy};

/// Rotate and scale `src` into `dst` according to `params`.
///
/// # Errors
///
/// - `WarpError::InvalidScale` / `WarpError::InvalidParams` for parameters
///   that do not produce a usable matrix
/// - `WarpError::DimensionMismatch` if the views differ in size
/// - `WarpError::TooNarrow` if `strategy` is vectorized and the image is
///   narrower than [`resample::LANES`]
pub fn transform(
    src: &ImageRef<'_>,
    dst: &mut ImageMut<'_>,
    params: &TransformParams,
    strategy: ResampleStrategy,
) -> Result<(), WarpError> {
    if let Err(err) = params.validate().and_then(|()| strategy.check(src, dst)) {
        warn!(%err, "transform rejected");
        return Err(err);
    }

    let matrix = InverseMatrix::compile(params, src.width(), src.height());
    debug!(
        width = src.width(),
        height = src.height(),
        ?params,
        coeffs = ?matrix.coeffs(),
        ?strategy,
        kernel = LaneKernel::detect().name(),
        "compiled inverse matrix"
    );

    resample::resample(strategy, src, dst, &matrix)
}

/// Parse `args` and transform `src` into `dst` with the vectorized resampler.
///
/// `args` holds the transform flags only (see [`TransformParams::from_args`]).
/// A parse failure is reported with the usage line and leaves `dst` untouched.
pub fn transform_with_args<I, S>(
    src: &ImageRef<'_>,
    dst: &mut ImageMut<'_>,
    args: I,
) -> Result<(), WarpError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let params = match TransformParams::from_args(args) {
        Ok(params) => params,
        Err(err) => {
            warn!(%err, usage = USAGE, "wrong arguments");
            return Err(err.into());
        }
    };
    transform(src, dst, &params, ResampleStrategy::default())
}
