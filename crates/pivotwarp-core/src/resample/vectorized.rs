//! Lane-parallel nearest-neighbor resampler.
//!
//! Each row is processed in chunks of [`LANES`] pixels. For a chunk the
//! source coordinates of all lanes are computed with fused multiply-adds,
//! truncated, and bounds-tested together, giving a lane mask that selects
//! between the sampled color and the fill color.
//!
//! Rows whose width is not a multiple of [`LANES`] re-anchor their last
//! chunk at `width - LANES`, overlapping the previous one. The overlapping
//! lanes compute identical values, so no scalar tail loop is needed, but the
//! image must be at least [`LANES`] pixels wide.
//!
//! On x86_64 the FMA instruction set is detected at runtime and used when
//! present; otherwise the portable kernel runs the same lane arithmetic on
//! plain arrays.

#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::{
    __m128i, _mm_and_si128, _mm_castsi128_ps, _mm_cmpgt_epi32, _mm_cvtepi32_ps,
    _mm_cvttps_epi32, _mm_fmadd_ps, _mm_movemask_ps, _mm_set1_epi32, _mm_set1_ps,
    _mm_setr_epi32, _mm_setzero_si128, _mm_storeu_si128,
};

use super::{copy_or_fill, in_bounds, LANES};
use crate::buffer::{ImageMut, ImageRef, CHANNELS};
use crate::matrix::InverseMatrix;

/// Lane kernel implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaneKernel {
    /// Plain Rust lane arithmetic using `f32::mul_add`.
    Portable,
    /// SSE2 + FMA3 intrinsics.
    #[cfg(target_arch = "x86_64")]
    Fma,
}

impl LaneKernel {
    /// Pick the fastest kernel the running CPU supports.
    pub fn detect() -> Self {
        #[cfg(target_arch = "x86_64")]
        {
            if std::arch::is_x86_feature_detected!("fma") {
                return LaneKernel::Fma;
            }
        }
        LaneKernel::Portable
    }

    pub fn name(self) -> &'static str {
        match self {
            LaneKernel::Portable => "portable",
            #[cfg(target_arch = "x86_64")]
            LaneKernel::Fma => "fma",
        }
    }
}

/// Sample coordinates and in-bounds mask for one chunk of lanes.
#[derive(Debug, Default, Clone, Copy)]
struct LaneBlock {
    sx: [i32; LANES],
    sy: [i32; LANES],
    /// Bit `i` is set when lane `i` samples inside the source.
    mask: u32,
}

/// Start column of every chunk in a row of `width` pixels.
fn chunk_starts(width: usize) -> impl Iterator<Item = usize> {
    let last = width - LANES;
    (0..width)
        .step_by(LANES)
        .map(move |x0| x0.min(last))
}

/// Resample `src` into `dst` with the kernel picked by [`LaneKernel::detect`].
///
/// Output is byte-identical to [`super::reference::resample`].
///
/// # Panics
///
/// Panics if the image is narrower than [`LANES`] pixels or if `src` and
/// `dst` have different dimensions. Callers check the width first; see
/// [`crate::transform`].
pub fn resample(src: &ImageRef<'_>, dst: &mut ImageMut<'_>, matrix: &InverseMatrix) {
    resample_with(LaneKernel::detect(), src, dst, matrix);
}

/// Resample with an explicit kernel.
///
/// # Panics
///
/// Same conditions as [`resample`]. Also panics if `kernel` is not supported
/// by the running CPU.
pub fn resample_with(
    kernel: LaneKernel,
    src: &ImageRef<'_>,
    dst: &mut ImageMut<'_>,
    matrix: &InverseMatrix,
) {
    assert_eq!(
        (src.width(), src.height()),
        (dst.width(), dst.height()),
        "source and destination dimensions differ"
    );
    assert!(
        src.width() as usize >= LANES,
        "image width {} is below the lane width {}",
        src.width(),
        LANES
    );

    match kernel {
        LaneKernel::Portable => run(src, dst, |x0, y| portable_block(matrix, src, x0, y)),
        #[cfg(target_arch = "x86_64")]
        LaneKernel::Fma => {
            assert!(
                std::arch::is_x86_feature_detected!("fma"),
                "FMA kernel requested on a CPU without FMA"
            );
            // SAFETY: FMA support was checked above; SSE2 is baseline on x86_64.
            run(src, dst, |x0, y| unsafe { fma_block(matrix, src, x0, y) })
        }
    }
}

/// Drive `block` over every chunk of every row and write the lanes.
#[inline(always)]
fn run<F>(src: &ImageRef<'_>, dst: &mut ImageMut<'_>, mut block: F)
where
    F: FnMut(usize, u32) -> LaneBlock,
{
    let width = dst.width() as usize;
    for (y, row) in dst.rows_mut() {
        for x0 in chunk_starts(width) {
            let lanes = block(x0, y);
            let chunk = &mut row[x0 * CHANNELS..(x0 + LANES) * CHANNELS];
            for (i, out) in chunk.chunks_exact_mut(CHANNELS).enumerate() {
                let sample = (lanes.mask & (1 << i) != 0).then_some((lanes.sx[i], lanes.sy[i]));
                copy_or_fill(src, sample, out);
            }
        }
    }
}

#[inline(always)]
fn portable_block(matrix: &InverseMatrix, src: &ImageRef<'_>, x0: usize, y: u32) -> LaneBlock {
    let [a, b, tx, c, d, ty] = *matrix.coeffs();
    let (width, height) = (src.width() as i32, src.height() as i32);
    let yf = y as f32;
    let row_u = b.mul_add(yf, tx);
    let row_v = d.mul_add(yf, ty);

    let mut block = LaneBlock::default();
    for i in 0..LANES {
        let xf = (x0 + i) as f32;
        block.sx[i] = a.mul_add(xf, row_u) as i32;
        block.sy[i] = c.mul_add(xf, row_v) as i32;
    }
    for i in 0..LANES {
        if in_bounds(block.sx[i], block.sy[i], width, height) {
            block.mask |= 1 << i;
        }
    }
    block
}

#[cfg(target_arch = "x86_64")]
const _: () = assert!(LANES == 4, "the FMA kernel works on 4 x f32 registers");

/// # Safety
///
/// The CPU must support FMA.
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "fma")]
#[inline]
unsafe fn fma_block(matrix: &InverseMatrix, src: &ImageRef<'_>, x0: usize, y: u32) -> LaneBlock {
    let [a, b, tx, c, d, ty] = *matrix.coeffs();
    let yf = _mm_set1_ps(y as f32);
    let row_u = _mm_fmadd_ps(_mm_set1_ps(b), yf, _mm_set1_ps(tx));
    let row_v = _mm_fmadd_ps(_mm_set1_ps(d), yf, _mm_set1_ps(ty));

    let x0 = x0 as i32;
    let xs = _mm_cvtepi32_ps(_mm_setr_epi32(x0, x0 + 1, x0 + 2, x0 + 3));
    let sx = _mm_cvttps_epi32(_mm_fmadd_ps(_mm_set1_ps(a), xs, row_u));
    let sy = _mm_cvttps_epi32(_mm_fmadd_ps(_mm_set1_ps(c), xs, row_v));

    // 0 < sx < width && 0 < sy < height
    let zero = _mm_setzero_si128();
    let width = _mm_set1_epi32(src.width() as i32);
    let height = _mm_set1_epi32(src.height() as i32);
    let inside_x = _mm_and_si128(_mm_cmpgt_epi32(sx, zero), _mm_cmpgt_epi32(width, sx));
    let inside_y = _mm_and_si128(_mm_cmpgt_epi32(sy, zero), _mm_cmpgt_epi32(height, sy));
    let mask = _mm_movemask_ps(_mm_castsi128_ps(_mm_and_si128(inside_x, inside_y))) as u32;

    let mut block = LaneBlock {
        mask,
        ..LaneBlock::default()
    };
    _mm_storeu_si128(block.sx.as_mut_ptr().cast::<__m128i>(), sx);
    _mm_storeu_si128(block.sy.as_mut_ptr().cast::<__m128i>(), sy);
    block
}
