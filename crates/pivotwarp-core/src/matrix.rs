//! Inverse affine matrix for rotation and scale about a pivot.
//!
//! The matrix maps destination pixel coordinates back to source coordinates,
//! so every output pixel is one independent backward lookup.
//!
//! For a forward transform that rotates by θ and scales by `s` about the
//! pivot `p`, the inverse rotates by -θ and scales by `1/s`:
//!
//! ```text
//! a = cos θ / s_u     b = sin θ / s_v     tx = p_u - a·p_u - b·p_v
//! c = -sin θ / s_u    d = cos θ / s_v     ty = -c·p_u + p_v - d·p_v
//!
//! src_x = a·x + b·y + tx
//! src_y = c·x + d·y + ty
//! ```

use crate::params::{TransformParams, Vec2};

/// 2x3 affine matrix `[a, b, tx, c, d, ty]` mapping destination to source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InverseMatrix {
    coeffs: [f32; 6],
}

impl Default for InverseMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl InverseMatrix {
    pub const fn identity() -> Self {
        Self {
            coeffs: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
        }
    }

    pub const fn from_coeffs(coeffs: [f32; 6]) -> Self {
        Self { coeffs }
    }

    /// Build the inverse matrix for `params` on a `width` x `height` image.
    ///
    /// The uniform scale is applied to both axes. `params` should have been
    /// checked with [`TransformParams::validate`]; a zero scale yields
    /// infinite coefficients.
    pub fn compile(params: &TransformParams, width: u32, height: u32) -> Self {
        Self::compile_inverse(
            params.angle,
            Vec2::splat(params.scale),
            params.pivot,
            width,
            height,
        )
    }

    /// Build the inverse matrix with independent per-axis scale.
    pub fn compile_inverse(
        angle_degrees: f32,
        scale: Vec2,
        pivot: Vec2,
        width: u32,
        height: u32,
    ) -> Self {
        let angle_rad = (angle_degrees as f64).to_radians() as f32;
        let (sin, cos) = angle_rad.sin_cos();

        let a = cos / scale.u;
        let b = sin / scale.v;
        let c = -sin / scale.u;
        let d = cos / scale.v;

        let u = pivot.u * width as f32;
        let v = pivot.v * height as f32;

        Self {
            coeffs: [a, b, u - a * u - b * v, c, d, -c * u + v - d * v],
        }
    }

    #[inline]
    pub fn coeffs(&self) -> &[f32; 6] {
        &self.coeffs
    }

    #[inline]
    pub fn a(&self) -> f32 {
        self.coeffs[0]
    }

    #[inline]
    pub fn b(&self) -> f32 {
        self.coeffs[1]
    }

    #[inline]
    pub fn tx(&self) -> f32 {
        self.coeffs[2]
    }

    #[inline]
    pub fn c(&self) -> f32 {
        self.coeffs[3]
    }

    #[inline]
    pub fn d(&self) -> f32 {
        self.coeffs[4]
    }

    #[inline]
    pub fn ty(&self) -> f32 {
        self.coeffs[5]
    }

    /// Map a destination point to source space.
    ///
    /// Evaluated as `a·x + (b·y + tx)` with fused multiply-adds, the same
    /// rounding the lane kernels use.
    #[inline]
    pub fn map(&self, x: f32, y: f32) -> (f32, f32) {
        let [a, b, tx, c, d, ty] = self.coeffs;
        (a.mul_add(x, b.mul_add(y, tx)), c.mul_add(x, d.mul_add(y, ty)))
    }

    /// Integer source coordinate sampled for destination pixel (x, y).
    ///
    /// Truncates toward zero. NaN maps to 0 and out-of-range values
    /// saturate, all of which fail the resampler's bounds test.
    #[inline]
    pub fn sample_coords(&self, x: u32, y: u32) -> (i32, i32) {
        let (sx, sy) = self.map(x as f32, y as f32);
        (sx as i32, sy as i32)
    }
}
