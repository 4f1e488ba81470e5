//! End-to-end properties of the transform.

use pivotwarp_core::resample::{reference, vectorized};
use pivotwarp_core::{
    transform, transform_with_args, InverseMatrix, LaneKernel, PixelBuffer, ResampleStrategy,
    TransformParams, FILL_COLOR,
};
use proptest::prelude::*;

/// Image where every pixel differs from its neighbors.
fn test_image(width: u32, height: u32) -> PixelBuffer {
    let mut pixels = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            pixels.push((x * 7 + 1) as u8);
            pixels.push((y * 11 + 1) as u8);
            pixels.push(((x ^ y) * 13 + 1) as u8);
        }
    }
    PixelBuffer::new(width, height, pixels)
}

fn run(src: &PixelBuffer, params: &TransformParams, strategy: ResampleStrategy) -> PixelBuffer {
    let mut dst = PixelBuffer::blank(src.width, src.height);
    transform(
        &src.view().unwrap(),
        &mut dst.view_mut().unwrap(),
        params,
        strategy,
    )
    .unwrap();
    dst
}

#[test]
fn identity_reproduces_source() {
    for (width, height) in [(4, 4), (5, 3), (32, 17)] {
        let src = test_image(width, height);
        let dst = run(&src, &TransformParams::default(), ResampleStrategy::Vectorized);

        for y in 0..height {
            for x in 0..width {
                if x == 0 || y == 0 {
                    // Column 0 and row 0 are never sampled.
                    assert_eq!(dst.pixel(x, y), FILL_COLOR);
                } else {
                    assert_eq!(dst.pixel(x, y), src.pixel(x, y), "({}, {})", x, y);
                }
            }
        }
    }
}

#[test]
fn rotation_then_inverse_restores_interior() {
    let (width, height) = (24, 24);
    let src = test_image(width, height);

    for angle in [90.0f32, 180.0, 30.0] {
        let forward = TransformParams::new().with_angle(angle);
        let backward = TransformParams::new().with_angle(-angle);

        let once = run(&src, &forward, ResampleStrategy::Vectorized);
        let twice = run(&once, &backward, ResampleStrategy::Vectorized);

        let m_forward = InverseMatrix::compile(&forward, width, height);
        let m_backward = InverseMatrix::compile(&backward, width, height);
        let inside = |(sx, sy): (i32, i32)| sx > 0 && sx < width as i32 && sy > 0 && sy < height as i32;

        let mut restored = 0;
        for y in 0..height {
            for x in 0..width {
                let mid = m_backward.sample_coords(x, y);
                if !inside(mid) {
                    continue;
                }
                let origin = m_forward.sample_coords(mid.0 as u32, mid.1 as u32);
                if inside(origin) && origin == (x as i32, y as i32) {
                    assert_eq!(
                        twice.pixel(x, y),
                        src.pixel(x, y),
                        "angle {} at ({}, {})",
                        angle,
                        x,
                        y
                    );
                    restored += 1;
                }
            }
        }
        assert!(restored > 0, "no pixel round-trips for angle {}", angle);
    }
}

#[test]
fn quarter_turn_about_origin_fills_outside() {
    // Non-square, pivot at the top-left corner.
    let (width, height) = (12, 6);
    let src = test_image(width, height);
    let params = TransformParams::new().with_angle(90.0).with_pivot(0.0, 0.0);
    let dst = run(&src, &params, ResampleStrategy::Vectorized);

    let m = InverseMatrix::compile(&params, width, height);
    for y in 0..height {
        for x in 0..width {
            let (sx, sy) = m.sample_coords(x, y);
            let inside = sx > 0 && sx < width as i32 && sy > 0 && sy < height as i32;
            if !inside {
                assert_eq!(dst.pixel(x, y), FILL_COLOR, "({}, {})", x, y);
            }
        }
    }
    // src_y = -x, so no destination pixel lands inside the source.
    assert!(dst.pixels.iter().all(|&b| b == 0));
}

#[test]
fn quarter_turn_on_4x4_scenario() {
    let params = TransformParams::new().with_angle(90.0);
    let m = InverseMatrix::compile(&params, 4, 4);

    assert!(m.a().abs() < 1e-6);
    assert!((m.b() - 1.0).abs() < 1e-6);
    assert!((m.c() + 1.0).abs() < 1e-6);
    assert!(m.d().abs() < 1e-6);
    // tx = 2 - 0*2 - 1*2 = 0, ty = 1*2 + 2 - 0*2 = 4
    assert!(m.tx().abs() < 1e-5);
    assert!((m.ty() - 4.0).abs() < 1e-5);

    let src = test_image(4, 4);
    let dst = run(&src, &params, ResampleStrategy::Vectorized);
    // Destination (1, 2) samples source (2, 4 - 1) = (2, 3).
    assert_eq!(dst.pixel(1, 2), src.pixel(2, 3));
}

#[test]
fn missing_angle_value_is_usage_failure() {
    let src = test_image(8, 8);
    let mut dst = PixelBuffer::new(8, 8, vec![0x5A; 8 * 8 * 3]);
    let before = dst.clone();

    let err = transform_with_args(
        &src.view().unwrap(),
        &mut dst.view_mut().unwrap(),
        ["-angle"],
    )
    .unwrap_err();

    assert!(err.is_usage());
    assert_eq!(dst, before);
}

#[test]
fn deterministic_output() {
    let src = test_image(19, 11);
    let params = TransformParams::new().with_angle(47.0).with_scale(0.8);
    let first = run(&src, &params, ResampleStrategy::Vectorized);
    let second = run(&src, &params, ResampleStrategy::Vectorized);
    assert_eq!(first, second);
}

fn params_strategy() -> impl Strategy<Value = TransformParams> {
    (
        -1080.0f32..1080.0,
        0.05f32..8.0,
        -0.5f32..1.5,
        -0.5f32..1.5,
    )
        .prop_map(|(angle, scale, u, v)| {
            TransformParams::new()
                .with_angle(angle)
                .with_scale(scale)
                .with_pivot(u, v)
        })
}

proptest! {
    /// Property: every lane kernel matches the reference byte for byte.
    #[test]
    fn prop_vectorized_matches_reference(
        width in 4u32..=40,
        height in 1u32..=24,
        params in params_strategy(),
    ) {
        let src = test_image(width, height);
        let m = InverseMatrix::compile(&params, width, height);

        let mut expected = PixelBuffer::blank(width, height);
        reference::resample(&src.view().unwrap(), &mut expected.view_mut().unwrap(), &m);

        let mut kernels = vec![LaneKernel::Portable];
        if LaneKernel::detect() != LaneKernel::Portable {
            kernels.push(LaneKernel::detect());
        }
        for kernel in kernels {
            let mut actual = PixelBuffer::blank(width, height);
            vectorized::resample_with(kernel, &src.view().unwrap(), &mut actual.view_mut().unwrap(), &m);
            prop_assert_eq!(&actual.pixels, &expected.pixels, "kernel {}", kernel.name());
        }
    }

    /// Property: output pixels are either fill or copied from the source.
    #[test]
    fn prop_output_pixels_come_from_source(
        width in 4u32..=24,
        height in 1u32..=16,
        params in params_strategy(),
    ) {
        let src = test_image(width, height);
        let dst = run(&src, &params, ResampleStrategy::Vectorized);
        let m = InverseMatrix::compile(&params, width, height);

        for y in 0..height {
            for x in 0..width {
                let (sx, sy) = m.sample_coords(x, y);
                let inside = sx > 0 && sx < width as i32 && sy > 0 && sy < height as i32;
                let expected = if inside { src.pixel(sx as u32, sy as u32) } else { FILL_COLOR };
                prop_assert_eq!(dst.pixel(x, y), expected);
            }
        }
    }
}
