//! pivotwarp core - rotation and scaling of RGB images about a pivot
//!
//! This crate rotates and scales a 3-channel, 8-bit RGB image about a
//! configurable pivot using inverse-mapped nearest-neighbor resampling.
//! The destination has the same dimensions as the source; regions that map
//! outside the source are filled with black.
//!
//! # Module Structure
//!
//! - `params` - Transform parameters and argument parsing
//! - `matrix` - Inverse affine matrix compilation
//! - `resample` - Reference and lane-vectorized resamplers
//! - `transform` - Entry points tying the above together
//! - `buffer` - Pixel buffers and length-checked views
//!
//! # Usage
//!
//! ```ignore
//! use pivotwarp_core::{transform_with_args, PixelBuffer};
//!
//! let src = PixelBuffer::new(width, height, pixels);
//! let mut dst = PixelBuffer::blank(width, height);
//! transform_with_args(&src.view()?, &mut dst.view_mut()?, ["-a", "30", "-s", "1.5"])?;
//! ```
//!
//! The core performs no I/O and never allocates image memory; callers own
//! both buffers.

pub mod buffer;
pub mod error;
pub mod matrix;
pub mod params;
pub mod resample;
pub mod transform;

pub use buffer::{ImageMut, ImageRef, PixelBuffer, CHANNELS};
pub use error::{ArgsError, WarpError};
pub use matrix::InverseMatrix;
pub use params::{TransformParams, Vec2, USAGE};
pub use resample::{LaneKernel, ResampleStrategy, FILL_COLOR, LANES};
pub use transform::{transform, transform_with_args};
