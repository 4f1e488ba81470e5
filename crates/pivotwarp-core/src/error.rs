//! Error types for argument parsing and image transformation.

use thiserror::Error;

/// Errors produced while parsing transform arguments.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArgsError {
    /// The flag is not one of `-a`, `-angle`, `-s`, `-scale`, `-p`, `-pivot`.
    #[error("Unrecognized argument: {0}")]
    UnknownFlag(String),

    /// The flag was the last argument but requires a value.
    #[error("Missing value for {flag}")]
    MissingValue { flag: String },

    /// The value following the flag is not a number.
    #[error("Invalid number for {flag}: {value:?}")]
    InvalidNumber { flag: String, value: String },
}

/// Errors that can occur when transforming an image.
///
/// On any error the destination buffer is left untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WarpError {
    /// The argument list could not be parsed.
    #[error("Wrong arguments: {0}")]
    InvalidArgs(#[from] ArgsError),

    /// The image is narrower than the lane width of the vectorized resampler.
    #[error("Image too narrow: must be at least {min_width} pixels wide, got {width}")]
    TooNarrow { width: u32, min_width: u32 },

    /// Scale must be finite and strictly positive.
    #[error("Invalid scale {0}: must be finite and greater than zero")]
    InvalidScale(f32),

    /// Angle or pivot is NaN or infinite.
    #[error("Invalid transform parameters: {0}")]
    InvalidParams(String),

    /// Width or height is zero or does not fit in a signed 32-bit coordinate.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Pixel buffer length doesn't match the dimensions.
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    BufferSize { expected: usize, actual: usize },

    /// Source and destination have different dimensions.
    #[error("Dimension mismatch: source is {src_width}x{src_height}, destination is {dst_width}x{dst_height}")]
    DimensionMismatch {
        src_width: u32,
        src_height: u32,
        dst_width: u32,
        dst_height: u32,
    },
}

impl WarpError {
    /// Returns true if this error is a usage problem with the argument list.
    pub fn is_usage(&self) -> bool {
        matches!(self, WarpError::InvalidArgs(_))
    }
}
