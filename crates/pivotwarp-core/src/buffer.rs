//! RGB pixel buffers and the borrowed views the transform operates on.
//!
//! The transform never allocates image memory. Callers own the pixels
//! (usually in a [`PixelBuffer`]) and hand the core a read-only
//! [`ImageRef`] for the source and a write-only [`ImageMut`] for the
//! destination. Both views check the buffer length against the dimensions
//! when they are built, so the resamplers can index without further checks.

use crate::error::WarpError;

/// Bytes per pixel (R, G, B).
pub const CHANNELS: usize = 3;

/// Validate dimensions and return the expected buffer length in bytes.
///
/// Width and height must be non-zero and fit in an `i32`, since sample
/// coordinates are bounds-tested as signed 32-bit integers.
pub fn expected_len(width: u32, height: u32) -> Result<usize, WarpError> {
    if width == 0 || height == 0 || width > i32::MAX as u32 || height > i32::MAX as u32 {
        return Err(WarpError::InvalidDimensions { width, height });
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(CHANNELS))
        .ok_or(WarpError::InvalidDimensions { width, height })
}

fn check_len(width: u32, height: u32, actual: usize) -> Result<(), WarpError> {
    let expected = expected_len(width, height)?;
    if actual != expected {
        return Err(WarpError::BufferSize { expected, actual });
    }
    Ok(())
}

/// Read-only view of a row-major RGB image.
#[derive(Debug, Clone, Copy)]
pub struct ImageRef<'a> {
    width: u32,
    height: u32,
    pixels: &'a [u8],
}

impl<'a> ImageRef<'a> {
    /// Wrap `pixels` as a `width` x `height` RGB image.
    ///
    /// # Errors
    ///
    /// Returns `WarpError::InvalidDimensions` or `WarpError::BufferSize` if the
    /// slice length is not exactly `width * height * 3`.
    pub fn new(width: u32, height: u32, pixels: &'a [u8]) -> Result<Self, WarpError> {
        check_len(width, height, pixels.len())?;
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The raw RGB bytes.
    #[inline]
    pub fn pixels(&self) -> &'a [u8] {
        self.pixels
    }

    /// Read the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if the coordinate lies outside the image.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let idx = (y as usize * self.width as usize + x as usize) * CHANNELS;
        [
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
        ]
    }
}

/// Write-only view of a row-major RGB image.
#[derive(Debug)]
pub struct ImageMut<'a> {
    width: u32,
    height: u32,
    pixels: &'a mut [u8],
}

impl<'a> ImageMut<'a> {
    /// Wrap `pixels` as a mutable `width` x `height` RGB image.
    ///
    /// # Errors
    ///
    /// Same conditions as [`ImageRef::new`].
    pub fn new(width: u32, height: u32, pixels: &'a mut [u8]) -> Result<Self, WarpError> {
        check_len(width, height, pixels.len())?;
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Iterate over destination rows, each `width * 3` bytes long.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = (u32, &mut [u8])> + '_ {
        let stride = self.width as usize * CHANNELS;
        (0..self.height).zip(self.pixels.chunks_exact_mut(stride))
    }
}

/// An owned RGB image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGB pixel data in row-major order (3 bytes per pixel).
    /// Length should be width * height * 3.
    pub pixels: Vec<u8>,
}

impl PixelBuffer {
    /// Create a new PixelBuffer with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * CHANNELS,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Allocate a black image, typically used as a transform destination.
    pub fn blank(width: u32, height: u32) -> Self {
        Self::new(
            width,
            height,
            vec![0u8; width as usize * height as usize * CHANNELS],
        )
    }

    /// Create a PixelBuffer from an image::RgbImage.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img.into_raw();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Convert to an image::RgbImage for encoding.
    pub fn to_rgb_image(&self) -> Option<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Borrow as a source view.
    pub fn view(&self) -> Result<ImageRef<'_>, WarpError> {
        ImageRef::new(self.width, self.height, &self.pixels)
    }

    /// Borrow as a destination view.
    pub fn view_mut(&mut self) -> Result<ImageMut<'_>, WarpError> {
        ImageMut::new(self.width, self.height, &mut self.pixels)
    }

    /// Read the pixel at (x, y).
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let idx = (y as usize * self.width as usize + x as usize) * CHANNELS;
        [
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
        ]
    }

    /// Get the size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}
