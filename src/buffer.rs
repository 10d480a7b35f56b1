//! Decoded RGBA pixel storage shared by every processing step.
//!
//! [`PixelBuffer`] keeps its dimensions and sample vector private so the
//! `samples.len() == width * height * 4` invariant cannot be broken from the
//! outside. Steps that change geometry (crop, resample) always build a new
//! buffer instead of resizing one in place.

use crate::error::ProcessingError;
use image::RgbaImage;
use serde::Serialize;

/// Samples per pixel (red, green, blue, alpha)
pub const CHANNELS: usize = 4;

/// Largest frame any step will allocate, 16384x16384. Anything bigger is
/// reported as [`ProcessingError::AllocationFailure`] up front, since the
/// resize filters allocate their own working images infallibly.
pub const MAX_PIXELS: u64 = 1 << 28;

/// Row-major RGBA8 image, origin top-left
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    samples: Vec<u8>,
}

/// Axis-aligned region of a [`PixelBuffer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rectangle {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rectangle {
    /// Rectangle covering a whole `width` x `height` image
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    /// True when the region has no pixels at all
    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

impl PixelBuffer {
    /// Allocate a transparent black buffer
    pub fn new(width: u32, height: u32) -> Result<Self, ProcessingError> {
        let samples = allocate(width, height)?;
        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// Allocate a buffer where every pixel is `rgba`
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self, ProcessingError> {
        let mut buffer = Self::new(width, height)?;
        for pixel in buffer.samples.chunks_exact_mut(CHANNELS) {
            pixel.copy_from_slice(&rgba);
        }
        Ok(buffer)
    }

    /// Wrap existing interleaved RGBA samples, validating their length
    pub fn from_samples(
        width: u32,
        height: u32,
        samples: Vec<u8>,
    ) -> Result<Self, ProcessingError> {
        let expected = check_dimensions(width, height)?;
        if samples.len() != expected {
            return Err(ProcessingError::InvalidBuffer {
                expected,
                actual: samples.len(),
            });
        }
        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// Take ownership of a decoded `image` buffer without copying
    pub fn from_rgba_image(image: RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            samples: image.into_raw(),
        }
    }

    /// Hand the samples back to the `image` crate, e.g. for encoding or resizing
    pub fn into_rgba_image(self) -> Result<RgbaImage, ProcessingError> {
        let expected = self.samples.len();
        RgbaImage::from_raw(self.width, self.height, self.samples).ok_or(
            ProcessingError::InvalidBuffer {
                expected,
                actual: expected,
            },
        )
    }

    /// Independent copy, reporting allocation failure instead of aborting
    pub fn try_clone(&self) -> Result<Self, ProcessingError> {
        let mut samples = Vec::new();
        samples
            .try_reserve_exact(self.samples.len())
            .map_err(|_| ProcessingError::AllocationFailure {
                width: self.width,
                height: self.height,
            })?;
        samples.extend_from_slice(&self.samples);
        Ok(Self {
            width: self.width,
            height: self.height,
            samples,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// Mutable view of the samples. The slice cannot change length, so the
    /// dimension invariant holds.
    pub fn samples_mut(&mut self) -> &mut [u8] {
        &mut self.samples
    }

    pub fn full_rect(&self) -> Rectangle {
        Rectangle::full(self.width, self.height)
    }

    /// Byte offset of pixel `(x, y)`
    #[inline]
    pub fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }

    /// Read one pixel. Panics when `(x, y)` is outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.offset(x, y);
        [
            self.samples[i],
            self.samples[i + 1],
            self.samples[i + 2],
            self.samples[i + 3],
        ]
    }

    /// Overwrite one pixel. Panics when `(x, y)` is outside the buffer.
    pub fn put_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let i = self.offset(x, y);
        self.samples[i..i + CHANNELS].copy_from_slice(&rgba);
    }

    /// Copy `rect` out into a new buffer.
    ///
    /// A zero-area rectangle yields [`ProcessingError::DegenerateCrop`]; a
    /// rectangle reaching past the buffer yields
    /// [`ProcessingError::CropOutOfBounds`].
    pub fn crop(&self, rect: &Rectangle) -> Result<PixelBuffer, ProcessingError> {
        if rect.is_degenerate() {
            return Err(ProcessingError::DegenerateCrop);
        }

        let fits = rect
            .x
            .checked_add(rect.width)
            .is_some_and(|right| right <= self.width)
            && rect
                .y
                .checked_add(rect.height)
                .is_some_and(|bottom| bottom <= self.height);
        if !fits {
            return Err(ProcessingError::CropOutOfBounds {
                x: rect.x,
                y: rect.y,
                width: rect.width,
                height: rect.height,
                source_width: self.width,
                source_height: self.height,
            });
        }

        if *rect == self.full_rect() {
            return self.try_clone();
        }

        let mut out = PixelBuffer::new(rect.width, rect.height)?;
        let row_len = rect.width as usize * CHANNELS;
        for row in 0..rect.height {
            let src = self.offset(rect.x, rect.y + row);
            let dst = out.offset(0, row);
            out.samples[dst..dst + row_len].copy_from_slice(&self.samples[src..src + row_len]);
        }
        Ok(out)
    }
}

/// Sample count for a `width` x `height` buffer, or
/// [`ProcessingError::AllocationFailure`] when it cannot be addressed or is
/// over [`MAX_PIXELS`]
pub fn check_dimensions(width: u32, height: u32) -> Result<usize, ProcessingError> {
    if width as u64 * height as u64 > MAX_PIXELS {
        return Err(ProcessingError::AllocationFailure { width, height });
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(CHANNELS))
        .ok_or(ProcessingError::AllocationFailure { width, height })
}

fn allocate(width: u32, height: u32) -> Result<Vec<u8>, ProcessingError> {
    let len = check_dimensions(width, height)?;
    let mut samples = Vec::new();
    samples
        .try_reserve_exact(len)
        .map_err(|_| ProcessingError::AllocationFailure { width, height })?;
    samples.resize(len, 0);
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer_matches_dimensions() {
        let buffer = PixelBuffer::new(7, 3).unwrap();
        assert_eq!(buffer.dimensions(), (7, 3));
        assert_eq!(buffer.samples().len(), 7 * 3 * 4);
        assert!(buffer.samples().iter().all(|&s| s == 0));
    }

    #[test]
    fn test_from_samples_rejects_wrong_length() {
        let err = PixelBuffer::from_samples(2, 2, vec![0; 15]).unwrap_err();
        assert_eq!(
            err,
            ProcessingError::InvalidBuffer {
                expected: 16,
                actual: 15
            }
        );
    }

    #[test]
    fn test_oversized_allocation_is_reported() {
        let err = PixelBuffer::new(u32::MAX, u32::MAX).unwrap_err();
        assert!(matches!(err, ProcessingError::AllocationFailure { .. }));
    }

    #[test]
    fn test_pixel_limit() {
        assert_eq!(check_dimensions(16384, 16384).unwrap(), 16384 * 16384 * 4);
        assert_eq!(
            check_dimensions(16385, 16384),
            Err(ProcessingError::AllocationFailure {
                width: 16385,
                height: 16384
            })
        );
        assert!(check_dimensions(1_000_000, 1).is_ok());
    }

    #[test]
    fn test_crop_copies_region() {
        let mut buffer = PixelBuffer::filled(4, 4, [10, 10, 10, 255]).unwrap();
        buffer.put_pixel(1, 2, [200, 100, 50, 255]);

        let cropped = buffer
            .crop(&Rectangle {
                x: 1,
                y: 1,
                width: 2,
                height: 2,
            })
            .unwrap();

        assert_eq!(cropped.dimensions(), (2, 2));
        assert_eq!(cropped.pixel(0, 1), [200, 100, 50, 255]);
        assert_eq!(cropped.pixel(1, 1), [10, 10, 10, 255]);
    }

    #[test]
    fn test_crop_rejects_degenerate_and_out_of_bounds() {
        let buffer = PixelBuffer::new(4, 4).unwrap();
        assert_eq!(
            buffer.crop(&Rectangle::full(0, 4)),
            Err(ProcessingError::DegenerateCrop)
        );
        let err = buffer
            .crop(&Rectangle {
                x: 2,
                y: 0,
                width: 3,
                height: 4,
            })
            .unwrap_err();
        assert!(matches!(err, ProcessingError::CropOutOfBounds { .. }));
    }

    #[test]
    fn test_rgba_image_round_trip_keeps_samples() {
        let image = RgbaImage::from_fn(3, 2, |x, y| image::Rgba([x as u8, y as u8, 7, 255]));
        let buffer = PixelBuffer::from_rgba_image(image.clone());
        assert_eq!(buffer.pixel(2, 1), [2, 1, 7, 255]);
        assert_eq!(buffer.into_rgba_image().unwrap(), image);
    }
}
