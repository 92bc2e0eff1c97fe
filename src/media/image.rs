// SPDX-License-Identifier: MPL-2.0
//! Decoded RGBA8 pixel buffer exchanged with the decoder and encoder.

use image_rs::RgbaImage;

use crate::error::{Error, Result};

/// Number of bytes per RGBA8 pixel.
pub const CHANNELS: usize = 4;

/// Row-major RGBA8 image.
///
/// The buffer length always equals `width * height * 4` and both
/// dimensions are non-zero. Alpha is carried through every adjustment
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl PixelBuffer {
    /// Wraps decoded RGBA bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Buffer`] if a dimension is zero or the byte count
    /// does not match the dimensions.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::Buffer(format!("empty image {width}x{height}")));
        }
        let expected = byte_len(width, height);
        if pixels.len() != expected {
            return Err(Error::Buffer(format!(
                "expected {expected} bytes for {width}x{height}, got {}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Creates a buffer where every pixel has the same RGBA value.
    ///
    /// Zero dimensions are raised to 1.
    #[must_use]
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let pixels = rgba
            .iter()
            .copied()
            .cycle()
            .take(byte_len(width, height))
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    #[must_use]
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Returns the RGBA value at `(x, y)`, or `None` outside the buffer.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * CHANNELS;
        let px = &self.pixels[offset..offset + CHANNELS];
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Copies the pixels into an `image` crate buffer.
    #[must_use]
    pub fn to_rgba_image(&self) -> RgbaImage {
        self.clone().into_rgba_image()
    }

    /// Moves the pixels into an `image` crate buffer.
    #[must_use]
    pub fn into_rgba_image(self) -> RgbaImage {
        let (width, height) = (self.width, self.height);
        // Length is guaranteed by construction.
        RgbaImage::from_raw(width, height, self.pixels)
            .unwrap_or_else(|| RgbaImage::new(width, height))
    }

    /// Takes ownership of an `image` crate buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Buffer`] for zero-sized images.
    pub fn from_rgba_image(image: RgbaImage) -> Result<Self> {
        let (width, height) = image.dimensions();
        Self::new(width, height, image.into_raw())
    }
}

fn byte_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * CHANNELS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_validates_length() {
        assert!(PixelBuffer::new(2, 2, vec![0; 16]).is_ok());
        assert!(matches!(
            PixelBuffer::new(2, 2, vec![0; 15]),
            Err(Error::Buffer(_))
        ));
    }

    #[test]
    fn new_rejects_zero_dimensions() {
        assert!(matches!(PixelBuffer::new(0, 4, Vec::new()), Err(Error::Buffer(_))));
    }

    #[test]
    fn filled_repeats_rgba() {
        let buffer = PixelBuffer::filled(3, 2, [1, 2, 3, 4]);
        assert_eq!(buffer.pixels().len(), 24);
        assert_eq!(buffer.pixel(2, 1), Some([1, 2, 3, 4]));
        assert_eq!(buffer.pixel(3, 0), None);
    }

    #[test]
    fn rgba_image_conversion_keeps_pixels() {
        let mut buffer = PixelBuffer::filled(2, 2, [0, 0, 0, 255]);
        buffer.pixels_mut()[4..8].copy_from_slice(&[9, 8, 7, 6]);

        let image = buffer.to_rgba_image();
        assert_eq!(image.get_pixel(1, 0).0, [9, 8, 7, 6]);

        let back = PixelBuffer::from_rgba_image(image).expect("non-empty image");
        assert_eq!(back, buffer);
    }
}
