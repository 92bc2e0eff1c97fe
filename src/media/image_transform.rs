// SPDX-License-Identifier: MPL-2.0
//! Geometry transforms applied before the adjustment pipeline: orientation,
//! resampling, cropping and lens distortion.

use image_rs::imageops::{self, FilterType};

use crate::domain::geometry::TransformState;
use crate::error::{ExportError, Result};
use crate::media::image::{PixelBuffer, CHANNELS};

/// Strength of the radial remap at distortion ±100.
const DISTORTION_STRENGTH: f32 = 0.3;

// ==========================================================================
// Resample Quality
// ==========================================================================

/// Filter used when changing image dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResampleQuality {
    /// Bilinear filtering, used for interactive previews.
    #[default]
    Preview,
    /// Lanczos filtering, used for exports.
    Export,
}

impl ResampleQuality {
    fn filter(self) -> FilterType {
        match self {
            Self::Preview => FilterType::Triangle,
            Self::Export => FilterType::Lanczos3,
        }
    }
}

// ==========================================================================
// Pixel Region
// ==========================================================================

/// Integer rectangle in source pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRegion {
    #[must_use]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Converts a canvas-space rectangle into source pixels.
    ///
    /// Coordinates are divided by `scale`, rounded and clamped to a
    /// `bound_width`×`bound_height` image.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_scaled(
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        scale: f64,
        (bound_width, bound_height): (u32, u32),
    ) -> Self {
        let to_px = |value: f64, bound: u32| (value / scale).round().clamp(0.0, f64::from(bound)) as u32;
        let left = to_px(x, bound_width);
        let top = to_px(y, bound_height);
        let right = to_px(x + width, bound_width);
        let bottom = to_px(y + height, bound_height);
        Self::new(left, top, right.saturating_sub(left), bottom.saturating_sub(top))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

// ==========================================================================
// Transform Functions
// ==========================================================================

/// Applies flips in source space, then the clockwise rotation.
///
/// # Errors
///
/// Only fails if `source` was somehow empty.
pub fn orient(source: &PixelBuffer, transform: &TransformState) -> Result<PixelBuffer> {
    if transform.is_identity() {
        return Ok(source.clone());
    }

    let mut image = source.to_rgba_image();
    if transform.flip_h {
        imageops::flip_horizontal_in_place(&mut image);
    }
    if transform.flip_v {
        imageops::flip_vertical_in_place(&mut image);
    }
    let image = match transform.rotation.degrees() {
        90 => imageops::rotate90(&image),
        180 => imageops::rotate180(&image),
        270 => imageops::rotate270(&image),
        _ => image,
    };
    PixelBuffer::from_rgba_image(image)
}

/// Resizes to exactly `width`×`height` (each at least 1 pixel).
///
/// # Errors
///
/// Only fails if `source` was somehow empty.
pub fn resample(
    source: &PixelBuffer,
    width: u32,
    height: u32,
    quality: ResampleQuality,
) -> Result<PixelBuffer> {
    let width = width.max(1);
    let height = height.max(1);
    if source.dimensions() == (width, height) {
        return Ok(source.clone());
    }
    let image = source.to_rgba_image();
    PixelBuffer::from_rgba_image(imageops::resize(&image, width, height, quality.filter()))
}

/// Copies `region` out of `source`, clamped to its bounds.
///
/// # Errors
///
/// Returns [`ExportError::EmptySourceRegion`] when nothing of the region
/// lies inside the image.
pub fn crop_region(source: &PixelBuffer, region: PixelRegion) -> Result<PixelBuffer> {
    let (img_width, img_height) = source.dimensions();
    let x = region.x.min(img_width);
    let y = region.y.min(img_height);
    let width = region.width.min(img_width - x);
    let height = region.height.min(img_height - y);
    if width == 0 || height == 0 {
        return Err(ExportError::EmptySourceRegion.into());
    }
    if (x, y, width, height) == (0, 0, img_width, img_height) {
        return Ok(source.clone());
    }

    let image = source.to_rgba_image();
    PixelBuffer::from_rgba_image(imageops::crop_imm(&image, x, y, width, height).to_image())
}

/// Radial lens distortion remap.
///
/// Positive amounts bulge the center outward (barrel), negative amounts
/// pinch it (pincushion). Samples are bilinear and clamped to the edge.
#[must_use]
pub fn apply_distortion(source: &PixelBuffer, amount: i32) -> PixelBuffer {
    if amount == 0 {
        return source.clone();
    }
    let k = amount as f32 / 100.0 * DISTORTION_STRENGTH;
    let (width, height) = source.dimensions();
    let cx = width as f32 / 2.0;
    let cy = height as f32 / 2.0;
    let radius = (cx * cx + cy * cy).sqrt();

    let mut output = source.clone();
    let src = source.pixels();
    let stride = width as usize * CHANNELS;

    for (y, row) in output.pixels_mut().chunks_exact_mut(stride).enumerate() {
        for (x, px) in row.chunks_exact_mut(CHANNELS).enumerate() {
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            let r = (dx * dx + dy * dy).sqrt() / radius;
            let factor = 1.0 + k * r * r;
            let sx = cx + dx * factor - 0.5;
            let sy = cy + dy * factor - 0.5;
            px.copy_from_slice(&sample_bilinear(src, width, height, sx, sy));
        }
    }
    output
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn sample_bilinear(pixels: &[u8], width: u32, height: u32, x: f32, y: f32) -> [u8; 4] {
    let max_x = (width - 1) as f32;
    let max_y = (height - 1) as f32;
    let x = x.clamp(0.0, max_x);
    let y = y.clamp(0.0, max_y);
    let x0 = x.floor() as usize;
    let y0 = y.floor() as usize;
    let x1 = (x0 + 1).min(width as usize - 1);
    let y1 = (y0 + 1).min(height as usize - 1);
    let fx = x - x0 as f32;
    let fy = y - y0 as f32;

    let at = |px: usize, py: usize, c: usize| f32::from(pixels[(py * width as usize + px) * CHANNELS + c]);
    let mut out = [0u8; 4];
    for (c, value) in out.iter_mut().enumerate() {
        let top = at(x0, y0, c) * (1.0 - fx) + at(x1, y0, c) * fx;
        let bottom = at(x0, y1, c) * (1.0 - fx) + at(x1, y1, c) * fx;
        *value = (top * (1.0 - fy) + bottom * fy).round().clamp(0.0, 255.0) as u8;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::geometry::{FlipAxis, RotationAngle};
    use crate::error::Error;
    use crate::test_utils::gradient_buffer;

    fn marked(width: u32, height: u32) -> PixelBuffer {
        let mut buffer = PixelBuffer::filled(width, height, [0, 0, 0, 255]);
        buffer.pixels_mut()[..4].copy_from_slice(&[255, 0, 0, 255]);
        buffer
    }

    #[test]
    fn identity_transform_returns_copy() {
        let source = gradient_buffer(5, 3);
        assert_eq!(orient(&source, &TransformState::default()).expect("orient"), source);
    }

    #[test]
    fn rotate_90_moves_top_left_to_top_right() {
        let source = marked(4, 2);
        let transform = TransformState {
            rotation: RotationAngle::new(90),
            ..TransformState::default()
        };
        let out = orient(&source, &transform).expect("orient");
        assert_eq!(out.dimensions(), (2, 4));
        assert_eq!(out.pixel(1, 0), Some([255, 0, 0, 255]));
    }

    #[test]
    fn rotate_270_moves_top_left_to_bottom_left() {
        let source = marked(4, 2);
        let transform = TransformState {
            rotation: RotationAngle::new(270),
            ..TransformState::default()
        };
        let out = orient(&source, &transform).expect("orient");
        assert_eq!(out.pixel(0, 3), Some([255, 0, 0, 255]));
    }

    #[test]
    fn flips_mirror_pixels() {
        let source = marked(4, 2);
        let mut transform = TransformState::default();
        transform.toggle_flip(FlipAxis::Horizontal);
        let out = orient(&source, &transform).expect("orient");
        assert_eq!(out.pixel(3, 0), Some([255, 0, 0, 255]));

        transform.toggle_flip(FlipAxis::Vertical);
        let out = orient(&source, &transform).expect("orient");
        assert_eq!(out.pixel(3, 1), Some([255, 0, 0, 255]));
    }

    #[test]
    fn resample_hits_exact_size() {
        let out = resample(&gradient_buffer(40, 20), 13, 7, ResampleQuality::Export).expect("resize");
        assert_eq!(out.dimensions(), (13, 7));
        let out = resample(&gradient_buffer(4, 4), 0, 0, ResampleQuality::Preview).expect("resize");
        assert_eq!(out.dimensions(), (1, 1));
    }

    #[test]
    fn crop_region_clamps_to_bounds() {
        let source = gradient_buffer(10, 10);
        let out = crop_region(&source, PixelRegion::new(6, 7, 20, 20)).expect("crop");
        assert_eq!(out.dimensions(), (4, 3));
        assert_eq!(out.pixel(0, 0), source.pixel(6, 7));
    }

    #[test]
    fn crop_outside_is_empty_region_error() {
        let source = gradient_buffer(10, 10);
        let err = crop_region(&source, PixelRegion::new(10, 0, 5, 5)).expect_err("empty");
        assert_eq!(err, Error::Export(ExportError::EmptySourceRegion));
    }

    #[test]
    fn scaled_region_divides_by_display_scale() {
        let region = PixelRegion::from_scaled(10.0, 20.0, 50.0, 25.0, 0.5, (1000, 1000));
        assert_eq!(region, PixelRegion::new(20, 40, 100, 50));

        let clamped = PixelRegion::from_scaled(90.0, 0.0, 50.0, 50.0, 0.5, (200, 200));
        assert_eq!(clamped, PixelRegion::new(180, 0, 20, 100));
    }

    #[test]
    fn distortion_keeps_center_and_size() {
        let source = gradient_buffer(21, 21);
        let out = apply_distortion(&source, 80);
        assert_eq!(out.dimensions(), source.dimensions());
        assert_eq!(out.pixel(10, 10), source.pixel(10, 10));
        assert_ne!(out, source);
        assert_eq!(apply_distortion(&source, 0), source);
    }
}
