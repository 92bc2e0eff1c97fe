// SPDX-License-Identifier: MPL-2.0
//! Test utilities for float comparisons and synthetic images.
//!
//! This module re-exports the `approx` crate's assertion macros for float comparison,
//! which properly handle floating-point precision issues that `assert_eq!` cannot.

pub use approx::{assert_abs_diff_eq, assert_relative_eq};

use crate::media::PixelBuffer;

/// Default epsilon for f64 geometry comparisons.
pub const F64_EPSILON: f64 = 1e-9;

/// Opaque buffer whose channels vary independently across x and y.
///
/// Red ramps left to right, green top to bottom and blue follows both, so
/// every pixel of a small buffer is distinct.
pub fn gradient_buffer(width: u32, height: u32) -> PixelBuffer {
    let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
    for y in 0..height {
        for x in 0..width {
            let r = (x * 255 / width.max(2).saturating_sub(1).max(1)).min(255) as u8;
            let g = (y * 255 / height.max(2).saturating_sub(1).max(1)).min(255) as u8;
            let b = ((x * 37 + y * 91) % 256) as u8;
            pixels.extend_from_slice(&[r, g, b, 255]);
        }
    }
    PixelBuffer::new(width, height, pixels).expect("gradient dimensions are valid")
}
