// SPDX-License-Identifier: MPL-2.0
//! Neighborhood and positional effects: sharpen, noise reduction, vignette
//! and film grain.
//!
//! Convolutions read from a frozen copy of the buffer taken before the
//! effect starts, so every output pixel depends only on input pixels.
//! Pixels whose neighborhood would leave the image are left untouched.

use super::WorkingBuffer;
use crate::domain::editing::{AdjustmentField, Adjustments};
use crate::media::image::CHANNELS;

/// Largest box blur radius, reached at noise reduction 100.
const MAX_BLUR_RADIUS: f32 = 3.0;

/// Vignette falloff starts at this fraction of the half-diagonal.
const VIGNETTE_INNER: f32 = 0.2;

/// Peak grain amplitude per unit intensity, in 8-bit levels.
const GRAIN_SCALE: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectsStage {
    sharpen: f32,
    blur_radius: usize,
    vignette: f32,
    grain: f32,
    grain_seed: u64,
}

impl EffectsStage {
    /// Returns `None` when no effect would change a pixel.
    #[must_use]
    pub fn from_adjustments(adjustments: &Adjustments, grain_seed: u64) -> Option<Self> {
        let percent = |field| adjustments.get(field) as f32 / 100.0;
        let noise = percent(AdjustmentField::Noise);

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let blur_radius = (noise * MAX_BLUR_RADIUS).ceil().max(0.0) as usize;

        let stage = Self {
            sharpen: percent(AdjustmentField::Sharpening),
            blur_radius,
            vignette: percent(AdjustmentField::Vignette),
            grain: percent(AdjustmentField::Grain),
            grain_seed,
        };
        let active = stage.sharpen != 0.0
            || stage.blur_radius > 0
            || stage.vignette != 0.0
            || stage.grain != 0.0;
        active.then_some(stage)
    }

    /// Runs the active effects in order: sharpen, noise reduction,
    /// vignette, grain.
    pub fn apply(&self, buffer: &mut WorkingBuffer, parallel: bool) {
        if self.sharpen != 0.0 {
            sharpen(buffer, self.sharpen, parallel);
        }
        if self.blur_radius > 0 {
            box_blur(buffer, self.blur_radius, parallel);
        }
        if self.vignette != 0.0 || self.grain != 0.0 {
            self.apply_positional(buffer, parallel);
        }
    }

    fn apply_positional(&self, buffer: &mut WorkingBuffer, parallel: bool) {
        let width = buffer.width();
        let cx = width as f32 / 2.0;
        let cy = buffer.height() as f32 / 2.0;
        let radius = (cx * cx + cy * cy).sqrt();
        let (vignette, grain, seed) = (self.vignette, self.grain, self.grain_seed);

        buffer.for_each_pixel(parallel, |x, y, px| {
            if vignette != 0.0 && radius > 0.0 {
                let dx = x as f32 - cx;
                let dy = y as f32 - cy;
                let distance = (dx * dx + dy * dy).sqrt();
                let t = ((distance - VIGNETTE_INNER * radius) / ((1.0 - VIGNETTE_INNER) * radius))
                    .clamp(0.0, 1.0);
                if vignette > 0.0 {
                    let alpha = t * 0.7 * vignette;
                    for v in &mut px[..3] {
                        *v *= 1.0 - alpha;
                    }
                } else {
                    let alpha = (1.0 - t) * 0.3 * -vignette;
                    for v in &mut px[..3] {
                        *v = *v * (1.0 - alpha) + 255.0 * alpha;
                    }
                }
            }

            if grain != 0.0 {
                let index = (y * width + x) as u64;
                for (c, v) in px[..3].iter_mut().enumerate() {
                    let u = grain_sample(seed, index, c as u64);
                    *v += (u - 0.5) * grain * GRAIN_SCALE;
                }
            }
        });
    }
}

/// 3×3 Laplacian sharpen blended by `amount`.
fn sharpen(buffer: &mut WorkingBuffer, amount: f32, parallel: bool) {
    let (width, height) = (buffer.width(), buffer.height());
    if width < 3 || height < 3 {
        return;
    }
    let frozen = buffer.data().to_vec();
    let stride = width * CHANNELS;

    buffer.for_each_row(parallel, |y, row| {
        if y == 0 || y == height - 1 {
            return;
        }
        for x in 1..width - 1 {
            let i = y * stride + x * CHANNELS;
            for c in 0..3 {
                let v = frozen[i + c];
                let conv = 5.0 * v
                    - frozen[i + c - stride]
                    - frozen[i + c + stride]
                    - frozen[i + c - CHANNELS]
                    - frozen[i + c + CHANNELS];
                row[x * CHANNELS + c] = v + (conv - v) * amount;
            }
        }
    });
}

/// Square mean filter of the given radius.
fn box_blur(buffer: &mut WorkingBuffer, radius: usize, parallel: bool) {
    let (width, height) = (buffer.width(), buffer.height());
    if width <= 2 * radius || height <= 2 * radius {
        return;
    }
    let frozen = buffer.data().to_vec();
    let stride = width * CHANNELS;
    let side = 2 * radius + 1;
    #[allow(clippy::cast_precision_loss)]
    let count = (side * side) as f32;

    buffer.for_each_row(parallel, |y, row| {
        if y < radius || y >= height - radius {
            return;
        }
        for x in radius..width - radius {
            let mut sum = [0.0f32; 3];
            for ny in y - radius..=y + radius {
                let base = ny * stride;
                for nx in x - radius..=x + radius {
                    let i = base + nx * CHANNELS;
                    sum[0] += frozen[i];
                    sum[1] += frozen[i + 1];
                    sum[2] += frozen[i + 2];
                }
            }
            for (c, total) in sum.iter().enumerate() {
                row[x * CHANNELS + c] = total / count;
            }
        }
    });
}

/// Uniform sample in `[0, 1)` for one channel of one pixel.
///
/// Stateless so rows can be processed in any order.
#[allow(clippy::cast_precision_loss)]
fn grain_sample(seed: u64, index: u64, channel: u64) -> f32 {
    let counter = index.wrapping_mul(3).wrapping_add(channel);
    let mut z = seed.wrapping_add(counter.wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^= z >> 31;
    // Top 24 bits map exactly onto the f32 mantissa.
    (z >> 40) as f32 / (1u64 << 24) as f32
}
