// SPDX-License-Identifier: MPL-2.0
//! Parametric adjustment pipeline.
//!
//! A render converts the source pixels into an unclamped `f32` working
//! buffer, runs the active stages in a fixed order and clamps once:
//!
//! Basic → Tone → Color → Effects → clamp
//!
//! Stages whose parameters are all neutral are not constructed, so a fully
//! neutral [`Adjustments`] returns the input bytes unchanged.
//!
//! # Example
//!
//! ```
//! use lens_develop::domain::editing::{AdjustmentField, Adjustments};
//! use lens_develop::media::pipeline::{AdjustmentPipeline, RenderOptions};
//! use lens_develop::media::PixelBuffer;
//!
//! let source = PixelBuffer::filled(4, 4, [200, 200, 200, 255]);
//! let mut adjustments = Adjustments::default();
//! adjustments.set(AdjustmentField::Exposure, 50);
//!
//! let pipeline = AdjustmentPipeline::new(&adjustments, RenderOptions::default());
//! let output = pipeline.process(&source);
//! assert_eq!(output.pixel(0, 0), Some([255, 255, 255, 255]));
//! ```

pub mod basic;
pub mod color;
pub mod effects;
pub mod tone;

use rayon::prelude::*;

use crate::config::{RenderConfig, DEFAULT_GRAIN_SEED};
use crate::domain::editing::Adjustments;
use crate::media::image::{PixelBuffer, CHANNELS};

pub use basic::BasicStage;
pub use color::ColorStage;
pub use effects::EffectsStage;
pub use tone::ToneStage;

// =============================================================================
// Render Options
// =============================================================================

/// Execution settings that do not change the visual intent of an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Split row loops across the rayon thread pool.
    pub parallel: bool,
    /// Seed for the film grain generator.
    pub grain_seed: u64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from(&RenderConfig::default())
    }
}

impl From<&RenderConfig> for RenderOptions {
    fn from(config: &RenderConfig) -> Self {
        Self {
            parallel: config.parallel(),
            grain_seed: config.grain_seed(),
        }
    }
}

// =============================================================================
// Working Buffer
// =============================================================================

/// Unclamped RGBA working copy of a render.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkingBuffer {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl WorkingBuffer {
    #[must_use]
    pub fn from_pixels(buffer: &PixelBuffer) -> Self {
        Self {
            width: buffer.width() as usize,
            height: buffer.height() as usize,
            data: buffer.pixels().iter().map(|&v| f32::from(v)).collect(),
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    fn row_len(&self) -> usize {
        self.width * CHANNELS
    }

    /// Runs `f(y, row)` on every row.
    pub(crate) fn for_each_row<F>(&mut self, parallel: bool, f: F)
    where
        F: Fn(usize, &mut [f32]) + Sync + Send,
    {
        let row_len = self.row_len();
        if parallel {
            self.data
                .par_chunks_mut(row_len)
                .enumerate()
                .for_each(|(y, row)| f(y, row));
        } else {
            self.data
                .chunks_mut(row_len)
                .enumerate()
                .for_each(|(y, row)| f(y, row));
        }
    }

    /// Runs `f(x, y, pixel)` on every pixel.
    pub(crate) fn for_each_pixel<F>(&mut self, parallel: bool, f: F)
    where
        F: Fn(usize, usize, &mut [f32]) + Sync + Send,
    {
        self.for_each_row(parallel, |y, row| {
            for (x, px) in row.chunks_exact_mut(CHANNELS).enumerate() {
                f(x, y, px);
            }
        });
    }

    /// Rounds and clamps every channel into `target`.
    ///
    /// `target` must have the same dimensions.
    fn write_clamped(&self, target: &mut PixelBuffer) {
        for (out, &value) in target.pixels_mut().iter_mut().zip(&self.data) {
            *out = clamp_channel(value);
        }
    }
}

/// Terminal quantization of one channel.
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn clamp_channel(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

// =============================================================================
// Pipeline
// =============================================================================

/// The stages active for one render, built from an [`Adjustments`] record.
///
/// Per-render state such as the curve lookup table is prepared here once.
#[derive(Debug, Clone)]
pub struct AdjustmentPipeline {
    basic: Option<BasicStage>,
    tone: Option<ToneStage>,
    color: Option<ColorStage>,
    effects: Option<EffectsStage>,
    parallel: bool,
}

impl AdjustmentPipeline {
    #[must_use]
    pub fn new(adjustments: &Adjustments, options: RenderOptions) -> Self {
        Self {
            basic: BasicStage::from_adjustments(adjustments),
            tone: ToneStage::from_adjustments(adjustments),
            color: ColorStage::from_adjustments(adjustments),
            effects: EffectsStage::from_adjustments(adjustments, options.grain_seed),
            parallel: options.parallel,
        }
    }

    /// Returns true when no stage is active.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.basic.is_none() && self.tone.is_none() && self.color.is_none() && self.effects.is_none()
    }

    /// Names of the active stages, in execution order.
    #[must_use]
    pub fn active_stages(&self) -> Vec<&'static str> {
        let mut names = Vec::with_capacity(4);
        if self.basic.is_some() {
            names.push("basic");
        }
        if self.tone.is_some() {
            names.push("tone");
        }
        if self.color.is_some() {
            names.push("color");
        }
        if self.effects.is_some() {
            names.push("effects");
        }
        names
    }

    /// Renders `source` into a new buffer of the same size.
    #[must_use]
    pub fn process(&self, source: &PixelBuffer) -> PixelBuffer {
        self.process_owned(source.clone())
    }

    /// Renders in place, reusing the allocation of `buffer`.
    #[must_use]
    pub fn process_owned(&self, mut buffer: PixelBuffer) -> PixelBuffer {
        if self.is_identity() {
            return buffer;
        }

        let mut working = WorkingBuffer::from_pixels(&buffer);
        self.run_point_stages(&mut working);
        if let Some(effects) = &self.effects {
            effects.apply(&mut working, self.parallel);
        }
        working.write_clamped(&mut buffer);
        buffer
    }

    /// Basic, Tone and Color are pure per-pixel functions, so they share one
    /// pass over the buffer.
    fn run_point_stages(&self, working: &mut WorkingBuffer) {
        if self.basic.is_none() && self.tone.is_none() && self.color.is_none() {
            return;
        }
        let (basic, tone, color) = (&self.basic, &self.tone, &self.color);
        working.for_each_pixel(self.parallel, |_, _, px| {
            if let Some(stage) = basic {
                stage.apply(px);
            }
            if let Some(stage) = tone {
                stage.apply(px);
            }
            if let Some(stage) = color {
                stage.apply(px);
            }
        });
    }
}

/// Builds a pipeline for `adjustments` and renders `source` with it.
#[must_use]
pub fn apply_adjustments(
    source: &PixelBuffer,
    adjustments: &Adjustments,
    options: RenderOptions,
) -> PixelBuffer {
    AdjustmentPipeline::new(adjustments, options).process(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::editing::{
        AdjustmentField, CurvePreset, HslBand, HslChannel, Rgb, SplitTone,
    };
    use crate::test_utils::gradient_buffer;

    fn everything_on() -> Adjustments {
        let mut adjustments = Adjustments::default();
        for (i, field) in AdjustmentField::ALL.iter().enumerate() {
            let spec = field.spec();
            let value = if i % 2 == 0 { spec.max / 3 } else { spec.min / 4 };
            adjustments.set(*field, value);
        }
        adjustments.set_curve(CurvePreset::Contrast.into());
        adjustments.set_hsl(HslBand::Orange, HslChannel::Hue, 40);
        adjustments.set_hsl(HslBand::Blue, HslChannel::Saturation, -60);
        adjustments.set_split_highlights(SplitTone::new(Rgb::new(255, 180, 90), 40));
        adjustments.set_split_shadows(SplitTone::new(Rgb::new(40, 80, 200), 30));
        adjustments
    }

    #[test]
    fn neutral_adjustments_return_input_exactly() {
        let source = gradient_buffer(17, 9);
        let pipeline = AdjustmentPipeline::new(&Adjustments::default(), RenderOptions::default());
        assert!(pipeline.is_identity());
        assert_eq!(pipeline.process(&source), source);
    }

    #[test]
    fn exposure_plus_fifty_saturates_mid_gray() {
        let mut adjustments = Adjustments::default();
        adjustments.set(AdjustmentField::Exposure, 50);

        for gray in [128, 200] {
            let source = PixelBuffer::filled(3, 3, [gray, gray, gray, 255]);
            let output = apply_adjustments(&source, &adjustments, RenderOptions::default());
            for y in 0..3 {
                for x in 0..3 {
                    assert_eq!(output.pixel(x, y), Some([255, 255, 255, 255]), "gray {gray}");
                }
            }
        }
    }

    #[test]
    fn neutral_effects_leave_point_stage_output_untouched() {
        let source = gradient_buffer(21, 13);
        let mut adjustments = everything_on();
        for field in [
            AdjustmentField::Sharpening,
            AdjustmentField::Noise,
            AdjustmentField::Vignette,
            AdjustmentField::Grain,
        ] {
            adjustments.set(field, 0);
        }
        let pipeline = AdjustmentPipeline::new(&adjustments, RenderOptions::default());
        assert!(!pipeline.active_stages().contains(&"effects"));

        let mut working = WorkingBuffer::from_pixels(&source);
        pipeline.run_point_stages(&mut working);
        let mut expected = source.clone();
        working.write_clamped(&mut expected);

        assert_eq!(pipeline.process(&source), expected);
    }

    #[test]
    fn only_effects_active_skips_point_stages() {
        let mut adjustments = Adjustments::default();
        adjustments.set(AdjustmentField::Vignette, 50);
        let pipeline = AdjustmentPipeline::new(&adjustments, RenderOptions::default());
        assert_eq!(pipeline.active_stages(), vec!["effects"]);
    }

    #[test]
    fn alpha_is_preserved() {
        let mut source = gradient_buffer(8, 8);
        for (i, px) in source.pixels_mut().chunks_exact_mut(CHANNELS).enumerate() {
            px[3] = (i * 7 % 256) as u8;
        }
        let output = apply_adjustments(&source, &everything_on(), RenderOptions::default());
        for (a, b) in source
            .pixels()
            .chunks_exact(CHANNELS)
            .zip(output.pixels().chunks_exact(CHANNELS))
        {
            assert_eq!(a[3], b[3]);
        }
    }

    #[test]
    fn parallel_matches_sequential() {
        let source = gradient_buffer(37, 23);
        let adjustments = everything_on();
        let sequential = apply_adjustments(
            &source,
            &adjustments,
            RenderOptions {
                parallel: false,
                grain_seed: 7,
            },
        );
        let parallel = apply_adjustments(
            &source,
            &adjustments,
            RenderOptions {
                parallel: true,
                grain_seed: 7,
            },
        );
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn render_is_deterministic_for_a_seed() {
        let source = gradient_buffer(16, 16);
        let mut adjustments = Adjustments::default();
        adjustments.set(AdjustmentField::Grain, 60);
        let options = RenderOptions {
            parallel: false,
            grain_seed: 42,
        };

        let first = apply_adjustments(&source, &adjustments, options);
        let second = apply_adjustments(&source, &adjustments, options);
        assert_eq!(first, second);
        assert_ne!(first, source);

        let other_seed = apply_adjustments(
            &source,
            &adjustments,
            RenderOptions {
                grain_seed: 43,
                ..options
            },
        );
        assert_ne!(first, other_seed);
    }

    #[test]
    fn clamp_channel_rounds_to_nearest() {
        assert_eq!(clamp_channel(-3.0), 0);
        assert_eq!(clamp_channel(12.49), 12);
        assert_eq!(clamp_channel(12.5), 13);
        assert_eq!(clamp_channel(300.0), 255);
    }

    #[test]
    fn options_follow_render_config() {
        let config = RenderConfig {
            parallel: Some(true),
            grain_seed: Some(9),
            ..RenderConfig::default()
        };
        let options = RenderOptions::from(&config);
        assert!(options.parallel);
        assert_eq!(options.grain_seed, 9);
    }

    #[test]
    fn default_options_match_default_config() {
        let options = RenderOptions::default();
        assert_eq!(options, RenderOptions::from(&RenderConfig::default()));
        assert!(options.parallel);
        assert_eq!(options.grain_seed, DEFAULT_GRAIN_SEED);
    }
}
