// SPDX-License-Identifier: MPL-2.0
//! Exposure, contrast and luminance-masked tonal range adjustments.

use crate::domain::editing::{AdjustmentField, Adjustments};
use crate::media::color_math::luminance;

/// Fields read by this stage.
const FIELDS: [AdjustmentField; 8] = [
    AdjustmentField::Exposure,
    AdjustmentField::Contrast,
    AdjustmentField::Highlights,
    AdjustmentField::Shadows,
    AdjustmentField::Whites,
    AdjustmentField::Blacks,
    AdjustmentField::Clarity,
    AdjustmentField::Dehaze,
];

/// Pre-scaled Basic parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BasicStage {
    exposure_mult: f32,
    contrast_factor: f32,
    highlights: f32,
    shadows: f32,
    whites: f32,
    blacks: f32,
    clarity: f32,
    dehaze_factor: f32,
}

impl BasicStage {
    /// Returns `None` when every Basic field is neutral.
    #[must_use]
    pub fn from_adjustments(adjustments: &Adjustments) -> Option<Self> {
        if FIELDS.iter().all(|field| adjustments.is_field_neutral(*field)) {
            return None;
        }
        let percent = |field| adjustments.get(field) as f32 / 100.0;

        Some(Self {
            exposure_mult: 2f32.powf(adjustments.get(AdjustmentField::Exposure) as f32 * 0.02),
            contrast_factor: (adjustments.get(AdjustmentField::Contrast) as f32 + 100.0) / 100.0,
            highlights: percent(AdjustmentField::Highlights),
            shadows: percent(AdjustmentField::Shadows),
            whites: percent(AdjustmentField::Whites),
            blacks: percent(AdjustmentField::Blacks),
            clarity: percent(AdjustmentField::Clarity),
            dehaze_factor: 1.0 + percent(AdjustmentField::Dehaze) * 0.3,
        })
    }

    /// Applies the stage to one RGBA pixel. Alpha is left alone.
    pub fn apply(&self, px: &mut [f32]) {
        let rgb = &mut px[..3];

        for v in rgb.iter_mut() {
            *v *= self.exposure_mult;
            *v = (*v - 128.0) * self.contrast_factor + 128.0;
        }

        let lum = luminance(rgb[0], rgb[1], rgb[2]);
        let mut delta = 0.0;
        if self.highlights != 0.0 {
            delta += self.highlights * ((lum - 128.0) / 128.0).max(0.0) * 50.0;
        }
        if self.shadows != 0.0 {
            delta += self.shadows * ((128.0 - lum) / 128.0).max(0.0) * 50.0;
        }
        if self.whites != 0.0 {
            delta += self.whites * ((lum - 192.0) / 64.0).max(0.0) * 30.0;
        }
        if self.blacks != 0.0 {
            delta += self.blacks * ((64.0 - lum) / 64.0).max(0.0) * 30.0;
        }
        if delta != 0.0 {
            for v in rgb.iter_mut() {
                *v += delta;
            }
        }

        if self.clarity != 0.0 {
            // Midtones get the full boost, pure black and white none.
            let weight = (1.0 - (lum - 128.0).abs() / 128.0).max(0.0);
            let factor = 1.0 + self.clarity * 0.5 * weight;
            for v in rgb.iter_mut() {
                *v = 128.0 + (*v - 128.0) * factor;
            }
        }

        if self.dehaze_factor != 1.0 {
            for v in rgb.iter_mut() {
                *v = 128.0 + (*v - 128.0) * self.dehaze_factor;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    fn stage(fields: &[(AdjustmentField, i32)]) -> BasicStage {
        let mut adjustments = Adjustments::default();
        for (field, value) in fields {
            adjustments.set(*field, *value);
        }
        BasicStage::from_adjustments(&adjustments).expect("non-neutral")
    }

    fn run(stage: &BasicStage, rgb: [f32; 3]) -> [f32; 4] {
        let mut px = [rgb[0], rgb[1], rgb[2], 255.0];
        stage.apply(&mut px);
        px
    }

    #[test]
    fn neutral_fields_build_no_stage() {
        let mut adjustments = Adjustments::default();
        adjustments.set(AdjustmentField::Grain, 50);
        assert!(BasicStage::from_adjustments(&adjustments).is_none());
    }

    #[test]
    fn exposure_doubles_at_fifty() {
        let px = run(&stage(&[(AdjustmentField::Exposure, 50)]), [100.0, 20.0, 0.0]);
        assert_abs_diff_eq!(px[0], 200.0, epsilon = 1e-3);
        assert_abs_diff_eq!(px[1], 40.0, epsilon = 1e-3);
        assert_abs_diff_eq!(px[2], 0.0, epsilon = 1e-3);
    }

    #[test]
    fn exposure_is_unclamped() {
        let px = run(&stage(&[(AdjustmentField::Exposure, 100)]), [200.0, 200.0, 200.0]);
        assert_abs_diff_eq!(px[0], 800.0, epsilon = 1e-2);
    }

    #[test]
    fn contrast_pivots_on_mid_gray() {
        let s = stage(&[(AdjustmentField::Contrast, 100)]);
        let px = run(&s, [128.0, 138.0, 118.0]);
        assert_abs_diff_eq!(px[0], 128.0);
        assert_abs_diff_eq!(px[1], 148.0);
        assert_abs_diff_eq!(px[2], 108.0);

        let px = run(&stage(&[(AdjustmentField::Contrast, -100)]), [10.0, 250.0, 60.0]);
        assert_eq!(&px[..3], &[128.0, 128.0, 128.0]);
    }

    #[test]
    fn highlights_only_touch_bright_pixels() {
        let s = stage(&[(AdjustmentField::Highlights, 100)]);
        assert_eq!(run(&s, [100.0, 100.0, 100.0])[0], 100.0);
        // lum 256 => mask 1 => +50
        assert_abs_diff_eq!(run(&s, [256.0, 256.0, 256.0])[0], 306.0, epsilon = 1e-3);
    }

    #[test]
    fn shadows_lift_dark_pixels() {
        let s = stage(&[(AdjustmentField::Shadows, 100)]);
        assert_abs_diff_eq!(run(&s, [0.0, 0.0, 0.0])[1], 50.0);
        assert_eq!(run(&s, [200.0, 200.0, 200.0])[1], 200.0);
    }

    #[test]
    fn whites_and_blacks_use_narrow_masks() {
        let whites = stage(&[(AdjustmentField::Whites, -100)]);
        assert_eq!(run(&whites, [180.0, 180.0, 180.0])[0], 180.0);
        assert_abs_diff_eq!(run(&whites, [256.0, 256.0, 256.0])[0], 226.0, epsilon = 1e-3);

        let blacks = stage(&[(AdjustmentField::Blacks, 100)]);
        assert_abs_diff_eq!(run(&blacks, [0.0, 0.0, 0.0])[2], 30.0);
        assert_abs_diff_eq!(run(&blacks, [64.0, 64.0, 64.0])[2], 64.0, epsilon = 1e-3);
    }

    #[test]
    fn clarity_boosts_midtone_contrast() {
        let s = stage(&[(AdjustmentField::Clarity, 100)]);
        let px = run(&s, [148.0, 128.0, 108.0]);
        // lum ~ 131.7, weight ~ 0.97
        assert!(px[0] > 148.0);
        assert!(px[2] < 108.0);
        assert_abs_diff_eq!(px[1], 128.0);
    }

    #[test]
    fn dehaze_scales_around_mid_gray() {
        let px = run(&stage(&[(AdjustmentField::Dehaze, 100)]), [228.0, 128.0, 28.0]);
        assert_abs_diff_eq!(px[0], 258.0, epsilon = 1e-3);
        assert_abs_diff_eq!(px[1], 128.0);
        assert_abs_diff_eq!(px[2], -2.0, epsilon = 1e-3);
    }

    #[test]
    fn alpha_untouched() {
        let px = run(&stage(&[(AdjustmentField::Exposure, 100)]), [1.0, 2.0, 3.0]);
        assert_eq!(px[3], 255.0);
    }
}
