// SPDX-License-Identifier: MPL-2.0
//! White balance shift and tone curve.

use crate::domain::editing::{AdjustmentField, Adjustments};
use crate::media::color_math::CurveLut;

#[derive(Debug, Clone, PartialEq)]
pub struct ToneStage {
    temperature: f32,
    tint: f32,
    /// Absent for the identity curve.
    lut: Option<CurveLut>,
}

impl ToneStage {
    /// Returns `None` when temperature, tint and the curve are all neutral.
    ///
    /// The curve table is only sampled for non-identity curves.
    #[must_use]
    pub fn from_adjustments(adjustments: &Adjustments) -> Option<Self> {
        let temperature = adjustments.get(AdjustmentField::Temperature);
        let tint = adjustments.get(AdjustmentField::Tint);
        let curve = adjustments.curve();

        if temperature == 0 && tint == 0 && curve.is_identity() {
            return None;
        }

        Some(Self {
            temperature: temperature as f32,
            tint: tint as f32,
            lut: (!curve.is_identity()).then(|| CurveLut::build(curve)),
        })
    }

    pub fn apply(&self, px: &mut [f32]) {
        let t = self.temperature;
        if t > 0.0 {
            px[0] += t * 0.6;
            px[1] += t * 0.2;
            px[2] -= t * 0.5;
        } else if t < 0.0 {
            px[0] += t * 0.5;
            px[1] += t * 0.1;
            px[2] -= t * 0.6;
        }

        let tint = self.tint;
        if tint != 0.0 {
            let magnitude = tint.abs();
            px[1] -= magnitude * 0.3;
            if tint > 0.0 {
                px[0] += magnitude * 0.15;
            } else {
                px[2] -= magnitude * 0.15;
            }
        }

        if let Some(lut) = &self.lut {
            for v in &mut px[..3] {
                *v = lut.lookup(*v);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::editing::{CurvePoint, CurvePreset};
    use crate::test_utils::assert_abs_diff_eq;

    fn run(adjustments: &Adjustments, rgb: [f32; 3]) -> [f32; 3] {
        let stage = ToneStage::from_adjustments(adjustments).expect("active stage");
        let mut px = [rgb[0], rgb[1], rgb[2], 255.0];
        stage.apply(&mut px);
        [px[0], px[1], px[2]]
    }

    fn assert_rgb(actual: [f32; 3], expected: [f32; 3]) {
        for (a, e) in actual.iter().zip(expected) {
            assert_abs_diff_eq!(*a, e, epsilon = 1e-3);
        }
    }

    #[test]
    fn neutral_builds_nothing() {
        assert!(ToneStage::from_adjustments(&Adjustments::default()).is_none());
    }

    #[test]
    fn identity_curve_skips_lut() {
        let mut adjustments = Adjustments::default();
        adjustments.set(AdjustmentField::Temperature, 10);
        let stage = ToneStage::from_adjustments(&adjustments).expect("active stage");
        assert!(stage.lut.is_none());
    }

    #[test]
    fn warm_temperature_shifts_red_up_blue_down() {
        let mut adjustments = Adjustments::default();
        adjustments.set(AdjustmentField::Temperature, 50);
        assert_rgb(run(&adjustments, [100.0, 100.0, 100.0]), [130.0, 110.0, 75.0]);
    }

    #[test]
    fn cool_temperature_uses_its_own_coefficients() {
        let mut adjustments = Adjustments::default();
        adjustments.set(AdjustmentField::Temperature, -50);
        assert_rgb(run(&adjustments, [100.0, 100.0, 100.0]), [75.0, 95.0, 130.0]);
    }

    #[test]
    fn tint_always_pulls_green_down() {
        let mut adjustments = Adjustments::default();
        adjustments.set(AdjustmentField::Tint, 20);
        assert_rgb(run(&adjustments, [100.0, 100.0, 100.0]), [103.0, 94.0, 100.0]);

        adjustments.set(AdjustmentField::Tint, -20);
        assert_rgb(run(&adjustments, [100.0, 100.0, 100.0]), [100.0, 94.0, 97.0]);
    }

    #[test]
    fn curve_maps_through_lut() {
        let mut adjustments = Adjustments::default();
        adjustments.set_curve(CurvePreset::Fade.into());
        let out = run(&adjustments, [0.0, 255.0, 300.0]);
        assert_eq!(out[0], (0.1f32 * 255.0).round());
        assert_eq!(out[1], (0.9f32 * 255.0).round());
        assert_eq!(out[2], out[1]);
    }

    #[test]
    fn inverted_curve_is_rejected_and_stays_neutral() {
        let mut adjustments = Adjustments::default();
        let result = adjustments.set_curve_points(vec![
            CurvePoint::new(0.0, 1.0),
            CurvePoint::new(0.6, 0.5),
            CurvePoint::new(0.4, 0.2),
            CurvePoint::new(1.0, 0.0),
        ]);
        assert!(result.is_err());
        assert!(ToneStage::from_adjustments(&adjustments).is_none());
    }
}
