// SPDX-License-Identifier: MPL-2.0
//! The full adjustment record edited by the user.

use super::curve::{CurveError, CurvePoint, ToneCurve};
use super::hsl::{HslAdjustments, HslBand, HslChannel, SplitTone};
use super::registry::AdjustmentField;

/// Result of writing a parameter through the intake boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldWrite {
    /// Value actually stored.
    pub stored: i32,
    /// True if the requested value was outside the declared range.
    pub clamped: bool,
}

/// Every editable adjustment parameter.
///
/// Scalar sliders live in a table keyed by [`AdjustmentField`] so that all
/// writes go through the registry's clamping. The default value is neutral
/// everywhere, which makes the pipeline a no-op.
#[derive(Debug, Clone, PartialEq)]
pub struct Adjustments {
    values: [i32; AdjustmentField::COUNT],
    curve: ToneCurve,
    hsl: HslAdjustments,
    split_highlights: SplitTone,
    split_shadows: SplitTone,
}

impl Default for Adjustments {
    fn default() -> Self {
        let mut values = [0; AdjustmentField::COUNT];
        for field in AdjustmentField::ALL {
            values[field.index()] = field.spec().default;
        }
        Self {
            values,
            curve: ToneCurve::identity(),
            hsl: HslAdjustments::default(),
            split_highlights: SplitTone::default(),
            split_shadows: SplitTone::default(),
        }
    }
}

impl Adjustments {
    /// Returns the current value of a scalar slider.
    #[must_use]
    pub fn get(&self, field: AdjustmentField) -> i32 {
        self.values[field.index()]
    }

    /// Writes a scalar slider, clamping silently to its declared range.
    pub fn set(&mut self, field: AdjustmentField, value: i32) -> FieldWrite {
        let stored = field.spec().clamp(value);
        self.values[field.index()] = stored;
        FieldWrite {
            stored,
            clamped: stored != value,
        }
    }

    /// Returns true if the slider sits at its neutral value.
    #[must_use]
    pub fn is_field_neutral(&self, field: AdjustmentField) -> bool {
        self.get(field) == field.spec().default
    }

    #[must_use]
    pub fn curve(&self) -> &ToneCurve {
        &self.curve
    }

    pub fn set_curve(&mut self, curve: ToneCurve) {
        self.curve = curve;
    }

    /// Replaces the curve from raw points, falling back to identity on
    /// degenerate input. The rejection reason is returned for logging.
    pub fn set_curve_points(&mut self, points: Vec<CurvePoint>) -> Result<(), CurveError> {
        match ToneCurve::try_new(points) {
            Ok(curve) => {
                self.curve = curve;
                Ok(())
            }
            Err(err) => {
                self.curve = ToneCurve::identity();
                Err(err)
            }
        }
    }

    #[must_use]
    pub fn hsl(&self) -> &HslAdjustments {
        &self.hsl
    }

    /// Sets one band channel, returning true if the value was clamped.
    pub fn set_hsl(&mut self, band: HslBand, channel: HslChannel, value: i32) -> bool {
        self.hsl.set(band, channel, value)
    }

    #[must_use]
    pub fn split_highlights(&self) -> SplitTone {
        self.split_highlights
    }

    #[must_use]
    pub fn split_shadows(&self) -> SplitTone {
        self.split_shadows
    }

    pub fn set_split_highlights(&mut self, tone: SplitTone) {
        self.split_highlights = tone;
    }

    pub fn set_split_shadows(&mut self, tone: SplitTone) {
        self.split_shadows = tone;
    }

    /// Returns true if split toning has any visible effect.
    #[must_use]
    pub fn has_split_toning(&self) -> bool {
        !self.split_highlights.is_neutral() || !self.split_shadows.is_neutral()
    }

    /// Returns true if every parameter is at its neutral value.
    ///
    /// `splitBalance` only moves the crossover point, so it does not count
    /// when both split-tone amounts are zero.
    #[must_use]
    pub fn is_neutral(&self) -> bool {
        AdjustmentField::ALL
            .into_iter()
            .filter(|field| *field != AdjustmentField::SplitBalance)
            .all(|field| self.is_field_neutral(field))
            && self.curve.is_identity()
            && self.hsl.is_neutral()
            && !self.has_split_toning()
    }

    /// Restores every parameter to its neutral value.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
