// SPDX-License-Identifier: MPL-2.0
//! HSL-space color adjustments and fade.
//!
//! Per pixel the stage converts to HSL once and applies, in order:
//! per-band shifts, split toning, vibrance and saturation. Fade runs on the
//! resulting RGB.

use crate::domain::editing::{AdjustmentField, Adjustments, HslBand, SplitTone};
use crate::media::color_math::{hsl_to_rgb, hue_band_weights, luminance, rgb_to_hsl, smoothstep};

/// Pixels below this saturation carry no usable hue.
const ACHROMATIC_SATURATION: f32 = 0.01;

/// Degrees of hue rotation per percent of band hue shift.
const HUE_SHIFT_DEGREES: f32 = 0.3;

// =============================================================================
// Band shifts
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
struct BandTable {
    hue: [f32; HslBand::COUNT],
    sat: [f32; HslBand::COUNT],
    lum: [f32; HslBand::COUNT],
}

impl BandTable {
    fn from_adjustments(adjustments: &Adjustments) -> Option<Self> {
        let hsl = adjustments.hsl();
        if hsl.is_neutral() {
            return None;
        }
        let mut table = Self {
            hue: [0.0; HslBand::COUNT],
            sat: [0.0; HslBand::COUNT],
            lum: [0.0; HslBand::COUNT],
        };
        for (i, (_, shift)) in hsl.iter().enumerate() {
            table.hue[i] = shift.hue.value() as f32;
            table.sat[i] = shift.sat.value() as f32;
            table.lum[i] = shift.lum.value() as f32;
        }
        Some(table)
    }

    fn apply(&self, h: &mut f32, s: &mut f32, l: &mut f32) {
        if *s < ACHROMATIC_SATURATION {
            return;
        }
        let weights = hue_band_weights(*h * 360.0);
        let (mut hue, mut sat, mut lum) = (0.0, 0.0, 0.0);
        for (i, weight) in weights.iter().enumerate() {
            if *weight == 0.0 {
                continue;
            }
            hue += self.hue[i] * weight;
            sat += self.sat[i] * weight;
            lum += self.lum[i] * weight;
        }

        if hue != 0.0 {
            *h = (*h + hue * HUE_SHIFT_DEGREES / 360.0).rem_euclid(1.0);
        }
        if sat != 0.0 {
            *s = (*s * (1.0 + sat / 100.0)).clamp(0.0, 1.0);
        }
        if lum != 0.0 {
            *l = (*l + lum / 200.0 * 255.0).clamp(0.0, 255.0);
        }
    }
}

// =============================================================================
// Split toning
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
struct SplitToning {
    highlights: [f32; 3],
    highlight_strength: f32,
    shadows: [f32; 3],
    shadow_strength: f32,
    /// Normalized luminance where shadows hand over to highlights.
    pivot: f32,
}

impl SplitToning {
    fn from_adjustments(adjustments: &Adjustments) -> Option<Self> {
        if !adjustments.has_split_toning() {
            return None;
        }
        let channels = |tone: SplitTone| {
            [
                f32::from(tone.color.r),
                f32::from(tone.color.g),
                f32::from(tone.color.b),
            ]
        };
        let strength = |tone: SplitTone| tone.amount.as_fraction() * 0.5;
        let balance = adjustments.get(AdjustmentField::SplitBalance) as f32;

        Some(Self {
            highlights: channels(adjustments.split_highlights()),
            highlight_strength: strength(adjustments.split_highlights()),
            shadows: channels(adjustments.split_shadows()),
            shadow_strength: strength(adjustments.split_shadows()),
            pivot: (0.5 - balance / 200.0).clamp(0.0, 1.0),
        })
    }

    /// Tints `rgb` toward the highlight and shadow colors, keeping its luma.
    fn apply(&self, rgb: &mut [f32; 3]) {
        let lum_before = luminance(rgb[0], rgb[1], rgb[2]);
        let level = (lum_before / 255.0).clamp(0.0, 1.0);

        let highlight = self.highlight_strength * ramp(level, self.pivot, 1.0);
        let shadow = self.shadow_strength * (1.0 - ramp(level, 0.0, self.pivot));

        for (c, v) in rgb.iter_mut().enumerate() {
            if highlight > 0.0 {
                *v += (self.highlights[c] - *v) * highlight;
            }
            if shadow > 0.0 {
                *v += (self.shadows[c] - *v) * shadow;
            }
        }

        let correction = lum_before - luminance(rgb[0], rgb[1], rgb[2]);
        for v in rgb.iter_mut() {
            *v += correction;
        }
    }
}

/// Smoothstep of `value` across `[lo, hi]`, saturating outside.
fn ramp(value: f32, lo: f32, hi: f32) -> f32 {
    if hi <= lo {
        return if value >= hi { 1.0 } else { 0.0 };
    }
    smoothstep(((value - lo) / (hi - lo)).clamp(0.0, 1.0))
}

// =============================================================================
// Stage
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ColorStage {
    bands: Option<BandTable>,
    split: Option<SplitToning>,
    vibrance: f32,
    saturation_factor: f32,
    fade: f32,
}

impl ColorStage {
    /// Returns `None` when no color parameter would change a pixel.
    ///
    /// Split balance alone has no effect while both split-tone amounts are 0.
    #[must_use]
    pub fn from_adjustments(adjustments: &Adjustments) -> Option<Self> {
        let stage = Self {
            bands: BandTable::from_adjustments(adjustments),
            split: SplitToning::from_adjustments(adjustments),
            vibrance: adjustments.get(AdjustmentField::Vibrance) as f32 / 100.0,
            saturation_factor: (adjustments.get(AdjustmentField::Saturation) as f32 + 100.0)
                / 100.0,
            fade: adjustments.get(AdjustmentField::Fade) as f32 / 100.0,
        };
        (stage.needs_hsl() || stage.fade != 0.0).then_some(stage)
    }

    fn needs_hsl(&self) -> bool {
        self.bands.is_some()
            || self.split.is_some()
            || self.vibrance != 0.0
            || self.saturation_factor != 1.0
    }

    pub fn apply(&self, px: &mut [f32]) {
        if self.needs_hsl() {
            let (mut h, mut s, mut l) = rgb_to_hsl(px[0], px[1], px[2]);

            if let Some(bands) = &self.bands {
                bands.apply(&mut h, &mut s, &mut l);
            }

            if let Some(split) = &self.split {
                let (r, g, b) = hsl_to_rgb(h, s, l);
                let mut rgb = [r, g, b];
                split.apply(&mut rgb);
                (h, s, l) = rgb_to_hsl(rgb[0], rgb[1], rgb[2]);
            }

            if self.vibrance != 0.0 {
                s += self.vibrance * (1.0 - s) * s;
            }
            s = (s * self.saturation_factor).clamp(0.0, 1.0);

            let (r, g, b) = hsl_to_rgb(h, s, l);
            px[0] = r;
            px[1] = g;
            px[2] = b;
        }

        if self.fade != 0.0 {
            let lift = self.fade * 30.0 * 0.5;
            for v in &mut px[..3] {
                *v += (128.0 - *v) * self.fade * 0.3 + lift;
            }
        }
    }
}
