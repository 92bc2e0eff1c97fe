// SPDX-License-Identifier: MPL-2.0
//! Stateless color conversions and curve interpolation shared by the
//! adjustment stages.
//!
//! HSL values use the editor's 8-bit space: `l` in `[0, 255]`, `s` in
//! `[0, 1]` and `h` normalized to `[0, 1)`.

use crate::domain::editing::{CurvePoint, HslBand, ToneCurve};

/// Rec. 601 luma of an RGB triple.
#[inline]
#[must_use]
pub fn luminance(r: f32, g: f32, b: f32) -> f32 {
    0.299 * r + 0.587 * g + 0.114 * b
}

// =============================================================================
// RGB <-> HSL
// =============================================================================

/// Converts RGB channels in `[0, 255]` to `(h, s, l)`.
///
/// Out-of-range channels are tolerated: a non-positive saturation
/// denominator yields `s = 0` instead of a division by zero.
#[must_use]
pub fn rgb_to_hsl(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return (0.0, 0.0, l);
    }

    let d = max - min;
    let denom = if l > 127.5 {
        510.0 - max - min
    } else {
        max + min
    };
    let s = if denom > 0.0 { d / denom } else { 0.0 };

    let h = if max == r {
        ((g - b) / d + if g < b { 6.0 } else { 0.0 }) / 6.0
    } else if max == g {
        ((b - r) / d + 2.0) / 6.0
    } else {
        ((r - g) / d + 4.0) / 6.0
    };

    (h.rem_euclid(1.0), s, l)
}

/// Converts `(h, s, l)` back to RGB channels in `[0, 255]`.
#[must_use]
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> (f32, f32, f32) {
    if s == 0.0 {
        return (l, l, l);
    }

    let q = if l < 127.5 {
        l * (1.0 + s) / 255.0
    } else {
        (l + s * 255.0 - l * s) / 255.0
    };
    let p = 2.0 * l / 255.0 - q;

    (
        hue_to_rgb(p, q, h + 1.0 / 3.0) * 255.0,
        hue_to_rgb(p, q, h) * 255.0,
        hue_to_rgb(p, q, h - 1.0 / 3.0) * 255.0,
    )
}

fn hue_to_rgb(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

// =============================================================================
// Curves
// =============================================================================

/// Hermite ease `r²(3 - 2r)`.
#[inline]
#[must_use]
pub fn smoothstep(r: f32) -> f32 {
    r * r * (3.0 - 2.0 * r)
}

/// Evaluates a control-point curve at `t`.
///
/// The bracketing segment is eased with [`smoothstep`], so the curve passes
/// exactly through every control point. Inputs left of the first point use
/// the first segment and inputs right of the last point use the last one.
#[must_use]
pub fn evaluate_curve(points: &[CurvePoint], t: f32) -> f32 {
    if points.len() < 2 {
        return t;
    }

    let last = points.len() - 1;
    let segment = if t < points[0].x {
        0
    } else if t > points[last].x {
        last - 1
    } else {
        points
            .windows(2)
            .position(|pair| t >= pair[0].x && t <= pair[1].x)
            .unwrap_or(last - 1)
    };

    let (p1, p2) = (points[segment], points[segment + 1]);
    if p2.x == p1.x || t == p1.x {
        return p1.y;
    }
    if t == p2.x {
        return p2.y;
    }
    let ratio = (t - p1.x) / (p2.x - p1.x);
    p1.y + (p2.y - p1.y) * smoothstep(ratio)
}

/// 256-entry lookup table sampled from a tone curve.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveLut {
    table: [f32; 256],
}

impl CurveLut {
    /// Samples `curve` at `i / 255` for every 8-bit input.
    ///
    /// Entries are rounded to whole 8-bit levels.
    #[must_use]
    pub fn build(curve: &ToneCurve) -> Self {
        let mut table = [0.0; 256];
        for (i, entry) in table.iter_mut().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let t = i as f32 / 255.0;
            *entry = (evaluate_curve(curve.points(), t) * 255.0)
                .round()
                .clamp(0.0, 255.0);
        }
        Self { table }
    }

    /// Maps a channel value through the table.
    ///
    /// The input is rounded and clamped to a table index.
    #[inline]
    #[must_use]
    pub fn lookup(&self, value: f32) -> f32 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let index = value.round().clamp(0.0, 255.0) as usize;
        self.table[index]
    }

    #[must_use]
    pub fn entries(&self) -> &[f32; 256] {
        &self.table
    }
}

// =============================================================================
// Hue bands
// =============================================================================

/// Returns how strongly a hue belongs to each [`HslBand`].
///
/// The hue is split between its nearest band center and the next nearest,
/// with the nearest receiving at least half. Weights sum to 1.
#[must_use]
pub fn hue_band_weights(hue_degrees: f32) -> [f32; HslBand::COUNT] {
    let h = hue_degrees.rem_euclid(360.0);
    let distance = |band: HslBand| {
        let diff = (h - band.center_degrees()).abs();
        diff.min(360.0 - diff)
    };

    let mut primary = 0;
    let mut primary_dist = f32::MAX;
    for (i, band) in HslBand::ALL.iter().enumerate() {
        let dist = distance(*band);
        if dist < primary_dist {
            primary_dist = dist;
            primary = i;
        }
    }

    let mut secondary = (primary + 1) % HslBand::COUNT;
    let mut secondary_dist = f32::MAX;
    for (i, band) in HslBand::ALL.iter().enumerate() {
        if i == primary {
            continue;
        }
        let dist = distance(*band);
        if dist < secondary_dist {
            secondary_dist = dist;
            secondary = i;
        }
    }

    let total = primary_dist + secondary_dist;
    let blend = if total > 0.0 {
        (primary_dist / total).clamp(0.0, 0.5)
    } else {
        0.0
    };

    let mut weights = [0.0; HslBand::COUNT];
    weights[primary] = 1.0 - blend;
    weights[secondary] += blend;
    weights
}
