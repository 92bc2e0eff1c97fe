// SPDX-License-Identifier: MPL-2.0
//! Tone curve control points and named presets.

use std::fmt;

/// One control point of a tone curve, both coordinates in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvePoint {
    pub x: f32,
    pub y: f32,
}

impl CurvePoint {
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Reason a control-point list was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveError {
    /// Fewer than two points.
    TooFewPoints,
    /// First point is not at x = 0 or last point is not at x = 1.
    MissingEndpoint,
    /// Points are not strictly increasing in x.
    NotIncreasing,
    /// A coordinate is NaN, infinite or outside `[0, 1]`.
    OutOfRange,
}

impl fmt::Display for CurveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurveError::TooFewPoints => write!(f, "curve needs at least two points"),
            CurveError::MissingEndpoint => write!(f, "curve must start at x=0 and end at x=1"),
            CurveError::NotIncreasing => write!(f, "curve points must be strictly increasing in x"),
            CurveError::OutOfRange => write!(f, "curve point outside the unit square"),
        }
    }
}

impl std::error::Error for CurveError {}

/// Validated tone curve.
///
/// A curve always has at least two points, starts at x = 0, ends at x = 1
/// and is strictly increasing in x. Anything else is rejected by
/// [`ToneCurve::try_new`] and replaced with the identity by [`ToneCurve::new`].
#[derive(Debug, Clone, PartialEq)]
pub struct ToneCurve {
    points: Vec<CurvePoint>,
}

impl ToneCurve {
    /// The identity curve `[(0,0), (1,1)]`.
    #[must_use]
    pub fn identity() -> Self {
        Self {
            points: vec![CurvePoint::new(0.0, 0.0), CurvePoint::new(1.0, 1.0)],
        }
    }

    /// Validates control points.
    ///
    /// # Errors
    ///
    /// Returns a [`CurveError`] describing the first violated rule.
    pub fn try_new(points: Vec<CurvePoint>) -> Result<Self, CurveError> {
        if points.len() < 2 {
            return Err(CurveError::TooFewPoints);
        }
        let in_unit = |v: f32| v.is_finite() && (0.0..=1.0).contains(&v);
        if points.iter().any(|p| !in_unit(p.x) || !in_unit(p.y)) {
            return Err(CurveError::OutOfRange);
        }
        let first = points[0];
        let last = points[points.len() - 1];
        if first.x != 0.0 || last.x != 1.0 {
            return Err(CurveError::MissingEndpoint);
        }
        if points.windows(2).any(|pair| pair[1].x <= pair[0].x) {
            return Err(CurveError::NotIncreasing);
        }
        Ok(Self { points })
    }

    /// Builds a curve, falling back to the identity for degenerate input.
    #[must_use]
    pub fn new(points: Vec<CurvePoint>) -> Self {
        Self::try_new(points).unwrap_or_else(|_| Self::identity())
    }

    /// Returns the control points, sorted by x.
    #[must_use]
    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    /// Returns true for the two-point diagonal.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.points == [CurvePoint::new(0.0, 0.0), CurvePoint::new(1.0, 1.0)]
    }
}

impl Default for ToneCurve {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<CurvePreset> for ToneCurve {
    fn from(preset: CurvePreset) -> Self {
        Self {
            points: preset.points().to_vec(),
        }
    }
}

// =============================================================================
// Presets
// =============================================================================

/// Named curves offered by the curve selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurvePreset {
    Linear,
    /// Gentle S-curve.
    Contrast,
    /// Lifted blacks, lowered whites.
    Fade,
}

const LINEAR_POINTS: [CurvePoint; 2] = [CurvePoint::new(0.0, 0.0), CurvePoint::new(1.0, 1.0)];
const CONTRAST_POINTS: [CurvePoint; 4] = [
    CurvePoint::new(0.0, 0.0),
    CurvePoint::new(0.25, 0.15),
    CurvePoint::new(0.75, 0.85),
    CurvePoint::new(1.0, 1.0),
];
const FADE_POINTS: [CurvePoint; 2] = [CurvePoint::new(0.0, 0.1), CurvePoint::new(1.0, 0.9)];

impl CurvePreset {
    pub const ALL: [Self; 3] = [Self::Linear, Self::Contrast, Self::Fade];

    /// Returns the preset's control points.
    #[must_use]
    pub fn points(self) -> &'static [CurvePoint] {
        match self {
            CurvePreset::Linear => &LINEAR_POINTS,
            CurvePreset::Contrast => &CONTRAST_POINTS,
            CurvePreset::Fade => &FADE_POINTS,
        }
    }

    /// Returns the selector id.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            CurvePreset::Linear => "linear",
            CurvePreset::Contrast => "contrast",
            CurvePreset::Fade => "fade",
        }
    }

    /// Looks a preset up by selector id.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|preset| preset.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_detected() {
        assert!(ToneCurve::identity().is_identity());
        assert!(ToneCurve::from(CurvePreset::Linear).is_identity());
        assert!(!ToneCurve::from(CurvePreset::Contrast).is_identity());
    }

    #[test]
    fn presets_are_valid_curves() {
        for preset in CurvePreset::ALL {
            assert!(ToneCurve::try_new(preset.points().to_vec()).is_ok());
            assert_eq!(CurvePreset::from_id(preset.id()), Some(preset));
        }
    }

    #[test]
    fn rejects_missing_endpoints() {
        let points = vec![CurvePoint::new(0.1, 0.0), CurvePoint::new(1.0, 1.0)];
        assert_eq!(ToneCurve::try_new(points), Err(CurveError::MissingEndpoint));
    }

    #[test]
    fn rejects_non_increasing_x() {
        let points = vec![
            CurvePoint::new(0.0, 0.0),
            CurvePoint::new(0.5, 0.2),
            CurvePoint::new(0.5, 0.8),
            CurvePoint::new(1.0, 1.0),
        ];
        assert_eq!(ToneCurve::try_new(points), Err(CurveError::NotIncreasing));
    }

    #[test]
    fn rejects_nan_and_single_point() {
        let points = vec![CurvePoint::new(0.0, f32::NAN), CurvePoint::new(1.0, 1.0)];
        assert_eq!(ToneCurve::try_new(points), Err(CurveError::OutOfRange));
        assert_eq!(
            ToneCurve::try_new(vec![CurvePoint::new(0.0, 0.0)]),
            Err(CurveError::TooFewPoints)
        );
    }

    #[test]
    fn degenerate_curve_falls_back_to_identity() {
        let curve = ToneCurve::new(vec![CurvePoint::new(1.0, 1.0), CurvePoint::new(0.0, 0.0)]);
        assert!(curve.is_identity());
    }
}
