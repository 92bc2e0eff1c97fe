// SPDX-License-Identifier: MPL-2.0
//! Orientation of the source image: quarter-turn rotation plus flips.

/// Rotation angle in 90° increments.
///
/// This newtype enforces validity at the type level, ensuring the value
/// is always one of: 0°, 90°, 180°, or 270°.
///
/// # Example
///
/// ```
/// use lens_develop::domain::geometry::RotationAngle;
///
/// let angle = RotationAngle::ZERO.rotate_by(-90);
/// assert_eq!(angle.degrees(), 270);
/// assert!(angle.swaps_dimensions());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RotationAngle(u16);

impl RotationAngle {
    /// No rotation (0°).
    pub const ZERO: Self = Self(0);

    /// Creates a rotation from any degree value.
    ///
    /// Negative values wrap (`-90` is `270`); values that are not a multiple
    /// of 90 are snapped down to the previous quarter turn.
    #[must_use]
    pub fn new(degrees: i32) -> Self {
        let wrapped = degrees.rem_euclid(360);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let snapped = ((wrapped / 90) * 90) as u16;
        Self(snapped)
    }

    /// Returns the angle in degrees.
    #[must_use]
    pub fn degrees(self) -> u16 {
        self.0
    }

    /// Adds `delta` degrees, wrapping into `[0, 360)`.
    #[must_use]
    pub fn rotate_by(self, delta: i32) -> Self {
        Self::new(i32::from(self.0) + delta)
    }

    /// Rotates 90° clockwise.
    #[must_use]
    pub fn rotate_clockwise(self) -> Self {
        self.rotate_by(90)
    }

    /// Rotates 90° counter-clockwise.
    #[must_use]
    pub fn rotate_counterclockwise(self) -> Self {
        self.rotate_by(-90)
    }

    /// Returns true if the angle is not zero.
    #[must_use]
    pub fn is_rotated(self) -> bool {
        self.0 != 0
    }

    /// Returns true for 90° and 270°, where width and height trade places.
    #[must_use]
    pub fn swaps_dimensions(self) -> bool {
        self.0 == 90 || self.0 == 270
    }
}

/// Flip axis requested by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlipAxis {
    Horizontal,
    Vertical,
}

/// Rotation and mirroring applied to the source before adjustments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TransformState {
    pub rotation: RotationAngle,
    pub flip_h: bool,
    pub flip_v: bool,
}

impl TransformState {
    /// Returns true if the transform leaves the source untouched.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        !self.rotation.is_rotated() && !self.flip_h && !self.flip_v
    }

    /// Toggles one flip axis.
    pub fn toggle_flip(&mut self, axis: FlipAxis) {
        match axis {
            FlipAxis::Horizontal => self.flip_h = !self.flip_h,
            FlipAxis::Vertical => self.flip_v = !self.flip_v,
        }
    }

    /// Returns the oriented size of a `width`×`height` source.
    #[must_use]
    pub fn oriented_size(&self, width: u32, height: u32) -> (u32, u32) {
        if self.rotation.swaps_dimensions() {
            (height, width)
        } else {
            (width, height)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_normalizes_to_90_increments() {
        assert_eq!(RotationAngle::new(0).degrees(), 0);
        assert_eq!(RotationAngle::new(45).degrees(), 0);
        assert_eq!(RotationAngle::new(135).degrees(), 90);
        assert_eq!(RotationAngle::new(450).degrees(), 90);
        assert_eq!(RotationAngle::new(-90).degrees(), 270);
        assert_eq!(RotationAngle::new(-360).degrees(), 0);
    }

    #[test]
    fn rotate_by_wraps_both_directions() {
        let angle = RotationAngle::new(270);
        assert_eq!(angle.rotate_clockwise(), RotationAngle::ZERO);
        assert_eq!(RotationAngle::ZERO.rotate_counterclockwise().degrees(), 270);
        assert_eq!(angle.rotate_by(180).degrees(), 90);
    }

    #[test]
    fn full_cycle_returns_to_zero() {
        let mut angle = RotationAngle::ZERO;
        for _ in 0..4 {
            angle = angle.rotate_clockwise();
        }
        assert_eq!(angle, RotationAngle::ZERO);
    }

    #[test]
    fn swaps_dimensions_for_quarter_turns() {
        assert!(!RotationAngle::new(0).swaps_dimensions());
        assert!(RotationAngle::new(90).swaps_dimensions());
        assert!(!RotationAngle::new(180).swaps_dimensions());
        assert!(RotationAngle::new(270).swaps_dimensions());
    }

    #[test]
    fn oriented_size_follows_rotation() {
        let mut transform = TransformState::default();
        assert_eq!(transform.oriented_size(400, 300), (400, 300));
        transform.rotation = RotationAngle::new(90);
        assert_eq!(transform.oriented_size(400, 300), (300, 400));
    }

    #[test]
    fn toggle_flip_is_an_involution() {
        let mut transform = TransformState::default();
        transform.toggle_flip(FlipAxis::Horizontal);
        assert!(transform.flip_h);
        assert!(!transform.is_identity());
        transform.toggle_flip(FlipAxis::Horizontal);
        assert!(transform.is_identity());
    }
}
