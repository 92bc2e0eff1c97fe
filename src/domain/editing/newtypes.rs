// SPDX-License-Identifier: MPL-2.0
//! Editing newtypes.
//!
//! This module provides type-safe wrappers for editing values,
//! ensuring they are always within valid ranges.

use std::time::Duration;

// =============================================================================
// Adjustment Bounds
// =============================================================================

/// Signed adjustment bounds (-100 to +100).
pub mod adjustment_bounds {
    /// Minimum adjustment value.
    pub const MIN: i32 = -100;
    /// Maximum adjustment value.
    pub const MAX: i32 = 100;
    /// Default (neutral) adjustment value.
    pub const DEFAULT: i32 = 0;
}

// =============================================================================
// AdjustmentPercent
// =============================================================================

/// Signed adjustment percentage, guaranteed to be within valid range (-100 to +100).
///
/// Used for the per-band HSL shifts. A value of 0 means no adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct AdjustmentPercent(i32);

impl AdjustmentPercent {
    /// Creates a new adjustment value, clamping to the valid range.
    #[must_use]
    pub fn new(value: i32) -> Self {
        Self(value.clamp(adjustment_bounds::MIN, adjustment_bounds::MAX))
    }

    /// Returns the raw value.
    #[must_use]
    pub fn value(self) -> i32 {
        self.0
    }

    /// Returns the value as a fraction in `[-1.0, 1.0]`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_fraction(self) -> f32 {
        self.0 as f32 / 100.0
    }

    /// Returns whether this represents no adjustment (value is 0).
    #[must_use]
    pub fn is_neutral(self) -> bool {
        self.0 == adjustment_bounds::DEFAULT
    }

    /// Returns whether the adjustment is at the minimum value.
    #[must_use]
    pub fn is_min(self) -> bool {
        self.0 <= adjustment_bounds::MIN
    }

    /// Returns whether the adjustment is at the maximum value.
    #[must_use]
    pub fn is_max(self) -> bool {
        self.0 >= adjustment_bounds::MAX
    }
}

// =============================================================================
// Amount Bounds
// =============================================================================

/// Unsigned amount bounds (0 to 100).
pub mod amount_bounds {
    /// Minimum amount.
    pub const MIN: i32 = 0;
    /// Maximum amount.
    pub const MAX: i32 = 100;
    /// Default (neutral) amount.
    pub const DEFAULT: i32 = 0;
}

// =============================================================================
// AmountPercent
// =============================================================================

/// Strength of an effect from 0 to 100 (split-toning amount).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct AmountPercent(i32);

impl AmountPercent {
    /// Creates a new amount, clamping to the valid range.
    #[must_use]
    pub fn new(value: i32) -> Self {
        Self(value.clamp(amount_bounds::MIN, amount_bounds::MAX))
    }

    /// Returns the raw value.
    #[must_use]
    pub fn value(self) -> i32 {
        self.0
    }

    /// Returns the value as a fraction in `[0.0, 1.0]`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_fraction(self) -> f32 {
        self.0 as f32 / 100.0
    }

    /// Returns whether this amount has no effect.
    #[must_use]
    pub fn is_neutral(self) -> bool {
        self.0 == amount_bounds::DEFAULT
    }
}

// =============================================================================
// History Capacity Bounds
// =============================================================================

/// History capacity bounds (1 to 200 snapshots).
pub mod history_capacity_bounds {
    /// Minimum number of snapshots kept.
    pub const MIN: usize = 1;
    /// Maximum number of snapshots kept.
    pub const MAX: usize = 200;
    /// Default number of snapshots kept.
    pub const DEFAULT: usize = 30;
}

// =============================================================================
// HistoryCapacity
// =============================================================================

/// Maximum number of snapshots retained by the undo log.
///
/// # Example
///
/// ```
/// use lens_develop::domain::editing::HistoryCapacity;
///
/// assert_eq!(HistoryCapacity::default().value(), 30);
/// assert_eq!(HistoryCapacity::new(0).value(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryCapacity(usize);

impl HistoryCapacity {
    /// Creates a new capacity, clamping to valid range.
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(history_capacity_bounds::MIN, history_capacity_bounds::MAX))
    }

    /// Returns the value as usize.
    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl Default for HistoryCapacity {
    fn default() -> Self {
        Self(history_capacity_bounds::DEFAULT)
    }
}

// =============================================================================
// Debounce Delay Bounds
// =============================================================================

/// Debounce delay bounds in milliseconds.
pub mod debounce_bounds {
    /// Minimum quiet period (commit on the next timer tick).
    pub const MIN_MS: u64 = 0;
    /// Maximum quiet period.
    pub const MAX_MS: u64 = 5_000;
    /// Default quiet period.
    pub const DEFAULT_MS: u64 = 300;
}

// =============================================================================
// DebounceDelay
// =============================================================================

/// Quiet period after which a burst of slider edits is committed to history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceDelay(u64);

impl DebounceDelay {
    /// Creates a new delay from milliseconds, clamping to valid range.
    #[must_use]
    pub fn from_millis(ms: u64) -> Self {
        Self(ms.clamp(debounce_bounds::MIN_MS, debounce_bounds::MAX_MS))
    }

    /// Returns the delay in milliseconds.
    #[must_use]
    pub fn as_millis(self) -> u64 {
        self.0
    }

    /// Returns the delay as a [`Duration`].
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl Default for DebounceDelay {
    fn default() -> Self {
        Self(debounce_bounds::DEFAULT_MS)
    }
}

// =============================================================================
// Export Quality Bounds
// =============================================================================

/// Lossy encoder quality bounds (1 to 100).
pub mod quality_bounds {
    /// Lowest accepted quality.
    pub const MIN: u8 = 1;
    /// Highest accepted quality.
    pub const MAX: u8 = 100;
    /// Default quality.
    pub const DEFAULT: u8 = 92;
}

// =============================================================================
// ExportQuality
// =============================================================================

/// Quality handed to lossy encoders. Ignored for PNG.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportQuality(u8);

impl ExportQuality {
    /// Creates a new quality value, clamping to valid range.
    #[must_use]
    pub fn new(value: u8) -> Self {
        Self(value.clamp(quality_bounds::MIN, quality_bounds::MAX))
    }

    /// Returns the raw quality value.
    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for ExportQuality {
    fn default() -> Self {
        Self(quality_bounds::DEFAULT)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // AdjustmentPercent tests
    // -------------------------------------------------------------------------

    #[test]
    fn adjustment_percent_clamps() {
        assert_eq!(AdjustmentPercent::new(-150).value(), adjustment_bounds::MIN);
        assert_eq!(AdjustmentPercent::new(150).value(), adjustment_bounds::MAX);
        assert_eq!(AdjustmentPercent::new(42).value(), 42);
    }

    #[test]
    fn adjustment_percent_neutral_and_bounds() {
        assert!(AdjustmentPercent::default().is_neutral());
        assert!(AdjustmentPercent::new(-100).is_min());
        assert!(AdjustmentPercent::new(100).is_max());
        assert!(!AdjustmentPercent::new(5).is_neutral());
    }

    #[test]
    fn adjustment_percent_fraction() {
        assert!((AdjustmentPercent::new(-50).as_fraction() + 0.5).abs() < f32::EPSILON);
    }

    // -------------------------------------------------------------------------
    // AmountPercent tests
    // -------------------------------------------------------------------------

    #[test]
    fn amount_percent_rejects_negative() {
        assert_eq!(AmountPercent::new(-20).value(), 0);
        assert!(AmountPercent::new(-20).is_neutral());
        assert_eq!(AmountPercent::new(250).value(), 100);
    }

    // -------------------------------------------------------------------------
    // HistoryCapacity / DebounceDelay / ExportQuality tests
    // -------------------------------------------------------------------------

    #[test]
    fn history_capacity_clamps() {
        assert_eq!(HistoryCapacity::new(0).value(), history_capacity_bounds::MIN);
        assert_eq!(HistoryCapacity::new(10_000).value(), history_capacity_bounds::MAX);
        assert_eq!(HistoryCapacity::default().value(), 30);
    }

    #[test]
    fn debounce_delay_converts_to_duration() {
        assert_eq!(
            DebounceDelay::default().as_duration(),
            Duration::from_millis(300)
        );
        assert_eq!(DebounceDelay::from_millis(60_000).as_millis(), debounce_bounds::MAX_MS);
    }

    #[test]
    fn export_quality_clamps() {
        assert_eq!(ExportQuality::new(0).value(), quality_bounds::MIN);
        assert_eq!(ExportQuality::new(200).value(), quality_bounds::MAX);
        assert_eq!(ExportQuality::default().value(), quality_bounds::DEFAULT);
    }
}
