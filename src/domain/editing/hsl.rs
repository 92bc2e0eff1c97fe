// SPDX-License-Identifier: MPL-2.0
//! Per-band HSL shifts and split-toning colors.

use super::newtypes::{AdjustmentPercent, AmountPercent};

// =============================================================================
// HslBand
// =============================================================================

/// One of the eight hue ranges addressed by the HSL panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HslBand {
    Red,
    Orange,
    Yellow,
    Green,
    Aqua,
    Blue,
    Purple,
    Magenta,
}

impl HslBand {
    pub const COUNT: usize = 8;

    /// All bands, ordered by hue.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Red,
        Self::Orange,
        Self::Yellow,
        Self::Green,
        Self::Aqua,
        Self::Blue,
        Self::Purple,
        Self::Magenta,
    ];

    /// Center hue of the band in degrees.
    #[must_use]
    pub fn center_degrees(self) -> f32 {
        match self {
            HslBand::Red => 0.0,
            HslBand::Orange => 30.0,
            HslBand::Yellow => 60.0,
            HslBand::Green => 120.0,
            HslBand::Aqua => 180.0,
            HslBand::Blue => 240.0,
            HslBand::Purple => 285.0,
            HslBand::Magenta => 315.0,
        }
    }

    /// Returns the band's external name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            HslBand::Red => "red",
            HslBand::Orange => "orange",
            HslBand::Yellow => "yellow",
            HslBand::Green => "green",
            HslBand::Aqua => "aqua",
            HslBand::Blue => "blue",
            HslBand::Purple => "purple",
            HslBand::Magenta => "magenta",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|band| band.name() == name)
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// Which component of a band shift is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HslChannel {
    Hue,
    Saturation,
    Luminance,
}

/// Hue, saturation and luminance shift for one band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BandShift {
    pub hue: AdjustmentPercent,
    pub sat: AdjustmentPercent,
    pub lum: AdjustmentPercent,
}

impl BandShift {
    #[must_use]
    pub fn is_neutral(&self) -> bool {
        self.hue.is_neutral() && self.sat.is_neutral() && self.lum.is_neutral()
    }
}

/// Shifts for all eight bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HslAdjustments {
    bands: [BandShift; HslBand::COUNT],
}

impl HslAdjustments {
    #[must_use]
    pub fn band(&self, band: HslBand) -> BandShift {
        self.bands[band.index()]
    }

    /// Sets one channel of one band, clamping to `[-100, 100]`.
    ///
    /// Returns true if the value had to be clamped.
    pub fn set(&mut self, band: HslBand, channel: HslChannel, value: i32) -> bool {
        let clamped = AdjustmentPercent::new(value);
        let shift = &mut self.bands[band.index()];
        match channel {
            HslChannel::Hue => shift.hue = clamped,
            HslChannel::Saturation => shift.sat = clamped,
            HslChannel::Luminance => shift.lum = clamped,
        }
        clamped.value() != value
    }

    /// Iterates over bands paired with their shift.
    pub fn iter(&self) -> impl Iterator<Item = (HslBand, BandShift)> + '_ {
        HslBand::ALL.into_iter().map(|band| (band, self.band(band)))
    }

    #[must_use]
    pub fn is_neutral(&self) -> bool {
        self.bands.iter().all(BandShift::is_neutral)
    }
}

// =============================================================================
// Split toning
// =============================================================================

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#rrggbb` (the leading `#` is optional).
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
        Some(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Formats as lowercase `#rrggbb`.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Tint applied to either the shadows or the highlights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SplitTone {
    pub color: Rgb,
    pub amount: AmountPercent,
}

impl SplitTone {
    #[must_use]
    pub fn new(color: Rgb, amount: i32) -> Self {
        Self {
            color,
            amount: AmountPercent::new(amount),
        }
    }

    #[must_use]
    pub fn is_neutral(&self) -> bool {
        self.amount.is_neutral()
    }
}
