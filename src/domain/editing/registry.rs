// SPDX-License-Identifier: MPL-2.0
//! Static registry of scalar adjustment fields.
//!
//! Every slider the engine understands is declared here once, with its
//! name, neutral default and accepted range. Parameter intake, the
//! pipeline's neutrality checks and property tests all read this table.

// =============================================================================
// FieldSpec
// =============================================================================

/// Declared range and neutral value of one scalar field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Stable external name (matches the collaborator's slider ids).
    pub name: &'static str,
    /// Neutral value at which the field has no visible effect.
    pub default: i32,
    /// Lowest accepted value.
    pub min: i32,
    /// Highest accepted value.
    pub max: i32,
}

impl FieldSpec {
    const fn signed(name: &'static str) -> Self {
        Self {
            name,
            default: 0,
            min: -100,
            max: 100,
        }
    }

    const fn unsigned(name: &'static str) -> Self {
        Self {
            name,
            default: 0,
            min: 0,
            max: 100,
        }
    }

    /// Clamps a value into the declared range.
    #[must_use]
    pub fn clamp(&self, value: i32) -> i32 {
        value.clamp(self.min, self.max)
    }

    /// Returns true if the value lies inside the declared range.
    #[must_use]
    pub fn contains(&self, value: i32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

// =============================================================================
// AdjustmentField
// =============================================================================

/// Identifier of a scalar adjustment slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdjustmentField {
    Exposure,
    Contrast,
    Highlights,
    Shadows,
    Whites,
    Blacks,
    Clarity,
    Dehaze,
    Vibrance,
    Saturation,
    Temperature,
    Tint,
    Sharpening,
    Noise,
    Vignette,
    Grain,
    Fade,
    Distortion,
    SplitBalance,
}

/// Registry table, indexed by `AdjustmentField as usize`.
const REGISTRY: [FieldSpec; AdjustmentField::COUNT] = [
    FieldSpec::signed("exposure"),
    FieldSpec::signed("contrast"),
    FieldSpec::signed("highlights"),
    FieldSpec::signed("shadows"),
    FieldSpec::signed("whites"),
    FieldSpec::signed("blacks"),
    FieldSpec::signed("clarity"),
    FieldSpec::signed("dehaze"),
    FieldSpec::signed("vibrance"),
    FieldSpec::signed("saturation"),
    FieldSpec::signed("temperature"),
    FieldSpec::signed("tint"),
    FieldSpec::unsigned("sharpening"),
    FieldSpec::unsigned("noise"),
    FieldSpec::signed("vignette"),
    FieldSpec::unsigned("grain"),
    FieldSpec::signed("fade"),
    FieldSpec::signed("distortion"),
    FieldSpec::signed("splitBalance"),
];

impl AdjustmentField {
    /// Number of registered fields.
    pub const COUNT: usize = 19;

    /// All fields in registry order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Exposure,
        Self::Contrast,
        Self::Highlights,
        Self::Shadows,
        Self::Whites,
        Self::Blacks,
        Self::Clarity,
        Self::Dehaze,
        Self::Vibrance,
        Self::Saturation,
        Self::Temperature,
        Self::Tint,
        Self::Sharpening,
        Self::Noise,
        Self::Vignette,
        Self::Grain,
        Self::Fade,
        Self::Distortion,
        Self::SplitBalance,
    ];

    /// Returns the registry entry for this field.
    #[must_use]
    pub fn spec(self) -> &'static FieldSpec {
        &REGISTRY[self.index()]
    }

    /// Returns the external name of this field.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.spec().name
    }

    /// Looks a field up by its external name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for AdjustmentField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
