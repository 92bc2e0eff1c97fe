// SPDX-License-Identifier: MPL-2.0
//! Crop rectangle, canvas size and aspect-ratio value objects.

/// Smallest crop edge in canvas pixels.
pub const MIN_CROP_SIZE: f64 = 20.0;

/// Tolerance used when checking that a box honours its aspect ratio.
pub const RATIO_TOLERANCE: f64 = 1e-6;

// =============================================================================
// Point / CanvasSize
// =============================================================================

/// Pointer position in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Size of the display canvas in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn width_f64(self) -> f64 {
        f64::from(self.width)
    }

    #[must_use]
    pub fn height_f64(self) -> f64 {
        f64::from(self.height)
    }

    /// Minimum crop width on this canvas.
    ///
    /// Normally [`MIN_CROP_SIZE`], unless the canvas itself is narrower.
    #[must_use]
    pub fn min_width(self) -> f64 {
        MIN_CROP_SIZE.min(self.width_f64())
    }

    /// Minimum crop height on this canvas.
    #[must_use]
    pub fn min_height(self) -> f64 {
        MIN_CROP_SIZE.min(self.height_f64())
    }
}

// =============================================================================
// AspectRatio
// =============================================================================

/// Locked width/height ratio of the crop box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectRatio(f64);

impl AspectRatio {
    /// Creates a ratio, rejecting zero, negative and non-finite values.
    #[must_use]
    pub fn new(ratio: f64) -> Option<Self> {
        (ratio.is_finite() && ratio > 0.0).then_some(Self(ratio))
    }

    /// Parses `"w:h"`, e.g. `"16:9"`.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let (w, h) = text.split_once(':')?;
        let w: f64 = w.trim().parse().ok()?;
        let h: f64 = h.trim().parse().ok()?;
        if h == 0.0 {
            return None;
        }
        Self::new(w / h)
    }

    /// Returns width divided by height.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

// =============================================================================
// CropBox
// =============================================================================

/// Crop rectangle in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropBox {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Box covering the whole canvas.
    #[must_use]
    pub fn full(canvas: CanvasSize) -> Self {
        Self::new(0.0, 0.0, canvas.width_f64(), canvas.height_f64())
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Returns true if the point lies inside the box (edges included).
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }

    /// Returns true if the box satisfies the minimum-size and canvas-bound
    /// invariants.
    #[must_use]
    pub fn is_valid_within(&self, canvas: CanvasSize) -> bool {
        let eps = 1e-9;
        self.x >= 0.0
            && self.y >= 0.0
            && self.width + eps >= canvas.min_width()
            && self.height + eps >= canvas.min_height()
            && self.right() <= canvas.width_f64() + eps
            && self.bottom() <= canvas.height_f64() + eps
    }

    /// Returns true if the box honours the ratio within [`RATIO_TOLERANCE`].
    #[must_use]
    pub fn matches_ratio(&self, ratio: AspectRatio) -> bool {
        self.height > 0.0 && (self.width / self.height - ratio.value()).abs() < RATIO_TOLERANCE
    }
}

// =============================================================================
// CropPreset
// =============================================================================

/// Social-media crop preset: locked ratio plus fixed export size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CropPreset {
    InstagramSquare,
    InstagramPortrait,
    InstagramStory,
    YoutubeThumbnail,
    FacebookPost,
    TwitterPost,
}

impl CropPreset {
    pub const ALL: [Self; 6] = [
        Self::InstagramSquare,
        Self::InstagramPortrait,
        Self::InstagramStory,
        Self::YoutubeThumbnail,
        Self::FacebookPost,
        Self::TwitterPost,
    ];

    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            CropPreset::InstagramSquare => "instagram-square",
            CropPreset::InstagramPortrait => "instagram-portrait",
            CropPreset::InstagramStory => "instagram-story",
            CropPreset::YoutubeThumbnail => "youtube-thumbnail",
            CropPreset::FacebookPost => "facebook-post",
            CropPreset::TwitterPost => "twitter-post",
        }
    }

    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|preset| preset.id() == id)
    }

    /// Export size in output pixels.
    #[must_use]
    pub fn export_size(self) -> (u32, u32) {
        match self {
            CropPreset::InstagramSquare => (1080, 1080),
            CropPreset::InstagramPortrait => (1080, 1350),
            CropPreset::InstagramStory => (1080, 1920),
            CropPreset::YoutubeThumbnail => (1280, 720),
            CropPreset::FacebookPost => (1200, 630),
            CropPreset::TwitterPost => (1600, 900),
        }
    }

    /// Locked aspect ratio of the crop box.
    #[must_use]
    pub fn ratio(self) -> AspectRatio {
        let value = match self {
            CropPreset::InstagramSquare => 1.0,
            CropPreset::InstagramPortrait => 4.0 / 5.0,
            CropPreset::InstagramStory => 9.0 / 16.0,
            CropPreset::YoutubeThumbnail | CropPreset::TwitterPost => 16.0 / 9.0,
            CropPreset::FacebookPost => 1.91,
        };
        AspectRatio(value)
    }
}
