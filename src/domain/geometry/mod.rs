// SPDX-License-Identifier: MPL-2.0
//! Geometry domain types.
//!
//! - [`CropBox`], [`CanvasSize`], [`Point`]: Crop rectangle in canvas pixels
//! - [`AspectRatio`], [`CropPreset`]: Ratio locks and social-media presets
//! - [`RotationAngle`], [`TransformState`]: Source orientation

pub mod crop_box;
pub mod transform;

pub use crop_box::{
    AspectRatio, CanvasSize, CropBox, CropPreset, Point, MIN_CROP_SIZE, RATIO_TOLERANCE,
};
pub use transform::{FlipAxis, RotationAngle, TransformState};
