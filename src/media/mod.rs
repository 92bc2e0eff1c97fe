// SPDX-License-Identifier: MPL-2.0
//! Pixel processing for the editor.
//!
//! This module holds everything that touches pixel data: the RGBA buffer
//! type, color math, geometry transforms, the adjustment pipeline and the
//! container encoders.

pub mod color_math;
pub mod frame_export;
pub mod image;
pub mod image_transform;
pub mod pipeline;

// Re-export commonly used types
pub use frame_export::{export_file_name, Encoder, ExportFormat, ImageEncoder};
pub use image::PixelBuffer;
pub use image_transform::{PixelRegion, ResampleQuality};
pub use pipeline::{AdjustmentPipeline, RenderOptions};
