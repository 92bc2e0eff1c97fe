// SPDX-License-Identifier: MPL-2.0
//! Domain layer - editing values and geometry with ZERO external dependencies.
//!
//! This module contains pure domain types, value objects, and business rules.
//! It has no dependencies on external crates (except `std`) so snapshots and
//! parameter validation can be tested in isolation.
//!
//! # Modules
//!
//! - [`editing`]: Adjustment record, field registry, tone curve, HSL bands
//!   ([`Adjustments`](editing::Adjustments), [`AdjustmentField`](editing::AdjustmentField),
//!   [`ToneCurve`](editing::ToneCurve))
//! - [`geometry`]: Crop rectangle and orientation
//!   ([`CropBox`](geometry::CropBox), [`AspectRatio`](geometry::AspectRatio),
//!   [`TransformState`](geometry::TransformState))

pub mod editing;
pub mod geometry;
