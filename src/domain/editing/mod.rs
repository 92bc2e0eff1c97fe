// SPDX-License-Identifier: MPL-2.0
//! Editing domain types.
//!
//! This module provides pure domain types for parametric adjustments:
//! - [`Adjustments`]: The full editable parameter record
//! - [`AdjustmentField`] / [`FieldSpec`]: Static slider registry
//! - [`ToneCurve`] / [`CurvePreset`]: Control-point tone curves
//! - [`HslAdjustments`] / [`SplitTone`]: Per-band shifts and split toning
//! - [`HistoryCapacity`], [`DebounceDelay`], [`ExportQuality`]: Bounded settings

pub mod adjustments;
pub mod curve;
pub mod hsl;
pub mod newtypes;
pub mod registry;

pub use adjustments::{Adjustments, FieldWrite};
pub use curve::{CurveError, CurvePoint, CurvePreset, ToneCurve};
pub use hsl::{BandShift, HslAdjustments, HslBand, HslChannel, Rgb, SplitTone};
pub use newtypes::{
    AdjustmentPercent, AmountPercent, DebounceDelay, ExportQuality, HistoryCapacity,
};
pub use registry::{AdjustmentField, FieldSpec};
