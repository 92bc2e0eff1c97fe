// SPDX-License-Identifier: MPL-2.0
//! `lens_develop` is a non-destructive parametric image adjustment engine.
//!
//! A decoded RGBA image is edited through an [`editor::EditorContext`]:
//! scalar sliders, a tone curve, per-band HSL shifts and split toning feed
//! the [`media::pipeline`], while crop gestures, orientation and a bounded
//! undo log describe the framing. Exports re-render at full resolution.

#![doc(html_root_url = "https://docs.rs/lens_develop/0.1.0")]

pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod editor;
pub mod error;
pub mod media;

#[cfg(test)]
mod test_utils;
