// SPDX-License-Identifier: MPL-2.0
//! Preview and export rendering.
//!
//! [`RenderOrchestrator`] strings the geometry transforms and the adjustment
//! pipeline together. [`RenderCoalescer`] collapses bursts of render
//! requests so that only the latest one is served.

use std::time::{Duration, Instant};

use super::scheduler::{Scheduler, TimerPurpose, TimerToken, TokenSequence};
use crate::diagnostics::{DiagnosticsHandle, EditorOperation};
use crate::domain::editing::{AdjustmentField, Adjustments};
use crate::domain::geometry::{CanvasSize, TransformState};
use crate::error::Result;
use crate::media::image_transform::{self, PixelRegion, ResampleQuality};
use crate::media::pipeline::{AdjustmentPipeline, RenderOptions};
use crate::media::PixelBuffer;

// =============================================================================
// Canvas Layout
// =============================================================================

/// Display canvas for an oriented source inside a viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasLayout {
    pub canvas: CanvasSize,
    /// Canvas pixels per source pixel, never above 1.
    pub display_scale: f64,
}

impl CanvasLayout {
    /// Fits a `width`×`height` image into `viewport` without upscaling.
    ///
    /// A viewport with a zero edge is unknown and leaves the image at full
    /// size, so the scale is always positive.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn fit((width, height): (u32, u32), viewport: (u32, u32)) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let (viewport_width, viewport_height) = match viewport {
            (0, _) | (_, 0) => (width, height),
            size => size,
        };
        let display_scale = (f64::from(viewport_width) / f64::from(width))
            .min(f64::from(viewport_height) / f64::from(height))
            .min(1.0);
        let scaled = |edge: u32| ((f64::from(edge) * display_scale).round() as u32).max(1);
        Self {
            canvas: CanvasSize::new(scaled(width), scaled(height)),
            display_scale,
        }
    }
}

// =============================================================================
// Render Coalescer
// =============================================================================

/// Keeps at most one render scheduled.
#[derive(Debug)]
pub struct RenderCoalescer {
    interval: Duration,
    pending: Option<TimerToken>,
    tokens: TokenSequence,
}

impl RenderCoalescer {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            pending: None,
            tokens: TokenSequence::new(TimerPurpose::Render),
        }
    }

    /// Schedules a render, replacing any that has not run yet.
    pub fn request(&mut self, scheduler: &mut impl Scheduler) -> TimerToken {
        if let Some(previous) = self.pending.take() {
            scheduler.cancel(previous);
        }
        let token = self.tokens.next_token();
        scheduler.schedule_after(self.interval, token);
        self.pending = Some(token);
        token
    }

    /// Returns true if `token` is the render that should run now.
    pub fn on_timer(&mut self, token: TimerToken) -> bool {
        if self.pending == Some(token) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}

// =============================================================================
// Render Orchestrator
// =============================================================================

/// Runs the full render chain for previews and exports.
#[derive(Debug, Clone, Default)]
pub struct RenderOrchestrator {
    options: RenderOptions,
    diagnostics: Option<DiagnosticsHandle>,
}

impl RenderOrchestrator {
    #[must_use]
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            diagnostics: None,
        }
    }

    /// Attaches a diagnostics handle that receives timing events.
    #[must_use]
    pub fn with_diagnostics(mut self, handle: DiagnosticsHandle) -> Self {
        self.diagnostics = Some(handle);
        self
    }

    #[must_use]
    pub fn options(&self) -> RenderOptions {
        self.options
    }

    /// Renders the whole oriented image at canvas size.
    ///
    /// Order: orientation, downscale to the canvas, lens distortion, then
    /// the adjustment pipeline.
    ///
    /// # Errors
    ///
    /// Fails only if an intermediate buffer cannot be built.
    pub fn render_preview(
        &self,
        source: &PixelBuffer,
        transform: &TransformState,
        adjustments: &Adjustments,
        canvas: CanvasSize,
    ) -> Result<PixelBuffer> {
        let started = Instant::now();
        let oriented = image_transform::orient(source, transform)?;
        let scaled = image_transform::resample(
            &oriented,
            canvas.width,
            canvas.height,
            ResampleQuality::Preview,
        )?;
        let output = self.develop(scaled, adjustments);

        self.log(EditorOperation::Render {
            duration_ms: elapsed_ms(started),
            width: output.width(),
            height: output.height(),
        });
        Ok(output)
    }

    /// Renders `region` of the oriented source at exactly `width`×`height`.
    ///
    /// Distortion is applied to the full oriented image before cropping so
    /// an export matches the preview framing.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::EmptySourceRegion`](crate::error::ExportError::EmptySourceRegion)
    /// if `region` has no pixels inside the oriented source.
    pub fn render_export(
        &self,
        source: &PixelBuffer,
        transform: &TransformState,
        adjustments: &Adjustments,
        region: PixelRegion,
        (width, height): (u32, u32),
    ) -> Result<PixelBuffer> {
        let started = Instant::now();
        let oriented = image_transform::orient(source, transform)?;
        let distortion = adjustments.get(AdjustmentField::Distortion);
        let oriented = image_transform::apply_distortion(&oriented, distortion);
        let cropped = image_transform::crop_region(&oriented, region)?;
        let sized = image_transform::resample(&cropped, width, height, ResampleQuality::Export)?;
        let pipeline = AdjustmentPipeline::new(adjustments, self.options);
        let output = pipeline.process_owned(sized);

        self.log(EditorOperation::Export {
            duration_ms: elapsed_ms(started),
            width: output.width(),
            height: output.height(),
        });
        Ok(output)
    }

    fn develop(&self, buffer: PixelBuffer, adjustments: &Adjustments) -> PixelBuffer {
        let distortion = adjustments.get(AdjustmentField::Distortion);
        let buffer = if distortion == 0 {
            buffer
        } else {
            image_transform::apply_distortion(&buffer, distortion)
        };
        AdjustmentPipeline::new(adjustments, self.options).process_owned(buffer)
    }

    fn log(&self, operation: EditorOperation) {
        if let Some(handle) = &self.diagnostics {
            handle.log_operation(operation);
        }
    }
}

#[allow(clippy::cast_possible_truncation)] // Duration in ms fits comfortably in u64
fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis() as u64
}
