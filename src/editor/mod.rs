// SPDX-License-Identifier: MPL-2.0
//! Editing session: parameter intake, crop gestures, undo and rendering.
//!
//! [`EditorContext`] owns the source image and every piece of edit state.
//! It never blocks: debounced history commits and coalesced renders are
//! delegated to a [`Scheduler`], and fired tokens come back through
//! [`EditorContext::on_timer`].
//!
//! # Example
//!
//! ```
//! use lens_develop::config::Config;
//! use lens_develop::domain::editing::AdjustmentField;
//! use lens_develop::editor::{EditorContext, ManualScheduler};
//! use lens_develop::media::PixelBuffer;
//!
//! let source = PixelBuffer::filled(64, 48, [120, 90, 60, 255]);
//! let mut editor = EditorContext::new(source, (1280, 800), &Config::default(), ManualScheduler::new());
//!
//! editor.set_adjustment(AdjustmentField::Exposure, 25);
//! let frame = editor.render().expect("preview");
//! assert_eq!(frame.dimensions(), (64, 48));
//! ```

pub mod crop;
pub mod export;
pub mod history;
pub mod render;
pub mod scheduler;

pub use crop::{CropGeometry, CropGesture, CropHandle};
pub use export::{
    join_export, resolve_dimensions, spawn_export, ExportJob, ExportRequest, ExportedImage,
};
pub use history::{HistoryManager, HistorySnapshot};
pub use render::{CanvasLayout, RenderCoalescer, RenderOrchestrator};
pub use scheduler::{ManualScheduler, Scheduler, TimerPurpose, TimerToken, TokioScheduler};

use std::sync::Arc;

use crate::config::Config;
use crate::diagnostics::{
    DiagnosticsHandle, EditorAction, EditorOperation, ErrorEvent, ErrorType, WarningEvent,
    WarningType,
};
use crate::domain::editing::{
    AdjustmentField, Adjustments, CurvePoint, CurvePreset, ExportQuality, FieldWrite, HslBand,
    HslChannel, Rgb, SplitTone,
};
use crate::domain::geometry::{AspectRatio, CropBox, CropPreset, FlipAxis, Point, TransformState};
use crate::error::{Error, Result};
use crate::media::frame_export::{Encoder, ExportFormat, ImageEncoder};
use crate::media::pipeline::RenderOptions;
use crate::media::PixelBuffer;

/// What a fired timer token turned into.
#[derive(Debug, Clone, PartialEq)]
pub enum TimerOutcome {
    /// A debounced snapshot was pushed to the undo log.
    Committed,
    /// The latest coalesced render ran.
    Rendered(PixelBuffer),
    /// The token was superseded or unknown.
    Stale,
}

/// A single image editing session.
#[derive(Debug)]
pub struct EditorContext<S: Scheduler = ManualScheduler> {
    source: Arc<PixelBuffer>,
    viewport: (u32, u32),
    layout: CanvasLayout,
    adjustments: Adjustments,
    transform: TransformState,
    crop: CropGeometry,
    export_size: Option<(u32, u32)>,
    history: HistoryManager,
    coalescer: RenderCoalescer,
    renderer: RenderOrchestrator,
    scheduler: S,
    default_format: ExportFormat,
    default_quality: ExportQuality,
    diagnostics: Option<DiagnosticsHandle>,
}

impl<S: Scheduler> EditorContext<S> {
    /// Starts a session on a decoded image.
    ///
    /// The canvas fits the image into `viewport` without upscaling, the crop
    /// box covers the whole canvas and the undo log holds the neutral state.
    pub fn new(source: PixelBuffer, viewport: (u32, u32), config: &Config, scheduler: S) -> Self {
        let layout = CanvasLayout::fit(source.dimensions(), viewport);
        let history = HistoryManager::new(config.history.capacity(), config.history.debounce());
        let mut editor = Self {
            source: Arc::new(source),
            viewport,
            layout,
            adjustments: Adjustments::default(),
            transform: TransformState::default(),
            crop: CropGeometry::new(layout.canvas),
            export_size: None,
            history,
            coalescer: RenderCoalescer::new(config.render.frame_interval()),
            renderer: RenderOrchestrator::new(RenderOptions::from(&config.render)),
            scheduler,
            default_format: config.export.format(),
            default_quality: config.export.quality(),
            diagnostics: None,
        };
        let initial = editor.snapshot();
        editor.history.save_immediate(initial, &mut editor.scheduler);
        editor
    }

    /// Attaches a diagnostics handle for actions, timings and warnings.
    #[must_use]
    pub fn with_diagnostics(mut self, handle: DiagnosticsHandle) -> Self {
        let (width, height) = self.source.dimensions();
        handle.log_action(EditorAction::LoadImage { width, height });
        self.renderer = self.renderer.clone().with_diagnostics(handle.clone());
        self.diagnostics = Some(handle);
        self
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn source(&self) -> &PixelBuffer {
        &self.source
    }

    #[must_use]
    pub fn adjustments(&self) -> &Adjustments {
        &self.adjustments
    }

    #[must_use]
    pub fn transform(&self) -> TransformState {
        self.transform
    }

    #[must_use]
    pub fn crop(&self) -> &CropGeometry {
        &self.crop
    }

    #[must_use]
    pub fn crop_box(&self) -> CropBox {
        self.crop.crop_box()
    }

    #[must_use]
    pub fn layout(&self) -> CanvasLayout {
        self.layout
    }

    #[must_use]
    pub fn export_size(&self) -> Option<(u32, u32)> {
        self.export_size
    }

    #[must_use]
    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Mutable scheduler access, for hosts that drive the clock or receive
    /// fired tokens.
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    // -------------------------------------------------------------------------
    // Parameter intake
    // -------------------------------------------------------------------------

    /// Writes a slider value. Out-of-range values are clamped and reported
    /// as a warning.
    pub fn set_adjustment(&mut self, field: AdjustmentField, value: i32) -> FieldWrite {
        let write = self.adjustments.set(field, value);
        if write.clamped {
            self.warn(
                WarningType::ParameterClamped,
                format!("{field} = {value} clamped to {}", write.stored),
            );
        }
        self.parameter_changed();
        write
    }

    /// Writes a slider by its external name. Unknown names are ignored.
    pub fn set_adjustment_by_name(&mut self, name: &str, value: i32) -> Option<FieldWrite> {
        match AdjustmentField::from_name(name) {
            Some(field) => Some(self.set_adjustment(field, value)),
            None => {
                self.warn(WarningType::Other, format!("unknown adjustment '{name}'"));
                None
            }
        }
    }

    /// Replaces the tone curve. Degenerate point lists fall back to the
    /// identity curve.
    pub fn set_curve(&mut self, points: Vec<CurvePoint>) {
        if let Err(err) = self.adjustments.set_curve_points(points) {
            self.warn(WarningType::DegenerateCurve, err.to_string());
        }
        self.parameter_changed();
    }

    pub fn apply_curve_preset(&mut self, preset: CurvePreset) {
        self.set_curve(preset.points().to_vec());
    }

    /// Sets one HSL band channel. Returns true if the value was clamped.
    pub fn set_hsl(&mut self, band: HslBand, channel: HslChannel, value: i32) -> bool {
        let clamped = self.adjustments.set_hsl(band, channel, value);
        if clamped {
            self.warn(
                WarningType::ParameterClamped,
                format!("{} {channel:?} = {value} clamped", band.name()),
            );
        }
        self.parameter_changed();
        clamped
    }

    pub fn set_split_highlights(&mut self, color: Rgb, amount: i32) {
        let tone = self.split_tone(color, amount);
        self.adjustments.set_split_highlights(tone);
        self.parameter_changed();
    }

    pub fn set_split_shadows(&mut self, color: Rgb, amount: i32) {
        let tone = self.split_tone(color, amount);
        self.adjustments.set_split_shadows(tone);
        self.parameter_changed();
    }

    fn split_tone(&self, color: Rgb, amount: i32) -> SplitTone {
        let tone = SplitTone::new(color, amount);
        if tone.amount.value() != amount {
            self.warn(
                WarningType::ParameterClamped,
                format!("split amount {amount} clamped to {}", tone.amount.value()),
            );
        }
        tone
    }

    /// Returns every adjustment to neutral. Geometry is kept.
    pub fn reset_adjustments(&mut self) {
        self.adjustments.reset();
        self.log_action(EditorAction::ResetAdjustments);
        self.commit_now();
        self.request_render();
    }

    // -------------------------------------------------------------------------
    // Crop gestures
    // -------------------------------------------------------------------------

    /// Starts a drag (no handle) or a handle resize.
    pub fn gesture_start(&mut self, pointer: Point, handle: Option<CropHandle>) -> bool {
        self.crop.gesture_start(pointer, handle)
    }

    pub fn gesture_move(&mut self, pointer: Point) {
        self.crop.gesture_move(pointer);
    }

    /// Finishes the gesture and commits the box. Returns true if a gesture
    /// was active.
    pub fn gesture_end(&mut self) -> bool {
        let ended = self.crop.gesture_end();
        if ended {
            self.log_action(EditorAction::CropGestureEnd);
            self.commit_now();
        }
        ended
    }

    // -------------------------------------------------------------------------
    // Discrete actions
    // -------------------------------------------------------------------------

    /// Rotates by `degrees` (a multiple of 90). The canvas is refitted and
    /// the crop box reset to it, keeping a locked ratio.
    pub fn rotate(&mut self, degrees: i32) {
        self.transform.rotation = self.transform.rotation.rotate_by(degrees);
        self.relayout();
        self.log_action(EditorAction::Rotate {
            degrees: self.transform.rotation.degrees(),
        });
        self.commit_now();
        self.request_render();
    }

    pub fn flip(&mut self, axis: FlipAxis) {
        self.transform.toggle_flip(axis);
        self.log_action(EditorAction::Flip {
            axis: format!("{axis:?}").to_lowercase(),
        });
        self.commit_now();
        self.request_render();
    }

    /// Locks the preset's ratio and fixes the export size.
    pub fn apply_preset(&mut self, preset: CropPreset) {
        self.export_size = Some(preset.export_size());
        self.crop.apply_aspect_ratio(Some(preset.ratio()));
        self.log_action(EditorAction::ApplyPreset {
            preset: preset.id().to_string(),
        });
        self.commit_now();
    }

    /// Locks a ratio, or frees the box with `None`. Clears any preset
    /// export size.
    pub fn set_aspect_ratio(&mut self, ratio: Option<AspectRatio>) {
        self.export_size = None;
        self.crop.apply_aspect_ratio(ratio);
        self.log_action(EditorAction::SetAspectRatio {
            ratio: ratio.map(AspectRatio::value),
        });
        self.commit_now();
    }

    /// Steps back in the undo log. Returns false at the start of the log.
    pub fn undo(&mut self) -> bool {
        if self.history.flush(&mut self.scheduler) {
            self.log_commit();
        }
        let Some(snapshot) = self.history.undo().cloned() else {
            return false;
        };
        self.log_action(EditorAction::Undo);
        self.apply_snapshot(&snapshot);
        true
    }

    /// Steps forward in the undo log. Returns false at the end of the log.
    pub fn redo(&mut self) -> bool {
        if self.history.flush(&mut self.scheduler) {
            self.log_commit();
        }
        let Some(snapshot) = self.history.redo().cloned() else {
            return false;
        };
        self.log_action(EditorAction::Redo);
        self.apply_snapshot(&snapshot);
        true
    }

    // -------------------------------------------------------------------------
    // Snapshots
    // -------------------------------------------------------------------------

    /// Captures the full editable state.
    #[must_use]
    pub fn snapshot(&self) -> HistorySnapshot {
        HistorySnapshot {
            crop_box: self.crop.crop_box(),
            adjustments: self.adjustments.clone(),
            aspect_ratio: self.crop.aspect_ratio(),
            export_size: self.export_size,
            transform: self.transform,
        }
    }

    /// Puts the editor into `snapshot`'s state and commits it as a new
    /// history entry.
    pub fn restore(&mut self, snapshot: &HistorySnapshot) {
        self.apply_snapshot(snapshot);
        self.commit_now();
    }

    fn apply_snapshot(&mut self, snapshot: &HistorySnapshot) {
        let rotated = snapshot.transform.rotation != self.transform.rotation;
        self.adjustments = snapshot.adjustments.clone();
        self.transform = snapshot.transform;
        self.export_size = snapshot.export_size;
        if rotated {
            self.relayout();
        }
        self.crop.restore(snapshot.crop_box, snapshot.aspect_ratio);
        self.request_render();
    }

    // -------------------------------------------------------------------------
    // Timers and rendering
    // -------------------------------------------------------------------------

    /// Handles a token fired by the scheduler.
    ///
    /// # Errors
    ///
    /// Returns an error if a due render fails.
    pub fn on_timer(&mut self, token: TimerToken) -> Result<TimerOutcome> {
        match token.purpose {
            TimerPurpose::HistoryCommit => {
                if self.history.on_timer(token) {
                    self.log_commit();
                    Ok(TimerOutcome::Committed)
                } else {
                    Ok(TimerOutcome::Stale)
                }
            }
            TimerPurpose::Render => {
                if self.coalescer.on_timer(token) {
                    self.render().map(TimerOutcome::Rendered)
                } else {
                    Ok(TimerOutcome::Stale)
                }
            }
        }
    }

    /// Renders the preview at canvas size right away.
    ///
    /// # Errors
    ///
    /// Returns an error if an intermediate buffer cannot be built.
    pub fn render(&self) -> Result<PixelBuffer> {
        self.renderer.render_preview(
            &self.source,
            &self.transform,
            &self.adjustments,
            self.layout.canvas,
        )
    }

    /// Schedules a coalesced preview render.
    pub fn request_render(&mut self) -> TimerToken {
        self.coalescer.request(&mut self.scheduler)
    }

    // -------------------------------------------------------------------------
    // Export
    // -------------------------------------------------------------------------

    /// Builds a request for the current crop with the configured format
    /// and quality.
    #[must_use]
    pub fn export_request(&self) -> ExportRequest {
        ExportRequest {
            crop_box: self.crop.crop_box(),
            display_scale: self.layout.display_scale,
            format: self.default_format,
            quality: self.default_quality,
            resize: None,
            export_size: self.export_size,
        }
    }

    /// Captures the current edit as an owned job for deferred export.
    #[must_use]
    pub fn export_job(&self, request: ExportRequest) -> ExportJob {
        if let Some(handle) = &self.diagnostics {
            handle.log_action(EditorAction::Export {
                format: request.format.to_string(),
            });
        }
        ExportJob::new(
            Arc::clone(&self.source),
            self.transform,
            self.adjustments.clone(),
            request,
            self.renderer.clone(),
        )
    }

    /// Renders and encodes `request` with the `image` crate codecs.
    ///
    /// The result carries both the rendered RGBA pixels and the encoded
    /// bytes.
    ///
    /// # Errors
    ///
    /// Returns an [`ExportError`](crate::error::ExportError) when the request
    /// is invalid or encoding fails.
    pub fn export(&self, request: ExportRequest) -> Result<ExportedImage> {
        self.export_with(&ImageEncoder, request)
    }

    /// Like [`EditorContext::export`] with a caller-supplied encoder.
    ///
    /// # Errors
    ///
    /// Returns an [`ExportError`](crate::error::ExportError) when the request
    /// is invalid or encoding fails.
    pub fn export_with(
        &self,
        encoder: &impl Encoder,
        request: ExportRequest,
    ) -> Result<ExportedImage> {
        let result = self.export_job(request).run(encoder);
        if let Err(err) = &result {
            self.report_error(err);
        }
        result
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn parameter_changed(&mut self) {
        let snapshot = self.snapshot();
        self.history.request_commit(snapshot, &mut self.scheduler);
        self.request_render();
    }

    fn commit_now(&mut self) {
        let snapshot = self.snapshot();
        self.history.save_immediate(snapshot, &mut self.scheduler);
        self.log_commit();
    }

    fn relayout(&mut self) {
        let (width, height) = self.source.dimensions();
        let oriented = self.transform.oriented_size(width, height);
        self.layout = CanvasLayout::fit(oriented, self.viewport);
        self.crop.reset(self.layout.canvas);
    }

    fn log_action(&self, action: EditorAction) {
        if let Some(handle) = &self.diagnostics {
            handle.log_action(action);
        }
    }

    fn log_commit(&self) {
        if let Some(handle) = &self.diagnostics {
            handle.log_operation(EditorOperation::HistoryCommit {
                entries: self.history.len(),
                position: self.history.position().unwrap_or_default(),
            });
        }
    }

    fn warn(&self, warning_type: WarningType, message: String) {
        if let Some(handle) = &self.diagnostics {
            handle.log_warning(WarningEvent::new(warning_type, message));
        }
    }

    fn report_error(&self, err: &Error) {
        if let Some(handle) = &self.diagnostics {
            let error_type = match err {
                Error::Io(_) => ErrorType::IoError,
                Error::Export(_) => ErrorType::ExportError,
                Error::Config(_) | Error::Buffer(_) => ErrorType::Other,
            };
            handle.log_error(ErrorEvent::new(error_type, err.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{BufferCapacity, DiagnosticEventKind, DiagnosticsCollector};
    use crate::domain::geometry::{CanvasSize, RotationAngle};
    use crate::test_utils::gradient_buffer;
    use std::time::Duration;

    fn editor(width: u32, height: u32) -> EditorContext {
        EditorContext::new(
            gradient_buffer(width, height),
            (1280, 800),
            &Config::default(),
            ManualScheduler::new(),
        )
    }

    fn drain(editor: &mut EditorContext, by: Duration) -> Vec<TimerOutcome> {
        let fired = editor.scheduler_mut().advance(by);
        fired
            .into_iter()
            .map(|token| editor.on_timer(token).expect("timer"))
            .collect()
    }

    #[test]
    fn new_session_starts_with_one_entry() {
        let editor = editor(200, 100);
        assert_eq!(editor.history().len(), 1);
        assert!(!editor.can_undo());
        assert_eq!(editor.layout().canvas, CanvasSize::new(200, 100));
        assert_eq!(editor.crop_box(), CropBox::new(0.0, 0.0, 200.0, 100.0));
    }

    #[test]
    fn slider_burst_is_one_history_entry() {
        let mut editor = editor(64, 64);
        for value in [10, 20, 30, 40] {
            editor.set_adjustment(AdjustmentField::Exposure, value);
            editor.scheduler_mut().advance(Duration::from_millis(100));
        }
        assert_eq!(editor.history().len(), 1);

        let outcomes = drain(&mut editor, Duration::from_millis(300));
        assert!(outcomes.contains(&TimerOutcome::Committed));
        assert_eq!(editor.history().len(), 2);

        assert!(editor.undo());
        assert!(editor.adjustments().is_neutral());
        assert!(editor.redo());
        assert_eq!(editor.adjustments().get(AdjustmentField::Exposure), 40);
    }

    #[test]
    fn render_requests_coalesce() {
        let mut editor = editor(32, 32);
        editor.set_adjustment(AdjustmentField::Contrast, 10);
        editor.set_adjustment(AdjustmentField::Contrast, 20);
        editor.set_adjustment(AdjustmentField::Contrast, 30);

        let outcomes = drain(&mut editor, Duration::from_millis(16));
        let renders = outcomes
            .iter()
            .filter(|outcome| matches!(outcome, TimerOutcome::Rendered(_)))
            .count();
        assert_eq!(renders, 1);
    }

    #[test]
    fn undo_flushes_pending_edit_first() {
        let mut editor = editor(32, 32);
        editor.set_adjustment(AdjustmentField::Saturation, 50);
        assert!(editor.undo());
        assert!(editor.adjustments().is_neutral());
        assert!(editor.can_redo());
    }

    #[test]
    fn rotate_swaps_canvas_and_resets_crop() {
        let mut editor = editor(300, 100);
        editor.rotate(90);
        assert_eq!(editor.transform().rotation, RotationAngle::new(90));
        assert_eq!(editor.layout().canvas, CanvasSize::new(100, 300));
        assert_eq!(editor.crop_box(), CropBox::new(0.0, 0.0, 100.0, 300.0));
        assert_eq!(editor.history().len(), 2);

        assert!(editor.undo());
        assert_eq!(editor.layout().canvas, CanvasSize::new(300, 100));
        assert_eq!(editor.crop_box(), CropBox::new(0.0, 0.0, 300.0, 100.0));
    }

    #[test]
    fn preset_sets_ratio_and_export_size() {
        let mut editor = editor(400, 400);
        editor.apply_preset(CropPreset::InstagramPortrait);
        assert_eq!(editor.export_size(), Some((1080, 1350)));
        assert!(editor.crop_box().matches_ratio(CropPreset::InstagramPortrait.ratio()));

        editor.set_aspect_ratio(None);
        assert_eq!(editor.export_size(), None);
        assert!(editor.crop().aspect_ratio().is_none());
    }

    #[test]
    fn gesture_end_commits() {
        let mut editor = editor(200, 200);
        editor.set_aspect_ratio(AspectRatio::new(1.0));
        let before = editor.history().len();
        let center = Point::new(100.0, 100.0);
        assert!(editor.gesture_start(center, Some(CropHandle::SouthEast)));
        editor.gesture_move(Point::new(50.0, 50.0));
        assert!(editor.gesture_end());
        assert_eq!(editor.history().len(), before + 1);
        assert!(!editor.gesture_end());
    }

    #[test]
    fn degenerate_curve_warns_and_uses_identity() {
        let mut collector = DiagnosticsCollector::new(BufferCapacity::default());
        let mut editor = editor(16, 16).with_diagnostics(collector.handle());
        editor.set_curve(vec![CurvePoint::new(0.5, 0.5)]);
        assert!(editor.adjustments().curve().is_identity());

        collector.process_pending();
        assert!(collector.iter().any(|entry| matches!(
            &entry.kind,
            DiagnosticEventKind::Warning { event } if event.warning_type == WarningType::DegenerateCurve
        )));
    }

    #[test]
    fn clamped_slider_is_reported() {
        let mut collector = DiagnosticsCollector::new(BufferCapacity::default());
        let mut editor = editor(16, 16).with_diagnostics(collector.handle());
        let write = editor.set_adjustment(AdjustmentField::Grain, -40);
        assert!(write.clamped);
        assert_eq!(write.stored, 0);
        assert!(editor.set_adjustment_by_name("nope", 1).is_none());

        collector.process_pending();
        let warnings = collector
            .iter()
            .filter(|event| matches!(event.kind, DiagnosticEventKind::Warning { .. }))
            .count();
        assert_eq!(warnings, 2);
    }

    #[test]
    fn export_uses_display_scale() {
        let editor = EditorContext::new(
            gradient_buffer(400, 200),
            (200, 200),
            &Config::default(),
            ManualScheduler::new(),
        );
        assert_eq!(editor.layout().canvas, CanvasSize::new(200, 100));
        let exported = editor.export(editor.export_request()).expect("export");
        assert_eq!((exported.width, exported.height), (400, 200));
    }

    #[test]
    fn empty_viewport_still_exports() {
        let editor = EditorContext::new(
            gradient_buffer(40, 20),
            (0, 0),
            &Config::default(),
            ManualScheduler::new(),
        );
        assert!(editor.layout().display_scale > 0.0);
        let exported = editor.export(editor.export_request()).expect("export");
        assert_eq!((exported.width, exported.height), (40, 20));
    }

    #[test]
    fn failed_export_is_logged() {
        let mut collector = DiagnosticsCollector::new(BufferCapacity::default());
        let editor = editor(16, 16).with_diagnostics(collector.handle());
        let mut request = editor.export_request();
        request.resize = Some((0, 0));
        assert!(editor.export(request).is_err());

        collector.process_pending();
        assert!(collector
            .iter()
            .any(|event| matches!(event.kind, DiagnosticEventKind::Error { .. })));
    }

    #[test]
    fn restore_round_trips_snapshot() {
        let mut editor = editor(100, 100);
        editor.set_adjustment(AdjustmentField::Vibrance, 35);
        editor.flip(FlipAxis::Horizontal);
        let saved = editor.snapshot();

        editor.reset_adjustments();
        editor.flip(FlipAxis::Horizontal);
        editor.restore(&saved);
        assert_eq!(editor.snapshot(), saved);
    }
}
