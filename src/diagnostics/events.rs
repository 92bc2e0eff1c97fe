// SPDX-License-Identifier: MPL-2.0
//! Diagnostic event types for editing activity.

use std::time::Instant;

use serde::{Deserialize, Serialize};

/// User-initiated editing actions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum EditorAction {
    /// A decoded image was handed to the editor.
    LoadImage { width: u32, height: u32 },

    /// All adjustments returned to neutral.
    ResetAdjustments,

    /// Rotation changed.
    Rotate {
        /// Rotation after the change.
        degrees: u16,
    },

    /// Horizontal or vertical mirror toggled.
    Flip { axis: String },

    /// Crop preset selected.
    ApplyPreset { preset: String },

    /// Aspect ratio locked, or released when `ratio` is absent.
    SetAspectRatio {
        #[serde(skip_serializing_if = "Option::is_none")]
        ratio: Option<f64>,
    },

    /// A crop drag or resize gesture finished.
    CropGestureEnd,

    Undo,

    Redo,

    /// Export requested.
    Export { format: String },
}

/// Timed engine operations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum EditorOperation {
    /// A preview render completed.
    Render {
        duration_ms: u64,
        width: u32,
        height: u32,
    },

    /// An export buffer was produced.
    Export {
        duration_ms: u64,
        width: u32,
        height: u32,
    },

    /// A snapshot was pushed to the undo log.
    HistoryCommit { entries: usize, position: usize },
}

/// Categories of warnings raised while editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningType {
    /// A parameter was outside its declared range and was clamped.
    ParameterClamped,
    /// A tone curve was rejected and replaced with the identity.
    DegenerateCurve,
    /// Configuration could not be loaded.
    ConfigurationIssue,
    Other,
}

/// Categories of errors reported to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Export request rejected or encoder failure.
    ExportError,
    /// File read or write failure.
    IoError,
    Other,
}

/// A warning with its category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WarningEvent {
    pub warning_type: WarningType,
    pub message: String,
}

impl WarningEvent {
    #[must_use]
    pub fn new(warning_type: WarningType, message: impl Into<String>) -> Self {
        Self {
            warning_type,
            message: message.into(),
        }
    }
}

/// An error with its category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorEvent {
    pub error_type: ErrorType,
    pub message: String,
}

impl ErrorEvent {
    #[must_use]
    pub fn new(error_type: ErrorType, message: impl Into<String>) -> Self {
        Self {
            error_type,
            message: message.into(),
        }
    }
}

/// A single diagnostic event captured during editing.
#[derive(Debug, Clone)]
pub struct DiagnosticEvent {
    /// When the event occurred (monotonic clock for duration calculations)
    pub timestamp: Instant,
    /// The type and data of the event
    pub kind: DiagnosticEventKind,
}

impl DiagnosticEvent {
    /// Creates a new diagnostic event with the current timestamp.
    #[must_use]
    pub fn new(kind: DiagnosticEventKind) -> Self {
        Self {
            timestamp: Instant::now(),
            kind,
        }
    }
}

/// The type and associated data for a diagnostic event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticEventKind {
    UserAction {
        action: EditorAction,
        #[serde(skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },

    Operation { operation: EditorOperation },

    Warning { event: WarningEvent },

    Error { event: ErrorEvent },
}
