// SPDX-License-Identifier: MPL-2.0
//! Diagnostics module for collecting and exporting editing activity.
//!
//! Events are captured through a [`DiagnosticsHandle`], stored in a
//! memory-bounded circular buffer owned by the [`DiagnosticsCollector`],
//! and exported as JSON reports for performance analysis.
//!
//! # Architecture
//!
//! - [`CircularBuffer`]: Generic ring buffer with configurable capacity
//! - [`DiagnosticEvent`]: Timestamped editor action, operation, warning or error
//! - [`DiagnosticReport`]: JSON export with summary statistics

mod buffer;
mod collector;
mod events;
mod report;

pub use buffer::{BufferCapacity, CircularBuffer};
pub use collector::{DiagnosticsCollector, DiagnosticsHandle};
pub use events::{
    DiagnosticEvent, DiagnosticEventKind, EditorAction, EditorOperation, ErrorEvent, ErrorType,
    WarningEvent, WarningType,
};
pub use report::{DiagnosticReport, ReportMetadata, ReportSummary, SerializableEvent};
