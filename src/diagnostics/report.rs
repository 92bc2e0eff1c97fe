// SPDX-License-Identifier: MPL-2.0
//! Diagnostic report generation and JSON export.

use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{DiagnosticEventKind, EditorOperation};

// =============================================================================
// Report Metadata
// =============================================================================

/// Metadata about a diagnostic report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportMetadata {
    /// When the report was generated (ISO 8601)
    pub generated_at: String,
    /// Version of the engine that generated the report
    pub engine_version: String,
    /// When diagnostic collection started (ISO 8601)
    pub collection_started_at: String,
    /// Duration of collection in milliseconds
    pub collection_duration_ms: u64,
    /// Total number of events in the report
    pub event_count: usize,
}

impl ReportMetadata {
    #[must_use]
    pub fn new(
        collection_started_at: DateTime<Utc>,
        collection_duration_ms: u64,
        event_count: usize,
    ) -> Self {
        Self {
            generated_at: Utc::now().to_rfc3339(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            collection_started_at: collection_started_at.to_rfc3339(),
            collection_duration_ms,
            event_count,
        }
    }
}

// =============================================================================
// Serializable Event
// =============================================================================

/// A diagnostic event with its timestamp made relative to collection start.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SerializableEvent {
    /// Milliseconds since collection started
    pub timestamp_ms: u64,
    #[serde(flatten)]
    pub kind: DiagnosticEventKind,
}

impl SerializableEvent {
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // Duration in ms fits comfortably in u64
    pub fn new(
        event_timestamp: Instant,
        collection_start: Instant,
        kind: DiagnosticEventKind,
    ) -> Self {
        let timestamp_ms = event_timestamp
            .saturating_duration_since(collection_start)
            .as_millis() as u64;

        Self { timestamp_ms, kind }
    }
}

// =============================================================================
// Report Summary
// =============================================================================

/// Aggregate counts computed from the events.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ReportSummary {
    pub action_count: usize,
    pub warning_count: usize,
    pub error_count: usize,
    pub render_count: usize,
    /// Mean preview render time, if any render was recorded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_render_ms: Option<f64>,
}

impl ReportSummary {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_events(events: &[SerializableEvent]) -> Self {
        let mut summary = Self::default();
        let mut render_total_ms = 0u64;

        for event in events {
            match &event.kind {
                DiagnosticEventKind::UserAction { .. } => summary.action_count += 1,
                DiagnosticEventKind::Warning { .. } => summary.warning_count += 1,
                DiagnosticEventKind::Error { .. } => summary.error_count += 1,
                DiagnosticEventKind::Operation {
                    operation: EditorOperation::Render { duration_ms, .. },
                } => {
                    summary.render_count += 1;
                    render_total_ms += duration_ms;
                }
                DiagnosticEventKind::Operation { .. } => {}
            }
        }

        if summary.render_count > 0 {
            summary.mean_render_ms = Some(render_total_ms as f64 / summary.render_count as f64);
        }
        summary
    }
}

// =============================================================================
// Diagnostic Report
// =============================================================================

/// Complete report written by [`DiagnosticsCollector::export_json`](super::DiagnosticsCollector::export_json).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiagnosticReport {
    pub metadata: ReportMetadata,
    pub summary: ReportSummary,
    pub events: Vec<SerializableEvent>,
}

impl DiagnosticReport {
    #[must_use]
    pub fn new(metadata: ReportMetadata, events: Vec<SerializableEvent>) -> Self {
        let summary = ReportSummary::from_events(&events);
        Self {
            metadata,
            summary,
            events,
        }
    }

    /// Serializes the report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{EditorAction, WarningEvent, WarningType};
    use approx::assert_relative_eq;

    fn render(ms: u64) -> SerializableEvent {
        SerializableEvent {
            timestamp_ms: 0,
            kind: DiagnosticEventKind::Operation {
                operation: EditorOperation::Render {
                    duration_ms: ms,
                    width: 10,
                    height: 10,
                },
            },
        }
    }

    #[test]
    fn summary_counts_by_category() {
        let events = vec![
            render(10),
            render(20),
            SerializableEvent {
                timestamp_ms: 5,
                kind: DiagnosticEventKind::UserAction {
                    action: EditorAction::Undo,
                    details: None,
                },
            },
            SerializableEvent {
                timestamp_ms: 6,
                kind: DiagnosticEventKind::Warning {
                    event: WarningEvent::new(WarningType::ParameterClamped, "exposure"),
                },
            },
        ];

        let summary = ReportSummary::from_events(&events);
        assert_eq!(summary.action_count, 1);
        assert_eq!(summary.warning_count, 1);
        assert_eq!(summary.error_count, 0);
        assert_eq!(summary.render_count, 2);
        assert_relative_eq!(summary.mean_render_ms.unwrap_or_default(), 15.0);
    }

    #[test]
    fn empty_summary_has_no_mean() {
        assert_eq!(ReportSummary::from_events(&[]).mean_render_ms, None);
    }

    #[test]
    fn serializable_event_uses_relative_time() {
        let start = Instant::now();
        let later = start + std::time::Duration::from_millis(250);
        let event = SerializableEvent::new(
            later,
            start,
            DiagnosticEventKind::UserAction {
                action: EditorAction::Redo,
                details: None,
            },
        );
        assert_eq!(event.timestamp_ms, 250);
    }

    #[test]
    fn report_json_contains_metadata() {
        let metadata = ReportMetadata::new(Utc::now(), 42, 1);
        let report = DiagnosticReport::new(metadata, vec![render(3)]);
        let json = report.to_json().expect("serialize");
        assert!(json.contains("engine_version"));
        assert!(json.contains("\"render_count\": 1"));
    }
}
