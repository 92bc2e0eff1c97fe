// SPDX-License-Identifier: MPL-2.0
//! Bounded undo log of full editor snapshots.
//!
//! Slider bursts are debounced through a [`Scheduler`] so that one drag
//! produces one entry; discrete actions are pushed immediately.

use std::collections::VecDeque;

use super::scheduler::{Scheduler, TimerPurpose, TimerToken, TokenSequence};
use crate::domain::editing::{Adjustments, DebounceDelay, HistoryCapacity};
use crate::domain::geometry::{AspectRatio, CropBox, TransformState};

/// Everything needed to put the editor back into an earlier state.
#[derive(Debug, Clone, PartialEq)]
pub struct HistorySnapshot {
    pub crop_box: CropBox,
    pub adjustments: Adjustments,
    pub aspect_ratio: Option<AspectRatio>,
    /// Fixed export size from a crop preset.
    pub export_size: Option<(u32, u32)>,
    pub transform: TransformState,
}

/// Linear undo log with a cursor.
///
/// Pushing after an undo discards the redo tail. Once the log is full the
/// oldest entry is evicted and the cursor stays on the newest one.
#[derive(Debug)]
pub struct HistoryManager {
    entries: VecDeque<HistorySnapshot>,
    cursor: Option<usize>,
    capacity: HistoryCapacity,
    debounce: DebounceDelay,
    pending: Option<(TimerToken, HistorySnapshot)>,
    tokens: TokenSequence,
}

impl Default for HistoryManager {
    fn default() -> Self {
        Self::new(HistoryCapacity::default(), DebounceDelay::default())
    }
}

impl HistoryManager {
    #[must_use]
    pub fn new(capacity: HistoryCapacity, debounce: DebounceDelay) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.value()),
            cursor: None,
            capacity,
            debounce,
            pending: None,
            tokens: TokenSequence::new(TimerPurpose::HistoryCommit),
        }
    }

    #[must_use]
    pub fn capacity(&self) -> HistoryCapacity {
        self.capacity
    }

    #[must_use]
    pub fn debounce(&self) -> DebounceDelay {
        self.debounce
    }

    /// Stores `snapshot` as the pending commit and restarts the quiet
    /// period. Any earlier pending snapshot is replaced.
    pub fn request_commit(
        &mut self,
        snapshot: HistorySnapshot,
        scheduler: &mut impl Scheduler,
    ) -> TimerToken {
        if let Some((previous, _)) = self.pending.take() {
            scheduler.cancel(previous);
        }
        let token = self.tokens.next_token();
        scheduler.schedule_after(self.debounce.as_duration(), token);
        self.pending = Some((token, snapshot));
        token
    }

    /// Commits the pending snapshot if `token` is the latest request.
    ///
    /// Stale or foreign tokens are ignored. Returns true if an entry was
    /// pushed.
    pub fn on_timer(&mut self, token: TimerToken) -> bool {
        match self.pending.take() {
            Some((pending, snapshot)) if pending == token => {
                self.push(snapshot);
                true
            }
            other => {
                self.pending = other;
                false
            }
        }
    }

    /// Cancels any pending commit and pushes `snapshot` now.
    pub fn save_immediate(&mut self, snapshot: HistorySnapshot, scheduler: &mut impl Scheduler) {
        if let Some((token, _)) = self.pending.take() {
            scheduler.cancel(token);
        }
        self.push(snapshot);
    }

    /// Commits the pending snapshot without waiting for its timer.
    ///
    /// Returns true if there was one.
    pub fn flush(&mut self, scheduler: &mut impl Scheduler) -> bool {
        match self.pending.take() {
            Some((token, snapshot)) => {
                scheduler.cancel(token);
                self.push(snapshot);
                true
            }
            None => false,
        }
    }

    /// Returns true if a debounced commit is waiting.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn push(&mut self, snapshot: HistorySnapshot) {
        let keep = self.cursor.map_or(0, |cursor| cursor + 1);
        self.entries.truncate(keep);
        self.entries.push_back(snapshot);
        if self.entries.len() > self.capacity.value() {
            self.entries.pop_front();
        }
        self.cursor = Some(self.entries.len() - 1);
    }

    /// Steps back one entry. `None` at the start of the log.
    pub fn undo(&mut self) -> Option<&HistorySnapshot> {
        let cursor = self.cursor.filter(|&cursor| cursor > 0)? - 1;
        self.cursor = Some(cursor);
        self.entries.get(cursor)
    }

    /// Steps forward one entry. `None` at the end of the log.
    pub fn redo(&mut self) -> Option<&HistorySnapshot> {
        let cursor = self.cursor? + 1;
        if cursor >= self.entries.len() {
            return None;
        }
        self.cursor = Some(cursor);
        self.entries.get(cursor)
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor.is_some_and(|cursor| cursor > 0)
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor
            .is_some_and(|cursor| cursor + 1 < self.entries.len())
    }

    /// Drops every entry and any pending commit.
    pub fn clear(&mut self, scheduler: &mut impl Scheduler) {
        if let Some((token, _)) = self.pending.take() {
            scheduler.cancel(token);
        }
        self.entries.clear();
        self.cursor = None;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry under the cursor.
    #[must_use]
    pub fn current(&self) -> Option<&HistorySnapshot> {
        self.entries.get(self.cursor?)
    }

    /// Index of the cursor, `None` while the log is empty.
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::editing::AdjustmentField;
    use crate::editor::scheduler::ManualScheduler;
    use std::time::Duration;

    fn snapshot(exposure: i32) -> HistorySnapshot {
        let mut adjustments = Adjustments::default();
        adjustments.set(AdjustmentField::Exposure, exposure);
        HistorySnapshot {
            crop_box: CropBox::new(0.0, 0.0, 100.0, 100.0),
            adjustments,
            aspect_ratio: None,
            export_size: None,
            transform: TransformState::default(),
        }
    }

    fn exposure(entry: Option<&HistorySnapshot>) -> Option<i32> {
        entry.map(|s| s.adjustments.get(AdjustmentField::Exposure))
    }

    fn manager(capacity: usize) -> (HistoryManager, ManualScheduler) {
        (
            HistoryManager::new(HistoryCapacity::new(capacity), DebounceDelay::default()),
            ManualScheduler::new(),
        )
    }

    #[test]
    fn empty_history_has_no_moves() {
        let (mut history, _) = manager(30);
        assert!(history.is_empty());
        assert_eq!(history.position(), None);
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
        assert!(!history.can_undo());
    }

    #[test]
    fn undo_redo_walk_the_log() {
        let (mut history, mut scheduler) = manager(30);
        for value in [0, 10, 20] {
            history.save_immediate(snapshot(value), &mut scheduler);
        }
        assert_eq!(exposure(history.undo()), Some(10));
        assert_eq!(exposure(history.undo()), Some(0));
        assert!(history.undo().is_none());
        assert_eq!(history.position(), Some(0));
        assert_eq!(exposure(history.redo()), Some(10));
        assert_eq!(exposure(history.redo()), Some(20));
        assert!(history.redo().is_none());
    }

    #[test]
    fn push_after_undo_discards_redo_tail() {
        let (mut history, mut scheduler) = manager(30);
        for value in [0, 10, 20] {
            history.save_immediate(snapshot(value), &mut scheduler);
        }
        history.undo();
        history.undo();
        history.save_immediate(snapshot(99), &mut scheduler);

        assert_eq!(history.len(), 2);
        assert!(!history.can_redo());
        assert_eq!(exposure(history.current()), Some(99));
        assert_eq!(exposure(history.undo()), Some(0));
    }

    #[test]
    fn capacity_evicts_oldest_and_keeps_cursor_at_tail() {
        let (mut history, mut scheduler) = manager(3);
        for value in 0..5 {
            history.save_immediate(snapshot(value), &mut scheduler);
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.position(), Some(2));
        assert_eq!(exposure(history.current()), Some(4));
        assert!(!history.can_redo());
        assert!(history.redo().is_none());
        assert!(history.can_undo());
        assert_eq!(exposure(history.undo()), Some(3));
        assert_eq!(exposure(history.undo()), Some(2));
        assert!(history.undo().is_none());
    }

    #[test]
    fn debounce_commits_only_latest_request() {
        let (mut history, mut scheduler) = manager(30);
        let first = history.request_commit(snapshot(1), &mut scheduler);
        scheduler.advance(Duration::from_millis(200));
        let second = history.request_commit(snapshot(2), &mut scheduler);
        assert_ne!(first, second);
        assert!(!scheduler.is_pending(first));

        assert!(scheduler.advance(Duration::from_millis(200)).is_empty());
        let fired = scheduler.advance(Duration::from_millis(100));
        assert_eq!(fired, vec![second]);

        assert!(!history.on_timer(first));
        assert!(history.on_timer(second));
        assert!(!history.on_timer(second));
        assert_eq!(history.len(), 1);
        assert_eq!(exposure(history.current()), Some(2));
    }

    #[test]
    fn save_immediate_cancels_pending_commit() {
        let (mut history, mut scheduler) = manager(30);
        let token = history.request_commit(snapshot(1), &mut scheduler);
        history.save_immediate(snapshot(2), &mut scheduler);

        assert!(!history.has_pending());
        assert_eq!(scheduler.pending_count(), 0);
        assert!(!history.on_timer(token));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn flush_commits_pending_now() {
        let (mut history, mut scheduler) = manager(30);
        history.request_commit(snapshot(7), &mut scheduler);
        assert!(history.flush(&mut scheduler));
        assert!(!history.flush(&mut scheduler));
        assert_eq!(exposure(history.current()), Some(7));
        assert_eq!(scheduler.pending_count(), 0);
    }

    #[test]
    fn clear_drops_entries_and_pending() {
        let (mut history, mut scheduler) = manager(30);
        history.save_immediate(snapshot(1), &mut scheduler);
        history.request_commit(snapshot(2), &mut scheduler);
        history.clear(&mut scheduler);
        assert!(history.is_empty());
        assert!(!history.has_pending());
        assert_eq!(scheduler.pending_count(), 0);
    }
}
