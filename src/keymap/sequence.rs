//! Progress tracking for multi-step key sequences

use std::collections::{HashMap, HashSet};
use std::time::Instant;

use super::types::{EventKind, Key};

/// Per-sequence progress plus the flags that de-duplicate one physical key press
///
/// A level of 0 means the sequence has not started. Entries are created the first
/// time a sequence advances and are reset to 0, never removed.
#[derive(Debug, Default)]
pub struct SequenceTracker {
    levels: HashMap<String, usize>,
    next_expected: Option<EventKind>,
    ignore_next_keyup: Option<Key>,
    ignore_next_keypress: bool,
    deadline: Option<Instant>,
}

impl SequenceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current level of `name` (0 if never seen)
    pub fn level(&self, name: &str) -> usize {
        self.levels.get(name).copied().unwrap_or(0)
    }

    /// Advance `name` by one step, returning the new level
    pub fn advance(&mut self, name: &str) -> usize {
        let level = self.levels.entry(name.to_string()).or_insert(0);
        *level += 1;
        *level
    }

    /// Reset every sequence not in `keep` to level 0
    ///
    /// If none of the kept sequences is being tracked, the expected event kind is
    /// cleared as well and the tracker is idle.
    pub fn reset_all_except(&mut self, keep: &HashSet<String>) {
        let mut active = false;
        for (name, level) in self.levels.iter_mut() {
            if keep.contains(name) {
                active = true;
                continue;
            }
            *level = 0;
        }

        if !active {
            self.next_expected = None;
        }
    }

    /// Reset every sequence and clear the expected event kind
    pub fn reset_all(&mut self) {
        self.reset_all_except(&HashSet::new());
    }

    pub fn mark_expectation(&mut self, kind: EventKind) {
        self.next_expected = Some(kind);
    }

    pub fn is_expected(&self, kind: EventKind) -> bool {
        self.next_expected == Some(kind)
    }

    pub fn next_expected(&self) -> Option<EventKind> {
        self.next_expected
    }

    /// Whether no sequence has partial progress
    pub fn is_idle(&self) -> bool {
        self.levels.values().all(|level| *level == 0)
    }

    /// Names and levels of sequences with partial progress
    pub fn pending(&self) -> impl Iterator<Item = (&str, usize)> {
        self.levels
            .iter()
            .filter(|(_, level)| **level > 0)
            .map(|(name, level)| (name.as_str(), *level))
    }

    /// Swallow the next keyup for `key`
    pub fn ignore_next_keyup(&mut self, key: Key) {
        self.ignore_next_keyup = Some(key);
    }

    /// Consume the keyup marker if it is set for `key`
    pub fn take_ignored_keyup(&mut self, key: &Key) -> bool {
        if self.ignore_next_keyup.as_ref() == Some(key) {
            self.ignore_next_keyup = None;
            return true;
        }
        false
    }

    pub fn set_ignore_next_keypress(&mut self, ignore: bool) {
        self.ignore_next_keypress = ignore;
    }

    pub fn ignores_next_keypress(&self) -> bool {
        self.ignore_next_keypress
    }

    /// Start (or restart) the debounce window
    pub fn arm(&mut self, deadline: Instant) {
        self.deadline = Some(deadline);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Whether the debounce window has elapsed at `now`; clears the deadline if so
    pub fn take_expired(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Drop all progress, flags and the pending deadline
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
