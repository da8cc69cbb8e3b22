//! Match engine: turns raw key events into callback invocations
//!
//! Every event is normalized, matched against the binding table, filtered by
//! sequence progress, and only then are the winning callbacks invoked. All
//! sequence bookkeeping for an event is finished before the first callback
//! runs, so a panicking callback cannot leave the tracker half-updated.
//!
//! Callbacks run synchronously, in match order. Because the engine is borrowed
//! mutably while it dispatches, a callback that wants to feed another key event
//! back in has to queue it and hand it to the engine after this call returns.

use std::collections::HashSet;
use std::time::Instant;

use super::binding::{Binding, Callback, SequenceStep};
use super::config::{ActionHandlers, ActionKeymap};
use super::error::{KeymapError, KeymapResult};
use super::keycodes;
use super::normalize::{character_from_event, event_modifiers, RawKeyEvent};
use super::parser::{parse_combination_with, split_sequence, KeyInfo};
use super::scope::{self, ElementTree, NodeId};
use super::sequence::SequenceTracker;
use super::table::BindingTable;
use super::types::{EventKind, Key, Modifiers};
use crate::config::EngineConfig;

/// Owns one binding table and one sequence tracker for one root element
///
/// Engines share nothing, so separate UI scopes keep separate sequence progress.
#[derive(Debug, Default)]
pub struct MatchEngine {
    table: BindingTable,
    tracker: SequenceTracker,
    root: Option<NodeId>,
    config: EngineConfig,
}

impl MatchEngine {
    /// Engine with default configuration, scoped to the tree's default root
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Scope the engine to `root` (builder pattern)
    pub fn with_root(mut self, root: NodeId) -> Self {
        self.root = Some(root);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Toggle debug tracing of events and fired handlers
    pub fn set_debug(&mut self, debug: bool) {
        self.config.debug = debug;
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Re-attach to a new root
    ///
    /// Bindings are kept; sequence progress and the pending timeout are dropped.
    pub fn set_root(&mut self, root: NodeId) {
        self.root = Some(root);
        self.tracker.clear();
        if self.config.debug {
            tracing::debug!(?root, "set key listener root");
        }
    }

    pub fn bindings(&self) -> &BindingTable {
        &self.table
    }

    pub fn tracker(&self) -> &SequenceTracker {
        &self.tracker
    }

    /// Bind a combination or space-separated sequence, inferring the event kind
    pub fn bind(&mut self, combination: &str, callback: Callback) -> KeymapResult<()> {
        self.bind_with(combination, callback, None)
    }

    /// Bind a combination or sequence for an explicit event kind
    ///
    /// Re-binding the same text replaces the earlier binding. A sequence is
    /// parsed completely before any step is inserted, so a bad step leaves the
    /// table untouched.
    pub fn bind_with(
        &mut self,
        combination: &str,
        callback: Callback,
        hint: Option<EventKind>,
    ) -> KeymapResult<()> {
        let (name, infos) = self.parse_steps(combination, hint)?;
        self.insert_steps(name, &infos, callback);
        Ok(())
    }

    /// Parse every step of `combination` without touching the table
    fn parse_steps(
        &self,
        combination: &str,
        hint: Option<EventKind>,
    ) -> KeymapResult<(String, Vec<KeyInfo>)> {
        let steps = split_sequence(combination);
        if steps.is_empty() {
            return Err(KeymapError::EmptyCombination);
        }

        let name = steps.join(" ");
        if steps.len() > 1 && !self.config.sequences {
            return Err(KeymapError::SequencesUnsupported(name));
        }

        let mod_modifier = self.config.mod_modifier();
        let infos = steps
            .iter()
            .map(|step| parse_combination_with(step, hint, mod_modifier))
            .collect::<KeymapResult<Vec<KeyInfo>>>()?;

        for info in &infos {
            if !keycodes::is_known_key(info.key.as_str()) {
                tracing::warn!(
                    combo = %name,
                    key = %info.key,
                    "Key name is not produced by any key event, binding will never fire"
                );
            }
        }

        Ok((name, infos))
    }

    fn insert_steps(&mut self, name: String, infos: &[KeyInfo], callback: Callback) {
        if let [info] = infos {
            self.table.insert(Binding::combo(
                name,
                info.key.clone(),
                info.modifiers,
                info.kind,
                callback,
            ));
            return;
        }

        for (idx, info) in infos.iter().enumerate() {
            let step = SequenceStep {
                name: name.clone(),
                level: idx + 1,
                next: infos.get(idx + 1).map(|next| next.kind),
            };
            let binding = Binding::combo(
                name.clone(),
                info.key.clone(),
                info.modifiers,
                info.kind,
                callback.clone(),
            )
            .in_sequence(step);
            self.table.insert(binding);
        }
    }

    /// Remove a combo or whole sequence bound as `combination` with `callback`
    ///
    /// Returns whether anything was removed.
    pub fn unbind(&mut self, combination: &str, callback: &Callback) -> bool {
        let name = split_sequence(combination).join(" ");
        self.table.remove_combo(&name, callback) > 0
    }

    /// Bind every combination of every action in `keymap` to the action's callback
    ///
    /// Every combination is checked first, so a missing callback or a bad
    /// combination fails without changing the table.
    pub fn register(&mut self, keymap: &ActionKeymap, handlers: &ActionHandlers) -> KeymapResult<()> {
        for (action, combos) in keymap.iter() {
            if handlers.get(action).is_none() {
                let combos = combos
                    .iter()
                    .map(|c| c.combination.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                return Err(KeymapError::MissingCallback {
                    action: action.to_string(),
                    combos,
                });
            }
        }

        let mut parsed = Vec::new();
        for (action, combos) in keymap.iter() {
            let Some(callback) = handlers.get(action) else {
                continue;
            };
            for combo in combos {
                let (name, infos) = self.parse_steps(&combo.combination, combo.event)?;
                parsed.push((name, infos, callback));
            }
        }

        for (name, infos, callback) in parsed {
            self.insert_steps(name, &infos, callback.clone());
        }

        tracing::debug!(actions = keymap.len(), "registered keymap");
        Ok(())
    }

    /// Unbind every combination of every action in `keymap` from the action's callback
    pub fn unregister(&mut self, keymap: &ActionKeymap, handlers: &ActionHandlers) {
        for (action, combos) in keymap.iter() {
            let Some(callback) = handlers.get(action) else {
                continue;
            };
            for combo in combos {
                self.unbind(&combo.combination, callback);
            }
        }
    }

    /// Drop all bindings and all sequence state
    pub fn reset(&mut self) {
        self.table.clear();
        self.tracker.clear();
    }

    /// When the current sequence window elapses, if a sequence is pending
    pub fn next_deadline(&self) -> Option<Instant> {
        self.tracker.deadline()
    }

    /// Expire the sequence window if it has elapsed at `now`
    ///
    /// Returns whether sequences were reset. Hosts call this when the instant
    /// from [`next_deadline`](Self::next_deadline) passes.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.tracker.take_expired(now) {
            return false;
        }
        self.tracker.reset_all();
        if self.config.debug {
            tracing::debug!("sequence timeout elapsed, resetting sequences");
        }
        true
    }

    /// Handle one raw key event now; returns how many callbacks ran
    pub fn handle_raw_event(&mut self, tree: &impl ElementTree, event: &RawKeyEvent) -> usize {
        self.handle_raw_event_at(tree, event, Instant::now())
    }

    /// Handle one raw key event observed at `now`; returns how many callbacks ran
    pub fn handle_raw_event_at(
        &mut self,
        tree: &impl ElementTree,
        event: &RawKeyEvent,
        now: Instant,
    ) -> usize {
        self.poll(now);

        let Some(key) = character_from_event(event) else {
            return 0;
        };
        let modifiers = event_modifiers(event);

        if self.config.debug {
            tracing::debug!(
                key = %key,
                which = event.code(),
                kind = %event.kind,
                modifiers = %modifiers,
                "handling key event"
            );
        }

        if event.kind == EventKind::Keyup && self.tracker.take_ignored_keyup(&key) {
            return 0;
        }

        let winners = self.handle_key(&key, modifiers, event.kind, now);
        if winners.is_empty() {
            return 0;
        }

        if !scope::allows_callback(tree, self.root, event.target, event.origin) {
            if self.config.debug {
                tracing::debug!(key = %key, "callback suppressed by scope filter");
            }
            return 0;
        }

        for binding in &winners {
            if self.config.debug {
                tracing::debug!(combo = %binding.combo, kind = %binding.kind, "firing handler");
            }
            binding.callback.call(event, &binding.combo);
        }
        winners.len()
    }

    /// Run matching and sequence bookkeeping; returns the bindings whose callbacks fire
    fn handle_key(
        &mut self,
        key: &Key,
        modifiers: Modifiers,
        kind: EventKind,
        now: Instant,
    ) -> Vec<Binding> {
        let matches = self.matches(key, modifiers, kind);

        // Only the longest in-progress sequence may act, so "b c" stays quiet
        // while "a b c" is being typed
        let max_level = matches.iter().filter_map(Binding::level).max().unwrap_or(0);

        let mut keep = HashSet::new();
        let mut processed_sequence = false;
        let mut completed = false;
        let mut winners = Vec::new();

        for binding in matches {
            if let Some(step) = &binding.step {
                if step.level != max_level {
                    continue;
                }
                processed_sequence = true;
                keep.insert(step.name.clone());

                match step.next {
                    Some(next) => {
                        self.tracker.advance(&step.name);
                        self.tracker.mark_expectation(next);
                        self.tracker.arm(now + self.config.sequence_timeout());
                    }
                    None => {
                        completed = true;
                        if binding.kind != EventKind::Keyup {
                            self.tracker.ignore_next_keyup(key.clone());
                        }
                        winners.push(binding);
                    }
                }
                continue;
            }

            if !processed_sequence {
                winners.push(binding);
            }
        }

        // A key of the expected kind that no sequence wanted breaks the other
        // sequences. Modifiers are exempt since they precede the key they modify,
        // and so is the keypress that follows a keydown which already advanced.
        let ignore_this_keypress =
            kind == EventKind::Keypress && self.tracker.ignores_next_keypress();
        if self.tracker.is_expected(kind) && !key.is_modifier() && !ignore_this_keypress {
            self.reset_sequences(&keep);
        }

        self.tracker
            .set_ignore_next_keypress(processed_sequence && kind == EventKind::Keydown);

        if completed {
            self.reset_sequences(&HashSet::new());
        }

        winners
    }

    /// Bindings for `key` that accept this event in the current sequence state
    fn matches(&self, key: &Key, modifiers: Modifiers, kind: EventKind) -> Vec<Binding> {
        // A modifier released on its own matches a binding for just that modifier
        let modifiers = match key.as_modifier() {
            Some(modifier) if kind == EventKind::Keyup => Modifiers::only(modifier),
            _ => modifiers,
        };

        // keypress modifier reporting is inconsistent across browsers unless
        // ctrl or meta is down, so compare the character alone
        let character_only = kind == EventKind::Keypress && !modifiers.meta() && !modifiers.ctrl();

        self.table
            .lookup(key)
            .iter()
            .filter(|binding| {
                if let Some(step) = &binding.step {
                    if self.tracker.level(&step.name) + 1 != step.level {
                        return false;
                    }
                }
                binding.kind == kind && (character_only || binding.modifiers == modifiers)
            })
            .cloned()
            .collect()
    }

    fn reset_sequences(&mut self, keep: &HashSet<String>) {
        self.tracker.reset_all_except(keep);
        if self.tracker.is_idle() {
            self.tracker.cancel();
        }
        if self.config.debug {
            tracing::debug!(?keep, "resetting sequences");
        }
    }
}
