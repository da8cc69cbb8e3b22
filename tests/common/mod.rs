//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use spicykeys::config::EngineConfig;
use spicykeys::keymap::{
    Callback, Document, EventKind, MatchEngine, Modifier, Modifiers, NodeId, RawKeyEvent,
};

/// Records every invocation of a callback as `(event kind, combo)`
#[derive(Clone, Default)]
pub struct Recorder {
    calls: Rc<RefCell<Vec<(EventKind, String)>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn callback(&self) -> Callback {
        let calls = self.calls.clone();
        Callback::new(move |event, combo| calls.borrow_mut().push((event.kind, combo.to_string())))
    }

    pub fn count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn called(&self) -> bool {
        self.count() > 0
    }

    /// Event kind of the `idx`th invocation
    pub fn kind(&self, idx: usize) -> EventKind {
        self.calls.borrow()[idx].0
    }

    pub fn combo(&self, idx: usize) -> String {
        self.calls.borrow()[idx].1.clone()
    }
}

/// Key code a browser reports on keydown/keyup for `key`
pub fn key_code(key: &str) -> u32 {
    match key {
        "backspace" => 8,
        "tab" => 9,
        "enter" => 13,
        "shift" => 16,
        "ctrl" => 17,
        "alt" => 18,
        "esc" => 27,
        "space" => 32,
        "left" => 37,
        "up" => 38,
        "right" => 39,
        "down" => 40,
        "meta" => 91,
        "*" => 106,
        "+" => 107,
        ";" => 186,
        "=" => 187,
        "," => 188,
        "-" => 189,
        "." => 190,
        "/" => 191,
        "`" => 192,
        "[" => 219,
        "\\" => 220,
        "]" => 221,
        "'" => 222,
        _ => {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => ch.to_ascii_uppercase() as u32,
                _ => panic!("no key code for {key:?}"),
            }
        }
    }
}

fn modifier_code(modifier: Modifier) -> u32 {
    match modifier {
        Modifier::Shift => 16,
        Modifier::Ctrl => 17,
        Modifier::Alt => 18,
        Modifier::Meta => 91,
    }
}

/// A document, an engine listening on it, and a simulated clock
pub struct Keyboard {
    pub engine: MatchEngine,
    pub doc: Document,
    pub now: Instant,
    /// Element events are dispatched on; defaults to the body
    pub target: NodeId,
}

impl Keyboard {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        let doc = Document::new();
        let target = doc.body();
        Self {
            engine: MatchEngine::with_config(config),
            doc,
            now: Instant::now(),
            target,
        }
    }

    /// Bind `combo` to a fresh recorder
    pub fn bind(&mut self, combo: &str) -> Recorder {
        let recorder = Recorder::new();
        self.engine
            .bind(combo, recorder.callback())
            .unwrap_or_else(|e| panic!("failed to bind {combo:?}: {e}"));
        recorder
    }

    pub fn bind_with(&mut self, combo: &str, kind: EventKind) -> Recorder {
        let recorder = Recorder::new();
        self.engine
            .bind_with(combo, recorder.callback(), Some(kind))
            .unwrap_or_else(|e| panic!("failed to bind {combo:?}: {e}"));
        recorder
    }

    pub fn advance(&mut self, ms: u64) {
        self.now += Duration::from_millis(ms);
    }

    /// Deliver one raw event at the current time to the current target
    pub fn fire(&mut self, event: RawKeyEvent) -> usize {
        let event = if event.target.is_some() {
            event
        } else {
            event.with_target(self.target)
        };
        self.engine.handle_raw_event_at(&self.doc, &event, self.now)
    }

    /// Press and release a named or single-character key, with modifiers held
    pub fn simulate(&mut self, key: &str, modifiers: &[Modifier]) {
        let char_code = match key.chars().count() {
            1 => key.chars().next().map_or(0, |ch| ch as u32),
            _ => 0,
        };
        self.simulate_codes(char_code, key_code(key), modifiers);
    }

    /// Browser event sequence for one key press
    ///
    /// Modifiers go down first, then keydown, keypress (carrying the character
    /// code) and keyup, then the modifiers come up again. A modifier key on
    /// its own gets only its keyup.
    pub fn simulate_codes(&mut self, char_code: u32, key_code: u32, modifiers: &[Modifier]) {
        let mut held = Modifiers::NONE;
        for &modifier in modifiers {
            held.insert(modifier);
            self.fire(
                RawKeyEvent::new(EventKind::Keydown, modifier_code(modifier)).with_modifiers(held),
            );
        }

        if !matches!(key_code, 16 | 17 | 18 | 91) {
            self.fire(RawKeyEvent::new(EventKind::Keydown, key_code).with_modifiers(held));
            self.fire(RawKeyEvent::new(EventKind::Keypress, char_code).with_modifiers(held));
        }
        self.fire(RawKeyEvent::new(EventKind::Keyup, key_code).with_modifiers(held));

        for &modifier in modifiers.iter().rev() {
            held = held.iter().filter(|m| *m != modifier).collect();
            self.fire(
                RawKeyEvent::new(EventKind::Keyup, modifier_code(modifier)).with_modifiers(held),
            );
        }
    }

    /// Type each key in turn with no modifiers
    pub fn type_keys(&mut self, keys: &[&str]) {
        for key in keys {
            self.simulate(key, &[]);
        }
    }
}
