//! Adapter from raw browser-style key events to canonical keys
//!
//! Browsers disagree about which numeric code a key event carries. A keypress
//! reports the produced character, while keydown/keyup report a key code that
//! is the same whether or not shift is held. Both end up as a [`Key`] here.

use serde::{Deserialize, Serialize};

use super::keycodes;
use super::scope::NodeId;
use super::types::{EventKind, Key, Modifiers};

/// One keyboard event as delivered by the host
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawKeyEvent {
    pub kind: EventKind,
    /// Character or key code (`event.which`), when the platform fills it
    #[serde(default)]
    pub which: Option<u32>,
    /// Legacy key code, used when `which` is missing
    #[serde(default)]
    pub key_code: u32,
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub meta: bool,
    /// Node the event was dispatched on (after shadow DOM re-targeting)
    #[serde(skip)]
    pub target: Option<NodeId>,
    /// First node of the composed path, when the host can see into an open shadow tree
    #[serde(skip)]
    pub origin: Option<NodeId>,
}

impl RawKeyEvent {
    /// Event with a numeric code and no modifiers held
    pub fn new(kind: EventKind, which: u32) -> Self {
        Self {
            kind,
            which: Some(which),
            key_code: which,
            shift: false,
            alt: false,
            ctrl: false,
            meta: false,
            target: None,
            origin: None,
        }
    }

    /// Set the held modifiers (builder pattern)
    pub fn with_modifiers(mut self, mods: Modifiers) -> Self {
        self.shift = mods.shift();
        self.alt = mods.alt();
        self.ctrl = mods.ctrl();
        self.meta = mods.meta();
        self
    }

    /// Set the dispatch target (builder pattern)
    pub fn with_target(mut self, target: NodeId) -> Self {
        self.target = Some(target);
        self
    }

    /// Set the composed-path origin (builder pattern)
    pub fn with_origin(mut self, origin: NodeId) -> Self {
        self.origin = Some(origin);
        self
    }

    /// The numeric code to interpret, falling back to `key_code` like `event.which` does
    pub fn code(&self) -> u32 {
        self.which.unwrap_or(self.key_code)
    }
}

/// Canonical key for an event, or `None` if the event carries no usable code
pub fn character_from_event(event: &RawKeyEvent) -> Option<Key> {
    let code = event.code();
    if code == 0 {
        return None;
    }

    if event.kind == EventKind::Keypress {
        let character = char::from_u32(code)?;
        // Without shift, assume lowercase so caps lock doesn't break bindings
        if event.shift {
            return Some(Key::new(character.to_string()));
        }
        return Some(Key::new(character.to_lowercase().collect::<String>()));
    }

    if let Some(name) = keycodes::named_key(code) {
        return Some(Key::from(name));
    }

    if let Some(name) = keycodes::punctuation_key(code) {
        return Some(Key::from(name));
    }

    // keydown/keyup report the uppercase code whether or not shift is held
    let character = char::from_u32(code)?;
    Some(Key::new(character.to_lowercase().collect::<String>()))
}

/// Modifier set read off the event's four modifier flags
pub fn event_modifiers(event: &RawKeyEvent) -> Modifiers {
    Modifiers::new(event.ctrl, event.shift, event.alt, event.meta)
}
