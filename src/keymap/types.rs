//! Core types for the keymap system: Key, Modifier, Modifiers, EventKind

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A single modifier key
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Modifier {
    Shift,
    Alt,
    Ctrl,
    Meta,
}

impl Modifier {
    /// All modifiers, in the order they are read off an event
    pub const ALL: [Modifier; 4] = [
        Modifier::Shift,
        Modifier::Alt,
        Modifier::Ctrl,
        Modifier::Meta,
    ];

    /// Canonical key name of this modifier ("shift", "alt", "ctrl", "meta")
    pub const fn name(self) -> &'static str {
        match self {
            Modifier::Shift => "shift",
            Modifier::Alt => "alt",
            Modifier::Ctrl => "ctrl",
            Modifier::Meta => "meta",
        }
    }

    /// Parse a canonical modifier name
    pub fn from_name(name: &str) -> Option<Modifier> {
        match name {
            "shift" => Some(Modifier::Shift),
            "alt" => Some(Modifier::Alt),
            "ctrl" => Some(Modifier::Ctrl),
            "meta" => Some(Modifier::Meta),
            _ => None,
        }
    }

    const fn bit(self) -> u8 {
        match self {
            Modifier::Ctrl => 0b0001,
            Modifier::Shift => 0b0010,
            Modifier::Alt => 0b0100,
            Modifier::Meta => 0b1000,
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Modifier set as a bitfield, so equality is order-insensitive by construction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const CTRL: Modifiers = Modifiers(0b0001);
    pub const SHIFT: Modifiers = Modifiers(0b0010);
    pub const ALT: Modifiers = Modifiers(0b0100);
    pub const META: Modifiers = Modifiers(0b1000); // Cmd on macOS, Win on Windows

    /// Create modifiers from individual flags
    pub const fn new(ctrl: bool, shift: bool, alt: bool, meta: bool) -> Self {
        let mut bits = 0u8;
        if ctrl {
            bits |= 0b0001;
        }
        if shift {
            bits |= 0b0010;
        }
        if alt {
            bits |= 0b0100;
        }
        if meta {
            bits |= 0b1000;
        }
        Modifiers(bits)
    }

    /// Set containing exactly one modifier
    pub const fn only(modifier: Modifier) -> Self {
        Modifiers(modifier.bit())
    }

    #[inline]
    pub const fn ctrl(self) -> bool {
        self.0 & 0b0001 != 0
    }

    #[inline]
    pub const fn shift(self) -> bool {
        self.0 & 0b0010 != 0
    }

    #[inline]
    pub const fn alt(self) -> bool {
        self.0 & 0b0100 != 0
    }

    #[inline]
    pub const fn meta(self) -> bool {
        self.0 & 0b1000 != 0
    }

    /// Check if no modifiers are held
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn has(self, modifier: Modifier) -> bool {
        self.0 & modifier.bit() != 0
    }

    /// Add a modifier to the set
    #[inline]
    pub fn insert(&mut self, modifier: Modifier) {
        self.0 |= modifier.bit();
    }

    /// Combine two modifier sets
    #[inline]
    pub const fn union(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 | other.0)
    }

    /// Iterate over the modifiers in the set
    pub fn iter(self) -> impl Iterator<Item = Modifier> {
        Modifier::ALL.into_iter().filter(move |m| self.has(*m))
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl From<Modifier> for Modifiers {
    fn from(modifier: Modifier) -> Self {
        Modifiers::only(modifier)
    }
}

impl FromIterator<Modifier> for Modifiers {
    fn from_iter<I: IntoIterator<Item = Modifier>>(iter: I) -> Self {
        let mut mods = Modifiers::NONE;
        for m in iter {
            mods.insert(m);
        }
        mods
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<&str> = self.iter().map(Modifier::name).collect();
        write!(f, "{}", parts.join("+"))
    }
}

/// Which DOM keyboard event an event or binding belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Keydown,
    Keyup,
    Keypress,
}

impl EventKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            EventKind::Keydown => "keydown",
            EventKind::Keyup => "keyup",
            EventKind::Keypress => "keypress",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "keydown" => Ok(EventKind::Keydown),
            "keyup" => Ok(EventKind::Keyup),
            "keypress" => Ok(EventKind::Keypress),
            other => Err(format!("unknown event kind: {}", other)),
        }
    }
}

/// Canonical name of one physical key, independent of modifiers
///
/// Examples: `"a"`, `"enter"`, `"+"`, `"f5"`, `"ctrl"`. Keys produced from
/// keydown/keyup events are always lowercase; a shifted keypress keeps the
/// character it reported.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key(String);

impl Key {
    pub fn new(name: impl Into<String>) -> Self {
        Key(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The modifier this key is, if it is one of shift/alt/ctrl/meta
    pub fn as_modifier(&self) -> Option<Modifier> {
        Modifier::from_name(&self.0)
    }

    pub fn is_modifier(&self) -> bool {
        self.as_modifier().is_some()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key(name.to_string())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key(name)
    }
}
