//! Key combination and sequence matching
//!
//! This module turns raw keyboard events into callback invocations:
//! - Normalizes browser-style key events (keypress vs keydown codes, keypad
//!   digits, caps lock) into a canonical key plus modifier set
//! - Parses combination strings like `"ctrl+s"`, `"alt++"` or `"g i"`
//! - Tracks progress through multi-key sequences, with a timeout between steps
//! - Keeps callbacks out of text inputs and outside the engine's root element
//!
//! # Architecture
//!
//! ```text
//! RawKeyEvent → character_from_event() → MatchEngine::handle_raw_event()
//!     → BindingTable::lookup() filtered by SequenceTracker → Callback
//! ```
//!
//! # Binding keys
//!
//! ```ignore
//! let mut engine = MatchEngine::new();
//! engine.bind("mod+s", Callback::new(|_, _| save()))?;
//! engine.bind("g i", Callback::new(|_, _| go_inbox()))?;
//!
//! // Or from a YAML keymap file
//! let keymap = load_keymap_file(Path::new("keymap.yaml"))?;
//! engine.register(&keymap, &handlers)?;
//! ```

mod binding;
mod config;
mod engine;
mod error;
mod keycodes;
mod normalize;
mod parser;
mod scope;
mod sequence;
mod table;
mod types;

pub use binding::{Binding, Callback, SequenceStep};
pub use config::{
    load_keymap_file, parse_keymap_yaml, ActionHandlers, ActionKeymap, BindingConfig, ComboSpec,
    KeymapConfig,
};
pub use engine::MatchEngine;
pub use error::{KeymapError, KeymapResult};
pub use keycodes::{is_known_key, is_named_key};
pub use normalize::{character_from_event, event_modifiers, RawKeyEvent};
pub use parser::{
    default_mod_modifier, keys_from_string, parse_combination, parse_combination_with,
    split_sequence, KeyInfo,
};
pub use scope::{allows_callback, belongs_to, is_editable, Document, ElementTree, NodeId};
pub use sequence::SequenceTracker;
pub use table::BindingTable;
pub use types::{EventKind, Key, Modifier, Modifiers};
