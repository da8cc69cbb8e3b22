//! spicykeys - keyboard shortcut matching
//!
//! Binds key combinations (`"ctrl+s"`, `"alt++"`) and sequences (`"g i"`) to
//! callbacks, and feeds browser-style key events through a per-root match engine.

pub mod config;
pub mod config_paths;
pub mod keymap;
pub mod tracing;

// Re-export commonly used types
pub use config::{EngineConfig, Platform};
pub use keymap::{Callback, EventKind, KeymapError, MatchEngine, Modifiers, RawKeyEvent};
