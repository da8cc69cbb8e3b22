//! YAML configuration parsing for keymaps
//!
//! A keymap file maps combinations to named actions. Callbacks are supplied in
//! code, per action, through [`ActionHandlers`].
//!
//! ```yaml
//! bindings:
//!   - key: "mod+s"
//!     action: save
//!   - key: "g i"
//!     action: go_inbox
//!   - key: "?"
//!     action: help
//!     event: keyup
//!   - key: "meta+left"
//!     action: line_start
//!     platform: macos
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use super::binding::Callback;
use super::error::{KeymapError, KeymapResult};
use super::types::EventKind;

/// Root structure of a keymap YAML file
#[derive(Debug, Deserialize)]
pub struct KeymapConfig {
    pub bindings: Vec<BindingConfig>,
}

/// A single binding entry from YAML
#[derive(Debug, Deserialize)]
pub struct BindingConfig {
    pub key: String,
    pub action: String,
    #[serde(default)]
    pub event: Option<EventKind>,
    #[serde(default)]
    pub platform: Option<String>,
}

/// One combination bound to an action
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComboSpec {
    pub combination: String,
    pub event: Option<EventKind>,
}

impl ComboSpec {
    pub fn new(combination: impl Into<String>) -> Self {
        Self {
            combination: combination.into(),
            event: None,
        }
    }

    pub fn with_event(mut self, event: EventKind) -> Self {
        self.event = Some(event);
        self
    }
}

/// Action names mapped to the combinations that trigger them, in file order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActionKeymap {
    actions: Vec<(String, Vec<ComboSpec>)>,
}

impl ActionKeymap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a combination to `action`
    pub fn add(&mut self, action: &str, combo: ComboSpec) {
        match self.actions.iter_mut().find(|(name, _)| name == action) {
            Some((_, combos)) => combos.push(combo),
            None => self.actions.push((action.to_string(), vec![combo])),
        }
    }

    /// Builder form of [`add`](Self::add) for plain combinations
    pub fn with(mut self, action: &str, combinations: &[&str]) -> Self {
        for combination in combinations {
            self.add(action, ComboSpec::new(*combination));
        }
        self
    }

    pub fn combos(&self, action: &str) -> Option<&[ComboSpec]> {
        self.actions
            .iter()
            .find(|(name, _)| name == action)
            .map(|(_, combos)| combos.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ComboSpec])> {
        self.actions
            .iter()
            .map(|(name, combos)| (name.as_str(), combos.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// Action names mapped to the callbacks they run
#[derive(Clone, Debug, Default)]
pub struct ActionHandlers {
    handlers: HashMap<String, Callback>,
}

impl ActionHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, action: &str, callback: Callback) {
        self.handlers.insert(action.to_string(), callback);
    }

    /// Builder form of [`insert`](Self::insert)
    pub fn with(mut self, action: &str, callback: Callback) -> Self {
        self.insert(action, callback);
        self
    }

    pub fn get(&self, action: &str) -> Option<&Callback> {
        self.handlers.get(action)
    }
}

/// Load an action keymap from a YAML file
pub fn load_keymap_file(path: &Path) -> KeymapResult<ActionKeymap> {
    let content = std::fs::read_to_string(path).map_err(|e| KeymapError::Io(e.to_string()))?;

    parse_keymap_yaml(&content)
}

/// Parse an action keymap from a YAML string
///
/// Entries restricted to another platform are skipped.
pub fn parse_keymap_yaml(yaml: &str) -> KeymapResult<ActionKeymap> {
    let config: KeymapConfig =
        serde_yaml::from_str(yaml).map_err(|e| KeymapError::Parse(e.to_string()))?;

    let current_platform = get_current_platform();
    let mut keymap = ActionKeymap::new();

    for entry in config.bindings {
        if let Some(ref platform) = entry.platform {
            if platform != current_platform {
                continue;
            }
        }

        if entry.key.trim().is_empty() {
            return Err(KeymapError::EmptyCombination);
        }

        keymap.add(
            &entry.action,
            ComboSpec {
                combination: entry.key,
                event: entry.event,
            },
        );
    }

    Ok(keymap)
}

/// Get the current platform identifier
fn get_current_platform() -> &'static str {
    if cfg!(target_os = "macos") {
        "macos"
    } else if cfg!(target_os = "windows") {
        "windows"
    } else {
        "linux"
    }
}
