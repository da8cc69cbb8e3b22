//! Combination string parsing
//!
//! Turns strings like `"command+shift+l"`, `"alt++"` or `"g i"` into canonical
//! key, modifier set and event kind.

use super::error::{KeymapError, KeymapResult};
use super::keycodes;
use super::types::{EventKind, Key, Modifier, Modifiers};

/// Parsed form of one combination (one step of a sequence)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyInfo {
    pub key: Key,
    pub modifiers: Modifiers,
    pub kind: EventKind,
}

/// The modifier `mod` stands for on the platform this was compiled for
pub fn default_mod_modifier() -> Modifier {
    if cfg!(any(target_os = "macos", target_os = "ios")) {
        Modifier::Meta
    } else {
        Modifier::Ctrl
    }
}

/// Split a sequence string into its steps; runs of whitespace count as one separator
pub fn split_sequence(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Split one combination into its `+`-separated tokens
///
/// `"++"` stands for the plus key, and a lone `"+"` is the plus key itself.
pub fn keys_from_string(combination: &str) -> Vec<String> {
    if combination == "+" {
        return vec!["+".to_string()];
    }

    combination
        .replace("++", "+plus")
        .split('+')
        .map(str::to_string)
        .collect()
}

/// Parse a combination using the compile target's meaning of `mod`
pub fn parse_combination(combination: &str, hint: Option<EventKind>) -> KeymapResult<KeyInfo> {
    parse_combination_with(combination, hint, default_mod_modifier())
}

/// Parse a combination, resolving `mod` to `mod_modifier`
///
/// Tokens are processed left to right. Modifier names add to the modifier set;
/// the last non-modifier token is the key, or the last token when every token
/// is a modifier. When an explicit non-keypress `hint` is given,
/// shifted US symbols are rewritten to their base key plus shift, since only
/// keypress reports the shifted character.
pub fn parse_combination_with(
    combination: &str,
    hint: Option<EventKind>,
    mod_modifier: Modifier,
) -> KeymapResult<KeyInfo> {
    if combination.is_empty() {
        return Err(KeymapError::EmptyCombination);
    }

    let shift_inversion = matches!(hint, Some(kind) if kind != EventKind::Keypress);
    let mut modifiers = Modifiers::NONE;
    let mut last_key = String::new();
    let mut last_modifier = String::new();
    let tokens = keys_from_string(combination);

    if tokens.last().is_some_and(|token| token.is_empty()) {
        return Err(KeymapError::MissingKey(combination.to_string()));
    }

    for token in tokens {
        let mut key = if token == "mod" {
            mod_modifier.name().to_string()
        } else {
            keycodes::alias(&token).map(str::to_string).unwrap_or(token)
        };

        if shift_inversion {
            if let Some(base) = keycodes::unshifted(&key) {
                key = base.to_string();
                modifiers.insert(Modifier::Shift);
            }
        }

        if let Some(modifier) = Modifier::from_name(&key) {
            modifiers.insert(modifier);
            last_modifier = key;
        } else {
            last_key = key;
        }
    }

    if last_key.is_empty() {
        last_key = last_modifier;
    }
    if last_key.is_empty() {
        return Err(KeymapError::MissingKey(combination.to_string()));
    }

    let mut kind = hint.unwrap_or(if keycodes::is_named_key(&last_key) {
        EventKind::Keydown
    } else {
        EventKind::Keypress
    });

    // keypress can't report modifier state reliably
    if kind == EventKind::Keypress && !modifiers.is_empty() {
        kind = EventKind::Keydown;
    }

    Ok(KeyInfo {
        key: Key::new(last_key),
        modifiers,
        kind,
    })
}
