//! Registry of bindings indexed by canonical key

use std::collections::HashMap;

use super::binding::{Binding, Callback};
use super::types::Key;

/// Bindings grouped by the key they trigger on
///
/// Within one key, sequence steps come first (most recently registered first),
/// followed by plain combos in registration order.
#[derive(Debug, Default)]
pub struct BindingTable {
    by_key: HashMap<Key, Vec<Binding>>,
}

impl BindingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a binding, replacing any binding it overrides
    ///
    /// A plain combo replaces a plain combo with the same text, key, modifiers
    /// and event kind. A sequence step replaces the step of the same sequence at
    /// the same level.
    pub fn insert(&mut self, binding: Binding) {
        let list = self.by_key.entry(binding.key.clone()).or_default();

        list.retain(|existing| !overrides(&binding, existing));

        if binding.is_sequence_step() {
            list.insert(0, binding);
        } else {
            list.push(binding);
        }
    }

    /// All bindings for `key`, in evaluation order
    pub fn lookup(&self, key: &Key) -> &[Binding] {
        self.by_key.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Remove every binding matching `predicate`, returning how many were removed
    pub fn remove_where(&mut self, mut predicate: impl FnMut(&Binding) -> bool) -> usize {
        let mut removed = 0;
        self.by_key.retain(|_, list| {
            let before = list.len();
            list.retain(|b| !predicate(b));
            removed += before - list.len();
            !list.is_empty()
        });
        removed
    }

    /// Remove the plain combo or all sequence steps registered as `combo` for `callback`
    pub fn remove_combo(&mut self, combo: &str, callback: &Callback) -> usize {
        self.remove_where(|b| b.combo == combo && b.callback.same(callback))
    }

    pub fn clear(&mut self) {
        self.by_key.clear();
    }

    /// Number of bindings across all keys
    pub fn len(&self) -> usize {
        self.by_key.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    /// Iterate over all bindings (key order unspecified)
    pub fn iter(&self) -> impl Iterator<Item = &Binding> {
        self.by_key.values().flatten()
    }
}

fn overrides(new: &Binding, existing: &Binding) -> bool {
    match (&new.step, &existing.step) {
        (None, None) => {
            existing.combo == new.combo
                && existing.kind == new.kind
                && existing.modifiers == new.modifiers
        }
        (Some(a), Some(b)) => a.name == b.name && a.level == b.level,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::binding::SequenceStep;
    use crate::keymap::types::{EventKind, Modifiers};

    fn plain(combo: &str, key: &str, cb: &Callback) -> Binding {
        Binding::combo(combo, Key::from(key), Modifiers::NONE, EventKind::Keypress, cb.clone())
    }

    fn step(name: &str, key: &str, level: usize, cb: &Callback) -> Binding {
        plain(name, key, cb).in_sequence(SequenceStep {
            name: name.to_string(),
            level,
            next: None,
        })
    }

    #[test]
    fn test_plain_combos_keep_registration_order() {
        let cb = Callback::new(|_, _| {});
        let mut table = BindingTable::new();
        table.insert(plain("a", "a", &cb));
        let mut keyup = plain("a", "a", &cb);
        keyup.kind = EventKind::Keyup;
        table.insert(keyup);

        let kinds: Vec<_> = table.lookup(&Key::from("a")).iter().map(|b| b.kind).collect();
        assert_eq!(kinds, vec![EventKind::Keypress, EventKind::Keyup]);
    }

    #[test]
    fn test_sequence_steps_go_first() {
        let cb = Callback::new(|_, _| {});
        let mut table = BindingTable::new();
        table.insert(plain("a", "a", &cb));
        table.insert(step("c a t", "a", 2, &cb));

        let list = table.lookup(&Key::from("a"));
        assert!(list[0].is_sequence_step());
        assert!(!list[1].is_sequence_step());
    }

    #[test]
    fn test_same_combo_replaces() {
        let first = Callback::new(|_, _| {});
        let second = Callback::new(|_, _| {});
        let mut table = BindingTable::new();
        table.insert(plain("a", "a", &first));
        table.insert(plain("a", "a", &second));

        let list = table.lookup(&Key::from("a"));
        assert_eq!(list.len(), 1);
        assert!(list[0].callback.same(&second));
    }

    #[test]
    fn test_same_sequence_level_replaces_only_that_level() {
        let cb = Callback::new(|_, _| {});
        let mut table = BindingTable::new();
        table.insert(step("g g", "g", 1, &cb));
        table.insert(step("g g", "g", 2, &cb));
        table.insert(step("g g", "g", 2, &cb));

        let levels: Vec<_> = table.lookup(&Key::from("g")).iter().filter_map(Binding::level).collect();
        assert_eq!(levels, vec![2, 1]);
    }

    #[test]
    fn test_remove_combo_requires_same_callback() {
        let bound = Callback::new(|_, _| {});
        let other = Callback::new(|_, _| {});
        let mut table = BindingTable::new();
        table.insert(step("g i", "g", 1, &bound));
        table.insert(step("g i", "i", 2, &bound));

        assert_eq!(table.remove_combo("g i", &other), 0);
        assert_eq!(table.len(), 2);
        assert_eq!(table.remove_combo("g i", &bound), 2);
        assert!(table.is_empty());
    }

    #[test]
    fn test_lookup_missing_key_is_empty() {
        let table = BindingTable::new();
        assert!(table.lookup(&Key::from("z")).is_empty());
    }
}
