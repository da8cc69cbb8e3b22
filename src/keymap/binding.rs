//! Binding struct representing a mapping from one key step to a callback

use std::fmt;
use std::rc::Rc;

use super::normalize::RawKeyEvent;
use super::types::{EventKind, Key, Modifiers};

/// A handler invoked with the triggering event and the matched combination text
///
/// Cloning shares the handler; two callbacks are the same handler only if one
/// was cloned from the other. That identity is what `unbind` compares.
#[derive(Clone)]
pub struct Callback(Rc<dyn Fn(&RawKeyEvent, &str)>);

impl Callback {
    pub fn new(f: impl Fn(&RawKeyEvent, &str) + 'static) -> Self {
        Callback(Rc::new(f))
    }

    /// Whether both callbacks share the same handler
    pub fn same(&self, other: &Callback) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn call(&self, event: &RawKeyEvent, combo: &str) {
        (self.0)(event, combo)
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callback({:p})", Rc::as_ptr(&self.0))
    }
}

/// Position of a binding inside a multi-step sequence
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SequenceStep {
    /// Sequence name: the normalized sequence text, e.g. `"g i"`
    pub name: String,
    /// 1-based position of this step
    pub level: usize,
    /// Event kind of the following step, `None` for the final step
    pub next: Option<EventKind>,
}

impl SequenceStep {
    pub fn is_final(&self) -> bool {
        self.next.is_none()
    }
}

/// A single registered key step
#[derive(Clone, Debug)]
pub struct Binding {
    pub callback: Callback,
    pub key: Key,
    pub modifiers: Modifiers,
    pub kind: EventKind,
    /// Set for steps of a sequence; plain combos have none
    pub step: Option<SequenceStep>,
    /// Combination text as registered (the whole sequence text for sequence steps)
    pub combo: String,
}

impl Binding {
    /// Create a plain (single-step) combo binding
    pub fn combo(
        combo: impl Into<String>,
        key: Key,
        modifiers: Modifiers,
        kind: EventKind,
        callback: Callback,
    ) -> Self {
        Self {
            callback,
            key,
            modifiers,
            kind,
            step: None,
            combo: combo.into(),
        }
    }

    /// Turn this binding into one step of a sequence (builder pattern)
    pub fn in_sequence(mut self, step: SequenceStep) -> Self {
        self.step = Some(step);
        self
    }

    pub fn is_sequence_step(&self) -> bool {
        self.step.is_some()
    }

    pub fn sequence_name(&self) -> Option<&str> {
        self.step.as_ref().map(|s| s.name.as_str())
    }

    pub fn level(&self) -> Option<usize> {
        self.step.as_ref().map(|s| s.level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_callback_identity() {
        let a = Callback::new(|_, _| {});
        let b = Callback::new(|_, _| {});
        assert!(a.same(&a.clone()));
        assert!(!a.same(&b));
    }

    #[test]
    fn test_callback_receives_combo() {
        let seen = Rc::new(Cell::new(false));
        let flag = seen.clone();
        let cb = Callback::new(move |_, combo| flag.set(combo == "ctrl+s"));
        cb.call(&RawKeyEvent::new(EventKind::Keydown, 83), "ctrl+s");
        assert!(seen.get());
    }

    #[test]
    fn test_sequence_step_binding() {
        let cb = Callback::new(|_, _| {});
        let binding = Binding::combo("g i", Key::from("g"), Modifiers::NONE, EventKind::Keypress, cb)
            .in_sequence(SequenceStep {
                name: "g i".to_string(),
                level: 1,
                next: Some(EventKind::Keypress),
            });

        assert!(binding.is_sequence_step());
        assert_eq!(binding.sequence_name(), Some("g i"));
        assert_eq!(binding.level(), Some(1));
        assert!(!binding.step.as_ref().unwrap().is_final());
    }
}
