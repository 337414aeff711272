//! # State Store
//!
//! The setter sink transitions write through. A sink accepts either a whole
//! next state or a function of the previous one, applies it synchronously,
//! and makes the result visible to the next caller.

use crate::state::EditorState;
use std::fmt;

/// One write to the state slot
pub enum StateUpdate {
    /// Replace the current state wholesale
    Replace(EditorState),

    /// Derive the next state from whatever is current when applied
    Apply(Box<dyn FnOnce(&EditorState) -> EditorState + Send>),
}

impl StateUpdate {
    pub fn apply<F>(f: F) -> Self
    where
        F: FnOnce(&EditorState) -> EditorState + Send + 'static,
    {
        StateUpdate::Apply(Box::new(f))
    }

    /// Compute the next state against `current`
    pub fn resolve(self, current: &EditorState) -> EditorState {
        match self {
            StateUpdate::Replace(next) => next,
            StateUpdate::Apply(f) => f(current),
        }
    }
}

impl fmt::Debug for StateUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateUpdate::Replace(_) => f.write_str("StateUpdate::Replace(..)"),
            StateUpdate::Apply(_) => f.write_str("StateUpdate::Apply(..)"),
        }
    }
}

/// Where transitions hand their result
pub trait StateSink {
    fn set_state(&mut self, update: StateUpdate);
}

impl<F> StateSink for F
where
    F: FnMut(StateUpdate),
{
    fn set_state(&mut self, update: StateUpdate) {
        self(update)
    }
}

/// Single-slot synchronous store
#[derive(Debug, Clone)]
pub struct Store {
    state: EditorState,

    /// Increments on every applied update
    version: u64,
}

impl Store {
    pub fn new(state: EditorState) -> Self {
        Self { state, version: 0 }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// Cheap clone of the current state
    pub fn snapshot(&self) -> EditorState {
        self.state.clone()
    }

    pub fn version(&self) -> u64 {
        self.version
    }
}

impl StateSink for Store {
    fn set_state(&mut self, update: StateUpdate) {
        self.state = update.resolve(&self.state);
        self.version += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_and_apply() {
        let mut store = Store::new(EditorState::new("p1"));
        assert_eq!(store.version(), 0);

        store.set_state(StateUpdate::Replace(EditorState::new("p2")));
        assert_eq!(store.state().project_id(), "p2");

        store.set_state(StateUpdate::apply(|current| {
            let mut next = current.clone();
            next.ui.details_menu.add_rule_name = "color".to_string();
            next
        }));
        assert_eq!(store.state().project_id(), "p2");
        assert_eq!(store.state().ui.details_menu.add_rule_name, "color");
        assert_eq!(store.version(), 2);
    }

    #[test]
    fn test_functional_updates_see_latest_state() {
        let mut store = Store::new(EditorState::new("p1"));

        for name in ["a", "b"] {
            store.set_state(StateUpdate::apply(move |current| {
                let mut next = current.clone();
                next.ui.details_menu.add_rule_name.push_str(name);
                next
            }));
        }

        assert_eq!(store.state().ui.details_menu.add_rule_name, "ab");
    }

    #[test]
    fn test_closure_sink() {
        let mut seen = Vec::new();
        let mut sink = |update: StateUpdate| seen.push(update.resolve(&EditorState::new("x")));

        sink.set_state(StateUpdate::Replace(EditorState::new("y")));
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].project_id(), "y");
    }
}
