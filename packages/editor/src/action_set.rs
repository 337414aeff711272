//! # Selector Action Set
//!
//! The bundle of selector operations a UI layer wires to its event handlers.
//! A `SelectorActions` closes over one snapshot and one sink for the
//! duration of a single user event: build it, call one method, drop it.
//!
//! Every method either writes exactly once to the sink and returns
//! [`Outcome::Applied`], or leaves the sink untouched and returns
//! [`Outcome::Skipped`] with the unmet precondition.

use crate::actions::{resolve_selected_selector, ActionError, SelectorAction};
use crate::config::EditorConfig;
use crate::ids::IdSource;
use crate::selector::CssSelector;
use crate::state::EditorState;
use crate::store::{StateSink, StateUpdate};
use std::sync::Arc;
use tracing::debug;

/// What happened to a dispatched action
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Skipped(ActionError),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }

    pub fn into_result(self) -> Result<(), ActionError> {
        match self {
            Outcome::Applied => Ok(()),
            Outcome::Skipped(reason) => Err(reason),
        }
    }
}

pub struct SelectorActions<'a> {
    state: &'a EditorState,
    sink: &'a mut dyn StateSink,
    ids: &'a mut dyn IdSource,
    config: &'a EditorConfig,
}

impl<'a> SelectorActions<'a> {
    pub fn new(
        state: &'a EditorState,
        sink: &'a mut dyn StateSink,
        ids: &'a mut dyn IdSource,
        config: &'a EditorConfig,
    ) -> Self {
        Self {
            state,
            sink,
            ids,
            config,
        }
    }

    /// Validate against the held snapshot, then hand one functional update
    /// to the sink
    pub fn dispatch(&mut self, action: SelectorAction) -> Outcome {
        let name = action.name();

        match action.prepare(self.state, &mut *self.ids, self.config) {
            Ok(transition) => {
                debug!(action = name, "Applying selector action");
                self.sink
                    .set_state(StateUpdate::apply(move |current| transition.apply(current)));
                Outcome::Applied
            }
            Err(reason) => {
                debug!(action = name, reason = %reason, "Skipping selector action");
                Outcome::Skipped(reason)
            }
        }
    }

    /// The selector being edited, by `explicit_id` or the current selection
    pub fn selected_selector(&self, explicit_id: Option<&str>) -> Option<&'a Arc<CssSelector>> {
        resolve_selected_selector(self.state, explicit_id)
    }

    pub fn select_selector(&mut self, id: Option<&str>) -> Outcome {
        self.dispatch(SelectorAction::SelectSelector {
            id: id.map(str::to_string),
        })
    }

    pub fn rename_selector(&mut self, new_name: &str, target_id: &str) -> Outcome {
        self.dispatch(SelectorAction::RenameSelector {
            name: new_name.to_string(),
            target_id: target_id.to_string(),
        })
    }

    pub fn set_draft_rule_name(&mut self, value: &str) -> Outcome {
        self.dispatch(SelectorAction::SetDraftRuleName {
            value: value.to_string(),
        })
    }

    pub fn set_draft_rule_value(&mut self, value: &str) -> Outcome {
        self.dispatch(SelectorAction::SetDraftRuleValue {
            value: value.to_string(),
        })
    }

    pub fn remove_rule(&mut self, rule_name: &str) -> Outcome {
        self.dispatch(SelectorAction::RemoveRule {
            rule_name: rule_name.to_string(),
        })
    }

    pub fn add_rule(&mut self) -> Outcome {
        self.dispatch(SelectorAction::AddRule)
    }

    pub fn begin_edit_rule(&mut self, rule_name: &str) -> Outcome {
        self.dispatch(SelectorAction::BeginEditRule {
            rule_name: rule_name.to_string(),
        })
    }

    pub fn commit_edit_rule_value(&mut self, value: &str) -> Outcome {
        self.dispatch(SelectorAction::CommitEditRuleValue {
            value: value.to_string(),
        })
    }

    pub fn create_selector(&mut self) -> Outcome {
        self.dispatch(SelectorAction::CreateSelector)
    }

    pub fn delete_selector(&mut self, id: &str) -> Outcome {
        self.dispatch(SelectorAction::DeleteSelector { id: id.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;
    use crate::store::Store;

    #[test]
    fn test_skipped_actions_never_touch_the_sink() {
        let state = EditorState::new("p1");
        let config = EditorConfig::default();
        let mut ids = SequentialIds::from_seed("t");
        let mut writes = 0;
        let mut sink = |_: StateUpdate| writes += 1;

        let mut actions = SelectorActions::new(&state, &mut sink, &mut ids, &config);
        assert_eq!(actions.add_rule(), Outcome::Skipped(ActionError::NoSelection));
        assert_eq!(actions.remove_rule("color"), Outcome::Skipped(ActionError::NoSelection));
        assert_eq!(
            actions.rename_selector("", "x"),
            Outcome::Skipped(ActionError::EmptyName)
        );
        drop(actions);

        assert_eq!(writes, 0);
    }

    #[test]
    fn test_applied_action_writes_once() {
        let state = EditorState::new("p1");
        let config = EditorConfig::default();
        let mut ids = SequentialIds::from_seed("t");
        let mut store = Store::new(state.clone());

        let outcome = SelectorActions::new(&state, &mut store, &mut ids, &config).create_selector();

        assert!(outcome.is_applied());
        assert_eq!(store.version(), 1);
        assert_eq!(store.state().css_selectors[0].name, "newClass");
        assert_eq!(store.state().css_selectors[0].id, "t-1");
    }

    #[test]
    fn test_selected_selector_lookup() {
        let mut state = EditorState::new("p1");
        state.css_selectors.push(Arc::new(CssSelector::new("a", "card")));
        state.ui.selected.css_selector = Some("a".to_string());
        let config = EditorConfig::default();
        let mut ids = SequentialIds::from_seed("t");
        let mut sink = |_: StateUpdate| {};

        let actions = SelectorActions::new(&state, &mut sink, &mut ids, &config);
        assert_eq!(actions.selected_selector(None).unwrap().name, "card");
        assert!(actions.selected_selector(Some("b")).is_none());
    }

    #[test]
    fn test_outcome_into_result() {
        assert_eq!(Outcome::Applied.into_result(), Ok(()));
        assert_eq!(
            Outcome::Skipped(ActionError::NoStagedRule).into_result(),
            Err(ActionError::NoStagedRule)
        );
    }
}
