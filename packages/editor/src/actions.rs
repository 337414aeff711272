//! # Selector Actions
//!
//! Intent-level operations on the CSS selector collection and the details
//! panel drafts.
//!
//! ## Lifecycle
//!
//! ```text
//! SelectorAction ──validate(snapshot)──> ok? ──prepare──> Transition ──apply(current)──> EditorState
//!                        │
//!                        └── Err(ActionError): silent no-op, the store is never touched
//! ```
//!
//! `validate` and `prepare` read the snapshot the caller was holding when the
//! user acted (draft buffers, staged rule name). The resulting [`Transition`]
//! is pure and total: it is applied to whatever state is current when the
//! store gets to it and always yields a state, even if the selection moved in
//! between.
//!
//! ## Precondition Order
//!
//! - `RenameSelector`: name non-empty, a selector selected, checked id valid,
//!   new name valid
//! - `RemoveRule`: a selector selected, rule name not a reserved key
//! - `AddRule`: a selector selected, draft name non-empty, draft value
//!   non-empty, draft name not a reserved key
//! - `CommitEditRuleValue`: a selector selected, a rule staged, staged name
//!   not a reserved key, value non-empty
//! - everything else always succeeds

use crate::class_name::is_valid_class_name;
use crate::config::{EditorConfig, RenameCheck};
use crate::ids::IdSource;
use crate::selector::{is_reserved_key, CssSelector};
use crate::state::EditorState;
use crate::transition::Transition;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum SelectorAction {
    /// Point `ui.selected.cssSelector` at a selector (or clear it)
    SelectSelector {
        #[serde(default)]
        id: Option<String>,
    },

    /// Append a selector named `newClass`, `newClass_1`, ...
    CreateSelector,

    /// Drop the selector with this id (absent ids are fine)
    DeleteSelector { id: String },

    /// Set the alias of `target_id`
    RenameSelector { name: String, target_id: String },

    SetDraftRuleName { value: String },

    SetDraftRuleValue { value: String },

    /// Commit the drafted rule onto the selected selector
    AddRule,

    /// Delete one rule from the selected selector
    RemoveRule { rule_name: String },

    /// Stage an existing rule for in-place editing
    BeginEditRule { rule_name: String },

    /// Write a new value for the staged rule
    CommitEditRuleValue { value: String },
}

/// Why an action was skipped
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("Name is empty")]
    EmptyName,

    #[error("No selector is selected")]
    NoSelection,

    #[error("Not a valid class name: {0}")]
    InvalidClassName(String),

    #[error("Rule name is empty")]
    EmptyRuleName,

    #[error("Rule value is empty")]
    EmptyRuleValue,

    #[error("No rule is staged for editing")]
    NoStagedRule,

    #[error("Reserved selector key: {0}")]
    ReservedKey(String),
}

/// Look up the selector being edited.
///
/// Resolution order: `explicit_id`, then `ui.selected.cssSelector`. With
/// neither there is nothing to match. A dangling selection resolves to `None`.
pub fn resolve_selected_selector<'s>(
    state: &'s EditorState,
    explicit_id: Option<&str>,
) -> Option<&'s Arc<CssSelector>> {
    let id = explicit_id.or(state.ui.selected.css_selector.as_deref())?;
    state.selector(id)
}

/// Name for the next created selector.
///
/// Counts existing selectors whose name contains `base` and suffixes that
/// count. Deleting and re-creating can therefore repeat a name.
pub fn next_class_name(selectors: &[Arc<CssSelector>], base: &str) -> String {
    let occurrences = selectors.iter().filter(|sel| sel.name.contains(base)).count();

    if occurrences == 0 {
        base.to_string()
    } else {
        format!("{}_{}", base, occurrences)
    }
}

impl SelectorAction {
    /// Check preconditions against a snapshot without touching it
    pub fn validate(&self, state: &EditorState, config: &EditorConfig) -> Result<(), ActionError> {
        match self {
            SelectorAction::RenameSelector { name, target_id } => {
                if name.is_empty() {
                    return Err(ActionError::EmptyName);
                }
                let selected = state.selected_selector_id().ok_or(ActionError::NoSelection)?;

                let checked = match config.rename_check {
                    RenameCheck::Selected => selected,
                    RenameCheck::Target => target_id.as_str(),
                };
                if !is_valid_class_name(checked) {
                    return Err(ActionError::InvalidClassName(checked.to_string()));
                }

                if !is_valid_class_name(name) {
                    return Err(ActionError::InvalidClassName(name.clone()));
                }
                Ok(())
            }

            SelectorAction::RemoveRule { rule_name } => {
                require_selection(state)?;
                if is_reserved_key(rule_name) {
                    return Err(ActionError::ReservedKey(rule_name.clone()));
                }
                Ok(())
            }

            SelectorAction::AddRule => {
                require_selection(state)?;
                let draft = &state.ui.details_menu;
                if draft.add_rule_name.is_empty() {
                    return Err(ActionError::EmptyRuleName);
                }
                if draft.add_rule_value.is_empty() {
                    return Err(ActionError::EmptyRuleValue);
                }
                if is_reserved_key(&draft.add_rule_name) {
                    return Err(ActionError::ReservedKey(draft.add_rule_name.clone()));
                }
                Ok(())
            }

            SelectorAction::CommitEditRuleValue { value } => {
                require_selection(state)?;
                let staged = &state.ui.details_menu.rule_name;
                if staged.is_empty() {
                    return Err(ActionError::NoStagedRule);
                }
                if is_reserved_key(staged) {
                    return Err(ActionError::ReservedKey(staged.clone()));
                }
                if value.is_empty() {
                    return Err(ActionError::EmptyRuleValue);
                }
                Ok(())
            }

            SelectorAction::SelectSelector { .. }
            | SelectorAction::CreateSelector
            | SelectorAction::DeleteSelector { .. }
            | SelectorAction::SetDraftRuleName { .. }
            | SelectorAction::SetDraftRuleValue { .. }
            | SelectorAction::BeginEditRule { .. } => Ok(()),
        }
    }

    /// Validate, then capture everything read from the snapshot into a
    /// pure transition. New ids are drawn here so the transition stays pure.
    pub fn prepare(
        self,
        state: &EditorState,
        ids: &mut dyn IdSource,
        config: &EditorConfig,
    ) -> Result<Transition, ActionError> {
        self.validate(state, config)?;

        let transition = match self {
            SelectorAction::SelectSelector { id } => Transition::Select { id },

            SelectorAction::CreateSelector => Transition::Create {
                id: ids.next_id(),
                base_name: config.new_class_base.clone(),
                parent_id: config.default_parent.clone(),
            },

            SelectorAction::DeleteSelector { id } => Transition::Delete { id },

            SelectorAction::RenameSelector { name, target_id } => {
                Transition::Rename { target_id, name }
            }

            SelectorAction::SetDraftRuleName { value } => Transition::SetDraftRuleName { value },

            SelectorAction::SetDraftRuleValue { value } => Transition::SetDraftRuleValue { value },

            SelectorAction::AddRule => {
                let draft = &state.ui.details_menu;
                Transition::AddRule {
                    name: draft.add_rule_name.clone(),
                    value: draft.add_rule_value.clone(),
                }
            }

            SelectorAction::RemoveRule { rule_name } => Transition::RemoveRule { rule_name },

            SelectorAction::BeginEditRule { rule_name } => {
                let rule_value = resolve_selected_selector(state, state.selected_selector_id())
                    .and_then(|sel| sel.rule(&rule_name))
                    .map(Cow::into_owned)
                    .unwrap_or_default();
                Transition::StageRule { rule_name, rule_value }
            }

            SelectorAction::CommitEditRuleValue { value } => Transition::SetRule {
                rule_name: state.ui.details_menu.rule_name.clone(),
                value,
            },
        };

        Ok(transition)
    }

    /// Short label, used for logging and undo descriptions
    pub fn name(&self) -> &'static str {
        match self {
            SelectorAction::SelectSelector { .. } => "select-selector",
            SelectorAction::CreateSelector => "create-selector",
            SelectorAction::DeleteSelector { .. } => "delete-selector",
            SelectorAction::RenameSelector { .. } => "rename-selector",
            SelectorAction::SetDraftRuleName { .. } => "set-draft-rule-name",
            SelectorAction::SetDraftRuleValue { .. } => "set-draft-rule-value",
            SelectorAction::AddRule => "add-rule",
            SelectorAction::RemoveRule { .. } => "remove-rule",
            SelectorAction::BeginEditRule { .. } => "begin-edit-rule",
            SelectorAction::CommitEditRuleValue { .. } => "commit-edit-rule-value",
        }
    }

    /// Whether the action changes the selector collection (as opposed to
    /// selection or draft buffers only)
    pub fn edits_document(&self) -> bool {
        matches!(
            self,
            SelectorAction::CreateSelector
                | SelectorAction::DeleteSelector { .. }
                | SelectorAction::RenameSelector { .. }
                | SelectorAction::AddRule
                | SelectorAction::RemoveRule { .. }
                | SelectorAction::CommitEditRuleValue { .. }
        )
    }
}

fn require_selection(state: &EditorState) -> Result<(), ActionError> {
    state
        .selected_selector_id()
        .map(|_| ())
        .ok_or(ActionError::NoSelection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;

    fn state_with(selectors: Vec<CssSelector>, selected: Option<&str>) -> EditorState {
        let mut state = EditorState::new("p1");
        state.css_selectors = selectors.into_iter().map(Arc::new).collect();
        state.ui.selected.css_selector = selected.map(str::to_string);
        state
    }

    #[test]
    fn test_action_serialization() {
        let action = SelectorAction::RenameSelector {
            name: "hero".to_string(),
            target_id: "css_1".to_string(),
        };

        let json = serde_json::to_string(&action).unwrap();
        assert_eq!(json, r#"{"type":"renameSelector","name":"hero","targetId":"css_1"}"#);

        let deserialized: SelectorAction = serde_json::from_str(&json).unwrap();
        assert_eq!(action, deserialized);

        let add: SelectorAction = serde_json::from_str(r#"{"type":"addRule"}"#).unwrap();
        assert_eq!(add, SelectorAction::AddRule);
    }

    #[test]
    fn test_resolve_prefers_explicit_id() {
        let state = state_with(
            vec![CssSelector::new("a", "a"), CssSelector::new("b", "b")],
            Some("a"),
        );

        assert_eq!(resolve_selected_selector(&state, None).unwrap().id, "a");
        assert_eq!(resolve_selected_selector(&state, Some("b")).unwrap().id, "b");
        assert!(resolve_selected_selector(&state, Some("zzz")).is_none());
    }

    #[test]
    fn test_resolve_without_selection_misses() {
        let state = state_with(vec![CssSelector::new("", "odd"), CssSelector::new("a", "a")], None);
        assert!(resolve_selected_selector(&state, None).is_none());
    }

    #[test]
    fn test_resolve_dangling_selection() {
        let state = state_with(vec![CssSelector::new("a", "a")], Some("deleted"));
        assert!(resolve_selected_selector(&state, None).is_none());
    }

    #[test]
    fn test_next_class_name_counts_substring_matches() {
        let base = "newClass";
        assert_eq!(next_class_name(&[], base), "newClass");

        let one = vec![Arc::new(CssSelector::new("1", "newClass"))];
        assert_eq!(next_class_name(&one, base), "newClass_1");

        let mixed = vec![
            Arc::new(CssSelector::new("1", "newClass")),
            Arc::new(CssSelector::new("2", "card")),
            Arc::new(CssSelector::new("3", "my_newClass_x")),
        ];
        assert_eq!(next_class_name(&mixed, base), "newClass_2");
    }

    #[test]
    fn test_rename_precondition_order() {
        let config = EditorConfig::default();
        let rename = |name: &str| SelectorAction::RenameSelector {
            name: name.to_string(),
            target_id: "a".to_string(),
        };

        let unselected = state_with(vec![CssSelector::new("a", "a")], None);
        assert_eq!(rename("").validate(&unselected, &config), Err(ActionError::EmptyName));
        assert_eq!(rename("ok").validate(&unselected, &config), Err(ActionError::NoSelection));

        let bad_id = state_with(vec![CssSelector::new("1a", "a")], Some("1a"));
        assert_eq!(
            rename("ok").validate(&bad_id, &config),
            Err(ActionError::InvalidClassName("1a".to_string()))
        );

        let selected = state_with(vec![CssSelector::new("a", "a")], Some("a"));
        assert_eq!(
            rename("no spaces").validate(&selected, &config),
            Err(ActionError::InvalidClassName("no spaces".to_string()))
        );
        assert_eq!(rename("ok").validate(&selected, &config), Ok(()));
    }

    #[test]
    fn test_rename_target_check() {
        let config = EditorConfig {
            rename_check: RenameCheck::Target,
            ..EditorConfig::default()
        };
        // Selected id is not a class token, but the target is.
        let state = state_with(
            vec![CssSelector::new("1bad", "x"), CssSelector::new("good", "y")],
            Some("1bad"),
        );

        let action = SelectorAction::RenameSelector {
            name: "hero".to_string(),
            target_id: "good".to_string(),
        };
        assert_eq!(action.validate(&state, &config), Ok(()));
        assert!(action.validate(&state, &EditorConfig::default()).is_err());
    }

    #[test]
    fn test_add_rule_preconditions() {
        let config = EditorConfig::default();
        let mut state = state_with(vec![CssSelector::new("a", "a")], Some("a"));

        assert_eq!(SelectorAction::AddRule.validate(&state, &config), Err(ActionError::EmptyRuleName));

        state.ui.details_menu.add_rule_name = "color".to_string();
        assert_eq!(SelectorAction::AddRule.validate(&state, &config), Err(ActionError::EmptyRuleValue));

        state.ui.details_menu.add_rule_value = "red".to_string();
        assert_eq!(SelectorAction::AddRule.validate(&state, &config), Ok(()));

        state.ui.details_menu.add_rule_name = "_id".to_string();
        assert_eq!(
            SelectorAction::AddRule.validate(&state, &config),
            Err(ActionError::ReservedKey("_id".to_string()))
        );

        state.ui.selected.css_selector = None;
        assert_eq!(SelectorAction::AddRule.validate(&state, &config), Err(ActionError::NoSelection));
    }

    #[test]
    fn test_commit_edit_requires_staged_rule() {
        let config = EditorConfig::default();
        let mut state = state_with(vec![CssSelector::new("a", "a")], Some("a"));
        let commit = SelectorAction::CommitEditRuleValue {
            value: "blue".to_string(),
        };

        assert_eq!(commit.validate(&state, &config), Err(ActionError::NoStagedRule));

        state.ui.details_menu.rule_name = "color".to_string();
        assert_eq!(commit.validate(&state, &config), Ok(()));

        let empty = SelectorAction::CommitEditRuleValue { value: String::new() };
        assert_eq!(empty.validate(&state, &config), Err(ActionError::EmptyRuleValue));
    }

    #[test]
    fn test_commit_edit_rejects_staged_reserved_key() {
        let config = EditorConfig::default();
        let mut ids = SequentialIds::from_seed("t");
        let mut state = state_with(vec![CssSelector::new("a", "a")], Some("a"));

        // Staging a reserved key is allowed; committing to it is not.
        let stage = SelectorAction::BeginEditRule {
            rule_name: "css_selector_value".to_string(),
        }
        .prepare(&state, &mut ids, &config)
        .unwrap();
        state = stage.apply(&state);

        let commit = SelectorAction::CommitEditRuleValue {
            value: "blue".to_string(),
        };
        assert_eq!(
            commit.validate(&state, &config),
            Err(ActionError::ReservedKey("css_selector_value".to_string()))
        );
    }

    #[test]
    fn test_prepare_captures_snapshot_values() {
        let config = EditorConfig::default();
        let mut ids = SequentialIds::from_seed("t");
        let mut state = state_with(
            vec![CssSelector::new("a", "a").with_rule("color", "red")],
            Some("a"),
        );
        state.ui.details_menu.add_rule_name = "margin".to_string();
        state.ui.details_menu.add_rule_value = "0".to_string();

        let add = SelectorAction::AddRule.prepare(&state, &mut ids, &config).unwrap();
        assert_eq!(
            add,
            Transition::AddRule {
                name: "margin".to_string(),
                value: "0".to_string()
            }
        );

        let stage = SelectorAction::BeginEditRule {
            rule_name: "color".to_string(),
        }
        .prepare(&state, &mut ids, &config)
        .unwrap();
        assert_eq!(
            stage,
            Transition::StageRule {
                rule_name: "color".to_string(),
                rule_value: "red".to_string()
            }
        );

        let create = SelectorAction::CreateSelector.prepare(&state, &mut ids, &config).unwrap();
        assert_eq!(
            create,
            Transition::Create {
                id: "t-1".to_string(),
                base_name: "newClass".to_string(),
                parent_id: "common".to_string()
            }
        );
    }

    #[test]
    fn test_begin_edit_missing_rule_stages_empty_value() {
        let config = EditorConfig::default();
        let mut ids = SequentialIds::from_seed("t");
        let state = state_with(vec![CssSelector::new("a", "a")], Some("a"));

        let stage = SelectorAction::BeginEditRule {
            rule_name: "opacity".to_string(),
        }
        .prepare(&state, &mut ids, &config)
        .unwrap();

        assert_eq!(
            stage,
            Transition::StageRule {
                rule_name: "opacity".to_string(),
                rule_value: String::new()
            }
        );
    }
}
