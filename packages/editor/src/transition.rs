//! # Transitions
//!
//! Prepared, fully-resolved state changes. `apply` is pure and total: it
//! rebuilds the branch it owns (selector list, drafts, or selection) and
//! shares everything else with the input. Selector edits target the
//! selection of the state they are applied to; if nothing matches, the
//! selector list comes back unchanged.

use crate::actions::next_class_name;
use crate::selector::CssSelector;
use crate::state::{DetailsMenu, EditorState};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Select {
        id: Option<String>,
    },

    /// The display name is computed against the state being applied to
    Create {
        id: String,
        base_name: String,
        parent_id: String,
    },

    Delete {
        id: String,
    },

    Rename {
        target_id: String,
        name: String,
    },

    SetDraftRuleName {
        value: String,
    },

    SetDraftRuleValue {
        value: String,
    },

    AddRule {
        name: String,
        value: String,
    },

    RemoveRule {
        rule_name: String,
    },

    /// Load a rule into the edit-in-place drafts
    StageRule {
        rule_name: String,
        rule_value: String,
    },

    /// Write `value` under the staged rule name
    SetRule {
        rule_name: String,
        value: String,
    },
}

impl Transition {
    pub fn apply(&self, current: &EditorState) -> EditorState {
        match self {
            Transition::Select { id } => {
                let mut next = current.clone();
                next.ui.selected.css_selector = id.clone();
                next
            }

            Transition::Create {
                id,
                base_name,
                parent_id,
            } => {
                let name = next_class_name(&current.css_selectors, base_name);
                debug!(selector_id = %id, name = %name, "Creating selector");

                let mut next = current.clone();
                next.css_selectors.push(Arc::new(
                    CssSelector::new(id.clone(), name).with_parent(parent_id.clone()),
                ));
                next
            }

            Transition::Delete { id } => {
                let mut next = current.clone();
                next.css_selectors.retain(|sel| &sel.id != id);
                next
            }

            Transition::Rename { target_id, name } => {
                let mut next = current.clone();
                next.css_selectors =
                    map_selector(current, Some(target_id.as_str()), |sel| sel.with_alias(name.clone()));
                next
            }

            Transition::SetDraftRuleName { value } => with_drafts(current, |drafts| {
                drafts.add_rule_name = value.clone();
            }),

            Transition::SetDraftRuleValue { value } => with_drafts(current, |drafts| {
                drafts.add_rule_value = value.clone();
            }),

            Transition::AddRule { name, value } => {
                let project_id = current.project_id().to_string();
                let mut next = with_drafts(current, |drafts| {
                    drafts.add_rule_name.clear();
                    drafts.add_rule_value.clear();
                });
                next.css_selectors = map_selector(current, current.selected_selector_id(), |sel| {
                    sel.with_rule(name.clone(), value.clone())
                        .with_last_rule(name.clone(), value.clone())
                        .with_alias(name.clone())
                        .with_project(project_id.clone())
                });
                next
            }

            Transition::RemoveRule { rule_name } => {
                let mut next = current.clone();
                next.css_selectors = map_selector(current, current.selected_selector_id(), |sel| {
                    sel.without_rule(rule_name)
                });
                next
            }

            Transition::StageRule {
                rule_name,
                rule_value,
            } => with_drafts(current, |drafts| {
                drafts.rule_name = rule_name.clone();
                drafts.rule_value = rule_value.clone();
            }),

            Transition::SetRule { rule_name, value } => {
                let mut next = current.clone();
                next.css_selectors = map_selector(current, current.selected_selector_id(), |sel| {
                    sel.with_rule(rule_name.clone(), value.clone())
                });
                next
            }
        }
    }
}

/// Rebuild the selector list with `edit` applied to the record whose id is
/// `target`. Every other record is shared by pointer.
fn map_selector<F>(state: &EditorState, target: Option<&str>, edit: F) -> Vec<Arc<CssSelector>>
where
    F: Fn(CssSelector) -> CssSelector,
{
    state
        .css_selectors
        .iter()
        .map(|sel| match target {
            Some(id) if sel.id == id => Arc::new(edit(CssSelector::clone(sel))),
            _ => Arc::clone(sel),
        })
        .collect()
}

fn with_drafts<F>(state: &EditorState, edit: F) -> EditorState
where
    F: FnOnce(&mut DetailsMenu),
{
    let mut next = state.clone();
    edit(&mut next.ui.details_menu);
    next
}
