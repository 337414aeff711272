//! # Sitecraft Editor
//!
//! In-memory document model and mutation engine for the Sitecraft visual
//! site builder.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ ids: unique-id sources                      │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ state: EditorState (elements, selectors,    │
//! │        project, UI selection + drafts)      │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ actions: SelectorAction → Transition        │
//! │  - Validate preconditions (silent no-ops)   │
//! │  - Pure, total state → state functions      │
//! │  - Structural sharing of untouched records  │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ store: single state slot (setter sink)      │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **One source of truth**: the `EditorState` held by the store
//! 2. **Whole-state replacement**: transitions never mutate a snapshot
//! 3. **Latest snapshot wins**: transitions are applied as functions of the
//!    state current at write time
//! 4. **Failures are no-ops**: unmet preconditions leave the store untouched
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sitecraft_editor::{EditSession, EditorConfig, SelectorAction};
//!
//! let mut session = EditSession::new("client-1", EditorConfig::default());
//!
//! session.dispatch(SelectorAction::CreateSelector);
//! let id = session.state().css_selectors[0].id.clone();
//! session.dispatch(SelectorAction::SelectSelector { id: Some(id) });
//! session.dispatch(SelectorAction::SetDraftRuleName { value: "color".into() });
//! session.dispatch(SelectorAction::SetDraftRuleValue { value: "red".into() });
//! session.dispatch(SelectorAction::AddRule);
//!
//! println!("{}", session.state().to_stylesheet());
//! ```

mod action_set;
mod actions;
mod class_name;
mod config;
mod errors;
mod ids;
mod selector;
mod session;
mod state;
mod store;
mod transition;
mod undo_stack;

pub use action_set::{Outcome, SelectorActions};
pub use actions::{next_class_name, resolve_selected_selector, ActionError, SelectorAction};
pub use class_name::is_valid_class_name;
pub use config::{EditorConfig, IdStrategy, RenameCheck, DEFAULT_CONFIG_NAME};
pub use errors::EditorError;
pub use ids::{session_seed, IdSource, SequentialIds, UuidIds};
pub use selector::{is_reserved_key, CssSelector, SelectorKind, COMMON_PARENT, RESERVED_KEYS};
pub use session::EditSession;
pub use state::{
    base_page_elements, DetailsMenu, EditorState, Element, ExtraFields, Project, ProjectType,
    Selected, Ui,
};
pub use store::{StateSink, StateUpdate, Store};
pub use transition::Transition;
pub use undo_stack::{HistoryEntry, UndoStack};
