//! # Edit Session Management
//!
//! Host-side owner of one editor session: the store, the id source, the
//! config and the undo history. UI handlers that do not want to manage those
//! pieces themselves dispatch through an `EditSession`.

use crate::action_set::{Outcome, SelectorActions};
use crate::actions::SelectorAction;
use crate::config::EditorConfig;
use crate::ids::IdSource;
use crate::state::EditorState;
use crate::store::{StateSink, StateUpdate, Store};
use crate::undo_stack::UndoStack;
use crate::EditorError;
use tracing::{debug, info, instrument};

pub struct EditSession {
    /// Unique session identifier
    pub id: String,

    store: Store,
    ids: Box<dyn IdSource>,
    config: EditorConfig,
    history: UndoStack,
}

impl EditSession {
    /// Start a session on a fresh bootstrap state
    pub fn new(id: impl Into<String>, config: EditorConfig) -> Self {
        let id = id.into();
        let mut ids = config.id_source(&id);
        let state = EditorState::with_ids(ids.as_mut());
        Self::with_parts(id, state, ids, config)
    }

    /// Start a session on an existing (e.g. loaded) state
    pub fn with_state(id: impl Into<String>, state: EditorState, config: EditorConfig) -> Self {
        let id = id.into();
        let ids = config.resumed_id_source(&id, state.ids());
        Self::with_parts(id, state, ids, config)
    }

    pub fn with_parts(
        id: impl Into<String>,
        state: EditorState,
        ids: Box<dyn IdSource>,
        config: EditorConfig,
    ) -> Self {
        let history = UndoStack::with_max_levels(config.history_limit);
        Self {
            id: id.into(),
            store: Store::new(state),
            ids,
            config,
            history,
        }
    }

    pub fn state(&self) -> &EditorState {
        self.store.state()
    }

    pub fn version(&self) -> u64 {
        self.store.version()
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn history(&self) -> &UndoStack {
        &self.history
    }

    /// Run one action against the latest state
    #[instrument(skip(self, action), fields(session = %self.id, action = action.name()))]
    pub fn dispatch(&mut self, action: SelectorAction) -> Outcome {
        let before = self.store.snapshot();
        let name = action.name();
        let edits_document = action.edits_document();

        let outcome =
            SelectorActions::new(&before, &mut self.store, self.ids.as_mut(), &self.config)
                .dispatch(action);

        if outcome.is_applied() && edits_document && self.selectors_changed(&before) {
            self.history.record(before, Some(name.to_string()));
        }
        outcome
    }

    /// Like `dispatch`, but a skipped action is an error
    pub fn try_dispatch(&mut self, action: SelectorAction) -> Result<(), EditorError> {
        self.dispatch(action).into_result()?;
        Ok(())
    }

    /// Run actions in order as one undo step
    pub fn dispatch_all<I>(&mut self, description: &str, actions: I) -> Vec<Outcome>
    where
        I: IntoIterator<Item = SelectorAction>,
    {
        let before = self.store.snapshot();
        let changed_from = before.css_selectors.clone();
        self.history
            .begin_batch(before, Some(description.to_string()));

        let outcomes: Vec<Outcome> = actions
            .into_iter()
            .map(|action| self.dispatch(action))
            .collect();

        let changed = changed_from != self.store.state().css_selectors;
        self.history.end_batch(changed);

        let applied = outcomes.iter().filter(|o| o.is_applied()).count();
        info!(
            session = %self.id,
            applied,
            skipped = outcomes.len() - applied,
            "Dispatched action batch"
        );
        outcomes
    }

    /// Restore the selector collection from before the last edit.
    /// Selection and drafts stay as they are.
    pub fn undo(&mut self) -> bool {
        let current = self.store.snapshot();
        match self.history.undo(&current) {
            Some(previous) => {
                debug!(session = %self.id, "Undo");
                self.restore_selectors(previous);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        let current = self.store.snapshot();
        match self.history.redo(&current) {
            Some(next) => {
                debug!(session = %self.id, "Redo");
                self.restore_selectors(next);
                true
            }
            None => false,
        }
    }

    fn selectors_changed(&self, before: &EditorState) -> bool {
        before.css_selectors != self.store.state().css_selectors
    }

    fn restore_selectors(&mut self, snapshot: EditorState) {
        self.store.set_state(StateUpdate::apply(move |current| {
            let mut next = current.clone();
            next.css_selectors = snapshot.css_selectors;
            next
        }));
    }

    /// Replace the whole state (project reload). Clears history and
    /// resumes the id source past the ids the new state already uses.
    pub fn load(&mut self, state: EditorState) {
        info!(session = %self.id, project_id = %state.project_id(), "Loading state");
        self.ids = self.config.resumed_id_source(&self.id, state.ids());
        self.store.set_state(StateUpdate::Replace(state));
        self.history.clear();
    }
}
