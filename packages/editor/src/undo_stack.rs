//! # Undo/Redo Stack
//!
//! Snapshot history for selector edits.
//!
//! ## Design
//!
//! - Before a committed edit, the previous state is pushed as an undo entry
//! - Undo hands back that snapshot and moves the current one to redo
//! - New edits clear the redo stack
//! - Batches record a single entry for several edits (script replays)
//!
//! Snapshots share their unchanged selectors by `Arc`, so an entry costs one
//! pointer per selector plus the records the edit actually replaced.

use crate::state::EditorState;

/// One restorable point in history
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub snapshot: EditorState,

    /// Optional description of the edit this entry undoes
    pub description: Option<String>,
}

#[derive(Debug)]
pub struct UndoStack {
    /// Most recent last
    undo_stack: Vec<HistoryEntry>,

    /// Most recent last
    redo_stack: Vec<HistoryEntry>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,

    /// Snapshot from before the first edit of an open batch
    current_batch: Option<HistoryEntry>,
}

impl UndoStack {
    /// Create a new undo stack with default max levels (100)
    pub fn new() -> Self {
        Self::with_max_levels(100)
    }

    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
            current_batch: None,
        }
    }

    /// Record the state as it was before an edit
    pub fn record(&mut self, before: EditorState, description: Option<String>) {
        if let Some(batch) = &mut self.current_batch {
            if batch.description.is_none() {
                batch.description = description;
            }
            return;
        }

        self.push_entry(HistoryEntry {
            snapshot: before,
            description,
        });
    }

    /// Start a batch; edits until `end_batch` undo as one step
    pub fn begin_batch(&mut self, before: EditorState, description: Option<String>) {
        self.current_batch = Some(HistoryEntry {
            snapshot: before,
            description,
        });
    }

    /// Close the batch. `changed` is false when no edit inside it applied.
    pub fn end_batch(&mut self, changed: bool) {
        if let Some(entry) = self.current_batch.take() {
            if changed {
                self.push_entry(entry);
            }
        }
    }

    pub fn in_batch(&self) -> bool {
        self.current_batch.is_some()
    }

    fn push_entry(&mut self, entry: HistoryEntry) {
        self.undo_stack.push(entry);

        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }

        self.redo_stack.clear();
    }

    /// Step back. Returns the snapshot to restore, if any.
    pub fn undo(&mut self, current: &EditorState) -> Option<EditorState> {
        let entry = self.undo_stack.pop()?;
        self.redo_stack.push(HistoryEntry {
            snapshot: current.clone(),
            description: entry.description.clone(),
        });
        Some(entry.snapshot)
    }

    /// Step forward again after an undo
    pub fn redo(&mut self, current: &EditorState) -> Option<EditorState> {
        let entry = self.redo_stack.pop()?;
        self.undo_stack.push(HistoryEntry {
            snapshot: current.clone(),
            description: entry.description.clone(),
        });
        Some(entry.snapshot)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.current_batch = None;
    }

    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack
            .last()
            .and_then(|entry| entry.description.as_deref())
    }

    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack
            .last()
            .and_then(|entry| entry.description.as_deref())
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}
