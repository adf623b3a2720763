//! Linear undo/redo history.
//!
//! Two ways in: [`UndoStack::push`] applies the command and records it;
//! [`UndoStack::record`] stores a command whose effect the caller already
//! committed (interactive gestures mutate as they go and record on release).

use crate::commands::UndoCommand;
use crate::context::InteractionContext;
use crate::store::ItemStore;

#[derive(Debug, Clone, Default)]
pub struct UndoStack {
    undo_stack: Vec<UndoCommand>,
    redo_stack: Vec<UndoCommand>,
    limit: Option<usize>,
    clean_index: Option<usize>,
}

impl UndoStack {
    pub fn new() -> Self {
        Self {
            clean_index: Some(0),
            ..Self::default()
        }
    }

    /// Keeps at most `limit` undo steps, dropping the oldest.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::new()
        }
    }

    pub fn push(&mut self, cmd: UndoCommand, store: &mut ItemStore, ctx: &InteractionContext) {
        cmd.apply(store, ctx);
        self.record(cmd);
    }

    pub fn record(&mut self, cmd: UndoCommand) {
        tracing::debug!(command = %cmd.text(), "Recording undo step");
        self.redo_stack.clear();
        if self.clean_index.is_some_and(|i| i > self.undo_stack.len()) {
            self.clean_index = None;
        }
        self.undo_stack.push(cmd);

        if let Some(limit) = self.limit {
            while self.undo_stack.len() > limit {
                self.undo_stack.remove(0);
                self.clean_index = self.clean_index.and_then(|i| i.checked_sub(1));
            }
        }
    }

    /// Reverts the latest step. Returns false when there is nothing to undo.
    pub fn undo(&mut self, store: &mut ItemStore, ctx: &InteractionContext) -> bool {
        let Some(cmd) = self.undo_stack.pop() else {
            return false;
        };
        cmd.undo(store, ctx);
        self.redo_stack.push(cmd);
        true
    }

    pub fn redo(&mut self, store: &mut ItemStore, ctx: &InteractionContext) -> bool {
        let Some(cmd) = self.redo_stack.pop() else {
            return false;
        };
        cmd.apply(store, ctx);
        self.undo_stack.push(cmd);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_text(&self) -> Option<String> {
        self.undo_stack.last().map(UndoCommand::text)
    }

    pub fn redo_text(&self) -> Option<String> {
        self.redo_stack.last().map(UndoCommand::text)
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.clean_index = Some(0);
    }

    /// True when the history sits where [`UndoStack::set_clean`] was last
    /// called (or where it started).
    pub fn is_clean(&self) -> bool {
        self.clean_index == Some(self.undo_stack.len())
    }

    pub fn set_clean(&mut self) {
        self.clean_index = Some(self.undo_stack.len());
    }
}
