//! Adding and deleting shapes, undo and redo.

use shapeforge_core::Shape;

use super::Scene;
use crate::commands::{AddShape, DeleteShapes, UndoCommand};
use crate::item::ItemId;

impl Scene {
    /// Adds a shape, through the undo history when one is attached.
    pub fn add_shape(&mut self, shape: Shape) -> ItemId {
        let label = shape.type_name();
        let id = match self.undo.as_mut() {
            Some(stack) => {
                let cmd = AddShape::new(&mut self.items, &shape);
                let id = cmd.id;
                stack.push(UndoCommand::AddShape(cmd), &mut self.items, &self.ctx);
                id
            }
            None => {
                let id = self.items.reserve_id();
                self.items.insert(id, shape);
                id
            }
        };
        tracing::debug!(item = %id, kind = label, "Shape added");
        self.status(format!("Added {label}"));
        id
    }

    /// Deletes the selection. Returns how many shapes were removed.
    pub fn delete_selected(&mut self) -> usize {
        let ids = self.selected_ids();
        if ids.is_empty() {
            return 0;
        }
        match self.undo.as_mut() {
            Some(stack) => {
                let cmd = DeleteShapes::new(&self.items, &ids);
                stack.push(UndoCommand::DeleteShapes(cmd), &mut self.items, &self.ctx);
            }
            None => {
                for id in &ids {
                    self.items.remove(*id);
                }
            }
        }
        tracing::debug!(count = ids.len(), "Shapes deleted");
        self.status(format!("Deleted {} shape(s)", ids.len()));
        self.emit_selection_if_changed();
        ids.len()
    }

    pub fn can_undo(&self) -> bool {
        self.undo.as_ref().is_some_and(|s| s.can_undo())
    }

    pub fn can_redo(&self) -> bool {
        self.undo.as_ref().is_some_and(|s| s.can_redo())
    }

    pub fn undo(&mut self) -> bool {
        self.cancel_gestures();
        let Some(stack) = self.undo.as_mut() else {
            return false;
        };
        let text = stack.undo_text();
        let done = stack.undo(&mut self.items, &self.ctx);
        if let (true, Some(text)) = (done, text) {
            self.status(format!("Undo {text}"));
        }
        self.emit_selection_if_changed();
        done
    }

    pub fn redo(&mut self) -> bool {
        self.cancel_gestures();
        let Some(stack) = self.undo.as_mut() else {
            return false;
        };
        let text = stack.redo_text();
        let done = stack.redo(&mut self.items, &self.ctx);
        if let (true, Some(text)) = (done, text) {
            self.status(format!("Redo {text}"));
        }
        self.emit_selection_if_changed();
        done
    }

    /// True when the drawing differs from the last save or load.
    pub fn is_modified(&self) -> bool {
        self.undo.as_ref().is_some_and(|s| !s.is_clean())
    }
}
