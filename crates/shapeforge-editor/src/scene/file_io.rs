//! Save, load and new document.

use std::path::Path;

use shapeforge_core::{serialization, Document};

use super::Scene;
use crate::error::EditorResult;

impl Scene {
    /// The current drawing as a document.
    pub fn document(&self) -> Document {
        serialization::serialize(self.items.shapes())
    }

    pub fn save_to_file(&mut self, path: impl AsRef<Path>) -> EditorResult<()> {
        let path = path.as_ref();
        serialization::save_to_file(path, self.items.shapes())?;
        if let Some(stack) = self.undo.as_mut() {
            stack.set_clean();
        }
        self.status(format!("Saved {}", path.display()));
        Ok(())
    }

    /// Replaces the drawing with the file's shapes and clears the history.
    /// On error the scene is left exactly as it was.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> EditorResult<usize> {
        let path = path.as_ref();
        let shapes = serialization::load_from_file(path)?;

        self.reset_document();
        let count = shapes.len();
        for shape in shapes {
            let id = self.items.reserve_id();
            self.items.insert(id, shape);
        }
        self.status(format!("Loaded {count} shape(s) from {}", path.display()));
        Ok(count)
    }

    /// Empties the drawing and the history.
    pub fn new_document(&mut self) {
        self.reset_document();
        self.status("New drawing");
    }

    fn reset_document(&mut self) {
        self.cancel_gestures();
        self.items.clear();
        if let Some(stack) = self.undo.as_mut() {
            stack.clear();
        }
        self.emit_selection_if_changed();
    }
}
