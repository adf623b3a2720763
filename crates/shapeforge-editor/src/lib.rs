//! # ShapeForge editor
//!
//! Interactive editing on top of the shape model: items with a pose and
//! control handles, drawing tools, the undo history and the [`Scene`] that
//! ties them together. The crate has no UI; a front end feeds pointer and key
//! events into a [`Scene`] and drains [`SceneEvent`]s back out.

pub mod commands;
pub mod context;
pub mod error;
pub mod events;
pub mod handles;
pub mod history;
pub mod item;
pub mod scene;
pub mod store;
pub mod tools;

pub use commands::{AddShape, DeleteShapes, EditShapeJson, TransformShape, UndoCommand};
pub use context::InteractionContext;
pub use error::{EditorError, EditorResult};
pub use events::SceneEvent;
pub use handles::{ControlPoint, DragOrigin, HandleDrag, HandleKey, HandleKind, HandleSet};
pub use history::UndoStack;
pub use item::{ItemId, Pose, ShapeItem};
pub use scene::{Key, Modifiers, PropertySheet, Scene};
pub use store::ItemStore;
pub use tools::{DrawingMode, MouseButton, Preview, ToolOutcome, ToolState};
