//! Notifications the scene queues for the embedding UI.

use shapeforge_core::Rect;

use crate::item::ItemId;
use crate::tools::DrawingMode;

#[derive(Debug, Clone, PartialEq)]
pub enum SceneEvent {
    /// The set of selected items changed; carries the new selection.
    SelectionChanged(Vec<ItemId>),
    ModeChanged(DrawingMode),
    /// Short message for a status bar.
    Status(String),
    /// Scene region that needs to be redrawn.
    Repaint(Rect),
}
