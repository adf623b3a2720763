//! Scene: the editing session the UI talks to.
//!
//! Owns the items, the selection, the optional undo history, the active
//! creation tool and any drag in progress, and queues [`SceneEvent`]s for the
//! embedding UI. The implementation is split by concern:
//! - `input`: pointer and keyboard gestures
//! - `selection`: hit testing and selection changes
//! - `shapes`: adding, deleting, undo and redo
//! - `properties`: the property sheet of the active shape
//! - `file_io`: save, load and new document

mod file_io;
mod input;
mod properties;
mod selection;
mod shapes;

pub use input::{Key, Modifiers};
pub use properties::PropertySheet;

use shapeforge_core::{Point, Rect};
use shapeforge_settings::EditorConfig;

use crate::context::InteractionContext;
use crate::events::SceneEvent;
use crate::handles::HandleDrag;
use crate::history::UndoStack;
use crate::item::{ItemId, ShapeItem};
use crate::store::ItemStore;
use crate::tools::{DrawingMode, Preview, ToolState};

/// Items being dragged together, with their positions at press time.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MoveGesture {
    press: Point,
    starts: Vec<(ItemId, Point)>,
}

#[derive(Debug, Clone)]
pub struct Scene {
    items: ItemStore,
    undo: Option<UndoStack>,
    tools: ToolState,
    ctx: InteractionContext,
    handle_drag: Option<HandleDrag>,
    move_gesture: Option<MoveGesture>,
    last_selection: Vec<ItemId>,
    preview_extent: Option<Rect>,
    events: Vec<SceneEvent>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl Scene {
    /// Creates an empty scene with an undo history attached.
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            items: ItemStore::new(),
            undo: Some(UndoStack::new()),
            tools: ToolState::new(),
            ctx: InteractionContext::from_config(config),
            handle_drag: None,
            move_gesture: None,
            last_selection: Vec::new(),
            preview_extent: None,
            events: Vec::new(),
        }
    }

    /// Attaches or detaches the undo history. Without one, edits apply
    /// directly and cannot be undone.
    pub fn set_undo_stack(&mut self, stack: Option<UndoStack>) {
        self.undo = stack;
    }

    pub fn undo_stack(&self) -> Option<&UndoStack> {
        self.undo.as_ref()
    }

    pub fn context(&self) -> &InteractionContext {
        &self.ctx
    }

    pub fn items(&self) -> impl DoubleEndedIterator<Item = &ShapeItem> {
        self.items.iter()
    }

    pub fn item(&self, id: ItemId) -> Option<&ShapeItem> {
        self.items.get(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn mode(&self) -> DrawingMode {
        self.tools.mode()
    }

    /// Outline of the shape under construction.
    pub fn preview(&self) -> Option<&Preview> {
        self.tools.preview()
    }

    pub fn handle_drag(&self) -> Option<&HandleDrag> {
        self.handle_drag.as_ref()
    }

    pub fn set_mode(&mut self, mode: DrawingMode) {
        self.cancel_gestures();
        if self.tools.set_mode(mode) {
            tracing::debug!(?mode, "Drawing mode changed");
            self.events.push(SceneEvent::ModeChanged(mode));
            self.status(format!("Mode: {}", mode.label()));
        }
        self.refresh_preview();
    }

    pub fn set_show_grid(&mut self, show: bool) {
        self.ctx.grid.show = show;
    }

    pub fn set_snap_to_grid(&mut self, snap: bool) {
        self.ctx.grid.snap = snap;
    }

    /// Non-positive sizes are kept but snap as a unit grid.
    pub fn set_grid_size(&mut self, size: f64) {
        self.ctx.grid.size = size;
    }

    /// Screen pixels per scene unit; keeps handles a fixed size on screen.
    pub fn set_view_scale(&mut self, scale: f64) {
        self.ctx.view_scale = scale;
    }

    pub fn snap_point(&self, p: Point) -> Point {
        self.ctx.snap_point(p)
    }

    /// Drains queued notifications, adding one repaint for everything the
    /// items touched since the last call.
    pub fn take_events(&mut self) -> Vec<SceneEvent> {
        if let Some(region) = self.items.take_dirty() {
            self.events.push(SceneEvent::Repaint(region));
        }
        std::mem::take(&mut self.events)
    }

    pub(crate) fn status(&mut self, message: impl Into<String>) {
        self.events.push(SceneEvent::Status(message.into()));
    }

    /// Queues a repaint covering the old and new preview outline.
    pub(crate) fn refresh_preview(&mut self) {
        let current = self.tools.preview().map(Preview::bounds);
        let region = match (self.preview_extent, current) {
            (Some(a), Some(b)) => Some(a.united(&b)),
            (a, b) => a.or(b),
        };
        self.preview_extent = current;
        if let Some(r) = region {
            self.events.push(SceneEvent::Repaint(r.padded(1.0)));
        }
    }
}
