//! Pointer and keyboard handling.

use shapeforge_core::{apply_record, Point};

use super::{MoveGesture, Scene};
use crate::commands::{EditShapeJson, TransformShape, UndoCommand};
use crate::handles::{DragOrigin, HandleDrag, HandleKey, HandleKind};
use crate::item::Pose;
use crate::tools::{DrawingMode, MouseButton, ToolOutcome};

/// Keyboard modifiers held during a pointer press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
}

impl Modifiers {
    /// Shift or Ctrl extend the selection instead of replacing it.
    pub fn extends_selection(&self) -> bool {
        self.shift || self.ctrl
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Delete,
    Backspace,
    Other,
}

// Vectors shorter than this have no usable direction.
const MIN_ROTATION_ARM: f64 = 1e-6;

fn wrap_degrees(deg: f64) -> f64 {
    let mut d = deg % 360.0;
    if d > 180.0 {
        d -= 360.0;
    } else if d <= -180.0 {
        d += 360.0;
    }
    d
}

impl Scene {
    pub fn pointer_press(&mut self, pos: Point, button: MouseButton, modifiers: Modifiers) {
        if button == MouseButton::Left && !self.tools.is_active() && self.handle_drag.is_none() {
            if let Some(key) = self.handle_at(pos) {
                self.begin_handle_drag(key, pos);
                return;
            }
        }

        let snapped = self.ctx.snap_point(pos);
        let on_selected = self.item_at(pos).is_some_and(|id| self.is_selected(id));
        let outcome = self.tools.press(snapped, button, on_selected, &self.ctx);
        if self.apply_tool_outcome(outcome) {
            return;
        }

        if button == MouseButton::Left {
            self.select_at(pos, modifiers);
        }
    }

    pub fn pointer_move(&mut self, pos: Point) {
        if self.handle_drag.is_some() {
            self.drag_handle_to(pos);
            return;
        }

        if self.tools.is_active() {
            let snapped = self.ctx.snap_point(pos);
            if self.tools.pointer_move(snapped) {
                self.refresh_preview();
            }
            return;
        }

        if let Some(gesture) = &self.move_gesture {
            let delta = pos - gesture.press;
            for (id, start) in &gesture.starts {
                if let Some(item) = self.items.get_mut(*id) {
                    item.propose_pos(*start + delta, &self.ctx);
                    item.update_handles(&self.ctx);
                }
            }
        }
    }

    pub fn pointer_release(&mut self, pos: Point, button: MouseButton) {
        if self.handle_drag.is_some() {
            if button == MouseButton::Left {
                self.finish_handle_drag(pos);
            }
            return;
        }

        let snapped = self.ctx.snap_point(pos);
        let outcome = self.tools.release(snapped, button, &self.ctx);
        if self.apply_tool_outcome(outcome) {
            return;
        }

        if button == MouseButton::Left {
            self.finish_move();
        }
    }

    pub fn pointer_double_click(&mut self, pos: Point, button: MouseButton) {
        if self.handle_drag.is_some() {
            return;
        }
        let snapped = self.ctx.snap_point(pos);
        let on_selected = self.item_at(pos).is_some_and(|id| self.is_selected(id));
        let outcome = self
            .tools
            .double_click(snapped, button, on_selected, &self.ctx);
        if self.apply_tool_outcome(outcome) {
            return;
        }
        if button == MouseButton::Left {
            self.select_at(pos, Modifiers::default());
        }
    }

    pub fn key_press(&mut self, key: Key) {
        match key {
            Key::Escape => {
                if self.handle_drag.is_some() {
                    self.cancel_handle_drag();
                } else if self.tools.cancel() {
                    self.refresh_preview();
                    self.status("Cancelled");
                } else if self.tools.mode() != DrawingMode::None {
                    self.set_mode(DrawingMode::None);
                }
            }
            Key::Delete | Key::Backspace => {
                if self.handle_drag.is_none() && !self.tools.is_active() {
                    self.delete_selected();
                }
            }
            Key::Other => {}
        }
    }

    /// Returns false when the event should fall through to selection.
    fn apply_tool_outcome(&mut self, outcome: ToolOutcome) -> bool {
        match outcome {
            ToolOutcome::Forward => false,
            ToolOutcome::Consumed => {
                self.refresh_preview();
                true
            }
            ToolOutcome::Aborted => {
                self.refresh_preview();
                true
            }
            ToolOutcome::Commit(shape) => {
                self.refresh_preview();
                self.add_shape(shape);
                true
            }
        }
    }

    fn select_at(&mut self, pos: Point, modifiers: Modifiers) {
        match self.item_at(pos) {
            Some(id) => {
                if modifiers.extends_selection() {
                    let selected = self.is_selected(id);
                    self.set_item_selected(id, !selected);
                } else if !self.is_selected(id) {
                    self.select_only(id);
                }
                if self.is_selected(id) {
                    self.begin_move(pos);
                }
            }
            None => {
                if !modifiers.extends_selection() {
                    self.clear_selection();
                }
            }
        }
        self.emit_selection_if_changed();
    }

    fn begin_move(&mut self, press: Point) {
        let mut starts = Vec::new();
        for item in self.items.iter_mut().filter(|i| i.is_selected()) {
            item.begin_move();
            starts.push((item.id(), item.pos()));
        }
        self.move_gesture = Some(MoveGesture { press, starts });
    }

    fn finish_move(&mut self) {
        let Some(gesture) = self.move_gesture.take() else {
            return;
        };
        for (id, _) in gesture.starts {
            let Some(item) = self.items.get_mut(id) else {
                continue;
            };
            if let Some(cmd) = item.end_move(&self.ctx) {
                if let Some(stack) = self.undo.as_mut() {
                    stack.record(cmd);
                }
            }
        }
    }

    fn begin_handle_drag(&mut self, key: HandleKey, press: Point) {
        let Some(item) = self.items.get_mut(key.item) else {
            return;
        };
        let origin = match key.kind {
            HandleKind::Rotation => DragOrigin::Rotation {
                initial_rotation: item.rotation(),
                pivot_scene: item.map_to_scene(item.bounding_rect().center()),
            },
            _ => DragOrigin::Geometry {
                snapshot: item.shape().to_record(),
            },
        };
        item.begin_handle_drag(key.kind, key.index);
        tracing::debug!(item = %key.item, kind = ?key.kind, index = key.index, "Handle drag started");
        self.handle_drag = Some(HandleDrag {
            key,
            press_scene: press,
            origin,
        });
    }

    fn drag_handle_to(&mut self, pos: Point) {
        let Some(drag) = &self.handle_drag else {
            return;
        };
        let Some(item) = self.items.get_mut(drag.key.item) else {
            return;
        };
        match &drag.origin {
            DragOrigin::Rotation {
                initial_rotation,
                pivot_scene,
            } => {
                let v0 = drag.press_scene - *pivot_scene;
                let v1 = pos - *pivot_scene;
                if v0.length() < MIN_ROTATION_ARM || v1.length() < MIN_ROTATION_ARM {
                    return;
                }
                let delta = wrap_degrees(v1.angle_degrees() - v0.angle_degrees());
                item.set_rotation(initial_rotation + delta);
                item.update_handles(&self.ctx);
            }
            DragOrigin::Geometry { .. } => {
                let snapped = self.ctx.snap_point(pos);
                item.handle_moved(drag.key.kind, drag.key.index, snapped, &self.ctx);
            }
        }
    }

    fn finish_handle_drag(&mut self, pos: Point) {
        self.drag_handle_to(pos);
        let Some(drag) = self.handle_drag.take() else {
            return;
        };
        let Some(item) = self.items.get_mut(drag.key.item) else {
            return;
        };
        item.end_handle_drag(&self.ctx);

        let cmd = match drag.origin {
            DragOrigin::Rotation {
                initial_rotation, ..
            } => {
                let new = item.pose();
                ((new.rotation - initial_rotation).abs() > self.ctx.gestures.rotation_epsilon_deg)
                    .then(|| {
                        UndoCommand::TransformShape(TransformShape {
                            id: item.id(),
                            old: Pose::new(new.pos, initial_rotation),
                            new,
                        })
                    })
            }
            DragOrigin::Geometry { snapshot } => {
                let new = item.shape().to_record();
                (new != snapshot).then(|| {
                    UndoCommand::EditShapeJson(EditShapeJson {
                        id: item.id(),
                        old: snapshot,
                        new,
                    })
                })
            }
        };

        tracing::debug!(item = %drag.key.item, changed = cmd.is_some(), "Handle drag finished");
        if let (Some(cmd), Some(stack)) = (cmd, self.undo.as_mut()) {
            stack.record(cmd);
        }
    }

    /// Puts the dragged item back as it was at press time.
    pub(crate) fn cancel_handle_drag(&mut self) {
        let Some(drag) = self.handle_drag.take() else {
            return;
        };
        let Some(item) = self.items.get_mut(drag.key.item) else {
            return;
        };
        match &drag.origin {
            DragOrigin::Rotation {
                initial_rotation, ..
            } => item.set_rotation(*initial_rotation),
            DragOrigin::Geometry { snapshot } => {
                if let Err(e) = apply_record(item.shape_mut(), snapshot) {
                    tracing::error!(item = %drag.key.item, error = %e, "Cannot restore drag snapshot");
                }
                item.sync_from_shape();
            }
        }
        item.end_handle_drag(&self.ctx);
        tracing::debug!(item = %drag.key.item, "Handle drag cancelled");
    }

    /// Abandons drags and creation in progress without recording anything.
    pub(crate) fn cancel_gestures(&mut self) {
        self.cancel_handle_drag();
        if let Some(gesture) = self.move_gesture.take() {
            for (id, _) in gesture.starts {
                if let Some(item) = self.items.get_mut(id) {
                    item.cancel_move(&self.ctx);
                }
            }
        }
        if self.tools.cancel() {
            self.refresh_preview();
        }
    }
}
