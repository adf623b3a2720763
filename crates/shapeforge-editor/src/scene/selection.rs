//! Hit testing and selection.

use shapeforge_core::Point;

use super::Scene;
use crate::events::SceneEvent;
use crate::handles::HandleKey;
use crate::item::ItemId;

impl Scene {
    /// Topmost item whose bounding rect contains the scene point.
    pub fn item_at(&self, pos: Point) -> Option<ItemId> {
        self.items
            .iter()
            .rev()
            .find(|item| item.contains_scene_point(pos))
            .map(|item| item.id())
    }

    /// Topmost handle of a selected item under the scene point.
    pub fn handle_at(&self, pos: Point) -> Option<HandleKey> {
        self.items
            .iter()
            .rev()
            .filter(|item| item.is_selected())
            .find_map(|item| item.handle_at(pos, &self.ctx))
    }

    pub fn is_selected(&self, id: ItemId) -> bool {
        self.items.get(id).is_some_and(|item| item.is_selected())
    }

    /// Selected ids, bottom to top.
    pub fn selected_ids(&self) -> Vec<ItemId> {
        self.items
            .iter()
            .filter(|item| item.is_selected())
            .map(|item| item.id())
            .collect()
    }

    /// Adds an item to the selection.
    pub fn select(&mut self, id: ItemId) -> bool {
        let found = self.set_item_selected(id, true);
        self.emit_selection_if_changed();
        found
    }

    pub fn clear_selection(&mut self) {
        for item in self.items.iter_mut() {
            item.set_selected(false, &self.ctx);
        }
        self.emit_selection_if_changed();
    }

    pub(crate) fn select_only(&mut self, id: ItemId) {
        for item in self.items.iter_mut() {
            let on = item.id() == id;
            item.set_selected(on, &self.ctx);
        }
    }

    pub(crate) fn set_item_selected(&mut self, id: ItemId, selected: bool) -> bool {
        match self.items.get_mut(id) {
            Some(item) => {
                item.set_selected(selected, &self.ctx);
                true
            }
            None => false,
        }
    }

    pub(crate) fn emit_selection_if_changed(&mut self) {
        let current = self.selected_ids();
        if current != self.last_selection {
            tracing::debug!(selected = current.len(), "Selection changed");
            self.last_selection = current.clone();
            self.events.push(SceneEvent::SelectionChanged(current));
        }
    }
}
