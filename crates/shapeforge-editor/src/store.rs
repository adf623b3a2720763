//! Id-keyed collection of scene items.
//!
//! Items iterate in id order, which is also stacking order: later items
//! draw on top. Because undo re-inserts items under their original ids, a
//! restored item returns to its original place in the stack.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use shapeforge_core::{Rect, Shape};

use crate::item::{ItemId, ShapeItem};

#[derive(Debug, Clone, Default)]
pub struct ItemStore {
    items: BTreeMap<ItemId, ShapeItem>,
    next_id: u64,
    dirty: Option<Rect>,
}

impl ItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands out a fresh id without inserting anything.
    pub fn reserve_id(&mut self) -> ItemId {
        self.next_id += 1;
        ItemId(self.next_id)
    }

    /// Inserts `shape` under `id`, replacing any item already there.
    pub fn insert(&mut self, id: ItemId, shape: Shape) -> &mut ShapeItem {
        self.next_id = self.next_id.max(id.0);
        let item = ShapeItem::new(id, shape);
        self.mark_dirty(item.scene_bounding_rect());
        match self.items.entry(id) {
            Entry::Occupied(mut slot) => {
                tracing::warn!(item = %id, "Replacing existing item");
                slot.insert(item);
                slot.into_mut()
            }
            Entry::Vacant(slot) => slot.insert(item),
        }
    }

    pub fn remove(&mut self, id: ItemId) -> Option<ShapeItem> {
        let item = self.items.remove(&id)?;
        self.mark_dirty(item.scene_bounding_rect());
        Some(item)
    }

    pub fn get(&self, id: ItemId) -> Option<&ShapeItem> {
        self.items.get(&id)
    }

    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut ShapeItem> {
        self.items.get_mut(&id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.items.contains_key(&id)
    }

    /// Items bottom to top.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &ShapeItem> {
        self.items.values()
    }

    pub fn iter_mut(&mut self) -> impl DoubleEndedIterator<Item = &mut ShapeItem> {
        self.items.values_mut()
    }

    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.items.values().map(ShapeItem::shape)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Removes every item. Ids keep counting up.
    pub fn clear(&mut self) {
        let extent = self
            .items
            .values()
            .map(ShapeItem::scene_bounding_rect)
            .reduce(|a, b| a.united(&b));
        if let Some(r) = extent {
            self.mark_dirty(r);
        }
        self.items.clear();
    }

    fn mark_dirty(&mut self, region: Rect) {
        self.dirty = Some(match self.dirty {
            Some(d) => d.united(&region),
            None => region,
        });
    }

    /// Union of everything touched since the last call, items included.
    pub fn take_dirty(&mut self) -> Option<Rect> {
        let mut region = self.dirty.take();
        for item in self.items.values_mut() {
            if let Some(r) = item.take_dirty() {
                region = Some(match region {
                    Some(d) => d.united(&r),
                    None => r,
                });
            }
        }
        region
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shapeforge_core::Point;

    #[test]
    fn test_reserved_ids_are_unique() {
        let mut store = ItemStore::new();
        let a = store.reserve_id();
        let b = store.reserve_id();
        assert_ne!(a, b);
        store.insert(ItemId(10), Shape::circle(Point::ZERO, 1.0));
        assert_eq!(store.reserve_id(), ItemId(11));
    }

    #[test]
    fn test_reinsert_restores_order() {
        let mut store = ItemStore::new();
        for _ in 0..3 {
            let id = store.reserve_id();
            store.insert(id, Shape::circle(Point::ZERO, 1.0));
        }
        let removed = store.remove(ItemId(2)).unwrap();
        store.insert(removed.id(), removed.shape().clone());
        let ids: Vec<_> = store.iter().map(ShapeItem::id).collect();
        assert_eq!(ids, vec![ItemId(1), ItemId(2), ItemId(3)]);
        assert!(store.take_dirty().is_some());
        assert!(store.take_dirty().is_none());
    }
}
