//! Control points shown on a selected item.
//!
//! Handles live in a flat set owned by their item and are addressed by
//! [`HandleKey`]. The set is rebuilt wholesale whenever the item's handle
//! layout may have changed, which bumps its generation. While a handle is
//! being dragged the set is frozen: positions follow the geometry but the
//! entries (and the generation) stay put, so the dragged handle stays valid.

use shapeforge_core::{Point, ShapeRecord};

use crate::item::ItemId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleKind {
    Vertex,
    Corner,
    Center,
    Radius,
    Rotation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandleKey {
    pub item: ItemId,
    pub kind: HandleKind,
    pub index: usize,
}

/// One handle, positioned in its owner's local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlPoint {
    pub kind: HandleKind,
    pub index: usize,
    pub pos: Point,
}

impl ControlPoint {
    pub fn new(kind: HandleKind, index: usize, pos: Point) -> Self {
        Self { kind, index, pos }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HandleSet {
    owner: ItemId,
    points: Vec<ControlPoint>,
    generation: u64,
    frozen: bool,
}

impl HandleSet {
    pub fn new(owner: ItemId, points: Vec<ControlPoint>) -> Self {
        Self {
            owner,
            points,
            generation: 0,
            frozen: false,
        }
    }

    pub fn owner(&self) -> ItemId {
        self.owner
    }

    /// Incremented on every wholesale rebuild.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn unfreeze(&mut self) {
        self.frozen = false;
    }

    /// Applies a freshly computed layout.
    ///
    /// A frozen set only moves the handles it already has; an unfrozen set
    /// is replaced and its generation advances.
    pub fn update(&mut self, layout: Vec<ControlPoint>) {
        if self.frozen {
            for cp in &mut self.points {
                if let Some(fresh) = layout
                    .iter()
                    .find(|f| f.kind == cp.kind && f.index == cp.index)
                {
                    cp.pos = fresh.pos;
                }
            }
        } else {
            self.points = layout;
            self.generation += 1;
        }
    }

    pub fn get(&self, kind: HandleKind, index: usize) -> Option<&ControlPoint> {
        self.points
            .iter()
            .find(|cp| cp.kind == kind && cp.index == index)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &ControlPoint> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn count(&self, kind: HandleKind) -> usize {
        self.points.iter().filter(|cp| cp.kind == kind).count()
    }
}

/// What a handle drag needs to finish or cancel itself.
#[derive(Debug, Clone, PartialEq)]
pub enum DragOrigin {
    /// Rotation drags remember where they started turning from.
    Rotation {
        initial_rotation: f64,
        pivot_scene: Point,
    },
    /// Geometry drags keep the shape as it was at press time.
    Geometry { snapshot: ShapeRecord },
}

/// A handle drag in progress.
#[derive(Debug, Clone, PartialEq)]
pub struct HandleDrag {
    pub key: HandleKey,
    pub press_scene: Point,
    pub origin: DragOrigin,
}
