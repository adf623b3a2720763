//! Interactive wrapper around one shape.
//!
//! A [`ShapeItem`] owns its shape and mirrors the shape transform as an item
//! pose (`pos`, `rotation`) plus a rotation pivot (`origin`) at the centre of
//! the local bounds. Scene mapping is `pos + origin + R(rotation)(l - origin)`,
//! the same mapping the shape model uses, so both always agree.

use std::cell::Cell;
use std::fmt;

use shapeforge_core::{Geometry, Point, Rect, Shape, Transform};

use crate::commands::{TransformShape, UndoCommand};
use crate::context::InteractionContext;
use crate::handles::{ControlPoint, HandleKey, HandleKind, HandleSet};

/// Stable identity of an item, kept across undo and redo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Position and rotation of an item.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    pub pos: Point,
    pub rotation: f64,
}

impl Pose {
    pub fn new(pos: Point, rotation: f64) -> Self {
        Self { pos, rotation }
    }
}

#[derive(Debug, Clone)]
pub struct ShapeItem {
    id: ItemId,
    shape: Shape,
    pos: Point,
    rotation: f64,
    origin: Point,
    selected: bool,
    handles: Option<HandleSet>,
    bounds_cache: Cell<Option<Rect>>,
    dirty: Option<Rect>,
    move_start: Option<Pose>,
    corner_anchor: Option<Point>,
}

fn vertex_handles(points: impl IntoIterator<Item = Point>) -> Vec<ControlPoint> {
    points
        .into_iter()
        .enumerate()
        .map(|(i, p)| ControlPoint::new(HandleKind::Vertex, i, p))
        .collect()
}

impl ShapeItem {
    pub fn new(id: ItemId, shape: Shape) -> Self {
        let t = *shape.transform();
        let origin = shape.pivot();
        Self {
            id,
            shape,
            pos: t.translation(),
            rotation: t.rotation_deg,
            origin,
            selected: false,
            handles: None,
            bounds_cache: Cell::new(None),
            dirty: None,
            move_start: None,
            corner_anchor: None,
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Direct model access. Callers must follow up with
    /// [`ShapeItem::sync_from_shape`] or [`ShapeItem::geometry_changed`].
    pub(crate) fn shape_mut(&mut self) -> &mut Shape {
        &mut self.shape
    }

    pub fn pos(&self) -> Point {
        self.pos
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn pose(&self) -> Pose {
        Pose::new(self.pos, self.rotation)
    }

    /// Rotation pivot in local coordinates.
    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn handles(&self) -> Option<&HandleSet> {
        self.handles.as_ref()
    }

    fn scene_transform(&self) -> Transform {
        Transform::new(self.pos.x, self.pos.y, self.rotation)
    }

    pub fn map_to_scene(&self, local: Point) -> Point {
        self.scene_transform().map_point(local, self.origin)
    }

    pub fn map_from_scene(&self, scene: Point) -> Point {
        self.scene_transform().inverse_map_point(scene, self.origin)
    }

    /// Local bounds padded by one unit, cached until the geometry changes.
    pub fn bounding_rect(&self) -> Rect {
        if let Some(r) = self.bounds_cache.get() {
            return r;
        }
        let r = self.shape.local_bounds().padded(1.0);
        self.bounds_cache.set(Some(r));
        r
    }

    pub fn scene_bounding_rect(&self) -> Rect {
        self.scene_transform()
            .map_rect(&self.bounding_rect(), self.origin)
    }

    pub fn contains_scene_point(&self, p: Point) -> bool {
        self.bounding_rect().contains(&self.map_from_scene(p))
    }

    pub(crate) fn mark_dirty(&mut self, region: Rect) {
        self.dirty = Some(match self.dirty {
            Some(d) => d.united(&region),
            None => region,
        });
    }

    /// Region touched since the last call.
    pub fn take_dirty(&mut self) -> Option<Rect> {
        self.dirty.take()
    }

    /// Drops cached bounds, recomputes the pivot and marks old and new
    /// extents for repaint.
    pub fn geometry_changed(&mut self) {
        let before = self.scene_bounding_rect();
        self.bounds_cache.set(None);
        self.origin = self.shape.pivot();
        let after = self.scene_bounding_rect();
        self.mark_dirty(before.united(&after));
    }

    pub fn set_selected(&mut self, selected: bool, ctx: &InteractionContext) {
        if self.selected == selected {
            return;
        }
        self.selected = selected;
        self.handles = if selected {
            Some(HandleSet::new(self.id, self.handle_layout(ctx)))
        } else {
            None
        };
        let margin = ctx.handles.rotation_offset + ctx.handle_size();
        self.mark_dirty(self.scene_bounding_rect().padded(margin));
    }

    fn set_pos(&mut self, pos: Point) {
        let before = self.scene_bounding_rect();
        self.pos = pos;
        self.shape.move_to(pos.x, pos.y);
        self.mark_dirty(before.united(&self.scene_bounding_rect()));
    }

    pub fn set_rotation(&mut self, rotation: f64) {
        let before = self.scene_bounding_rect();
        self.rotation = rotation;
        self.shape.set_rotation_degrees(rotation);
        self.mark_dirty(before.united(&self.scene_bounding_rect()));
    }

    /// User-driven position change: snapped to the grid when snapping is on.
    /// Returns the position actually taken.
    pub fn propose_pos(&mut self, pos: Point, ctx: &InteractionContext) -> Point {
        let snapped = ctx.snap_point(pos);
        self.set_pos(snapped);
        snapped
    }

    /// Applies a pose verbatim (no snapping) and refreshes handles.
    pub fn set_pose(&mut self, pose: Pose, ctx: &InteractionContext) {
        self.set_pos(pose.pos);
        self.set_rotation(pose.rotation);
        self.update_handles(ctx);
    }

    /// Re-reads the pose from the shape transform after the model was
    /// changed behind the item's back.
    pub fn sync_from_shape(&mut self) {
        let before = self.scene_bounding_rect();
        let t = *self.shape.transform();
        self.pos = t.translation();
        self.rotation = t.rotation_deg;
        self.geometry_changed();
        self.mark_dirty(before);
    }

    pub fn begin_move(&mut self) {
        self.move_start = Some(self.pose());
    }

    pub fn is_moving(&self) -> bool {
        self.move_start.is_some()
    }

    /// Puts the item back where the move gesture started.
    pub fn cancel_move(&mut self, ctx: &InteractionContext) {
        if let Some(start) = self.move_start.take() {
            self.set_pose(start, ctx);
        }
    }

    /// Ends a move gesture, yielding an undo step when the pose changed by
    /// more than the configured epsilons.
    pub fn end_move(&mut self, ctx: &InteractionContext) -> Option<UndoCommand> {
        let old = self.move_start.take()?;
        let new = self.pose();
        let moved = old.pos.distance_to(&new.pos) > ctx.gestures.move_epsilon;
        let turned = (new.rotation - old.rotation).abs() > ctx.gestures.rotation_epsilon_deg;
        if !moved && !turned {
            return None;
        }
        tracing::debug!(item = %self.id, ?old, ?new, "Move gesture committed");
        Some(UndoCommand::TransformShape(TransformShape {
            id: self.id,
            old,
            new,
        }))
    }

    /// Handle positions for the current geometry, in local coordinates.
    pub fn handle_layout(&self, ctx: &InteractionContext) -> Vec<ControlPoint> {
        let mut layout = match self.shape.geometry() {
            Geometry::LineSegment(g) => vertex_handles([g.p1, g.p2]),
            Geometry::Triangle(g) => vertex_handles(g.vertices),
            Geometry::Polygon(g) => vertex_handles(g.points.iter().copied()),
            Geometry::Polyline(g) => vertex_handles(g.points.iter().copied()),
            Geometry::Rectangle(g) => {
                // Mid-drag the rect keeps signed extents so each slot stays
                // with the corner being dragged.
                let corners = if self.corner_anchor.is_some() {
                    g.raw_corners()
                } else {
                    g.normalized().corners()
                };
                corners
                    .into_iter()
                .enumerate()
                    .map(|(i, p)| ControlPoint::new(HandleKind::Corner, i, p))
                    .collect()
            }
            Geometry::Circle(g) => vec![
                ControlPoint::new(HandleKind::Center, 0, g.center),
                ControlPoint::new(
                    HandleKind::Radius,
                    0,
                    Point::new(g.center.x + g.radius(), g.center.y),
                ),
            ],
            Geometry::Ellipse(g) => vec![
                ControlPoint::new(HandleKind::Center, 0, g.center),
                ControlPoint::new(
                    HandleKind::Radius,
                    0,
                    Point::new(g.center.x + g.rx(), g.center.y),
                ),
                ControlPoint::new(
                    HandleKind::Radius,
                    1,
                    Point::new(g.center.x, g.center.y + g.ry()),
                ),
            ],
        };
        let br = self.bounding_rect();
        layout.push(ControlPoint::new(
            HandleKind::Rotation,
            0,
            Point::new(br.center().x, br.top() - ctx.handles.rotation_offset),
        ));
        layout
    }

    /// Repositions handles after a geometry or pose change.
    pub fn update_handles(&mut self, ctx: &InteractionContext) {
        if self.handles.is_none() {
            return;
        }
        let layout = self.handle_layout(ctx);
        if let Some(set) = self.handles.as_mut() {
            set.update(layout);
        }
    }

    pub fn handle_scene_pos(&self, kind: HandleKind, index: usize) -> Option<Point> {
        let cp = self.handles.as_ref()?.get(kind, index)?;
        Some(self.map_to_scene(cp.pos))
    }

    /// Topmost handle under a scene point, if any.
    pub fn handle_at(&self, scene: Point, ctx: &InteractionContext) -> Option<HandleKey> {
        let set = self.handles.as_ref()?;
        let r = ctx.handle_hit_radius();
        set.iter()
            .rev()
            .find(|cp| {
                let d = self.map_to_scene(cp.pos) - scene;
                d.x.abs() <= r && d.y.abs() <= r
            })
            .map(|cp| HandleKey {
                item: self.id,
                kind: cp.kind,
                index: cp.index,
            })
    }

    /// Freezes the handle set for a drag of the given handle.
    pub fn begin_handle_drag(&mut self, kind: HandleKind, index: usize) {
        if let Some(set) = self.handles.as_mut() {
            set.freeze();
        }
        self.corner_anchor = match (kind, self.shape.geometry_mut()) {
            (HandleKind::Corner, Geometry::Rectangle(g)) => {
                g.normalize();
                g.corner((index + 2) % 4)
            }
            _ => None,
        };
    }

    /// Normalizes a dragged rectangle, then unfreezes and rebuilds the
    /// handle set.
    pub fn end_handle_drag(&mut self, ctx: &InteractionContext) {
        if self.corner_anchor.take().is_some() {
            if let Geometry::Rectangle(g) = self.shape.geometry_mut() {
                g.normalize();
            }
        }
        if let Some(set) = self.handles.as_mut() {
            set.unfreeze();
        }
        self.update_handles(ctx);
    }

    /// Applies a non-rotation handle drag to the geometry.
    ///
    /// `scene` is expected to be snapped already. Points that stayed put in
    /// local coordinates keep their scene position even though the pivot
    /// moves with the bounds. Returns false when the handle does not apply
    /// to this shape.
    pub fn handle_moved(
        &mut self,
        kind: HandleKind,
        index: usize,
        scene: Point,
        ctx: &InteractionContext,
    ) -> bool {
        let local = self.map_from_scene(scene);
        let anchor = self.corner_anchor;
        let changed = match (kind, self.shape.geometry_mut()) {
            (HandleKind::Vertex, Geometry::LineSegment(g)) => match index {
                0 => {
                    g.p1 = local;
                    true
                }
                1 => {
                    g.p2 = local;
                    true
                }
                _ => false,
            },
            (HandleKind::Vertex, Geometry::Triangle(g)) => g.set_vertex(index, local),
            (HandleKind::Vertex, Geometry::Polygon(g)) => g.set_point(index, local),
            (HandleKind::Vertex, Geometry::Polyline(g)) => g.set_point(index, local),
            (HandleKind::Corner, Geometry::Rectangle(g)) => {
                match anchor.or_else(|| g.corner((index + 2) % 4)) {
                    Some(fixed) => g.drag_corner(index, local, fixed),
                    None => false,
                }
            }
            (HandleKind::Center, Geometry::Circle(g)) => {
                g.center = local;
                true
            }
            (HandleKind::Center, Geometry::Ellipse(g)) => {
                g.center = local;
                true
            }
            (HandleKind::Radius, Geometry::Circle(g)) => {
                let r = local.distance_to(&g.center);
                g.set_radius(r);
                true
            }
            (HandleKind::Radius, Geometry::Ellipse(g)) => match index {
                0 => {
                    let rx = (local.x - g.center.x).abs();
                    g.set_rx(rx);
                    true
                }
                1 => {
                    let ry = (local.y - g.center.y).abs();
                    g.set_ry(ry);
                    true
                }
                _ => false,
            },
            _ => false,
        };
        if !changed {
            return false;
        }

        let old_origin = self.origin;
        self.geometry_changed();
        self.keep_local_frame(old_origin);
        self.update_handles(ctx);
        true
    }

    // A pivot change shifts every local point by the same scene offset;
    // undo it through the position.
    fn keep_local_frame(&mut self, old_origin: Point) {
        if self.origin == old_origin {
            return;
        }
        let drift = self.map_to_scene(old_origin) - (self.pos + old_origin);
        if drift.manhattan_length() > 0.0 {
            self.set_pos(self.pos - drift);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> InteractionContext {
        InteractionContext::default()
    }

    #[test]
    fn test_pose_follows_shape_transform() {
        let mut shape = Shape::rectangle(Rect::new(0.0, 0.0, 10.0, 10.0));
        shape.set_transform(Transform::new(3.0, 4.0, 45.0));
        let item = ShapeItem::new(ItemId(1), shape);
        assert_eq!(item.pos(), Point::new(3.0, 4.0));
        assert_eq!(item.rotation(), 45.0);
        assert_eq!(item.origin(), Point::new(5.0, 5.0));
    }

    #[test]
    fn test_bounding_rect_padded_and_cached() {
        let mut item = ShapeItem::new(ItemId(1), Shape::circle(Point::ZERO, 5.0));
        assert_eq!(item.bounding_rect(), Rect::new(-6.0, -6.0, 12.0, 12.0));

        if let Geometry::Circle(c) = item.shape_mut().geometry_mut() {
            c.set_radius(10.0);
        }
        assert_eq!(item.bounding_rect(), Rect::new(-6.0, -6.0, 12.0, 12.0));
        item.geometry_changed();
        assert_eq!(item.bounding_rect(), Rect::new(-11.0, -11.0, 22.0, 22.0));
        assert!(item.take_dirty().is_some());
        assert!(item.take_dirty().is_none());
    }

    #[test]
    fn test_selection_builds_handles() {
        let mut item = ShapeItem::new(ItemId(1), Shape::ellipse(Point::ZERO, 4.0, 2.0));
        item.set_selected(true, &ctx());
        let set = item.handles().unwrap();
        assert_eq!(set.count(HandleKind::Center), 1);
        assert_eq!(set.count(HandleKind::Radius), 2);
        assert_eq!(set.count(HandleKind::Rotation), 1);
        assert_eq!(
            set.get(HandleKind::Radius, 1).map(|cp| cp.pos),
            Some(Point::new(0.0, 2.0))
        );
        // padded top is -3, offset 20
        assert_eq!(
            set.get(HandleKind::Rotation, 0).map(|cp| cp.pos),
            Some(Point::new(0.0, -23.0))
        );

        item.set_selected(false, &ctx());
        assert!(item.handles().is_none());
    }

    #[test]
    fn test_propose_pos_snaps() {
        let mut c = ctx();
        c.grid.snap = true;
        c.grid.size = 10.0;
        let mut item = ShapeItem::new(ItemId(1), Shape::circle(Point::ZERO, 1.0));
        let taken = item.propose_pos(Point::new(13.2, 27.9), &c);
        assert_eq!(taken, Point::new(10.0, 30.0));
        assert_eq!(item.shape().transform().translation(), Point::new(10.0, 30.0));
    }

    #[test]
    fn test_end_move_thresholds() {
        let c = ctx();
        let mut item = ShapeItem::new(ItemId(1), Shape::circle(Point::ZERO, 1.0));
        item.begin_move();
        item.propose_pos(Point::new(0.05, 0.0), &c);
        assert!(item.end_move(&c).is_none());

        item.begin_move();
        item.propose_pos(Point::new(5.0, 0.0), &c);
        assert!(matches!(
            item.end_move(&c),
            Some(UndoCommand::TransformShape(ref t)) if t.new.pos == Point::new(5.0, 0.0)
        ));
        assert!(!item.is_moving());
    }

    #[test]
    fn test_rotated_vertex_drag_keeps_other_end() {
        let c = ctx();
        let mut shape = Shape::line_segment(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        shape.set_rotation_degrees(90.0);
        let mut item = ShapeItem::new(ItemId(1), shape);
        item.set_selected(true, &c);
        let fixed = item.map_to_scene(Point::new(0.0, 0.0));

        item.begin_handle_drag(HandleKind::Vertex, 1);
        assert!(item.handle_moved(HandleKind::Vertex, 1, Point::new(30.0, 30.0), &c));
        item.end_handle_drag(&c);

        let p1 = match item.shape().geometry() {
            Geometry::LineSegment(g) => g.p1,
            _ => unreachable!(),
        };
        assert!(item.map_to_scene(p1).approx_eq(&fixed, 1e-9));
        let p2 = item.handle_scene_pos(HandleKind::Vertex, 1).unwrap();
        assert!(p2.approx_eq(&Point::new(30.0, 30.0), 1e-9));
        // model and item map identically
        assert!(item.shape().map_to_scene(p1).approx_eq(&fixed, 1e-9));
    }

    #[test]
    fn test_handle_at_prefers_topmost() {
        let c = ctx();
        let mut item = ShapeItem::new(ItemId(3), Shape::circle(Point::ZERO, 5.0));
        assert!(item.handle_at(Point::ZERO, &c).is_none());
        item.set_selected(true, &c);

        let hit = |p: Point| item.handle_at(p, &c).map(|k| (k.kind, k.index));
        assert_eq!(hit(Point::new(0.5, 0.0)), Some((HandleKind::Center, 0)));
        // both the centre and radius handles cover this point
        assert_eq!(hit(Point::new(2.5, 0.0)), Some((HandleKind::Radius, 0)));
        assert_eq!(hit(Point::new(0.0, -26.0)), Some((HandleKind::Rotation, 0)));
        assert_eq!(hit(Point::new(20.0, 20.0)), None);
        assert_eq!(item.handle_at(Point::ZERO, &c).map(|k| k.item), Some(ItemId(3)));
    }

    #[test]
    fn test_handle_mismatch_is_ignored() {
        let c = ctx();
        let mut item = ShapeItem::new(ItemId(1), Shape::circle(Point::ZERO, 5.0));
        assert!(!item.handle_moved(HandleKind::Corner, 0, Point::new(1.0, 1.0), &c));
        assert!(!item.handle_moved(HandleKind::Vertex, 0, Point::new(1.0, 1.0), &c));
    }
}
