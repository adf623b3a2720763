use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{decode_geom, AreaShape, ShapeGeometry, ShapeKind};
use crate::geometry::{Point, Rect};

/// Axis-aligned rectangle in local coordinates.
///
/// The stored rect may carry negative extents while a corner is being
/// dragged across its opposite; every measurement reads the normalized form.
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    pub rect: Rect,
}

#[derive(Default, Serialize, Deserialize)]
#[serde(default)]
struct Geom {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
}

impl Rectangle {
    pub fn new(rect: Rect) -> Self {
        Self { rect }
    }

    pub fn normalized(&self) -> Rect {
        self.rect.normalized()
    }

    /// Corner `index` of the normalized rect in TL, TR, BR, BL order.
    pub fn corner(&self, index: usize) -> Option<Point> {
        self.normalized().corners().get(index).copied()
    }

    /// Corners of the stored rect as is, in the slots TL, TR, BR, BL would
    /// take if the extents were positive.
    pub fn raw_corners(&self) -> [Point; 4] {
        let r = self.rect;
        [
            Point::new(r.x, r.y),
            Point::new(r.x + r.width, r.y),
            Point::new(r.x + r.width, r.y + r.height),
            Point::new(r.x, r.y + r.height),
        ]
    }

    /// Puts raw corner `index` at `p` with the diagonally opposite corner at
    /// `fixed`, leaving the extents signed. Returns false for an index
    /// outside 0..4.
    pub fn drag_corner(&mut self, index: usize, p: Point, fixed: Point) -> bool {
        self.rect = match index {
            0 => Rect::new(p.x, p.y, fixed.x - p.x, fixed.y - p.y),
            1 => Rect::new(fixed.x, p.y, p.x - fixed.x, fixed.y - p.y),
            2 => Rect::new(fixed.x, fixed.y, p.x - fixed.x, p.y - fixed.y),
            3 => Rect::new(p.x, fixed.y, fixed.x - p.x, p.y - fixed.y),
            _ => return false,
        };
        true
    }

    pub fn normalize(&mut self) {
        self.rect = self.rect.normalized();
    }
}

impl ShapeGeometry for Rectangle {
    const KIND: ShapeKind = ShapeKind::Rectangle;

    fn local_bounds(&self) -> Rect {
        self.normalized()
    }

    fn to_geom(&self) -> Value {
        let r = self.normalized();
        serde_json::json!({ "x": r.x, "y": r.y, "w": r.width, "h": r.height })
    }

    fn from_geom(value: &Value) -> Result<Self, serde_json::Error> {
        let g: Geom = decode_geom(value)?;
        Ok(Self::new(Rect::new(g.x, g.y, g.w, g.h)))
    }
}

impl AreaShape for Rectangle {
    fn area(&self) -> f64 {
        let r = self.normalized();
        r.width * r.height
    }

    fn perimeter(&self) -> f64 {
        let r = self.normalized();
        2.0 * (r.width + r.height)
    }
}
