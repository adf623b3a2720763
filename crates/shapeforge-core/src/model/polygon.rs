use serde_json::Value;

use super::{decode_geom, loop_area, loop_perimeter, AreaShape, PointList, ShapeGeometry, ShapeKind};
use crate::geometry::{Point, Rect};

/// Closed ring; the last point connects back to the first implicitly.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    pub points: Vec<Point>,
}

impl Polygon {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Moves the point at `index`; out-of-range indices are ignored.
    pub fn set_point(&mut self, index: usize, p: Point) -> bool {
        match self.points.get_mut(index) {
            Some(slot) => {
                *slot = p;
                true
            }
            None => false,
        }
    }
}

impl ShapeGeometry for Polygon {
    const KIND: ShapeKind = ShapeKind::Polygon;

    fn local_bounds(&self) -> Rect {
        Rect::from_points(self.points.iter().copied()).unwrap_or_default()
    }

    fn to_geom(&self) -> Value {
        serde_json::json!({ "points": self.points })
    }

    fn from_geom(value: &Value) -> Result<Self, serde_json::Error> {
        let g: PointList = decode_geom(value)?;
        Ok(Self::new(g.points))
    }
}

impl AreaShape for Polygon {
    fn area(&self) -> f64 {
        loop_area(&self.points)
    }

    fn perimeter(&self) -> f64 {
        loop_perimeter(&self.points)
    }
}
