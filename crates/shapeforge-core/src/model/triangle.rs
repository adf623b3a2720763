use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{decode_geom, loop_area, loop_perimeter, AreaShape, ShapeGeometry, ShapeKind};
use crate::geometry::{Point, Rect};

#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    pub vertices: [Point; 3],
}

#[derive(Default, Serialize, Deserialize)]
#[serde(default)]
struct Geom {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    x3: f64,
    y3: f64,
}

impl Triangle {
    pub fn new(a: Point, b: Point, c: Point) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }

    /// Moves vertex `index` (0..=2); other indices are ignored.
    pub fn set_vertex(&mut self, index: usize, p: Point) -> bool {
        match self.vertices.get_mut(index) {
            Some(slot) => {
                *slot = p;
                true
            }
            None => false,
        }
    }
}

impl ShapeGeometry for Triangle {
    const KIND: ShapeKind = ShapeKind::Triangle;

    fn local_bounds(&self) -> Rect {
        Rect::from_points(self.vertices).unwrap_or_default()
    }

    fn to_geom(&self) -> Value {
        let [a, b, c] = self.vertices;
        serde_json::json!({
            "x1": a.x, "y1": a.y,
            "x2": b.x, "y2": b.y,
            "x3": c.x, "y3": c.y,
        })
    }

    fn from_geom(value: &Value) -> Result<Self, serde_json::Error> {
        let g: Geom = decode_geom(value)?;
        Ok(Self::new(
            Point::new(g.x1, g.y1),
            Point::new(g.x2, g.y2),
            Point::new(g.x3, g.y3),
        ))
    }
}

impl AreaShape for Triangle {
    fn area(&self) -> f64 {
        loop_area(&self.vertices)
    }

    fn perimeter(&self) -> f64 {
        loop_perimeter(&self.vertices)
    }
}
