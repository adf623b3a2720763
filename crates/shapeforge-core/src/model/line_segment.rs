use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{decode_geom, LineShape, ShapeGeometry, ShapeKind};
use crate::geometry::{Point, Rect};

#[derive(Debug, Clone, PartialEq)]
pub struct LineSegment {
    pub p1: Point,
    pub p2: Point,
}

#[derive(Default, Serialize, Deserialize)]
#[serde(default)]
struct Geom {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

impl LineSegment {
    pub fn new(p1: Point, p2: Point) -> Self {
        Self { p1, p2 }
    }
}

impl ShapeGeometry for LineSegment {
    const KIND: ShapeKind = ShapeKind::LineSegment;

    fn local_bounds(&self) -> Rect {
        Rect::from_corners(self.p1, self.p2)
    }

    fn to_geom(&self) -> Value {
        serde_json::json!({
            "x1": self.p1.x,
            "y1": self.p1.y,
            "x2": self.p2.x,
            "y2": self.p2.y,
        })
    }

    fn from_geom(value: &Value) -> Result<Self, serde_json::Error> {
        let g: Geom = decode_geom(value)?;
        Ok(Self::new(Point::new(g.x1, g.y1), Point::new(g.x2, g.y2)))
    }
}

impl LineShape for LineSegment {
    fn vertices(&self) -> Vec<Point> {
        vec![self.p1, self.p2]
    }

    fn vertex_count(&self) -> usize {
        2
    }

    fn length(&self) -> f64 {
        self.p1.distance_to(&self.p2)
    }
}
