use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::f64::consts::PI;

use super::{decode_geom, AreaShape, ShapeGeometry, ShapeKind};
use crate::geometry::{Point, Rect};

#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub center: Point,
    radius: f64,
}

#[derive(Default, Serialize, Deserialize)]
#[serde(default)]
struct Geom {
    cx: f64,
    cy: f64,
    r: f64,
}

impl Circle {
    /// Negative radii clamp to zero.
    pub fn new(center: Point, radius: f64) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn set_radius(&mut self, radius: f64) {
        self.radius = radius.max(0.0);
    }
}

impl ShapeGeometry for Circle {
    const KIND: ShapeKind = ShapeKind::Circle;

    fn local_bounds(&self) -> Rect {
        Rect::new(
            self.center.x - self.radius,
            self.center.y - self.radius,
            2.0 * self.radius,
            2.0 * self.radius,
        )
    }

    fn to_geom(&self) -> Value {
        serde_json::json!({ "cx": self.center.x, "cy": self.center.y, "r": self.radius })
    }

    fn from_geom(value: &Value) -> Result<Self, serde_json::Error> {
        let g: Geom = decode_geom(value)?;
        Ok(Self::new(Point::new(g.cx, g.cy), g.r))
    }
}

impl AreaShape for Circle {
    fn area(&self) -> f64 {
        PI * self.radius * self.radius
    }

    fn perimeter(&self) -> f64 {
        2.0 * PI * self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_radius_clamps() {
        let mut c = Circle::new(Point::ZERO, -5.0);
        assert_eq!(c.radius(), 0.0);
        c.set_radius(-1.0);
        assert_eq!(c.radius(), 0.0);
        let from_json = Circle::from_geom(&serde_json::json!({ "r": -3.0 })).unwrap();
        assert_eq!(from_json.radius(), 0.0);
    }

    #[test]
    fn test_measurements() {
        let c = Circle::new(Point::ZERO, 10.0);
        assert!((c.area() - 100.0 * PI).abs() < 1e-9);
        assert!((c.perimeter() - 20.0 * PI).abs() < 1e-9);
    }
}
