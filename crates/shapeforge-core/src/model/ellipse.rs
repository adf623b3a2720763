use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::f64::consts::PI;

use super::{decode_geom, AreaShape, ShapeGeometry, ShapeKind};
use crate::geometry::{Point, Rect};

#[derive(Debug, Clone, PartialEq)]
pub struct Ellipse {
    pub center: Point,
    rx: f64,
    ry: f64,
}

#[derive(Default, Serialize, Deserialize)]
#[serde(default)]
struct Geom {
    cx: f64,
    cy: f64,
    rx: f64,
    ry: f64,
}

impl Ellipse {
    /// Negative radii clamp to zero.
    pub fn new(center: Point, rx: f64, ry: f64) -> Self {
        Self {
            center,
            rx: rx.max(0.0),
            ry: ry.max(0.0),
        }
    }

    pub fn rx(&self) -> f64 {
        self.rx
    }

    pub fn ry(&self) -> f64 {
        self.ry
    }

    pub fn set_rx(&mut self, rx: f64) {
        self.rx = rx.max(0.0);
    }

    pub fn set_ry(&mut self, ry: f64) {
        self.ry = ry.max(0.0);
    }
}

impl ShapeGeometry for Ellipse {
    const KIND: ShapeKind = ShapeKind::Ellipse;

    fn local_bounds(&self) -> Rect {
        Rect::new(
            self.center.x - self.rx,
            self.center.y - self.ry,
            2.0 * self.rx,
            2.0 * self.ry,
        )
    }

    fn to_geom(&self) -> Value {
        serde_json::json!({
            "cx": self.center.x,
            "cy": self.center.y,
            "rx": self.rx,
            "ry": self.ry,
        })
    }

    fn from_geom(value: &Value) -> Result<Self, serde_json::Error> {
        let g: Geom = decode_geom(value)?;
        Ok(Self::new(Point::new(g.cx, g.cy), g.rx, g.ry))
    }
}

impl AreaShape for Ellipse {
    fn area(&self) -> f64 {
        PI * self.rx * self.ry
    }

    // Ramanujan's second approximation
    fn perimeter(&self) -> f64 {
        let a = self.rx.max(self.ry);
        let b = self.rx.min(self.ry);
        if a <= 0.0 || b <= 0.0 {
            return 0.0;
        }
        let h = 3.0 * (a + b) - ((3.0 * a + b) * (a + 3.0 * b)).sqrt();
        PI * h
    }
}
