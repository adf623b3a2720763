use serde_json::Value;

use super::{decode_geom, LineShape, PointList, ShapeGeometry, ShapeKind};
use crate::geometry::{Point, Rect};

/// Open chain of points; the last point does not connect back to the first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polyline {
    pub points: Vec<Point>,
}

impl Polyline {
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

impl ShapeGeometry for Polyline {
    const KIND: ShapeKind = ShapeKind::Polyline;

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

impl LineShape for Polyline {
    fn vertices(&self) -> Vec<Point> {
        self.points.clone()
    }

    fn vertex_count(&self) -> usize {
        self.points.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_is_open() {
        let p = Polyline::new(vec![
            Point::new(0.0, 0.0),
            Point::new(3.0, 4.0),
            Point::new(6.0, 4.0),
        ]);
        assert_eq!(p.length(), 8.0);
    }

    #[test]
    fn test_set_point_out_of_range() {
        let mut p = Polyline::new(vec![Point::ZERO]);
        assert!(!p.set_point(3, Point::new(1.0, 1.0)));
        assert_eq!(p.points, vec![Point::ZERO]);
    }
}
