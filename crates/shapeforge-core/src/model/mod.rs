//! Shape model: the closed set of drawable geometries plus the common
//! name/style/transform envelope.

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::geometry::{Color, Pen, Point, Rect, Transform};

mod circle;
mod ellipse;
mod line_segment;
mod polygon;
mod polyline;
mod rectangle;
mod triangle;

pub use circle::Circle;
pub use ellipse::Ellipse;
pub use line_segment::LineSegment;
pub use polygon::Polygon;
pub use polyline::Polyline;
pub use rectangle::Rectangle;
pub use triangle::Triangle;

/// Type tag of a shape, as written to the `type` field of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    LineSegment,
    Rectangle,
    Circle,
    Ellipse,
    Triangle,
    Polygon,
    Polyline,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::LineSegment,
        ShapeKind::Rectangle,
        ShapeKind::Circle,
        ShapeKind::Ellipse,
        ShapeKind::Triangle,
        ShapeKind::Polygon,
        ShapeKind::Polyline,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::LineSegment => "LineSegment",
            ShapeKind::Rectangle => "Rectangle",
            ShapeKind::Circle => "Circle",
            ShapeKind::Ellipse => "Ellipse",
            ShapeKind::Triangle => "Triangle",
            ShapeKind::Polygon => "Polygon",
            ShapeKind::Polyline => "Polyline",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeKind {
    type Err = crate::error::CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShapeKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| crate::error::CodecError::UnknownType(s.to_string()))
    }
}

/// Behaviour every concrete geometry provides.
pub trait ShapeGeometry {
    const KIND: ShapeKind;

    /// Untransformed extent, always normalized.
    fn local_bounds(&self) -> Rect;

    /// Type-specific `geom` payload.
    fn to_geom(&self) -> Value;

    /// Builds the geometry from a `geom` payload. Missing numbers read as 0.
    fn from_geom(value: &Value) -> Result<Self, serde_json::Error>
    where
        Self: Sized;
}

/// Open vertex chains.
pub trait LineShape {
    fn vertices(&self) -> Vec<Point>;

    fn vertex_count(&self) -> usize {
        self.vertices().len()
    }

    /// Sum of segment lengths, without closing the chain.
    fn length(&self) -> f64 {
        self.vertices()
            .windows(2)
            .map(|w| w[0].distance_to(&w[1]))
            .sum()
    }
}

/// Closed shapes with a measurable interior.
pub trait AreaShape {
    fn area(&self) -> f64;
    fn perimeter(&self) -> f64;
}

/// `geom` payload shared by polygons and polylines.
#[derive(Default, serde::Deserialize)]
#[serde(default)]
pub(crate) struct PointList {
    pub points: Vec<Point>,
}

pub(crate) fn decode_geom<T: DeserializeOwned + Default>(value: &Value) -> Result<T, serde_json::Error> {
    if value.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(value.clone())
}

/// Shoelace area of a closed loop.
pub(crate) fn loop_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let n = points.len();
    let sum: f64 = (0..n)
        .map(|i| {
            let a = points[i];
            let b = points[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum();
    sum.abs() * 0.5
}

/// Perimeter of a closed loop, wrapping last to first.
pub(crate) fn loop_perimeter(points: &[Point]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }
    let n = points.len();
    (0..n)
        .map(|i| points[i].distance_to(&points[(i + 1) % n]))
        .sum()
}

/// Geometry payload of a shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    LineSegment(LineSegment),
    Rectangle(Rectangle),
    Circle(Circle),
    Ellipse(Ellipse),
    Triangle(Triangle),
    Polygon(Polygon),
    Polyline(Polyline),
}

impl Geometry {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Geometry::LineSegment(_) => LineSegment::KIND,
            Geometry::Rectangle(_) => Rectangle::KIND,
            Geometry::Circle(_) => Circle::KIND,
            Geometry::Ellipse(_) => Ellipse::KIND,
            Geometry::Triangle(_) => Triangle::KIND,
            Geometry::Polygon(_) => Polygon::KIND,
            Geometry::Polyline(_) => Polyline::KIND,
        }
    }

    pub fn local_bounds(&self) -> Rect {
        match self {
            Geometry::LineSegment(g) => g.local_bounds(),
            Geometry::Rectangle(g) => g.local_bounds(),
            Geometry::Circle(g) => g.local_bounds(),
            Geometry::Ellipse(g) => g.local_bounds(),
            Geometry::Triangle(g) => g.local_bounds(),
            Geometry::Polygon(g) => g.local_bounds(),
            Geometry::Polyline(g) => g.local_bounds(),
        }
    }

    pub fn to_geom(&self) -> Value {
        match self {
            Geometry::LineSegment(g) => g.to_geom(),
            Geometry::Rectangle(g) => g.to_geom(),
            Geometry::Circle(g) => g.to_geom(),
            Geometry::Ellipse(g) => g.to_geom(),
            Geometry::Triangle(g) => g.to_geom(),
            Geometry::Polygon(g) => g.to_geom(),
            Geometry::Polyline(g) => g.to_geom(),
        }
    }

    pub fn from_geom(kind: ShapeKind, value: &Value) -> Result<Self, serde_json::Error> {
        Ok(match kind {
            ShapeKind::LineSegment => Geometry::LineSegment(LineSegment::from_geom(value)?),
            ShapeKind::Rectangle => Geometry::Rectangle(Rectangle::from_geom(value)?),
            ShapeKind::Circle => Geometry::Circle(Circle::from_geom(value)?),
            ShapeKind::Ellipse => Geometry::Ellipse(Ellipse::from_geom(value)?),
            ShapeKind::Triangle => Geometry::Triangle(Triangle::from_geom(value)?),
            ShapeKind::Polygon => Geometry::Polygon(Polygon::from_geom(value)?),
            ShapeKind::Polyline => Geometry::Polyline(Polyline::from_geom(value)?),
        })
    }

    pub fn as_line(&self) -> Option<&dyn LineShape> {
        match self {
            Geometry::LineSegment(g) => Some(g),
            Geometry::Polyline(g) => Some(g),
            Geometry::Rectangle(_)
            | Geometry::Circle(_)
            | Geometry::Ellipse(_)
            | Geometry::Triangle(_)
            | Geometry::Polygon(_) => None,
        }
    }

    pub fn as_area(&self) -> Option<&dyn AreaShape> {
        match self {
            Geometry::Rectangle(g) => Some(g),
            Geometry::Circle(g) => Some(g),
            Geometry::Ellipse(g) => Some(g),
            Geometry::Triangle(g) => Some(g),
            Geometry::Polygon(g) => Some(g),
            Geometry::LineSegment(_) | Geometry::Polyline(_) => None,
        }
    }
}

/// One drawable entity: geometry in local coordinates plus name, style and
/// pose.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub name: String,
    pub color: Color,
    pub pen: Pen,
    transform: Transform,
    geometry: Geometry,
}

impl Shape {
    pub fn new(geometry: Geometry) -> Self {
        Self {
            name: String::new(),
            color: Color::BLACK,
            pen: Pen::default(),
            transform: Transform::default(),
            geometry,
        }
    }

    pub fn line_segment(p1: Point, p2: Point) -> Self {
        Self::new(Geometry::LineSegment(LineSegment::new(p1, p2)))
    }

    pub fn rectangle(rect: Rect) -> Self {
        Self::new(Geometry::Rectangle(Rectangle::new(rect)))
    }

    pub fn circle(center: Point, radius: f64) -> Self {
        Self::new(Geometry::Circle(Circle::new(center, radius)))
    }

    pub fn ellipse(center: Point, rx: f64, ry: f64) -> Self {
        Self::new(Geometry::Ellipse(Ellipse::new(center, rx, ry)))
    }

    pub fn triangle(a: Point, b: Point, c: Point) -> Self {
        Self::new(Geometry::Triangle(Triangle::new(a, b, c)))
    }

    pub fn polygon(points: Vec<Point>) -> Self {
        Self::new(Geometry::Polygon(Polygon::new(points)))
    }

    pub fn polyline(points: Vec<Point>) -> Self {
        Self::new(Geometry::Polyline(Polyline::new(points)))
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn kind(&self) -> ShapeKind {
        self.geometry.kind()
    }

    pub fn type_name(&self) -> &'static str {
        self.kind().as_str()
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn geometry_mut(&mut self) -> &mut Geometry {
        &mut self.geometry
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    pub fn move_by(&mut self, dx: f64, dy: f64) {
        self.transform.tx += dx;
        self.transform.ty += dy;
    }

    /// Sets the translation, keeping rotation.
    pub fn move_to(&mut self, x: f64, y: f64) {
        self.transform.tx = x;
        self.transform.ty = y;
    }

    /// Adds `angle_deg` to the current rotation.
    pub fn rotate(&mut self, angle_deg: f64) {
        self.transform.rotation_deg += angle_deg;
    }

    pub fn set_rotation_degrees(&mut self, deg: f64) {
        self.transform.rotation_deg = deg;
    }

    pub fn rotation_degrees(&self) -> f64 {
        self.transform.rotation_deg
    }

    pub fn local_bounds(&self) -> Rect {
        self.geometry.local_bounds()
    }

    /// Rotation pivot in local coordinates: the centre of the local bounds.
    pub fn pivot(&self) -> Point {
        self.local_bounds().center()
    }

    pub fn map_to_scene(&self, local: Point) -> Point {
        self.transform.map_point(local, self.pivot())
    }

    /// Local extent mapped through the current pose.
    pub fn bounding_box(&self) -> Rect {
        self.transform.map_rect(&self.local_bounds(), self.pivot())
    }

    /// Line length, or perimeter for area shapes.
    pub fn length(&self) -> f64 {
        if let Some(line) = self.geometry.as_line() {
            return line.length();
        }
        self.perimeter().unwrap_or(0.0)
    }

    pub fn area(&self) -> Option<f64> {
        self.geometry.as_area().map(|a| a.area())
    }

    pub fn perimeter(&self) -> Option<f64> {
        self.geometry.as_area().map(|a| a.perimeter())
    }

    pub fn vertices(&self) -> Option<Vec<Point>> {
        self.geometry.as_line().map(|l| l.vertices())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trip() {
        for kind in ShapeKind::ALL {
            assert_eq!(kind.as_str().parse::<ShapeKind>().ok(), Some(kind));
        }
        assert!("Bogus".parse::<ShapeKind>().is_err());
    }

    #[test]
    fn test_move_keeps_rotation() {
        let mut s = Shape::rectangle(Rect::new(0.0, 0.0, 10.0, 10.0));
        s.set_rotation_degrees(30.0);
        s.move_to(5.0, 6.0);
        s.move_by(1.0, 1.0);
        assert_eq!(s.transform().translation(), Point::new(6.0, 7.0));
        assert_eq!(s.rotation_degrees(), 30.0);
        s.rotate(15.0);
        assert_eq!(s.rotation_degrees(), 45.0);
    }

    #[test]
    fn test_bounding_box_follows_pose() {
        let mut s = Shape::rectangle(Rect::new(0.0, 0.0, 10.0, 20.0));
        s.move_to(100.0, 50.0);
        assert_eq!(s.bounding_box(), Rect::new(100.0, 50.0, 10.0, 20.0));

        s.set_rotation_degrees(90.0);
        let bb = s.bounding_box();
        assert!((bb.width - 20.0).abs() < 1e-9);
        assert!((bb.height - 10.0).abs() < 1e-9);
        assert!(bb.center().approx_eq(&Point::new(105.0, 60.0), 1e-9));
    }

    #[test]
    fn test_length_dispatch() {
        let line = Shape::line_segment(Point::new(0.0, 0.0), Point::new(3.0, 4.0));
        assert_eq!(line.length(), 5.0);
        assert!(line.area().is_none());
        assert_eq!(line.vertices().map(|v| v.len()), Some(2));

        let rect = Shape::rectangle(Rect::new(0.0, 0.0, 10.0, 20.0));
        assert_eq!(rect.length(), 60.0);
        assert!(rect.vertices().is_none());
    }
}
