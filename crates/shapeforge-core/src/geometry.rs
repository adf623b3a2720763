//! Geometry primitives shared by the shape model and the editor.
//!
//! All coordinates are `f64` scene units. Rotation angles are degrees,
//! positive angles turn clockwise on a y-down canvas (x toward y).

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// A 2D point or vector.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Euclidean length when the point is read as a vector.
    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Sum of absolute components, used for cheap degeneracy checks.
    pub fn manhattan_length(&self) -> f64 {
        self.x.abs() + self.y.abs()
    }

    /// Angle of the vector in degrees, in `(-180, 180]`.
    pub fn angle_degrees(&self) -> f64 {
        self.y.atan2(self.x).to_degrees()
    }

    /// Rotates the vector about the origin.
    pub fn rotated(&self, angle_deg: f64) -> Point {
        let (s, c) = angle_deg.to_radians().sin_cos();
        Point::new(self.x * c - self.y * s, self.x * s + self.y * c)
    }

    pub fn approx_eq(&self, other: &Point, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Point {
    type Output = Point;
    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;
    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// Axis-aligned rectangle stored as origin + size.
///
/// Width and height may be negative; [`Rect::normalized`] flips them so the
/// origin becomes the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Normalized rectangle spanning two opposite corners.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Rect::new(a.x, a.y, b.x - a.x, b.y - a.y).normalized()
    }

    /// Smallest rectangle containing every point, `None` for an empty iterator.
    pub fn from_points<I: IntoIterator<Item = Point>>(points: I) -> Option<Self> {
        let mut it = points.into_iter();
        let first = it.next()?;
        let (mut min, mut max) = (first, first);
        for p in it {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Some(Rect::new(min.x, min.y, max.x - min.x, max.y - min.y))
    }

    pub fn normalized(&self) -> Self {
        let mut r = *self;
        if r.width < 0.0 {
            r.x += r.width;
            r.width = -r.width;
        }
        if r.height < 0.0 {
            r.y += r.height;
            r.height = -r.height;
        }
        r
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.left(), self.top())
    }

    pub fn top_right(&self) -> Point {
        Point::new(self.right(), self.top())
    }

    pub fn bottom_right(&self) -> Point {
        Point::new(self.right(), self.bottom())
    }

    pub fn bottom_left(&self) -> Point {
        Point::new(self.left(), self.bottom())
    }

    /// Corners in TL, TR, BR, BL order.
    pub fn corners(&self) -> [Point; 4] {
        [
            self.top_left(),
            self.top_right(),
            self.bottom_right(),
            self.bottom_left(),
        ]
    }

    /// Moves the edges outward (or inward for negative values).
    pub fn adjusted(&self, dx1: f64, dy1: f64, dx2: f64, dy2: f64) -> Self {
        Rect::new(
            self.x + dx1,
            self.y + dy1,
            self.width - dx1 + dx2,
            self.height - dy1 + dy2,
        )
    }

    pub fn padded(&self, margin: f64) -> Self {
        self.adjusted(-margin, -margin, margin, margin)
    }

    pub fn united(&self, other: &Rect) -> Self {
        let a = self.normalized();
        let b = other.normalized();
        let left = a.left().min(b.left());
        let top = a.top().min(b.top());
        let right = a.right().max(b.right());
        let bottom = a.bottom().max(b.bottom());
        Rect::new(left, top, right - left, bottom - top)
    }

    pub fn contains(&self, p: &Point) -> bool {
        let r = self.normalized();
        p.x >= r.left() && p.x <= r.right() && p.y >= r.top() && p.y <= r.bottom()
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }
}

/// Translation plus rotation. Scale is reserved and always 1.
///
/// Local points map to scene space by rotating about a pivot, then
/// translating: `scene = t + pivot + R(l - pivot)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transform {
    pub tx: f64,
    pub ty: f64,
    pub rotation_deg: f64,
}

impl Transform {
    pub fn new(tx: f64, ty: f64, rotation_deg: f64) -> Self {
        Self {
            tx,
            ty,
            rotation_deg,
        }
    }

    pub fn translation(&self) -> Point {
        Point::new(self.tx, self.ty)
    }

    pub fn map_point(&self, local: Point, pivot: Point) -> Point {
        self.translation() + pivot + (local - pivot).rotated(self.rotation_deg)
    }

    pub fn inverse_map_point(&self, scene: Point, pivot: Point) -> Point {
        pivot + (scene - self.translation() - pivot).rotated(-self.rotation_deg)
    }

    /// Axis-aligned hull of the mapped rectangle.
    pub fn map_rect(&self, local: &Rect, pivot: Point) -> Rect {
        let corners = local.normalized().corners();
        // from_points only returns None for an empty iterator
        Rect::from_points(corners.iter().map(|c| self.map_point(*c, pivot))).unwrap_or(*local)
    }
}

/// ARGB colour with `#AARRGGBB` text form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { a: 255, r, g, b }
    }

    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    /// Lowercase `#aarrggbb`.
    pub fn to_hex_argb(&self) -> String {
        format!("#{:02x}{:02x}{:02x}{:02x}", self.a, self.r, self.g, self.b)
    }

    /// Parses `#RGB`, `#RRGGBB` or `#AARRGGBB`.
    pub fn from_hex(text: &str) -> Option<Self> {
        let hex = text.trim().strip_prefix('#')?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            3 => {
                let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
                Some(Color::rgb(nibble(0)?, nibble(1)?, nibble(2)?))
            }
            6 => Some(Color::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Color::argb(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex_argb())
    }
}

/// Stroke settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pen {
    pub color: Color,
    pub width: f64,
}

impl Default for Pen {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
        }
    }
}

/// Rounds each coordinate to the nearest multiple of `grid`.
///
/// Non-positive grid sizes fall back to a unit grid.
pub fn snap_to_grid(p: Point, grid: f64) -> Point {
    let s = if grid <= 0.0 { 1.0 } else { grid };
    Point::new((p.x / s).round() * s, (p.y / s).round() * s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_to_grid() {
        let p = snap_to_grid(Point::new(13.2, 27.9), 10.0);
        assert_eq!(p, Point::new(10.0, 30.0));
        let q = snap_to_grid(Point::new(2.4, -2.6), 0.0);
        assert_eq!(q, Point::new(2.0, -3.0));
    }

    #[test]
    fn test_rect_normalized() {
        let r = Rect::new(10.0, 10.0, -4.0, -6.0).normalized();
        assert_eq!(r, Rect::new(6.0, 4.0, 4.0, 6.0));
    }

    #[test]
    fn test_transform_round_trip() {
        let t = Transform::new(5.0, -3.0, 37.0);
        let pivot = Point::new(10.0, 20.0);
        let local = Point::new(1.0, 2.0);
        let back = t.inverse_map_point(t.map_point(local, pivot), pivot);
        assert!(back.approx_eq(&local, 1e-9));
    }

    #[test]
    fn test_rotation_direction() {
        let v = Point::new(0.0, -1.0).rotated(90.0);
        assert!(v.approx_eq(&Point::new(1.0, 0.0), 1e-12));
    }

    #[test]
    fn test_color_hex() {
        assert_eq!(Color::from_hex("#ff102030"), Some(Color::argb(255, 0x10, 0x20, 0x30)));
        assert_eq!(Color::from_hex("#102030"), Some(Color::rgb(0x10, 0x20, 0x30)));
        assert_eq!(Color::from_hex("#fff"), Some(Color::rgb(255, 255, 255)));
        assert_eq!(Color::from_hex("red"), None);
        assert_eq!(Color::argb(128, 1, 2, 3).to_hex_argb(), "#80010203");
    }
}
