//! Text reports for the command line.

use std::fmt;
use std::path::Path;

use anyhow::Context;
use shapeforge_core::{serialization, Rect, Shape, ShapeKind};

/// One line of `shapeforge inspect` output.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeSummary {
    pub index: usize,
    pub kind: ShapeKind,
    pub name: String,
    pub bounds: Rect,
    pub rotation: f64,
    pub length: f64,
    pub area: Option<f64>,
}

impl ShapeSummary {
    pub fn new(index: usize, shape: &Shape) -> Self {
        Self {
            index,
            kind: shape.kind(),
            name: shape.name.clone(),
            bounds: shape.bounding_box(),
            rotation: shape.rotation_degrees(),
            length: shape.length(),
            area: shape.area(),
        }
    }
}

impl fmt::Display for ShapeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = if self.name.is_empty() { "-" } else { &self.name };
        write!(
            f,
            "{:>3}  {:<12} {:<16} at ({:.2}, {:.2}) size {:.2} x {:.2}  rot {:.2}  len {:.2}",
            self.index,
            self.kind.as_str(),
            name,
            self.bounds.x,
            self.bounds.y,
            self.bounds.width,
            self.bounds.height,
            self.rotation,
            self.length,
        )?;
        if let Some(area) = self.area {
            write!(f, "  area {area:.2}")?;
        }
        Ok(())
    }
}

pub fn summarize<'a>(shapes: impl IntoIterator<Item = &'a Shape>) -> Vec<ShapeSummary> {
    shapes
        .into_iter()
        .enumerate()
        .map(|(i, shape)| ShapeSummary::new(i, shape))
        .collect()
}

/// Overall extent of the drawing in scene coordinates.
pub fn drawing_bounds<'a>(shapes: impl IntoIterator<Item = &'a Shape>) -> Option<Rect> {
    shapes
        .into_iter()
        .map(Shape::bounding_box)
        .reduce(|a, b| a.united(&b))
}

/// Rewrites a drawing in canonical form: unreadable records dropped,
/// rectangles normalized, every optional field written out.
pub fn normalize_file(input: &Path, output: &Path) -> anyhow::Result<usize> {
    let shapes = serialization::load_from_file(input)
        .with_context(|| format!("Failed to load {}", input.display()))?;
    serialization::save_to_file(output, &shapes)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    Ok(shapes.len())
}
