//! Creation tools.
//!
//! [`ToolState`] turns pointer gestures into new shapes. It knows nothing
//! about items or hit testing: the scene tells it whether a press landed on
//! an already selected item and acts on the returned [`ToolOutcome`].
//! All points handed in are scene coordinates, snapped by the caller.

use shapeforge_core::{Point, Rect, Shape};

use crate::context::InteractionContext;

/// Drawing modes for the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawingMode {
    /// Select and edit existing shapes.
    #[default]
    None,
    Line,
    Rect,
    Circle,
    Ellipse,
    Polygon,
    Triangle,
}

impl DrawingMode {
    /// Press, drag, release tools.
    pub fn is_single_drag(&self) -> bool {
        matches!(
            self,
            DrawingMode::Line | DrawingMode::Rect | DrawingMode::Circle | DrawingMode::Ellipse
        )
    }

    /// Click-per-vertex tools.
    pub fn is_multi_click(&self) -> bool {
        matches!(self, DrawingMode::Polygon | DrawingMode::Triangle)
    }

    pub fn label(&self) -> &'static str {
        match self {
            DrawingMode::None => "Select",
            DrawingMode::Line => "Line",
            DrawingMode::Rect => "Rectangle",
            DrawingMode::Circle => "Circle",
            DrawingMode::Ellipse => "Ellipse",
            DrawingMode::Polygon => "Polygon",
            DrawingMode::Triangle => "Triangle",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Rubber-band outline of the shape being created. Renderers draw it dashed.
#[derive(Debug, Clone, PartialEq)]
pub enum Preview {
    Line { from: Point, to: Point },
    Rect(Rect),
    Circle { center: Point, radius: f64 },
    Ellipse { center: Point, rx: f64, ry: f64 },
    /// Placed vertices plus the segment following the pointer.
    Path {
        points: Vec<Point>,
        cursor: Option<Point>,
    },
}

impl Preview {
    /// Scene extent of the outline.
    pub fn bounds(&self) -> Rect {
        match self {
            Preview::Line { from, to } => Rect::from_corners(*from, *to),
            Preview::Rect(r) => r.normalized(),
            Preview::Circle { center, radius } => {
                Rect::new(center.x - radius, center.y - radius, 2.0 * radius, 2.0 * radius)
            }
            Preview::Ellipse { center, rx, ry } => {
                Rect::new(center.x - rx, center.y - ry, 2.0 * rx, 2.0 * ry)
            }
            Preview::Path { points, cursor } => {
                Rect::from_points(points.iter().copied().chain(*cursor)).unwrap_or_default()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutcome {
    /// Not a tool gesture; the scene should handle it as selection input.
    Forward,
    /// The tool used the event.
    Consumed,
    /// A gesture ended without producing a shape.
    Aborted,
    /// A shape is ready to be added to the scene.
    Commit(Shape),
}

#[derive(Debug, Clone, Default)]
pub struct ToolState {
    mode: DrawingMode,
    start: Option<Point>,
    points: Vec<Point>,
    preview: Option<Preview>,
}

impl ToolState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> DrawingMode {
        self.mode
    }

    /// Switches tools, dropping any gesture in progress. Returns true when
    /// the mode actually changed.
    pub fn set_mode(&mut self, mode: DrawingMode) -> bool {
        self.reset();
        if self.mode == mode {
            return false;
        }
        self.mode = mode;
        true
    }

    /// True while a shape is being created.
    pub fn is_active(&self) -> bool {
        self.start.is_some() || !self.points.is_empty()
    }

    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    /// Placed vertices of a multi-click gesture.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    fn reset(&mut self) {
        self.start = None;
        self.points.clear();
        self.preview = None;
    }

    /// Drops the gesture in progress. Returns true if there was one.
    pub fn cancel(&mut self) -> bool {
        let active = self.is_active();
        self.reset();
        active
    }

    pub fn press(
        &mut self,
        p: Point,
        button: MouseButton,
        on_selected_item: bool,
        ctx: &InteractionContext,
    ) -> ToolOutcome {
        if self.mode.is_single_drag() {
            if button != MouseButton::Left || (on_selected_item && !self.is_active()) {
                return ToolOutcome::Forward;
            }
            self.start = Some(p);
            self.preview = Some(self.drag_preview(p, p));
            return ToolOutcome::Consumed;
        }

        if !self.mode.is_multi_click() {
            return ToolOutcome::Forward;
        }

        match button {
            MouseButton::Left => {
                if !self.is_active() {
                    if on_selected_item {
                        return ToolOutcome::Forward;
                    }
                    self.points.push(p);
                } else if self
                    .points
                    .last()
                    .is_some_and(|last| last.distance_to(&p) >= ctx.gestures.polygon_dedup)
                {
                    self.points.push(p);
                }

                if self.mode == DrawingMode::Triangle && self.points.len() >= 3 {
                    let shape = Shape::triangle(self.points[0], self.points[1], self.points[2]);
                    self.reset();
                    tracing::debug!("Triangle committed");
                    return ToolOutcome::Commit(shape);
                }
                self.preview = Some(Preview::Path {
                    points: self.points.clone(),
                    cursor: Some(p),
                });
                ToolOutcome::Consumed
            }
            MouseButton::Right if self.is_active() => match self.mode {
                DrawingMode::Polygon => self.finish_polygon(ctx),
                _ => {
                    self.reset();
                    ToolOutcome::Aborted
                }
            },
            _ => ToolOutcome::Forward,
        }
    }

    /// Updates the preview. Returns true if it changed.
    pub fn pointer_move(&mut self, p: Point) -> bool {
        if let Some(start) = self.start {
            self.preview = Some(self.drag_preview(start, p));
            return true;
        }
        if !self.points.is_empty() {
            self.preview = Some(Preview::Path {
                points: self.points.clone(),
                cursor: Some(p),
            });
            return true;
        }
        false
    }

    pub fn release(&mut self, p: Point, button: MouseButton, ctx: &InteractionContext) -> ToolOutcome {
        if self.mode.is_multi_click() && self.is_active() {
            return ToolOutcome::Consumed;
        }
        let Some(start) = self.start else {
            return ToolOutcome::Forward;
        };
        if button != MouseButton::Left {
            return ToolOutcome::Consumed;
        }
        self.reset();

        let min = ctx.gestures.min_shape_size;
        let shape = match self.mode {
            DrawingMode::Line => {
                (start.distance_to(&p) >= min).then(|| Shape::line_segment(start, p))
            }
            DrawingMode::Rect => {
                let r = Rect::from_corners(start, p);
                (r.width >= min && r.height >= min).then(|| Shape::rectangle(r))
            }
            DrawingMode::Circle => {
                let radius = start.distance_to(&p);
                (radius >= min).then(|| Shape::circle(start, radius))
            }
            DrawingMode::Ellipse => {
                let rx = (p.x - start.x).abs();
                let ry = (p.y - start.y).abs();
                (rx >= min && ry >= min).then(|| Shape::ellipse(start, rx, ry))
            }
            DrawingMode::None | DrawingMode::Polygon | DrawingMode::Triangle => None,
        };

        match shape {
            Some(shape) => {
                tracing::debug!(mode = ?self.mode, "Drag shape committed");
                ToolOutcome::Commit(shape)
            }
            None => {
                tracing::debug!(mode = ?self.mode, "Drag below minimum size, discarded");
                ToolOutcome::Aborted
            }
        }
    }

    /// Double-click finishes a polygon; anywhere else it acts as a press.
    pub fn double_click(
        &mut self,
        p: Point,
        button: MouseButton,
        on_selected_item: bool,
        ctx: &InteractionContext,
    ) -> ToolOutcome {
        if self.mode == DrawingMode::Polygon && button == MouseButton::Left && self.is_active() {
            return self.finish_polygon(ctx);
        }
        self.press(p, button, on_selected_item, ctx)
    }

    fn finish_polygon(&mut self, ctx: &InteractionContext) -> ToolOutcome {
        let dedup = ctx.gestures.polygon_dedup;
        let mut points: Vec<Point> = Vec::with_capacity(self.points.len());
        for p in self.points.drain(..) {
            if points.last().map_or(true, |last| last.distance_to(&p) >= dedup) {
                points.push(p);
            }
        }
        if points.len() > 1 {
            let first = points[0];
            if points
                .last()
                .is_some_and(|last| last.distance_to(&first) < dedup)
            {
                points.pop();
            }
        }
        self.reset();

        if points.len() < 3 {
            tracing::debug!(vertices = points.len(), "Polygon needs three vertices, discarded");
            return ToolOutcome::Aborted;
        }
        tracing::debug!(vertices = points.len(), "Polygon committed");
        ToolOutcome::Commit(Shape::polygon(points))
    }

    fn drag_preview(&self, start: Point, p: Point) -> Preview {
        match self.mode {
            DrawingMode::Rect => Preview::Rect(Rect::from_corners(start, p)),
            DrawingMode::Circle => Preview::Circle {
                center: start,
                radius: start.distance_to(&p),
            },
            DrawingMode::Ellipse => Preview::Ellipse {
                center: start,
                rx: (p.x - start.x).abs(),
                ry: (p.y - start.y).abs(),
            },
            _ => Preview::Line { from: start, to: p },
        }
    }
}
