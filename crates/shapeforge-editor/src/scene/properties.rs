//! Property sheet of the active shape.
//!
//! The active shape is the bottom-most selected one. Edits made through the
//! setters below are recorded as `EditShapeJson` steps.

use shapeforge_core::{apply_record, Color, Shape};

use super::Scene;
use crate::commands::{EditShapeJson, UndoCommand};
use crate::item::ItemId;

const NOT_APPLICABLE: &str = "-";

/// Display strings for the property inspector. Measurements that do not
/// apply to the shape read `-`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySheet {
    pub type_name: String,
    pub name: String,
    pub color: String,
    pub pen_color: String,
    pub pen_width: String,
    pub rotation: String,
    pub length: String,
    pub perimeter: String,
    pub area: String,
}

fn number(value: f64) -> String {
    format!("{value:.2}")
}

fn measure(value: Option<f64>) -> String {
    value.map_or_else(|| NOT_APPLICABLE.to_string(), number)
}

impl PropertySheet {
    pub fn from_shape(shape: &Shape) -> Self {
        let length = shape.geometry().as_line().map(|l| l.length());
        Self {
            type_name: shape.type_name().to_string(),
            name: shape.name.clone(),
            color: shape.color.to_hex_argb(),
            pen_color: shape.pen.color.to_hex_argb(),
            pen_width: number(shape.pen.width),
            rotation: number(shape.rotation_degrees()),
            length: measure(length),
            perimeter: measure(shape.perimeter()),
            area: measure(shape.area()),
        }
    }
}

impl Scene {
    pub fn active_item(&self) -> Option<ItemId> {
        self.items
            .iter()
            .find(|item| item.is_selected())
            .map(|item| item.id())
    }

    pub fn active_properties(&self) -> Option<PropertySheet> {
        let id = self.active_item()?;
        self.items
            .get(id)
            .map(|item| PropertySheet::from_shape(item.shape()))
    }

    pub fn set_active_name(&mut self, name: &str) -> bool {
        self.edit_active(|shape| shape.name = name.to_string())
    }

    /// Negative widths clamp to zero.
    pub fn set_active_pen_width(&mut self, width: f64) -> bool {
        self.edit_active(|shape| shape.pen.width = width.max(0.0))
    }

    pub fn set_active_color(&mut self, color: Color) -> bool {
        self.edit_active(|shape| shape.color = color)
    }

    pub fn set_active_pen_color(&mut self, color: Color) -> bool {
        self.edit_active(|shape| shape.pen.color = color)
    }

    /// Applies `edit` to a copy of the active shape and commits the
    /// difference. Returns false when nothing is active or nothing changed.
    fn edit_active(&mut self, edit: impl FnOnce(&mut Shape)) -> bool {
        let Some(id) = self.active_item() else {
            return false;
        };
        let Some(item) = self.items.get(id) else {
            return false;
        };
        let old = item.shape().to_record();
        let mut edited = item.shape().clone();
        edit(&mut edited);
        let new = edited.to_record();
        if new == old {
            return false;
        }

        match self.undo.as_mut() {
            Some(stack) => {
                let cmd = UndoCommand::EditShapeJson(EditShapeJson { id, old, new });
                stack.push(cmd, &mut self.items, &self.ctx);
            }
            None => {
                if let Some(item) = self.items.get_mut(id) {
                    if let Err(e) = apply_record(item.shape_mut(), &new) {
                        tracing::error!(item = %id, error = %e, "Property edit rejected");
                        return false;
                    }
                    item.sync_from_shape();
                    item.update_handles(&self.ctx);
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shapeforge_core::{Point, Rect};

    #[test]
    fn test_sheet_for_line() {
        let sheet = PropertySheet::from_shape(
            &Shape::line_segment(Point::ZERO, Point::new(3.0, 4.0)).with_name("edge"),
        );
        assert_eq!(sheet.type_name, "LineSegment");
        assert_eq!(sheet.name, "edge");
        assert_eq!(sheet.length, "5.00");
        assert_eq!(sheet.area, "-");
        assert_eq!(sheet.perimeter, "-");
    }

    #[test]
    fn test_sheet_for_rectangle() {
        let sheet = PropertySheet::from_shape(&Shape::rectangle(Rect::new(0.0, 0.0, 10.0, 20.0)));
        assert_eq!(sheet.length, "-");
        assert_eq!(sheet.perimeter, "60.00");
        assert_eq!(sheet.area, "200.00");
        assert_eq!(sheet.color, "#ff000000");
        assert_eq!(sheet.pen_width, "1.00");
    }
}
