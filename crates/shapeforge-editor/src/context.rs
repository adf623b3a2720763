//! Settings and view state that gestures read while they run.

use shapeforge_core::{snap_to_grid, Point};
use shapeforge_settings::{EditorConfig, GestureSettings, GridSettings, HandleSettings};

/// Passed explicitly into item and handle operations so they never need to
/// reach back into the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionContext {
    pub grid: GridSettings,
    pub handles: HandleSettings,
    pub gestures: GestureSettings,
    /// Screen pixels per scene unit.
    pub view_scale: f64,
}

impl Default for InteractionContext {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default())
    }
}

impl InteractionContext {
    pub fn from_config(config: &EditorConfig) -> Self {
        Self {
            grid: config.grid.clone(),
            handles: config.handles.clone(),
            gestures: config.gestures.clone(),
            view_scale: 1.0,
        }
    }

    /// Grid-snapped point when snapping is on, the input otherwise.
    pub fn snap_point(&self, p: Point) -> Point {
        if self.grid.snap {
            snap_to_grid(p, self.grid.size)
        } else {
            p
        }
    }

    /// Handle edge length in scene units at the current zoom.
    pub fn handle_size(&self) -> f64 {
        if self.view_scale > f64::EPSILON {
            self.handles.size_px / self.view_scale
        } else {
            self.handles.size_px
        }
    }

    /// Half the handle size: a press within this distance (per axis) hits it.
    pub fn handle_hit_radius(&self) -> f64 {
        self.handle_size() / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_point_respects_toggle() {
        let mut ctx = InteractionContext::default();
        let p = Point::new(13.2, 27.9);
        assert_eq!(ctx.snap_point(p), p);

        ctx.grid.snap = true;
        ctx.grid.size = 10.0;
        assert_eq!(ctx.snap_point(p), Point::new(10.0, 30.0));

        ctx.grid.size = -1.0;
        assert_eq!(ctx.snap_point(p), Point::new(13.0, 28.0));
    }

    #[test]
    fn test_handle_size_is_screen_fixed() {
        let mut ctx = InteractionContext::default();
        assert_eq!(ctx.handle_size(), 8.0);
        ctx.view_scale = 2.0;
        assert_eq!(ctx.handle_size(), 4.0);
        assert_eq!(ctx.handle_hit_radius(), 2.0);
    }
}
