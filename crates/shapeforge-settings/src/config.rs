//! Editor configuration for ShapeForge
//!
//! Configuration is organized into logical sections:
//! - Grid settings (visibility, snapping, spacing)
//! - Handle appearance (screen size, rotation handle offset)
//! - Gesture thresholds (minimum shape size, point dedup, commit epsilons)
//!
//! Files are TOML or JSON, picked by extension. Missing keys take their
//! defaults so older files keep loading.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{SettingsError, SettingsResult};

/// Background grid and snapping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    /// Draw the background grid
    pub show: bool,
    /// Snap gestures to grid intersections
    pub snap: bool,
    /// Grid spacing in scene units
    pub size: f64,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            show: true,
            snap: false,
            size: 20.0,
        }
    }
}

/// Control point appearance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandleSettings {
    /// Handle edge length in screen pixels, independent of zoom
    pub size_px: f64,
    /// Distance of the rotation handle above the bounding rect
    pub rotation_offset: f64,
}

impl Default for HandleSettings {
    fn default() -> Self {
        Self {
            size_px: 8.0,
            rotation_offset: 20.0,
        }
    }
}

/// Thresholds that decide whether a gesture produces a change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureSettings {
    /// Smallest line length, rect side, or radius a creation tool commits
    pub min_shape_size: f64,
    /// Polygon clicks closer than this to the previous point are dropped
    pub polygon_dedup: f64,
    /// Minimum travel for a move to be recorded as an undo step
    pub move_epsilon: f64,
    /// Minimum rotation change (degrees) to be recorded as an undo step
    pub rotation_epsilon_deg: f64,
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self {
            min_shape_size: 1.0,
            polygon_dedup: 0.5,
            move_epsilon: 0.1,
            rotation_epsilon_deg: 0.1,
        }
    }
}

/// Complete editor configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub grid: GridSettings,
    pub handles: HandleSettings,
    pub gestures: GestureSettings,
}

enum Format {
    Toml,
    Json,
}

fn format_of(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => Ok(Format::Toml),
        Some("json") => Ok(Format::Json),
        other => Err(SettingsError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}

fn invalid(key: &str, reason: &str) -> SettingsError {
    SettingsError::Invalid {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

impl EditorConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = match format {
            Format::Toml => toml::from_str(&content)?,
            Format::Json => serde_json::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!(path = %path.display(), "Loaded editor config");
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Toml => toml::to_string_pretty(self)?,
            Format::Json => serde_json::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| SettingsError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(path, content).map_err(|source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        if !(self.grid.size > 0.0) {
            return Err(invalid("grid.size", "must be > 0"));
        }
        if !(self.handles.size_px > 0.0) {
            return Err(invalid("handles.size_px", "must be > 0"));
        }
        if !(self.handles.rotation_offset >= 0.0) {
            return Err(invalid("handles.rotation_offset", "must be >= 0"));
        }

        let thresholds = [
            ("gestures.min_shape_size", self.gestures.min_shape_size),
            ("gestures.polygon_dedup", self.gestures.polygon_dedup),
            ("gestures.move_epsilon", self.gestures.move_epsilon),
            ("gestures.rotation_epsilon_deg", self.gestures.rotation_epsilon_deg),
        ];
        for (key, value) in thresholds {
            if !(value >= 0.0) {
                return Err(invalid(key, "must be >= 0"));
            }
        }

        Ok(())
    }

    /// Platform config location: `<config dir>/shapeforge/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        let mut path = dirs::config_dir().ok_or_else(|| {
            SettingsError::ConfigDirectory("platform config directory is unknown".to_string())
        })?;
        path.push("shapeforge");
        path.push("config.toml");
        Ok(path)
    }

    /// Loads `path`, or defaults when the file does not exist yet.
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No editor config, using defaults");
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::new();
        assert!(config.grid.show);
        assert!(!config.grid.snap);
        assert_eq!(config.grid.size, 20.0);
        assert_eq!(config.handles.size_px, 8.0);
        assert_eq!(config.handles.rotation_offset, 20.0);
        assert_eq!(config.gestures.min_shape_size, 1.0);
        assert_eq!(config.gestures.polygon_dedup, 0.5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_grid() {
        let mut config = EditorConfig::default();
        config.grid.size = 0.0;
        assert!(matches!(
            config.validate(),
            Err(SettingsError::Invalid { ref key, .. }) if key == "grid.size"
        ));

        config.grid.size = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_negative_threshold() {
        let mut config = EditorConfig::default();
        config.gestures.move_epsilon = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: EditorConfig = toml::from_str("[grid]\nsnap = true\n").unwrap();
        assert!(config.grid.snap);
        assert_eq!(config.grid.size, 20.0);
        assert_eq!(config.handles, HandleSettings::default());
    }
}
