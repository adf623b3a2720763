//! ShapeForge Settings Crate
//!
//! Editor configuration (grid, handle appearance, gesture thresholds) and its
//! TOML/JSON persistence.

pub mod config;
pub mod error;

pub use config::{EditorConfig, GestureSettings, GridSettings, HandleSettings};
pub use error::{SettingsError, SettingsResult};
