//! # ShapeForge
//!
//! Editing core for a 2D vector drawing tool.
//!
//! ## Architecture
//!
//! ShapeForge is organized as a workspace with multiple crates:
//!
//! 1. **shapeforge-core** - Shape model, measurements, JSON document codec
//! 2. **shapeforge-settings** - Grid, handle and gesture configuration
//! 3. **shapeforge-editor** - Items, handles, drawing tools, undo/redo, scene
//! 4. **shapeforge** - Command line front end and logging setup

pub mod report;

pub use shapeforge_core as shapes;
pub use shapeforge_editor as editor;
pub use shapeforge_settings as settings;

pub use shapeforge_core::{Document, Shape, ShapeKind};
pub use shapeforge_editor::{Scene, SceneEvent};
pub use shapeforge_settings::EditorConfig;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Log records go to stderr so command output on stdout stays clean.
/// `RUST_LOG` overrides the default `info` level; `json` switches to one
/// JSON object per line.
pub fn init_logging(json: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if json {
        let fmt_layer = fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_current_span(false);
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_line_number(true);
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    }

    Ok(())
}
