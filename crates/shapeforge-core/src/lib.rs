//! # ShapeForge core
//!
//! Shape model and document codec for the ShapeForge drawing editor.
//!
//! Shapes keep their geometry in local coordinates and carry a pose
//! (translation plus rotation about the centre of their local bounds).
//! The [`serialization`] module turns shapes into JSON records and back;
//! the same records serve as undo snapshots in the editor crate.

pub mod error;
pub mod geometry;
pub mod model;
pub mod serialization;

pub use error::{CodecError, CodecResult, PersistenceError, PersistenceResult};
pub use geometry::{snap_to_grid, Color, Pen, Point, Rect, Transform};
pub use model::{
    AreaShape, Circle, Ellipse, Geometry, LineSegment, LineShape, Polygon, Polyline, Rectangle,
    Shape, ShapeGeometry, ShapeKind, Triangle,
};
pub use serialization::{
    apply_record, deserialize, load_from_file, save_to_file, serialize, Document, PenRecord,
    ShapeRecord, StyleRecord, TransformRecord, FORMAT_VERSION,
};
