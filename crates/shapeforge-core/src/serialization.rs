//! JSON document format for drawings.
//!
//! A document is `{ "version": 1, "shapes": [...] }` where every entry is a
//! [`ShapeRecord`]. Records are also used as undo snapshots, so they carry
//! everything needed to rebuild a shape: type tag, name, style, pose and the
//! type-specific `geom` payload.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

use crate::error::{CodecError, CodecResult, PersistenceError, PersistenceResult};
use crate::geometry::Color;
use crate::model::{Geometry, Shape, ShapeKind};

/// Document format version written on save.
pub const FORMAT_VERSION: u32 = 1;

fn default_version() -> u32 {
    FORMAT_VERSION
}

/// Root of a drawing file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub shapes: Vec<ShapeRecord>,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            version: FORMAT_VERSION,
            shapes: Vec::new(),
        }
    }
}

impl Document {
    /// Parses a document, skipping entries of `shapes` that are not records.
    ///
    /// Broken JSON syntax or a root that is not an object is an error.
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        let root: Value = serde_json::from_str(text)?;
        let Value::Object(mut map) = root else {
            return Err(serde::de::Error::custom("document root is not a JSON object"));
        };

        let version = map
            .get("version")
            .and_then(Value::as_u64)
            .and_then(|v| u32::try_from(v).ok())
            .unwrap_or(FORMAT_VERSION);

        let entries = match map.remove("shapes") {
            Some(Value::Array(entries)) => entries,
            _ => Vec::new(),
        };

        let mut shapes = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            if !entry.is_object() {
                tracing::debug!(index, "Skipping non-object shape entry");
                continue;
            }
            match serde_json::from_value::<ShapeRecord>(entry) {
                Ok(record) => shapes.push(record),
                Err(e) => tracing::warn!(index, error = %e, "Skipping malformed shape record"),
            }
        }

        Ok(Self { version, shapes })
    }

    pub fn to_json_string_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// JSON form of one shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeRecord {
    #[serde(rename = "type", default)]
    pub type_name: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub style: StyleRecord,
    #[serde(default)]
    pub transform: TransformRecord,
    #[serde(default)]
    pub geom: Value,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StyleRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default)]
    pub pen: PenRecord,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PenRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TransformRecord {
    #[serde(default)]
    pub tx: f64,
    #[serde(default)]
    pub ty: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
}

fn parse_color(text: &str) -> Option<Color> {
    let parsed = Color::from_hex(text);
    if parsed.is_none() {
        tracing::warn!(color = %text, "Ignoring unparseable colour");
    }
    parsed
}

impl Shape {
    pub fn to_record(&self) -> ShapeRecord {
        let t = self.transform();
        ShapeRecord {
            type_name: self.type_name().to_string(),
            name: self.name.clone(),
            style: StyleRecord {
                color: Some(self.color.to_hex_argb()),
                pen: PenRecord {
                    width: Some(self.pen.width),
                    color: Some(self.pen.color.to_hex_argb()),
                },
            },
            transform: TransformRecord {
                tx: t.tx,
                ty: t.ty,
                rotation: Some(t.rotation_deg),
            },
            geom: self.geometry().to_geom(),
        }
    }

    /// Builds a new shape from a record.
    pub fn from_record(record: &ShapeRecord) -> CodecResult<Shape> {
        let kind: ShapeKind = record.type_name.parse()?;
        let geometry = Geometry::from_geom(kind, &record.geom)
            .map_err(|source| CodecError::Geometry { kind, source })?;
        let mut shape = Shape::new(geometry);
        shape.apply_common(record);
        Ok(shape)
    }

    /// Applies name, style and pose from a record, leaving geometry alone.
    ///
    /// Colours that fail to parse keep their current value. A record without
    /// a pen colour strokes with the fill colour.
    pub fn apply_common(&mut self, record: &ShapeRecord) {
        self.name = record.name.clone();

        if let Some(color) = record.style.color.as_deref().and_then(parse_color) {
            self.color = color;
        }
        if let Some(width) = record.style.pen.width {
            self.pen.width = width;
        }
        match record.style.pen.color.as_deref() {
            Some(text) => {
                if let Some(color) = parse_color(text) {
                    self.pen.color = color;
                }
            }
            None => self.pen.color = self.color,
        }

        self.move_to(record.transform.tx, record.transform.ty);
        self.set_rotation_degrees(record.transform.rotation.unwrap_or(0.0));
    }
}

/// Mutates `shape` in place from a record of the same type.
///
/// The shape is left untouched when the record is rejected.
pub fn apply_record(shape: &mut Shape, record: &ShapeRecord) -> CodecResult<()> {
    let kind = shape.kind();
    if record.type_name != kind.as_str() {
        return Err(CodecError::TypeMismatch {
            expected: kind,
            found: record.type_name.clone(),
        });
    }
    let geometry = Geometry::from_geom(kind, &record.geom)
        .map_err(|source| CodecError::Geometry { kind, source })?;
    *shape.geometry_mut() = geometry;
    shape.apply_common(record);
    Ok(())
}

pub fn serialize<'a>(shapes: impl IntoIterator<Item = &'a Shape>) -> Document {
    Document {
        version: FORMAT_VERSION,
        shapes: shapes.into_iter().map(Shape::to_record).collect(),
    }
}

/// Rebuilds shapes from a document, dropping records that cannot be decoded.
pub fn deserialize(document: &Document) -> Vec<Shape> {
    document
        .shapes
        .iter()
        .filter_map(|record| match Shape::from_record(record) {
            Ok(shape) => Some(shape),
            Err(CodecError::UnknownType(type_name)) => {
                tracing::debug!(%type_name, "Dropping record of unknown type");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, name = %record.name, "Dropping undecodable record");
                None
            }
        })
        .collect()
}

/// Writes shapes as an indented JSON document, overwriting `path`.
pub fn save_to_file<'a>(
    path: impl AsRef<Path>,
    shapes: impl IntoIterator<Item = &'a Shape>,
) -> PersistenceResult<()> {
    let path = path.as_ref();
    let document = serialize(shapes);
    let json = document
        .to_json_string_pretty()
        .map_err(|e| PersistenceError::Encode(e.to_string()))?;
    std::fs::write(path, json).map_err(|source| PersistenceError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), count = document.shapes.len(), "Saved drawing");
    Ok(())
}

pub fn load_from_file(path: impl AsRef<Path>) -> PersistenceResult<Vec<Shape>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| PersistenceError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let document = Document::from_json_str(&content)?;
    let shapes = deserialize(&document);
    tracing::info!(
        path = %path.display(),
        records = document.shapes.len(),
        loaded = shapes.len(),
        "Loaded drawing"
    );
    Ok(shapes)
}
