//! Error types for the shape model and document codec.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::model::ShapeKind;

/// Errors raised while reading or writing a drawing document.
///
/// The `Display` form is meant to be shown to the user as-is.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// The document file could not be read.
    #[error("Cannot open {} for reading: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The document file could not be written.
    #[error("Cannot open {} for writing: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file content is not a valid document.
    #[error("Invalid document: {0}")]
    Parse(#[from] serde_json::Error),

    /// The document could not be encoded.
    #[error("Failed to encode document: {0}")]
    Encode(String),
}

/// Errors raised when a record is applied to or decoded into a shape.
#[derive(Error, Debug)]
pub enum CodecError {
    /// The record describes a different shape type than the target.
    #[error("Record type '{found}' does not match shape type '{expected}'")]
    TypeMismatch { expected: ShapeKind, found: String },

    /// The record carries a type tag outside the known set.
    #[error("Unknown shape type: {0}")]
    UnknownType(String),

    /// The `geom` payload has fields of the wrong JSON type.
    #[error("Invalid {kind} geometry: {source}")]
    Geometry {
        kind: ShapeKind,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type alias for document persistence.
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Result type alias for record application.
pub type CodecResult<T> = Result<T, CodecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persistence_error_display() {
        let err = PersistenceError::Read {
            path: PathBuf::from("/tmp/missing.json"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(
            err.to_string(),
            "Cannot open /tmp/missing.json for reading: not found"
        );

        let err = PersistenceError::Encode("bad float".to_string());
        assert_eq!(err.to_string(), "Failed to encode document: bad float");
    }

    #[test]
    fn test_codec_error_display() {
        let err = CodecError::TypeMismatch {
            expected: ShapeKind::Circle,
            found: "Rectangle".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Record type 'Rectangle' does not match shape type 'Circle'"
        );

        let err = CodecError::UnknownType("Bogus".to_string());
        assert_eq!(err.to_string(), "Unknown shape type: Bogus");
    }

    #[test]
    fn test_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: PersistenceError = json_err.into();
        assert!(matches!(err, PersistenceError::Parse(_)));
    }
}
