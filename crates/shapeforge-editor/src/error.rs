//! Error types for the editor crate.

use shapeforge_core::PersistenceError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    /// Saving or loading the drawing failed.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

pub type EditorResult<T> = Result<T, EditorError>;
